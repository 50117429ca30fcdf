// Browser smoke tests for the JS-facing exports. Run with
// `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn unknown_mode_is_rejected_before_touching_the_page() {
    let err = sharpshot::start_game("sniper").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("unknown game mode 'sniper'"));
}

#[wasm_bindgen_test]
fn malformed_settings_are_tolerated() {
    sharpshot::configure("{ not json");
    sharpshot::configure(r#"{"sensitivity": 2.5}"#);
}

#[wasm_bindgen_test]
fn resume_without_a_session_fails() {
    assert!(sharpshot::resume_game().is_err());
}
