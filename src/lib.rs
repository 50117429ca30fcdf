//! SharpShot core crate.
//!
//! Aim trainer played on a full-window canvas under pointer lock. Five drills
//! are available (grid, flick, tracking, challenge, competitive); each one is
//! a [`modes::ModeRules`] policy driven by a [`session::Session`]. Everything
//! except the `app` glue is plain Rust and runs under `cargo test` on the
//! host.

use wasm_bindgen::prelude::*;

mod app;
pub mod config;
pub mod error;
pub mod hud;
pub mod modes;
pub mod render;
pub mod sensitivity;
pub mod session;

pub use config::Settings;
pub use error::GameError;
pub use modes::Mode;
pub use session::{ClickOutcome, InputEvent, Phase, Session, SessionEvent};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// JS-facing API
// -----------------------------------------------------------------------------

/// Begin a fresh session. `mode` is one of grid, flick, tracking, challenge,
/// competitive.
#[wasm_bindgen]
pub fn start_game(mode: &str) -> Result<(), JsValue> {
    Ok(app::start(mode)?)
}

#[wasm_bindgen]
pub fn resume_game() -> Result<(), JsValue> {
    Ok(app::resume()?)
}

#[wasm_bindgen]
pub fn end_session() -> Result<(), JsValue> {
    Ok(app::end()?)
}

/// Convert the DPI / in-game sensitivity / game fields into a pointer
/// multiplier, apply it and return it.
#[wasm_bindgen]
pub fn convert_sensitivity() -> Result<f64, JsValue> {
    Ok(app::convert_sensitivity()?)
}

#[wasm_bindgen]
pub fn set_sensitivity(value: f64) -> Result<(), JsValue> {
    Ok(app::set_sensitivity(value)?)
}

/// Replace settings from a JSON object; malformed input falls back to defaults.
#[wasm_bindgen]
pub fn configure(json: &str) {
    app::configure(json);
}
