//! Errors surfaced by the browser-facing entrypoints.
//!
//! Game logic itself cannot fail; only looking up the page (window, canvas,
//! menu elements) and naming a mode from JS can go wrong. Every variant is
//! handed back to JS as a plain string.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{id} is not a {expected}")]
    WrongElement {
        id: &'static str,
        expected: &'static str,
    },
    #[error("2d rendering context unavailable")]
    NoContext,
    #[error("unknown game mode '{0}'")]
    UnknownMode(String),
    #[error("no session has been started")]
    NoSession,
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_missing_piece() {
        assert_eq!(
            GameError::MissingElement("gameCanvas").to_string(),
            "element #gameCanvas not found"
        );
        assert_eq!(
            GameError::UnknownMode("sniper".into()).to_string(),
            "unknown game mode 'sniper'"
        );
    }

    #[test]
    fn test_settings_error_wraps_serde() {
        let err: GameError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("invalid settings:"));
    }
}
