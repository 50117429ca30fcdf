//! Player settings carried across sessions.
//!
//! Settings can be pushed from the page as a JSON object; any field may be
//! omitted. A malformed document never stops the game: the caller falls back
//! to defaults and a warning is logged.

use serde::Deserialize;

use crate::error::GameError;
use crate::sensitivity::{self, SensitivityInput};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Pointer speed multiplier applied to raw mouse deltas.
    pub sensitivity: f64,
    pub dpi: f64,
    pub in_game_sens: f64,
    pub game_multiplier: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            dpi: sensitivity::DEFAULT_DPI,
            in_game_sens: sensitivity::DEFAULT_IN_GAME_SENS,
            game_multiplier: sensitivity::DEFAULT_GAME_MULTIPLIER,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let parsed: Settings = serde_json::from_str(json)?;
        Ok(parsed.sanitized())
    }

    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("ignoring settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn sensitivity_input(&self) -> SensitivityInput {
        SensitivityInput {
            dpi: self.dpi,
            in_game_sens: self.in_game_sens,
            game_multiplier: self.game_multiplier,
        }
    }

    /// Recompute `sensitivity` from the stored DPI / sens / multiplier.
    pub fn apply_conversion(&mut self) -> f64 {
        self.sensitivity = self.sensitivity_input().to_multiplier();
        self.sensitivity
    }

    // Fields that parse but are unusable (zero, negative) take their defaults.
    fn sanitized(self) -> Self {
        let d = Self::default();
        let pick = |v: f64, fallback: f64| sensitivity::sanitize_multiplier(v).unwrap_or(fallback);
        Self {
            sensitivity: pick(self.sensitivity, d.sensitivity),
            dpi: pick(self.dpi, d.dpi),
            in_game_sens: pick(self.in_game_sens, d.in_game_sens),
            game_multiplier: pick(self.game_multiplier, d.game_multiplier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"sensitivity": 2.5}"#).unwrap();
        assert_eq!(s.sensitivity, 2.5);
        assert_eq!(s.dpi, 800.0);
        assert_eq!(s.game_multiplier, 10.6);
    }

    #[test]
    fn test_camel_case_fields() {
        let s = Settings::from_json(r#"{"inGameSens": 0.3, "gameMultiplier": 3.18}"#).unwrap();
        assert_eq!(s.in_game_sens, 0.3);
        assert_eq!(s.game_multiplier, 3.18);
    }

    #[test]
    fn test_malformed_json_degrades_to_default() {
        assert!(Settings::from_json("not json").is_err());
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }

    #[test]
    fn test_non_positive_values_replaced() {
        let s = Settings::from_json(r#"{"dpi": 0, "sensitivity": -1}"#).unwrap();
        assert_eq!(s.dpi, 800.0);
        assert_eq!(s.sensitivity, 1.0);
    }

    #[test]
    fn test_apply_conversion_matches_converter() {
        let mut s = Settings { dpi: 1600.0, ..Settings::default() };
        let m = s.apply_conversion();
        assert_eq!(m, sensitivity::convert(1600.0, 0.5, 10.6));
        assert_eq!(s.sensitivity, m);
    }
}
