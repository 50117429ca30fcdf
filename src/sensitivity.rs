//! Mouse sensitivity conversion.
//!
//! Players arrive with the DPI and in-game sensitivity they use in another
//! shooter. Both are folded into a "cm per 360° turn" figure, and the pointer
//! speed multiplier is the tuned baseline divided by that figure, so a player
//! who needs more desk per turn gets a slower cursor here.

/// Baseline cm/360 the trainer feels "right" at (800 DPI, 0.5 sens, Valorant).
pub const BASE_CM_PER_360: f64 = 34.3;

pub const DEFAULT_DPI: f64 = 800.0;
pub const DEFAULT_IN_GAME_SENS: f64 = 0.5;
/// Per-game yaw multiplier, defaulting to Valorant's.
pub const DEFAULT_GAME_MULTIPLIER: f64 = 10.6;

const CM_PER_INCH: f64 = 2.54;

/// Raw inputs for a conversion. Missing or nonsense values are replaced by
/// the defaults above when parsed through [`SensitivityInput::from_fields`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensitivityInput {
    pub dpi: f64,
    pub in_game_sens: f64,
    pub game_multiplier: f64,
}

impl Default for SensitivityInput {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            in_game_sens: DEFAULT_IN_GAME_SENS,
            game_multiplier: DEFAULT_GAME_MULTIPLIER,
        }
    }
}

impl SensitivityInput {
    /// Build from the text of the three settings fields. Each field is
    /// parsed on its own; a field that is absent, unparsable or not a
    /// positive number silently takes its default.
    pub fn from_fields(dpi: Option<&str>, in_game_sens: Option<&str>, game_multiplier: Option<&str>) -> Self {
        Self {
            dpi: parse_positive(dpi).unwrap_or(DEFAULT_DPI),
            in_game_sens: parse_positive(in_game_sens).unwrap_or(DEFAULT_IN_GAME_SENS),
            game_multiplier: parse_positive(game_multiplier).unwrap_or(DEFAULT_GAME_MULTIPLIER),
        }
    }

    /// Centimetres of mouse travel for a full 360° turn with these settings.
    pub fn cm_per_360(&self) -> f64 {
        (CM_PER_INCH * 360.0) / (self.dpi * self.in_game_sens * self.game_multiplier)
    }

    /// Pointer speed multiplier matching these settings.
    pub fn to_multiplier(&self) -> f64 {
        convert(self.dpi, self.in_game_sens, self.game_multiplier)
    }
}

/// Pointer speed multiplier for the given DPI, in-game sensitivity and game
/// yaw multiplier.
pub fn convert(dpi: f64, in_game_sens: f64, game_multiplier: f64) -> f64 {
    let user_cm_per_360 = (CM_PER_INCH * 360.0) / (dpi * in_game_sens * game_multiplier);
    BASE_CM_PER_360 / user_cm_per_360
}

/// Accept a slider value as a multiplier only if it is usable.
pub fn sanitize_multiplier(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Two-decimal display used by the settings panel.
pub fn format_multiplier(value: f64) -> String {
    format!("{value:.2}")
}

fn parse_positive(field: Option<&str>) -> Option<f64> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .and_then(sanitize_multiplier)
}
