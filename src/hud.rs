//! Text for the in-game HUD and the end-of-session summary panel.

use crate::modes::Mode;
use crate::session::{Session, Stats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub timer: String,
    pub accuracy: String,
    pub reaction: String,
    /// Tracking mode only.
    pub hover: Option<String>,
}

impl HudText {
    pub fn from_session(session: &Session) -> Self {
        let stats = session.stats();
        Self {
            score: format!("Score: {}", stats.score),
            timer: format!("Time: {}", (session.elapsed_ms() / 1000.0).floor() as u64),
            accuracy: format!("Accuracy: {}%", stats.accuracy()),
            reaction: format!("Reaction: {}s", reaction_seconds(stats)),
            hover: (session.mode() == Mode::Tracking)
                .then(|| format!("Hover: {:.2}s", stats.hover_ms / 1000.0)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub score: String,
    pub accuracy: String,
    pub reaction: String,
    /// Tracking mode only: share of the run spent on target.
    pub hover: Option<String>,
}

impl Summary {
    pub fn from_session(session: &Session) -> Self {
        let stats = session.stats();
        Self {
            score: format!("Score: {}", stats.score),
            accuracy: format!("Accuracy: {}%", stats.accuracy()),
            reaction: format!("Reaction Time: {}s", reaction_seconds(stats)),
            hover: (session.mode() == Mode::Tracking).then(|| {
                format!(
                    "On Target: {}% ({:.2}s)",
                    stats.hover_share().unwrap_or(0),
                    stats.hover_ms / 1000.0
                )
            }),
        }
    }
}

/// Mean reaction in seconds with two decimals, "0.00" before the first hit.
fn reaction_seconds(stats: &Stats) -> String {
    match stats.mean_reaction_ms() {
        Some(ms) => format!("{:.2}", ms / 1000.0),
        None => "0.00".to_string(),
    }
}
