//! Game modes and their target policies.
//!
//! Every mode answers the same four questions: what to put on the field at
//! session start (`spawn`), what happens each frame (`update`), what follows a
//! hit (`on_hit`) and what replaces a target that timed out (`on_expire`).
//! The set of modes is closed, so [`ModeState`] is an enum holding each mode's
//! private state and handing out a `&mut dyn ModeRules` for dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::session::{Arena, Pointer, Stats, Target};

mod challenge;
mod competitive;
mod flick;
mod grid;
mod tracking;

pub use challenge::ChallengeMode;
pub use competitive::CompetitiveMode;
pub use flick::FlickMode;
pub use grid::GridMode;
pub use tracking::{Mover, TrackingMode};

/// Radius shared by every freshly spawned full-size target.
pub const TARGET_RADIUS: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Grid,
    Flick,
    Tracking,
    Challenge,
    Competitive,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Grid, Mode::Flick, Mode::Tracking, Mode::Challenge, Mode::Competitive];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Grid => "grid",
            Mode::Flick => "flick",
            Mode::Tracking => "tracking",
            Mode::Challenge => "challenge",
            Mode::Competitive => "competitive",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownMode(s.to_string()))
    }
}

/// What the session should do after a mode has handled a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterHit {
    Continue,
    EndSession,
}

/// Everything a mode may touch during one simulation step.
pub struct Step<'a> {
    pub arena: &'a mut Arena,
    pub stats: &'a mut Stats,
    pub pointer: &'a Pointer,
    pub elapsed_ms: f64,
    pub dt_ms: f64,
}

pub trait ModeRules {
    /// Populate an empty arena at session start.
    fn spawn(&mut self, arena: &mut Arena);

    /// Advance one step. By default expiring targets are aged, each one that
    /// runs out costs a shot and is handed to [`ModeRules::on_expire`]. The
    /// reaction clock restarts once replacements are on the field.
    fn update(&mut self, step: &mut Step<'_>) {
        let expired = step.arena.take_expired(step.dt_ms);
        if expired.is_empty() {
            return;
        }
        for target in expired {
            step.stats.record_expiry();
            self.on_expire(step.arena, target, step.elapsed_ms);
        }
        step.stats.reacquire(step.elapsed_ms);
    }

    /// Called after `hit` has been removed from the arena and scored.
    fn on_hit(&mut self, arena: &mut Arena, hit: Target, elapsed_ms: f64) -> AfterHit;

    /// Called after `expired` has been removed from the arena.
    fn on_expire(&mut self, arena: &mut Arena, expired: Target, elapsed_ms: f64);

    fn accepts_clicks(&self) -> bool {
        true
    }
}

/// Per-session state of whichever mode is being played.
pub enum ModeState {
    Grid(GridMode),
    Flick(FlickMode),
    Tracking(TrackingMode),
    Challenge(ChallengeMode),
    Competitive(CompetitiveMode),
}

impl ModeState {
    pub fn new(mode: Mode, width: f64, height: f64) -> Self {
        match mode {
            Mode::Grid => ModeState::Grid(GridMode::new(width, height)),
            Mode::Flick => ModeState::Flick(FlickMode),
            Mode::Tracking => ModeState::Tracking(TrackingMode::default()),
            Mode::Challenge => ModeState::Challenge(ChallengeMode),
            Mode::Competitive => ModeState::Competitive(CompetitiveMode),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            ModeState::Grid(_) => Mode::Grid,
            ModeState::Flick(_) => Mode::Flick,
            ModeState::Tracking(_) => Mode::Tracking,
            ModeState::Challenge(_) => Mode::Challenge,
            ModeState::Competitive(_) => Mode::Competitive,
        }
    }

    pub fn rules(&self) -> &dyn ModeRules {
        match self {
            ModeState::Grid(m) => m,
            ModeState::Flick(m) => m,
            ModeState::Tracking(m) => m,
            ModeState::Challenge(m) => m,
            ModeState::Competitive(m) => m,
        }
    }

    pub fn rules_mut(&mut self) -> &mut dyn ModeRules {
        match self {
            ModeState::Grid(m) => m,
            ModeState::Flick(m) => m,
            ModeState::Tracking(m) => m,
            ModeState::Challenge(m) => m,
            ModeState::Competitive(m) => m,
        }
    }

    pub fn grid(&self) -> Option<&GridMode> {
        match self {
            ModeState::Grid(g) => Some(g),
            _ => None,
        }
    }

    /// The bouncing target, when playing tracking.
    pub fn mover(&self) -> Option<&Mover> {
        match self {
            ModeState::Tracking(t) => t.mover(),
            _ => None,
        }
    }
}

/// Full-size target at a random spot with the given lifetime.
fn random_target(arena: &mut Arena, ttl_ms: Option<f64>) -> Target {
    let (x, y) = arena.random_point();
    let target = Target::new(x, y, TARGET_RADIUS);
    match ttl_ms {
        Some(ttl) => target.with_ttl(ttl),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("grid".parse::<Mode>().unwrap(), Mode::Grid);
        assert_eq!(" Tracking ".parse::<Mode>().unwrap(), Mode::Tracking);
        assert!(matches!("sniper".parse::<Mode>(), Err(GameError::UnknownMode(_))));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::Competitive).unwrap(), "\"competitive\"");
        let m: Mode = serde_json::from_str("\"flick\"").unwrap();
        assert_eq!(m, Mode::Flick);
    }

    #[test]
    fn test_state_reports_mode() {
        for mode in Mode::ALL {
            assert_eq!(ModeState::new(mode, 800.0, 600.0).mode(), mode);
        }
    }

    #[test]
    fn test_only_tracking_ignores_clicks() {
        for mode in Mode::ALL {
            let state = ModeState::new(mode, 800.0, 600.0);
            assert_eq!(state.rules().accepts_clicks(), mode != Mode::Tracking);
        }
    }
}
