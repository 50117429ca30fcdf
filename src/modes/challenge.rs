//! Challenge: one target at a time that gets smaller and shorter-lived the
//! longer the session runs.

use super::{AfterHit, ModeRules, TARGET_RADIUS, random_target};
use crate::session::{Arena, Target};

pub const BASE_TTL_MS: f64 = 1500.0;
pub const MIN_TTL_MS: f64 = 400.0;
const TTL_STEP_MS: f64 = 200.0;
const TTL_STEP_EVERY_MS: f64 = 5000.0;

pub const MIN_RADIUS: f64 = 10.0;
const RADIUS_STEP: f64 = 5.0;
const RADIUS_STEP_EVERY_MS: f64 = 10_000.0;

/// Target lifetime at `elapsed_ms` into the session.
pub fn ttl_for(elapsed_ms: f64) -> f64 {
    let steps = (elapsed_ms.max(0.0) / TTL_STEP_EVERY_MS).floor();
    (BASE_TTL_MS - steps * TTL_STEP_MS).max(MIN_TTL_MS)
}

/// Target radius at `elapsed_ms` into the session.
pub fn radius_for(elapsed_ms: f64) -> f64 {
    let steps = (elapsed_ms.max(0.0) / RADIUS_STEP_EVERY_MS).floor();
    (TARGET_RADIUS - steps * RADIUS_STEP).max(MIN_RADIUS)
}

pub struct ChallengeMode;

impl ModeRules for ChallengeMode {
    fn spawn(&mut self, arena: &mut Arena) {
        let t = random_target(arena, Some(BASE_TTL_MS));
        arena.push(t);
    }

    // Only hits ramp difficulty; a timed-out target comes back at base size.
    fn on_hit(&mut self, arena: &mut Arena, _hit: Target, elapsed_ms: f64) -> AfterHit {
        let (x, y) = arena.random_point();
        arena.push(Target::new(x, y, radius_for(elapsed_ms)).with_ttl(ttl_for(elapsed_ms)));
        AfterHit::Continue
    }

    fn on_expire(&mut self, arena: &mut Arena, _expired: Target, _elapsed_ms: f64) {
        self.spawn(arena);
    }
}
