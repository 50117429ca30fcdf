use super::{AfterHit, ModeRules, random_target};
use crate::session::{Arena, Target};

pub const TARGET_COUNT: usize = 3;
pub const TARGET_TTL_MS: f64 = 2000.0;

/// Three targets scattered anywhere on screen; each one hit or timed out is
/// replaced somewhere new.
pub struct FlickMode;

impl ModeRules for FlickMode {
    fn spawn(&mut self, arena: &mut Arena) {
        for _ in 0..TARGET_COUNT {
            let t = random_target(arena, Some(TARGET_TTL_MS));
            arena.push(t);
        }
    }

    fn on_hit(&mut self, arena: &mut Arena, _hit: Target, _elapsed_ms: f64) -> AfterHit {
        let t = random_target(arena, Some(TARGET_TTL_MS));
        arena.push(t);
        AfterHit::Continue
    }

    fn on_expire(&mut self, arena: &mut Arena, _expired: Target, _elapsed_ms: f64) {
        let t = random_target(arena, Some(TARGET_TTL_MS));
        arena.push(t);
    }
}
