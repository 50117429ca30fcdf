use super::{AfterHit, ModeRules, random_target};
use crate::session::{Arena, Target};

/// Length of a ranked round. The round closes on the first hit past it.
pub const ROUND_MS: f64 = 60_000.0;

/// One target that never expires; score as many as possible in a minute.
pub struct CompetitiveMode;

impl ModeRules for CompetitiveMode {
    fn spawn(&mut self, arena: &mut Arena) {
        let t = random_target(arena, None);
        arena.push(t);
    }

    fn on_hit(&mut self, arena: &mut Arena, _hit: Target, elapsed_ms: f64) -> AfterHit {
        if elapsed_ms >= ROUND_MS {
            return AfterHit::EndSession;
        }
        self.spawn(arena);
        AfterHit::Continue
    }

    // Competitive targets carry no ttl, but keep the field populated anyway.
    fn on_expire(&mut self, arena: &mut Arena, _expired: Target, _elapsed_ms: f64) {
        self.spawn(arena);
    }
}
