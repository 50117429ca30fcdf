//! Grid drill: three targets lit at a time out of a fixed 4x4 lattice.

use rand::seq::SliceRandom;

use super::{AfterHit, ModeRules, TARGET_RADIUS};
use crate::session::{Arena, Target};

pub const SLOT_SPACING: f64 = 100.0;
pub const SLOTS_PER_SIDE: usize = 4;
pub const ACTIVE_TARGETS: usize = 3;
pub const TARGET_TTL_MS: f64 = 2000.0;

pub struct GridMode {
    slots: Vec<(f64, f64)>,
}

impl GridMode {
    /// Lay out the lattice centred on a canvas of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        let span = SLOT_SPACING * (SLOTS_PER_SIDE - 1) as f64;
        let offset_x = (width - span) / 2.0;
        let offset_y = (height - span) / 2.0;
        let mut slots = Vec::with_capacity(SLOTS_PER_SIDE * SLOTS_PER_SIDE);
        for row in 0..SLOTS_PER_SIDE {
            for col in 0..SLOTS_PER_SIDE {
                slots.push((offset_x + col as f64 * SLOT_SPACING, offset_y + row as f64 * SLOT_SPACING));
            }
        }
        Self { slots }
    }

    pub fn slots(&self) -> &[(f64, f64)] {
        &self.slots
    }

    fn target_at(&self, slot: usize) -> Target {
        let (x, y) = self.slots[slot];
        Target::new(x, y, TARGET_RADIUS).with_ttl(TARGET_TTL_MS).in_slot(slot)
    }

    /// Light a random slot that no active target occupies.
    fn light_free_slot(&self, arena: &mut Arena) {
        let free: Vec<usize> = (0..self.slots.len())
            .filter(|i| !arena.targets().iter().any(|t| t.slot == Some(*i)))
            .collect();
        if let Some(&slot) = free.choose(arena.rng()) {
            arena.push(self.target_at(slot));
        }
    }
}

impl ModeRules for GridMode {
    fn spawn(&mut self, arena: &mut Arena) {
        let mut order: Vec<usize> = (0..self.slots.len()).collect();
        order.shuffle(arena.rng());
        for &slot in order.iter().take(ACTIVE_TARGETS) {
            arena.push(self.target_at(slot));
        }
    }

    fn on_hit(&mut self, arena: &mut Arena, _hit: Target, _elapsed_ms: f64) -> AfterHit {
        self.light_free_slot(arena);
        AfterHit::Continue
    }

    fn on_expire(&mut self, arena: &mut Arena, _expired: Target, _elapsed_ms: f64) {
        self.light_free_slot(arena);
    }
}
