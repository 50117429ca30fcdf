//! Tracking drill: keep the crosshair on one erratically bouncing target.
//!
//! There is nothing to click. Every simulated frame counts as a shot and a
//! hit, and the time the crosshair actually spends over the target is kept as
//! hover time.

use rand::Rng;

use super::{AfterHit, ModeRules, Step, TARGET_RADIUS};
use crate::session::{Arena, FRAME_MS, Target};

/// Velocity bound (px per 16ms frame) at spawn.
pub const INITIAL_SPEED: f64 = 2.0;
/// Velocity bound (px per 16ms frame) after each direction change.
pub const ERRATIC_SPEED: f64 = 4.0;
pub const DIRECTION_CHANGE_MS: f64 = 500.0;

/// The moving target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mover {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub dx: f64,
    pub dy: f64,
    /// Session time of the last velocity change; `None` until the first update.
    pub last_change_ms: Option<f64>,
}

impl Mover {
    /// Move by the current velocity scaled to `dt_ms`, bouncing off the edges.
    pub fn advance(&mut self, dt_ms: f64, width: f64, height: f64) {
        let scale = dt_ms / FRAME_MS;
        self.x += self.dx * scale;
        self.y += self.dy * scale;
        (self.x, self.dx) = reflect(self.x, self.dx, width);
        (self.y, self.dy) = reflect(self.y, self.dy, height);
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

// Past an edge: snap onto it and point the velocity back inward.
fn reflect(pos: f64, vel: f64, extent: f64) -> (f64, f64) {
    let extent = extent.max(0.0);
    if pos < 0.0 {
        (0.0, vel.abs())
    } else if pos > extent {
        (extent, -vel.abs())
    } else {
        (pos, vel)
    }
}

#[derive(Default)]
pub struct TrackingMode {
    mover: Option<Mover>,
}

impl TrackingMode {
    pub fn mover(&self) -> Option<&Mover> {
        self.mover.as_ref()
    }
}

impl ModeRules for TrackingMode {
    fn spawn(&mut self, arena: &mut Arena) {
        let (x, y) = (arena.width() / 2.0, arena.height() / 2.0);
        let rng = arena.rng();
        self.mover = Some(Mover {
            x,
            y,
            radius: TARGET_RADIUS,
            dx: rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED),
            dy: rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED),
            last_change_ms: None,
        });
    }

    fn update(&mut self, step: &mut Step<'_>) {
        let Some(m) = self.mover.as_mut() else {
            return;
        };
        let due = m
            .last_change_ms
            .is_none_or(|last| step.elapsed_ms - last > DIRECTION_CHANGE_MS);
        if due {
            let rng = step.arena.rng();
            m.dx = rng.gen_range(-ERRATIC_SPEED..ERRATIC_SPEED);
            m.dy = rng.gen_range(-ERRATIC_SPEED..ERRATIC_SPEED);
            m.last_change_ms = Some(step.elapsed_ms);
        }
        m.advance(step.dt_ms, step.arena.width(), step.arena.height());
        let hovering = m.contains(step.pointer.x, step.pointer.y);
        step.stats.record_tracking_frame(hovering, step.dt_ms);
    }

    fn on_hit(&mut self, _arena: &mut Arena, _hit: Target, _elapsed_ms: f64) -> AfterHit {
        AfterHit::Continue
    }

    fn on_expire(&mut self, _arena: &mut Arena, _expired: Target, _elapsed_ms: f64) {}

    fn accepts_clicks(&self) -> bool {
        false
    }
}
