//! Static targets and the playfield they live on.

use rand::Rng;
use rand::rngs::SmallRng;

/// Clicks land within this multiple of a target's radius.
pub const HIT_FORGIVENESS: f64 = 1.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Remaining lifetime; `None` for targets that never expire.
    pub ttl_ms: Option<f64>,
    /// Grid slot this target occupies (grid mode only).
    pub slot: Option<usize>,
}

impl Target {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius, ttl_ms: None, slot: None }
    }

    pub fn with_ttl(mut self, ttl_ms: f64) -> Self {
        self.ttl_ms = Some(ttl_ms);
        self
    }

    pub fn in_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn is_hit_by(&self, px: f64, py: f64) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        let reach = self.radius * HIT_FORGIVENESS;
        dx * dx + dy * dy <= reach * reach
    }
}

/// Canvas bounds, active static targets and the session's random source.
pub struct Arena {
    width: f64,
    height: f64,
    targets: Vec<Target>,
    rng: SmallRng,
}

impl Arena {
    pub fn new(width: f64, height: f64, rng: SmallRng) -> Self {
        Self { width, height, targets: Vec::new(), rng }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Targets in spawn order; the last one is the newest.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn push(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Uniform point anywhere on the canvas.
    pub fn random_point(&mut self) -> (f64, f64) {
        let x = if self.width > 0.0 { self.rng.gen_range(0.0..self.width) } else { 0.0 };
        let y = if self.height > 0.0 { self.rng.gen_range(0.0..self.height) } else { 0.0 };
        (x, y)
    }

    /// Index of the newest target under the point, so overlapping targets
    /// favour the most recently spawned.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<usize> {
        self.targets.iter().rposition(|t| t.is_hit_by(px, py))
    }

    pub fn remove(&mut self, index: usize) -> Target {
        self.targets.remove(index)
    }

    /// Age every expiring target by `dt_ms` and pull out the ones whose
    /// lifetime ran out, oldest first.
    pub fn take_expired(&mut self, dt_ms: f64) -> Vec<Target> {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.targets.len());
        for mut t in self.targets.drain(..) {
            if let Some(ttl) = t.ttl_ms.as_mut() {
                *ttl -= dt_ms;
                if *ttl <= 0.0 {
                    expired.push(t);
                    continue;
                }
            }
            kept.push(t);
        }
        self.targets = kept;
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0, SmallRng::seed_from_u64(7))
    }

    #[test]
    fn test_forgiveness_boundary() {
        let t = Target::new(100.0, 100.0, 30.0);
        assert!(t.is_hit_by(100.0, 100.0));
        assert!(t.is_hit_by(100.0 + 30.0 * 1.34, 100.0));
        assert!(!t.is_hit_by(100.0 + 30.0 * 1.36, 100.0));
    }

    #[test]
    fn test_hit_test_prefers_newest() {
        let mut a = arena();
        a.push(Target::new(100.0, 100.0, 30.0));
        a.push(Target::new(110.0, 100.0, 30.0));
        a.push(Target::new(500.0, 500.0, 30.0));
        assert_eq!(a.hit_test(105.0, 100.0), Some(1));
        assert_eq!(a.hit_test(300.0, 300.0), None);
    }

    #[test]
    fn test_take_expired_only_ttl_targets() {
        let mut a = arena();
        a.push(Target::new(1.0, 1.0, 30.0).with_ttl(20.0));
        a.push(Target::new(2.0, 2.0, 30.0));
        a.push(Target::new(3.0, 3.0, 30.0).with_ttl(10.0));
        let gone = a.take_expired(16.0);
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].x, 3.0);
        assert_eq!(a.targets().len(), 2);
        assert_eq!(a.targets()[0].ttl_ms, Some(4.0));
        assert_eq!(a.targets()[1].ttl_ms, None);
    }

    #[test]
    fn test_random_point_inside_canvas() {
        let mut a = arena();
        for _ in 0..500 {
            let (x, y) = a.random_point();
            assert!((0.0..800.0).contains(&x));
            assert!((0.0..600.0).contains(&y));
        }
        let mut empty = Arena::new(0.0, 0.0, SmallRng::seed_from_u64(1));
        assert_eq!(empty.random_point(), (0.0, 0.0));
    }
}
