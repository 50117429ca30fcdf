/// Crosshair position driven by relative mouse motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
    sensitivity: f64,
}

impl Pointer {
    pub fn centered(width: f64, height: f64, sensitivity: f64) -> Self {
        Self {
            x: width / 2.0,
            y: height / 2.0,
            sensitivity,
        }
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.sensitivity = sensitivity;
    }

    /// Add a scaled movement delta, staying inside `[0,width] x [0,height]`.
    pub fn apply_motion(&mut self, dx: f64, dy: f64, width: f64, height: f64) {
        self.x += dx * self.sensitivity;
        self.y += dy * self.sensitivity;
        self.clamp_to(width, height);
    }

    pub fn clamp_to(&mut self, width: f64, height: f64) {
        self.x = self.x.clamp(0.0, width.max(0.0));
        self.y = self.y.clamp(0.0, height.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_is_scaled() {
        let mut p = Pointer::centered(200.0, 100.0, 2.0);
        p.apply_motion(5.0, -3.0, 200.0, 100.0);
        assert_eq!((p.x, p.y), (110.0, 44.0));
    }

    #[test]
    fn test_motion_clamps_to_bounds() {
        let mut p = Pointer::centered(200.0, 100.0, 1.0);
        p.apply_motion(-1000.0, 1000.0, 200.0, 100.0);
        assert_eq!((p.x, p.y), (0.0, 100.0));
        p.apply_motion(5000.0, -5000.0, 200.0, 100.0);
        assert_eq!((p.x, p.y), (200.0, 0.0));
    }

    #[test]
    fn test_shrinking_bounds_pulls_pointer_in() {
        let mut p = Pointer::centered(800.0, 600.0, 1.0);
        p.clamp_to(300.0, 200.0);
        assert_eq!((p.x, p.y), (300.0, 200.0));
    }
}
