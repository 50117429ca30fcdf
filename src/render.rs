//! Frame drawing.
//!
//! The game only needs three primitives from a 2D surface, so drawing goes
//! through the small [`Surface`] trait. The browser canvas implements it
//! below; tests implement it with a recorder.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::session::Session;

// --- Palette -----------------------------------------------------------------

pub const BACKGROUND: &str = "#0a0a0a";
pub const GRID_LINE: &str = "#1c1c1c";
pub const TARGET_CORE: &str = "#ff4d4d";
pub const TARGET_RIM: &str = "#660000";
pub const CROSSHAIR: &str = "lime";

pub const GRID_SPACING: f64 = 50.0;
pub const CROSSHAIR_ARM: f64 = 10.0;

/// A line from `(x1, y1)` to `(x2, y2)`.
pub type Segment = (f64, f64, f64, f64);

pub trait Surface {
    fn paint_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn stroke_segments(&self, segments: &[Segment], color: &str, width: f64);
    /// Filled circle shaded from `inner` at the centre to `outer` at the rim.
    fn fill_gradient_circle(&self, x: f64, y: f64, radius: f64, inner: &str, outer: &str);
}

impl Surface for CanvasRenderingContext2d {
    fn paint_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.set_fill_style_str(color);
        self.fill_rect(x, y, w, h);
    }

    fn stroke_segments(&self, segments: &[Segment], color: &str, width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.begin_path();
        for &(x1, y1, x2, y2) in segments {
            self.move_to(x1, y1);
            self.line_to(x2, y2);
        }
        self.stroke();
    }

    fn fill_gradient_circle(&self, x: f64, y: f64, radius: f64, inner: &str, outer: &str) {
        let shaded = self
            .create_radial_gradient(x, y, 0.0, x, y, radius)
            .and_then(|g| {
                g.add_color_stop(0.0, inner)?;
                g.add_color_stop(1.0, outer)?;
                Ok::<_, JsValue>(g)
            });
        match shaded {
            Ok(g) => self.set_fill_style_canvas_gradient(&g),
            // Degenerate radius: fall back to a flat fill.
            Err(_) => self.set_fill_style_str(outer),
        }
        self.begin_path();
        self.arc(x, y, radius, 0.0, TAU).ok();
        self.fill();
    }
}

/// Background lines every [`GRID_SPACING`] px across a `width` x `height` canvas.
pub fn background_grid(width: f64, height: f64) -> Vec<Segment> {
    let mut lines = Vec::new();
    let mut x = 0.0;
    while x < width {
        lines.push((x, 0.0, x, height));
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < height {
        lines.push((0.0, y, width, y));
        y += GRID_SPACING;
    }
    lines
}

pub fn crosshair(x: f64, y: f64) -> [Segment; 2] {
    [
        (x - CROSSHAIR_ARM, y, x + CROSSHAIR_ARM, y),
        (x, y - CROSSHAIR_ARM, x, y + CROSSHAIR_ARM),
    ]
}

/// Draw one complete frame of `session`.
pub fn draw_frame<S: Surface + ?Sized>(surface: &S, session: &Session) {
    let arena = session.arena();
    let (w, h) = (arena.width(), arena.height());
    surface.paint_rect(0.0, 0.0, w, h, BACKGROUND);
    surface.stroke_segments(&background_grid(w, h), GRID_LINE, 1.0);

    for t in arena.targets() {
        surface.fill_gradient_circle(t.x, t.y, t.radius, TARGET_CORE, TARGET_RIM);
    }
    if let Some(m) = session.mover() {
        surface.fill_gradient_circle(m.x, m.y, m.radius, TARGET_CORE, TARGET_RIM);
    }

    let p = session.pointer();
    surface.stroke_segments(&crosshair(p.x, p.y), CROSSHAIR, 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::Mode;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum Cmd {
        Rect(String),
        Lines(usize, String),
        Circle(f64, f64, f64),
    }

    #[derive(Default)]
    struct Recorder {
        cmds: RefCell<Vec<Cmd>>,
    }

    impl Surface for Recorder {
        fn paint_rect(&self, _x: f64, _y: f64, _w: f64, _h: f64, color: &str) {
            self.cmds.borrow_mut().push(Cmd::Rect(color.to_string()));
        }
        fn stroke_segments(&self, segments: &[Segment], color: &str, _width: f64) {
            self.cmds.borrow_mut().push(Cmd::Lines(segments.len(), color.to_string()));
        }
        fn fill_gradient_circle(&self, x: f64, y: f64, radius: f64, _inner: &str, _outer: &str) {
            self.cmds.borrow_mut().push(Cmd::Circle(x, y, radius));
        }
    }

    #[test]
    fn test_background_grid_counts() {
        // 0,50,...,150 vertical and 0,50 horizontal
        let lines = background_grid(200.0, 100.0);
        assert_eq!(lines.len(), 4 + 2);
        assert_eq!(lines[1], (50.0, 0.0, 50.0, 100.0));
        assert_eq!(lines[5], (0.0, 50.0, 200.0, 50.0));
    }

    #[test]
    fn test_crosshair_arms() {
        let [h, v] = crosshair(100.0, 50.0);
        assert_eq!(h, (90.0, 50.0, 110.0, 50.0));
        assert_eq!(v, (100.0, 40.0, 100.0, 60.0));
    }

    #[test]
    fn test_frame_draw_order() {
        let s = Session::with_seed(Mode::Flick, 200.0, 100.0, 1.0, 9);
        let rec = Recorder::default();
        draw_frame(&rec, &s);
        let cmds = rec.cmds.into_inner();
        assert_eq!(cmds.len(), 1 + 1 + 3 + 1);
        assert_eq!(cmds[0], Cmd::Rect(BACKGROUND.to_string()));
        assert_eq!(cmds[1], Cmd::Lines(6, GRID_LINE.to_string()));
        assert!(matches!(cmds[2], Cmd::Circle(_, _, r) if r == 30.0));
        assert_eq!(cmds[5], Cmd::Lines(2, CROSSHAIR.to_string()));
    }

    #[test]
    fn test_tracking_draws_mover() {
        let s = Session::with_seed(Mode::Tracking, 200.0, 100.0, 1.0, 9);
        let rec = Recorder::default();
        draw_frame(&rec, &s);
        let circles: Vec<_> = rec
            .cmds
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Cmd::Circle(x, y, _) => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(circles, vec![(100.0, 50.0)]);
    }
}
