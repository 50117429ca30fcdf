// Long-running property checks across many seeds: grid slot discipline,
// tracking containment and per-frame bookkeeping, target counts per mode.

use std::collections::HashSet;

use sharpshot::session::FRAME_MS;
use sharpshot::{InputEvent, Mode, Session};

const W: f64 = 1024.0;
const H: f64 = 768.0;

// Cheap deterministic wander so clicks land all over the canvas.
fn wander(i: usize) -> InputEvent {
    let dx = ((i * 7919) % 301) as f64 - 150.0;
    let dy = ((i * 104_729) % 241) as f64 - 120.0;
    InputEvent::Motion { dx, dy }
}

#[test]
fn grid_targets_stay_on_distinct_slots() {
    for seed in 0..10 {
        let mut s = Session::with_seed(Mode::Grid, W, H, 1.0, seed);
        let slots: Vec<(f64, f64)> = s.mode_state().grid().unwrap().slots().to_vec();
        assert_eq!(slots.len(), 16);

        for i in 0..3000 {
            let events = if i % 5 == 0 { vec![wander(i), InputEvent::PrimaryClick] } else { vec![wander(i)] };
            s.advance(&events, FRAME_MS);

            let targets = s.targets();
            assert!(targets.len() <= 3);
            let mut seen = HashSet::new();
            for t in targets {
                let slot = t.slot.expect("grid targets carry their slot");
                assert!(seen.insert(slot), "slot {slot} lit twice");
                assert_eq!(slots[slot], (t.x, t.y));
            }
        }
        // Replacement keeps the field full.
        assert_eq!(s.targets().len(), 3);
    }
}

#[test]
fn flick_and_challenge_hold_their_counts() {
    for (mode, count) in [(Mode::Flick, 3), (Mode::Challenge, 1), (Mode::Competitive, 1)] {
        let mut s = Session::with_seed(mode, W, H, 1.0, 5);
        for i in 0..4000 {
            let events = if i % 3 == 0 { vec![wander(i), InputEvent::PrimaryClick] } else { vec![wander(i)] };
            s.advance(&events, FRAME_MS);
            if !s.is_running() {
                break;
            }
            assert_eq!(s.targets().len(), count, "{mode} at step {i}");
        }
    }
}

#[test]
fn tracking_target_never_leaves_canvas() {
    for seed in 0..20 {
        let mut s = Session::with_seed(Mode::Tracking, 300.0, 200.0, 1.0, seed);
        for _ in 0..5000 {
            s.advance(&[], FRAME_MS);
            let m = s.mover().expect("tracking always has a mover");
            assert!((0.0..=300.0).contains(&m.x), "x={}", m.x);
            assert!((0.0..=200.0).contains(&m.y), "y={}", m.y);
        }
    }
}

#[test]
fn tracking_counts_every_frame_and_ignores_clicks() {
    let mut s = Session::with_seed(Mode::Tracking, W, H, 1.0, 3);
    for _ in 0..600 {
        s.advance(&[InputEvent::PrimaryClick], FRAME_MS);
    }
    let stats = s.stats();
    assert_eq!(stats.shots, 600);
    assert_eq!(stats.hits, 600);
    assert_eq!(stats.score, 0);
    assert_eq!(stats.accuracy(), 100);
    assert!(stats.hover_ms <= 600.0 * FRAME_MS);
    assert_eq!(stats.hover_ms % FRAME_MS, 0.0);
}

#[test]
fn tracking_hover_accrues_while_on_target() {
    let mut s = Session::with_seed(Mode::Tracking, W, H, 1.0, 11);
    // The mover spawns on the centre, under the pointer; after one step it
    // has moved at most 4px, well inside its radius.
    s.advance(&[], FRAME_MS);
    assert_eq!(s.stats().hover_ms, FRAME_MS);
    assert_eq!(s.targets().len(), 0);
}

#[test]
fn tracking_direction_changes_every_half_second() {
    let mut s = Session::with_seed(Mode::Tracking, W, H, 1.0, 8);
    s.advance(&[], FRAME_MS);
    let first = s.mover().unwrap().last_change_ms;
    assert_eq!(first, Some(16.0));
    // Up to 496ms after the change: still the same heading.
    for _ in 0..31 {
        s.advance(&[], FRAME_MS);
    }
    assert_eq!(s.mover().unwrap().last_change_ms, Some(16.0));
    s.advance(&[], FRAME_MS);
    assert_eq!(s.mover().unwrap().last_change_ms, Some(528.0));
}
