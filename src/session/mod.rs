//! One training session: the state the frame loop advances.
//!
//! A `Session` is built fresh every time a mode is started and owns
//! everything the game logic reads or writes: the clock, the pointer, the
//! targets, the active mode's policy and the running tally. Nothing in here
//! touches the browser; input arrives as [`InputEvent`] values and time
//! arrives as a step length, so the whole game can be driven from tests.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::modes::{AfterHit, Mode, ModeState, Mover, Step};

mod arena;
mod pointer;
mod stats;

pub use arena::{Arena, HIT_FORGIVENESS, Target};
pub use pointer::Pointer;
pub use stats::{POINTS_PER_HIT, Stats};

/// Nominal length of one animation frame. Per-frame quantities (tracking
/// velocity, hover time) are expressed against it.
pub const FRAME_MS: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Ended,
}

/// Input delivered by the host, already stripped of browser types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Raw relative mouse motion, before sensitivity scaling.
    Motion { dx: f64, dy: f64 },
    PrimaryClick,
    Escape,
    PointerLockLost,
    Resize { width: f64, height: f64 },
}

/// Phase changes the host has to react to (show the pause menu, the summary).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Paused,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    /// Not running, or the mode has nothing to click.
    Ignored,
    Miss,
    Hit { reaction_ms: f64 },
}

pub struct Session {
    phase: Phase,
    elapsed_ms: f64,
    pointer: Pointer,
    arena: Arena,
    rules: ModeState,
    stats: Stats,
}

impl Session {
    /// Start `mode` on a `width` x `height` canvas with the pointer centred.
    pub fn start(mode: Mode, width: f64, height: f64, sensitivity: f64, rng: SmallRng) -> Self {
        let mut arena = Arena::new(width, height, rng);
        let mut rules = ModeState::new(mode, width, height);
        rules.rules_mut().spawn(&mut arena);
        log::info!("starting {mode} session on {width}x{height} canvas");
        Self {
            phase: Phase::Running,
            elapsed_ms: 0.0,
            pointer: Pointer::centered(width, height, sensitivity),
            arena,
            rules,
            stats: Stats::default(),
        }
    }

    /// Deterministic session, for replays and tests.
    pub fn with_seed(mode: Mode, width: f64, height: f64, sensitivity: f64, seed: u64) -> Self {
        Self::start(mode, width, height, sensitivity, SmallRng::seed_from_u64(seed))
    }

    pub fn mode(&self) -> Mode {
        self.rules.mode()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn targets(&self) -> &[Target] {
        self.arena.targets()
    }

    pub fn mode_state(&self) -> &ModeState {
        &self.rules
    }

    pub fn mover(&self) -> Option<&Mover> {
        self.rules.mover()
    }

    /// Apply `events` in order, then simulate `dt_ms` if the session is
    /// still running. A zero-length step only applies input.
    pub fn advance(&mut self, events: &[InputEvent], dt_ms: f64) -> Vec<SessionEvent> {
        let mut out: Vec<SessionEvent> = events.iter().filter_map(|e| self.handle(*e)).collect();
        if self.is_running() && dt_ms > 0.0 {
            self.step(dt_ms);
        }
        out.dedup();
        out
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<SessionEvent> {
        match event {
            InputEvent::Motion { dx, dy } => {
                if self.is_running() {
                    let (w, h) = (self.arena.width(), self.arena.height());
                    self.pointer.apply_motion(dx, dy, w, h);
                }
                None
            }
            InputEvent::PrimaryClick => {
                let was_running = self.is_running();
                self.click();
                (was_running && self.phase == Phase::Ended).then_some(SessionEvent::Ended)
            }
            InputEvent::Escape | InputEvent::PointerLockLost => self.pause().then_some(SessionEvent::Paused),
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                None
            }
        }
    }

    /// Fire at the current pointer position.
    pub fn click(&mut self) -> ClickOutcome {
        if !self.is_running() || !self.rules.rules().accepts_clicks() {
            return ClickOutcome::Ignored;
        }
        let now = self.elapsed_ms;
        let outcome = match self.arena.hit_test(self.pointer.x, self.pointer.y) {
            Some(index) => {
                let target = self.arena.remove(index);
                let reaction_ms = self.stats.record_hit(now);
                if self.rules.rules_mut().on_hit(&mut self.arena, target, now) == AfterHit::EndSession {
                    self.finish();
                }
                ClickOutcome::Hit { reaction_ms }
            }
            None => ClickOutcome::Miss,
        };
        self.stats.record_shot();
        outcome
    }

    /// Advance the clock and run the mode's per-frame policy.
    pub fn step(&mut self, dt_ms: f64) {
        if !self.is_running() {
            return;
        }
        self.elapsed_ms += dt_ms;
        let mut step = Step {
            arena: &mut self.arena,
            stats: &mut self.stats,
            pointer: &self.pointer,
            elapsed_ms: self.elapsed_ms,
            dt_ms,
        };
        self.rules.rules_mut().update(&mut step);
    }

    /// Returns true if the session was running and is now paused.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = Phase::Paused;
        log::debug!("{} session paused at {:.0}ms", self.mode(), self.elapsed_ms);
        true
    }

    /// Returns true if the session was paused and is running again.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        log::debug!("{} session resumed", self.mode());
        true
    }

    /// Stop for good. Returns false if the session had already ended.
    pub fn end(&mut self) -> bool {
        if self.phase == Phase::Ended {
            return false;
        }
        self.finish();
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.arena.resize(width, height);
        self.pointer.clamp_to(width, height);
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.pointer.set_sensitivity(sensitivity);
    }

    fn finish(&mut self) {
        self.phase = Phase::Ended;
        log::info!(
            "{} session ended after {:.1}s: score {}, accuracy {}%",
            self.mode(),
            self.elapsed_ms / 1000.0,
            self.stats.score,
            self.stats.accuracy()
        );
    }
}
