//! Browser glue: canvas lookup, input listeners, pointer lock, DOM text and
//! the animation-frame scheduler.
//!
//! Listener callbacks only queue [`InputEvent`]s; the frame callback drains
//! the queue into the session, steps it in fixed [`FRAME_MS`] increments and
//! draws. When the session stops running the loop simply does not request
//! another frame, and `resume` starts it again.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    window,
};

use crate::config::Settings;
use crate::error::GameError;
use crate::hud::{HudText, Summary};
use crate::modes::Mode;
use crate::render;
use crate::sensitivity::{self, SensitivityInput};
use crate::session::{FRAME_MS, InputEvent, Session, SessionEvent};

const CANVAS_ID: &str = "gameCanvas";

/// Cap on real time fed to the simulation per animation frame, so a
/// backgrounded tab does not replay seconds of ticks on return.
const MAX_FRAME_MS: f64 = 250.0;

struct App {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: Option<Session>,
    pending: Vec<InputEvent>,
    last_frame_ts: Option<f64>,
    accumulator: f64,
    frame_scheduled: bool,
}

type FrameCallback = Closure<dyn FnMut(f64)>;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static SETTINGS: RefCell<Settings> = RefCell::new(Settings::default());
    static FRAME: RefCell<Option<FrameCallback>> = RefCell::new(None);
}

// --- Entry points ------------------------------------------------------------

pub fn start(mode_name: &str) -> Result<(), GameError> {
    let mode: Mode = mode_name.parse()?;
    ensure_app()?;
    let sensitivity = SETTINGS.with(|s| s.borrow().sensitivity);
    let doc = document()?;
    with_app(|app| {
        app.fit_to_window()?;
        let (w, h) = (app.canvas.width() as f64, app.canvas.height() as f64);
        app.session = Some(Session::start(mode, w, h, sensitivity, SmallRng::from_entropy()));
        app.pending.clear();
        app.reset_clock();
        set_display(&doc, "main-menu", "none");
        set_display(&doc, "pause-menu", "none");
        set_display(&doc, "game", "block");
        app.canvas.request_pointer_lock();
        Ok(())
    })?;
    schedule_frame()
}

pub fn resume() -> Result<(), GameError> {
    let doc = document()?;
    let resumed = with_app(|app| {
        let session = app.session.as_mut().ok_or(GameError::NoSession)?;
        if !session.resume() {
            return Ok(false);
        }
        // Input queued around the pause is stale; only a resize still matters.
        app.pending.retain(|e| matches!(e, InputEvent::Resize { .. }));
        app.reset_clock();
        set_display(&doc, "pause-menu", "none");
        app.canvas.request_pointer_lock();
        Ok(true)
    })?;
    if resumed { schedule_frame() } else { Ok(()) }
}

pub fn end() -> Result<(), GameError> {
    let doc = document()?;
    with_app(|app| {
        let session = app.session.as_mut().ok_or(GameError::NoSession)?;
        session.end();
        show_summary(&doc, session);
        Ok(())
    })
}

/// Read the DPI / sensitivity / game fields, store and display the result.
pub fn convert_sensitivity() -> Result<f64, GameError> {
    let doc = document()?;
    let input = SensitivityInput::from_fields(
        field_value(&doc, "dpi-input").as_deref(),
        field_value(&doc, "in-game-sens").as_deref(),
        field_value(&doc, "game-select").as_deref(),
    );
    let value = SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        settings.dpi = input.dpi;
        settings.in_game_sens = input.in_game_sens;
        settings.game_multiplier = input.game_multiplier;
        settings.apply_conversion()
    });
    apply_live_sensitivity(value);
    set_text(&doc, "converted-sens", &sensitivity::format_multiplier(value));
    log::debug!("converted sensitivity {value:.3} ({:.1} cm/360)", input.cm_per_360());
    Ok(value)
}

/// Slider path: take the multiplier as-is.
pub fn set_sensitivity(value: f64) -> Result<(), GameError> {
    let Some(value) = sensitivity::sanitize_multiplier(value) else {
        log::warn!("ignoring sensitivity {value}");
        return Ok(());
    };
    SETTINGS.with(|s| s.borrow_mut().sensitivity = value);
    apply_live_sensitivity(value);
    set_text(&document()?, "slider-value", &sensitivity::format_multiplier(value));
    Ok(())
}

pub fn configure(json: &str) {
    let settings = Settings::from_json_or_default(json);
    SETTINGS.with(|s| *s.borrow_mut() = settings);
    apply_live_sensitivity(settings.sensitivity);
}

// --- App state ---------------------------------------------------------------

impl App {
    fn fit_to_window(&mut self) -> Result<(), GameError> {
        let win = window().ok_or(GameError::NoWindow)?;
        let w = win.inner_width()?.as_f64().unwrap_or(self.canvas.width() as f64);
        let h = win.inner_height()?.as_f64().unwrap_or(self.canvas.height() as f64);
        self.canvas.set_width(w.max(0.0) as u32);
        self.canvas.set_height(h.max(0.0) as u32);
        Ok(())
    }

    fn reset_clock(&mut self) {
        self.last_frame_ts = None;
        self.accumulator = 0.0;
    }

    fn queue(&mut self, event: InputEvent) {
        let running = self.session.as_ref().is_some_and(Session::is_running);
        if running || matches!(event, InputEvent::Resize { .. }) {
            self.pending.push(event);
        }
    }

    /// Run one animation frame. Returns whether another frame is wanted.
    fn frame(&mut self, ts: f64, doc: &Document) -> bool {
        let Some(session) = self.session.as_mut() else {
            self.frame_scheduled = false;
            return false;
        };
        if !session.is_running() {
            self.frame_scheduled = false;
            return false;
        }

        let dt = match self.last_frame_ts {
            Some(prev) => (ts - prev).clamp(0.0, MAX_FRAME_MS),
            None => FRAME_MS,
        };
        self.last_frame_ts = Some(ts);
        self.accumulator += dt;

        let batch = std::mem::take(&mut self.pending);
        let first_step = if self.accumulator >= FRAME_MS {
            self.accumulator -= FRAME_MS;
            FRAME_MS
        } else {
            0.0
        };
        let mut events = session.advance(&batch, first_step);
        while self.accumulator >= FRAME_MS && session.is_running() {
            self.accumulator -= FRAME_MS;
            events.extend(session.advance(&[], FRAME_MS));
        }

        render::draw_frame(&self.ctx, session);
        write_hud(doc, &HudText::from_session(session));

        for event in events {
            match event {
                SessionEvent::Paused => {
                    set_display(doc, "pause-menu", "flex");
                    doc.exit_pointer_lock();
                }
                SessionEvent::Ended => show_summary(doc, session),
            }
        }

        if session.is_running() {
            true
        } else {
            self.frame_scheduled = false;
            self.reset_clock();
            false
        }
    }
}

fn ensure_app() -> Result<(), GameError> {
    if APP.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }
    let doc = document()?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(CANVAS_ID)
        .ok_or(GameError::MissingElement(CANVAS_ID))?
        .dyn_into()
        .map_err(|_| GameError::WrongElement { id: CANVAS_ID, expected: "canvas" })?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let mut app = App {
        canvas: canvas.clone(),
        ctx,
        session: None,
        pending: Vec::new(),
        last_frame_ts: None,
        accumulator: 0.0,
        frame_scheduled: false,
    };
    app.fit_to_window()?;
    APP.with(|cell| cell.replace(Some(app)));
    install_listeners(&doc, &canvas)?;
    log::info!("canvas #{CANVAS_ID} ready");
    Ok(())
}

fn with_app<T>(f: impl FnOnce(&mut App) -> Result<T, GameError>) -> Result<T, GameError> {
    APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(app) => f(app),
        None => Err(GameError::NoSession),
    })
}

fn queue(event: InputEvent) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.queue(event);
        }
    });
}

fn apply_live_sensitivity(value: f64) {
    APP.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut().and_then(|a| a.session.as_mut()) {
            session.set_sensitivity(value);
        }
    });
}

// --- Listeners ---------------------------------------------------------------

fn install_listeners(doc: &Document, canvas: &HtmlCanvasElement) -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;

    // Relative motion only counts while the canvas holds the pointer lock.
    {
        let doc_move = doc.clone();
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            if is_locked_to(&doc_move, &canvas_move) {
                queue(InputEvent::Motion {
                    dx: evt.movement_x() as f64,
                    dy: evt.movement_y() as f64,
                });
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            if evt.button() == 0 {
                queue(InputEvent::PrimaryClick);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let doc_lock = doc.clone();
        let canvas_lock = canvas.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if !is_locked_to(&doc_lock, &canvas_lock) {
                queue(InputEvent::PointerLockLost);
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointerlockchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Escape" {
                queue(InputEvent::Escape);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    if let Err(err) = app.fit_to_window() {
                        log::warn!("resize failed: {err}");
                        return;
                    }
                    let (w, h) = (app.canvas.width() as f64, app.canvas.height() as f64);
                    app.queue(InputEvent::Resize { width: w, height: h });
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn is_locked_to(doc: &Document, canvas: &HtmlCanvasElement) -> bool {
    doc.pointer_lock_element()
        .is_some_and(|el| el == *canvas.unchecked_ref::<web_sys::Element>())
}

// --- Frame loop --------------------------------------------------------------

fn schedule_frame() -> Result<(), GameError> {
    let already = with_app(|app| Ok(std::mem::replace(&mut app.frame_scheduled, true)))?;
    if already {
        return Ok(());
    }
    request_frame()
}

fn request_frame() -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    FRAME.with(|cell| {
        if cell.borrow().is_none() {
            *cell.borrow_mut() = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
        }
        match cell.borrow().as_ref() {
            Some(cb) => win
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map(|_| ())
                .map_err(GameError::from),
            None => Ok(()),
        }
    })
}

fn on_frame(ts: f64) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let again = APP.with(|cell| cell.borrow_mut().as_mut().is_some_and(|app| app.frame(ts, &doc)));
    if again {
        if let Err(err) = request_frame() {
            log::error!("could not schedule next frame: {err}");
        }
    }
}

// --- DOM helpers -------------------------------------------------------------

fn document() -> Result<Document, GameError> {
    window().ok_or(GameError::NoWindow)?.document().ok_or(GameError::NoDocument)
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn set_display(doc: &Document, id: &str, display: &str) {
    if let Some(el) = doc.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        el.style().set_property("display", display).ok();
    }
}

fn field_value(doc: &Document, id: &str) -> Option<String> {
    let el = doc.get_element_by_id(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

fn write_hud(doc: &Document, hud: &HudText) {
    set_text(doc, "score", &hud.score);
    set_text(doc, "timer", &hud.timer);
    set_text(doc, "accuracy", &hud.accuracy);
    set_text(doc, "reaction", &hud.reaction);
    if let Some(hover) = &hud.hover {
        set_text(doc, "hover", hover);
    }
}

fn show_summary(doc: &Document, session: &Session) {
    doc.exit_pointer_lock();
    set_display(doc, "pause-menu", "none");
    set_display(doc, "game", "none");
    set_display(doc, "main-menu", "flex");
    let summary = Summary::from_session(session);
    set_text(doc, "avg-score", &summary.score);
    set_text(doc, "avg-accuracy", &summary.accuracy);
    set_text(doc, "avg-reaction", &summary.reaction);
    if let Some(hover) = &summary.hover {
        set_text(doc, "avg-hover", hover);
    }
}
