//! DOM wiring: event listeners, the frame counter, and the render loop.
//!
//! This module is the bridge between browser events and the imperative
//! [`Engine`]. The engine is shared between the pointer handlers and the
//! per-frame callback through `Rc<RefCell<_>>`; everything runs on the
//! browser event loop, so there is no locking.
//!
//! Listener and frame closures are intentionally leaked with
//! [`Closure::forget`] — they live as long as the page does.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, Window};

use crate::coords::ScreenPoint;
use crate::engine::Engine;
use crate::error::Error;
use crate::shape::ShapeKind;

/// Handle returned to the host. Keeps the engine alive and exposes the
/// toolbar-facing operations (shape selection, clearing, snapshots).
#[wasm_bindgen]
pub struct Pad {
    engine: Rc<RefCell<Engine>>,
}

#[wasm_bindgen]
impl Pad {
    /// Select the shape stamped by the next click, by its DOM name
    /// (`"point"`, `"hline"`, `"vline"`, `"triangle"`, `"square"`).
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized shape name.
    pub fn set_shape(&self, name: &str) -> Result<(), JsValue> {
        let kind = ShapeKind::from_str(name)?;
        log::debug!("active shape -> {}", kind.as_str());
        self.engine.borrow_mut().set_shape(kind);
        Ok(())
    }

    /// Remove every stamp from the pad.
    pub fn clear(&self) {
        self.engine.borrow_mut().clear();
    }

    /// Export the stamped scene as JSON for the host to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let records = self.engine.borrow().snapshot();
        let json = serde_json::to_string(&records).map_err(Error::from)?;
        Ok(json)
    }

    /// Replace the scene with a previously exported snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid snapshot, or if any
    /// record's vertex array does not match its kind's draw call.
    pub fn load_snapshot(&self, json: &str) -> Result<(), JsValue> {
        let records = serde_json::from_str(json).map_err(Error::from)?;
        self.engine.borrow_mut().load_snapshot(records)?;
        Ok(())
    }
}

/// Build the engine for `canvas`, wire its pointer events, mount the
/// frame counter, and start the render loop.
///
/// # Errors
///
/// Returns an error if GL setup fails or the document refuses the
/// listener / frame-counter wiring.
pub fn start(canvas: HtmlCanvasElement) -> Result<Pad, Error> {
    let engine = Rc::new(RefCell::new(Engine::new(canvas)?));
    wire_pointer_events(&engine)?;

    let document = document()?;
    let counter = FrameCounter::mount(&document)?;
    spawn_render_loop(Rc::clone(&engine), counter)?;

    log::info!("stamp pad started");
    Ok(Pad { engine })
}

// =============================================================
// Pointer events
// =============================================================

fn wire_pointer_events(engine: &Rc<RefCell<Engine>>) -> Result<(), Error> {
    let canvas = engine.borrow().canvas().clone();

    let move_engine = Rc::clone(engine);
    let move_canvas = canvas.clone();
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let screen = canvas_point(&move_canvas, &event);
        move_engine.borrow_mut().on_pointer_move(screen);
    });
    canvas
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
        .map_err(Error::from)?;
    on_move.forget();

    let down_engine = Rc::clone(engine);
    let on_down = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
        down_engine.borrow_mut().on_pointer_down();
    });
    canvas
        .add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())
        .map_err(Error::from)?;
    on_down.forget();

    Ok(())
}

/// Translate a mouse event into canvas-relative screen coordinates.
fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> ScreenPoint {
    let rect = canvas.get_bounding_client_rect();
    ScreenPoint::new(
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    )
}

// =============================================================
// Frame counter
// =============================================================

/// The `#Frames: N` readout appended to the document body, carried over
/// from the original demo as a minimal liveness indicator.
struct FrameCounter {
    element: Element,
    frames: Cell<u64>,
}

impl FrameCounter {
    fn mount(document: &Document) -> Result<Self, Error> {
        let element = document.create_element("div").map_err(Error::from)?;
        let body = document
            .body()
            .ok_or_else(|| Error::Platform("document has no body".to_owned()))?;
        body.append_child(&element).map_err(Error::from)?;
        Ok(Self { element, frames: Cell::new(0) })
    }

    fn tick(&self) {
        let frames = self.frames.get();
        self.element
            .set_text_content(Some(&format!("#Frames: {frames}")));
        self.frames.set(frames + 1);
    }
}

// =============================================================
// Render loop
// =============================================================

/// Run an unbounded `requestAnimationFrame` loop. The frame closure holds
/// a handle to itself so it can re-register after every tick.
fn spawn_render_loop(engine: Rc<RefCell<Engine>>, counter: FrameCounter) -> Result<(), Error> {
    let window = window()?;
    let handle: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let inner_handle = Rc::clone(&handle);
    let inner_window = window.clone();
    *handle.borrow_mut() = Some(Closure::new(move || {
        engine.borrow().render();
        counter.tick();
        if let Some(frame) = inner_handle.borrow().as_ref() {
            if let Err(err) = inner_window.request_animation_frame(frame.as_ref().unchecked_ref()) {
                log::error!("failed to schedule next frame: {err:?}");
            }
        }
    }));

    if let Some(frame) = handle.borrow().as_ref() {
        window
            .request_animation_frame(frame.as_ref().unchecked_ref())
            .map_err(Error::from)?;
    }
    Ok(())
}

// =============================================================
// Platform lookups
// =============================================================

fn window() -> Result<Window, Error> {
    web_sys::window().ok_or_else(|| Error::Platform("no window object".to_owned()))
}

fn document() -> Result<Document, Error> {
    window()?
        .document()
        .ok_or_else(|| Error::Platform("window has no document".to_owned()))
}
