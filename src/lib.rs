//! WebGL shape-stamping pad, compiled to WebAssembly.
//!
//! This crate runs in the browser against a host-provided `<canvas>`
//! element. Moving the pointer previews the active shape under the
//! cursor; clicking stamps it into the scene. Every animation frame the
//! canvas is cleared and redrawn, one draw call per stamp, all geometry
//! living in a single shared vertex buffer that is rebuilt by flattening
//! the whole scene on every stamp.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Accumulated stamps and the flattened vertex buffer |
//! | [`shape`] | Shape kinds, vertex construction, draw-call table |
//! | [`coords`] | Screen-pixel to clip-space conversion |
//! | [`render`] | All WebGL calls: shaders, buffer upload, frame draw |
//! | [`app`] | DOM wiring: listeners, frame counter, render loop |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants |

pub mod app;
pub mod consts;
pub mod coords;
pub mod engine;
pub mod error;
pub mod render;
pub mod scene;
pub mod shape;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub use crate::app::Pad;

const LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Info
};

/// Attach the stamp pad to `canvas` and start the render loop.
///
/// Returns a [`Pad`] handle the host uses to switch shapes, clear the
/// pad, and take snapshots.
///
/// # Errors
///
/// Throws if the canvas yields no WebGL context, the shader program
/// fails to compile or link, or the vertex buffer cannot be allocated.
#[wasm_bindgen]
pub fn start(canvas: HtmlCanvasElement) -> Result<Pad, JsValue> {
    init_logging();
    let pad = app::start(canvas)?;
    Ok(pad)
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(LOG_LEVEL).is_err() {
        log::debug!("logger already initialized");
    }
}
