use web_sys::HtmlCanvasElement;

use crate::coords::{ScreenPoint, Viewport};
use crate::error::Error;
use crate::render::GlState;
use crate::scene::{Scene, StampRecord};
use crate::shape::ShapeKind;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// What a state mutation asks the caller to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing to push to the GPU.
    None,
    /// The scene changed; the flattened buffer must be re-uploaded.
    SceneDirty(Vec<f32>),
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies. The preview is the vertex set for the active shape
/// centered under the pointer; it stays `None` until the first pointer
/// move, so a click before any movement stamps nothing.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub scene: Scene,
    pub viewport: Viewport,
    shape: ShapeKind,
    preview: Option<Vec<f32>>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active shape.
    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// The pending preview vertices, if the pointer has moved.
    #[must_use]
    pub fn preview(&self) -> Option<&[f32]> {
        self.preview.as_deref()
    }

    /// Record the canvas size used by the screen-to-clip transform.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    /// Select the shape stamped by the next click. The old preview was
    /// built for the previous kind, so it is dropped rather than stamped.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
        self.preview = None;
    }

    /// Recompute the preview from a canvas-relative pointer position.
    pub fn on_pointer_move(&mut self, screen: ScreenPoint) -> Effect {
        let center = self.viewport.screen_to_clip(screen);
        self.preview = Some(self.shape.vertices(center));
        Effect::None
    }

    /// Stamp the preview into the scene. Ignored when the pointer has not
    /// moved since the engine started or the shape changed.
    pub fn on_pointer_down(&mut self) -> Effect {
        let Some(vertices) = self.preview.clone() else {
            return Effect::None;
        };
        self.scene.stamp(self.shape, vertices);
        Effect::SceneDirty(self.scene.flatten())
    }

    /// Remove every stamp from the pad.
    pub fn clear(&mut self) -> Effect {
        self.scene.clear();
        Effect::SceneDirty(self.scene.flatten())
    }

    /// Export the scene for the host to persist.
    #[must_use]
    pub fn snapshot(&self) -> Vec<StampRecord> {
        self.scene.snapshot()
    }

    /// Replace the scene with a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if any record's vertex array does not match its
    /// kind's draw call; the scene is left untouched.
    pub fn load_snapshot(&mut self, records: Vec<StampRecord>) -> Result<Effect, Error> {
        self.scene.load_snapshot(records)?;
        Ok(Effect::SceneDirty(self.scene.flatten()))
    }
}

/// The full pad engine. Wraps [`EngineCore`] and owns the browser canvas
/// element plus the live GL objects, pushing dirty buffers to the GPU as
/// they appear.
pub struct Engine {
    canvas: HtmlCanvasElement,
    gl: GlState,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, compiling
    /// and linking the shader program up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas yields no `"webgl"` context, a
    /// shader fails to compile, the program fails to link, or the vertex
    /// buffer cannot be allocated.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let gl = GlState::new(&canvas)?;
        let mut core = EngineCore::new();
        core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, gl, core })
    }

    /// The canvas this engine renders into.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.core.set_shape(shape);
    }

    pub fn on_pointer_move(&mut self, screen: ScreenPoint) {
        // The host may resize the canvas at any time; re-read its size
        // per event so the clip transform stays in step.
        self.core
            .set_viewport(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.apply(|core| core.on_pointer_move(screen));
    }

    pub fn on_pointer_down(&mut self) {
        self.apply(EngineCore::on_pointer_down);
    }

    pub fn clear(&mut self) {
        self.apply(EngineCore::clear);
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<StampRecord> {
        self.core.snapshot()
    }

    /// Replace the scene with a persisted snapshot and push the new
    /// buffer to the GPU.
    ///
    /// # Errors
    ///
    /// Returns an error if any record's vertex array does not match its
    /// kind's draw call; neither the scene nor the GPU buffer changes.
    pub fn load_snapshot(&mut self, records: Vec<StampRecord>) -> Result<(), Error> {
        let effect = self.core.load_snapshot(records)?;
        self.handle(effect);
        Ok(())
    }

    /// Draw the current scene to the canvas.
    pub fn render(&self) {
        self.gl.draw(&self.core.scene);
    }

    fn apply(&mut self, op: impl FnOnce(&mut EngineCore) -> Effect) {
        let effect = op(&mut self.core);
        self.handle(effect);
    }

    fn handle(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::SceneDirty(buffer) => self.gl.upload(&buffer),
        }
    }
}
