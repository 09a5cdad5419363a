//! Crate error type.
//!
//! Rendering setup is the only fallible path: shader compilation, program
//! linking, and buffer allocation can all be rejected by the driver. Each
//! failure carries the platform-provided info log where one exists. At the
//! `wasm_bindgen` boundary errors convert into [`JsValue`] so the host sees
//! an ordinary thrown exception.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::shape::ShapeKind;

#[derive(Debug, Error)]
pub enum Error {
    /// The canvas did not yield a `"webgl"` context.
    #[error("webgl context unavailable")]
    ContextUnavailable,

    /// A shader stage was rejected by the driver.
    #[error("could not compile shader: {0}")]
    ShaderCompile(String),

    /// The program failed to link.
    #[error("could not link WebGL program: {0}")]
    ProgramLink(String),

    /// The named attribute is not an active attribute of the program.
    #[error("attribute {0:?} not found in program")]
    AttribNotFound(&'static str),

    /// The driver returned no buffer object.
    #[error("failed to create vertex buffer object")]
    BufferAlloc,

    /// A DOM or platform call failed outside the paths above.
    #[error("platform call failed: {0}")]
    Platform(String),

    /// The host passed an unrecognized shape name.
    #[error("unknown shape kind: {0:?}")]
    UnknownShape(String),

    /// A snapshot failed to serialize or deserialize.
    #[error("snapshot codec failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A snapshot record's vertex array does not match its kind's
    /// draw call, which would desynchronize the renderer's offset walk
    /// from the flattened buffer.
    #[error("snapshot stamp for {kind:?} has {got} floats, expected {expected}")]
    SnapshotGeometry {
        kind: ShapeKind,
        got: usize,
        expected: usize,
    },
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Platform(text)
    }
}
