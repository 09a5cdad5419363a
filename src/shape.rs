//! Shape kinds, per-kind vertex construction, and the draw-call table.
//!
//! Every stamp is a short interleaved `[x0, y0, x1, y1, ...]` vertex array
//! in clip space, built from the pointer position at the moment of the
//! click. The renderer never inspects individual stamps; it only needs the
//! per-kind [`DrawCall`] (primitive mode plus vertex count) to step through
//! the flattened buffer.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{LINE_WIDTH, SHAPE_MAGNITUDE};
use crate::coords::ClipPoint;
use crate::error::Error;

/// The kind of shape a click stamps onto the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A single vertex rendered as a 5px point sprite.
    #[default]
    Point,
    /// A thin horizontal bar spanning the shape magnitude.
    HLine,
    /// A thin vertical bar spanning the shape magnitude.
    VLine,
    /// An isoceles triangle, apex up.
    Triangle,
    /// An axis-aligned square with half the shape magnitude per side.
    Square,
}

/// Canonical kind order, shared by scene flattening and frame drawing.
/// The byte offsets the renderer computes are only valid because both
/// sides walk this same order.
pub const ALL_KINDS: [ShapeKind; KIND_COUNT] = [
    ShapeKind::Point,
    ShapeKind::HLine,
    ShapeKind::VLine,
    ShapeKind::Triangle,
    ShapeKind::Square,
];

/// Number of shape kinds.
pub const KIND_COUNT: usize = 5;

/// Primitive mode for a draw call, kept free of `web-sys` types so the
/// table is usable from native unit tests. The renderer maps these onto
/// the matching `WebGlRenderingContext` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Triangles,
    TriangleFan,
}

/// Fixed draw-call parameters for one kind of shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub mode: PrimitiveMode,
    pub vertex_count: usize,
}

impl ShapeKind {
    /// Index of this kind within [`ALL_KINDS`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Point => 0,
            Self::HLine => 1,
            Self::VLine => 2,
            Self::Triangle => 3,
            Self::Square => 4,
        }
    }

    /// The DOM-facing name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::HLine => "hline",
            Self::VLine => "vline",
            Self::Triangle => "triangle",
            Self::Square => "square",
        }
    }

    /// Per-kind primitive mode and vertex count.
    #[must_use]
    pub fn draw_call(self) -> DrawCall {
        match self {
            Self::Point => DrawCall { mode: PrimitiveMode::Points, vertex_count: 1 },
            Self::HLine | Self::VLine | Self::Square => {
                DrawCall { mode: PrimitiveMode::TriangleFan, vertex_count: 4 }
            }
            Self::Triangle => DrawCall { mode: PrimitiveMode::Triangles, vertex_count: 3 },
        }
    }

    /// Build the clip-space vertex array for this kind centered at `center`.
    ///
    /// Quads are wound bottom-left, bottom-right, top-right, top-left so a
    /// triangle fan fills them. The triangle runs apex, bottom-left,
    /// bottom-right.
    #[must_use]
    pub fn vertices(self, center: ClipPoint) -> Vec<f32> {
        #[allow(clippy::cast_possible_truncation)]
        let (cx, cy) = (center.x as f32, center.y as f32);
        let half_line = LINE_WIDTH / 2.0;
        let half_square = SHAPE_MAGNITUDE / 2.0;

        match self {
            Self::Point => vec![cx, cy],
            Self::HLine => vec![
                cx - SHAPE_MAGNITUDE, cy - half_line,
                cx + SHAPE_MAGNITUDE, cy - half_line,
                cx + SHAPE_MAGNITUDE, cy + half_line,
                cx - SHAPE_MAGNITUDE, cy + half_line,
            ],
            Self::VLine => vec![
                cx - half_line, cy - SHAPE_MAGNITUDE,
                cx + half_line, cy - SHAPE_MAGNITUDE,
                cx + half_line, cy + SHAPE_MAGNITUDE,
                cx - half_line, cy + SHAPE_MAGNITUDE,
            ],
            Self::Triangle => vec![
                cx, cy + SHAPE_MAGNITUDE,
                cx - SHAPE_MAGNITUDE, cy - SHAPE_MAGNITUDE,
                cx + SHAPE_MAGNITUDE, cy - SHAPE_MAGNITUDE,
            ],
            Self::Square => vec![
                cx - half_square, cy - half_square,
                cx + half_square, cy - half_square,
                cx + half_square, cy + half_square,
                cx - half_square, cy + half_square,
            ],
        }
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(Self::Point),
            "hline" => Ok(Self::HLine),
            "vline" => Ok(Self::VLine),
            "triangle" => Ok(Self::Triangle),
            "square" => Ok(Self::Square),
            other => Err(Error::UnknownShape(other.to_owned())),
        }
    }
}
