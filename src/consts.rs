//! Shared numeric constants for the stamp pad.

// ── Geometry ────────────────────────────────────────────────────

/// Half-extent of a stamped shape in clip-space units.
pub const SHAPE_MAGNITUDE: f32 = 0.3;

/// Thickness of the hline/vline quads in clip-space units.
pub const LINE_WIDTH: f32 = 0.01;

// ── Vertex layout ───────────────────────────────────────────────

/// Floats per vertex (x, y).
pub const FLOATS_PER_VERTEX: usize = 2;

/// Bytes per vertex: two tightly packed `f32` components.
pub const BYTES_PER_VERTEX: i32 = 8;

// ── Frame clear ─────────────────────────────────────────────────

/// Per-frame clear color. The low alpha leaves a faint trail between
/// frames on browsers that do not preserve the drawing buffer.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.05];
