#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

/// A point in canvas-relative screen space (CSS pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in WebGL clip space (y grows upward, on-canvas points lie in
/// `[-1, 1]` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPoint {
    pub x: f64,
    pub y: f64,
}

impl ClipPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions used for the screen/clip conversion.
///
/// `width` / `height` are in CSS pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert a canvas-relative screen point to clip coordinates.
    ///
    /// An empty viewport has no meaningful transform; it maps everything
    /// to the clip origin rather than dividing by zero.
    #[must_use]
    pub fn screen_to_clip(&self, screen: ScreenPoint) -> ClipPoint {
        if self.width <= 0.0 || self.height <= 0.0 {
            return ClipPoint::new(0.0, 0.0);
        }
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        ClipPoint {
            x: (screen.x - half_w) / half_w,
            y: (half_h - screen.y) / half_h,
        }
    }

    /// Convert a clip-space point back to canvas-relative screen pixels.
    #[must_use]
    pub fn clip_to_screen(&self, clip: ClipPoint) -> ScreenPoint {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        ScreenPoint {
            x: clip.x * half_w + half_w,
            y: half_h - clip.y * half_h,
        }
    }
}
