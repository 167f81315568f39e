use crate::foundation::error::{BloomError, BloomResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Timestamps and durations, in milliseconds.
pub type TimeMs = f64;

/// Drawing-surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl Canvas {
    const MAX_FIT_WIDTH: f64 = 1000.0;
    const MAX_FIT_HEIGHT: f64 = 600.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size a canvas for a viewport: 90% of its width capped at 1000px, 70% of its height
    /// capped at 600px.
    pub fn fit_viewport(viewport_width: f64, viewport_height: f64) -> Self {
        let w = (viewport_width * 0.9).min(Self::MAX_FIT_WIDTH).max(0.0);
        let h = (viewport_height * 0.7).min(Self::MAX_FIT_HEIGHT).max(0.0);
        Self {
            width: w.floor() as u32,
            height: h.floor() as u32,
        }
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }

    pub fn min_side(self) -> f64 {
        self.width_f64().min(self.height_f64())
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }

    pub fn validate(self) -> BloomResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BloomError::validation("canvas width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(BloomError::validation(format!(
                "canvas {}x{} exceeds the {}px raster limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
