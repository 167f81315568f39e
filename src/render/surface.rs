use kurbo::Shape as _;

use crate::foundation::{
    color::Rgba8,
    core::{Affine, BezPath, Canvas, Point, Vec2},
};

/// Flattening tolerance for arcs, in the local units of the shape being built.
const ARC_TOLERANCE: f64 = 0.05;

/// How a filled or stroked path is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Rgba8),
    /// Two-circle radial gradient sharing one center, in path-local coordinates.
    Radial {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        inner: Rgba8,
        outer: Rgba8,
    },
}

impl Brush {
    pub fn solid(color: Rgba8) -> Self {
        Self::Solid(color)
    }

    pub fn radial(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        inner: Rgba8,
        outer: Rgba8,
    ) -> Self {
        Self::Radial {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
        }
    }
}

/// A 2D paint target.
///
/// Paths are given in local coordinates together with the transform that maps them to
/// canvas pixels; stroke widths are local too and scale with the transform.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Rgba8);

    fn fill_path(&mut self, path: &BezPath, transform: Affine, brush: &Brush);

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, brush: &Brush, width: f64);
}

/// Canvas-style immediate-mode drawing over a [`Surface`]: a current transform plus a
/// save/restore stack.
///
/// `translate`, `rotate` and `scale` post-multiply the current transform, so the most
/// recent call applies first to path coordinates.
pub struct Painter<'a> {
    surface: &'a mut dyn Surface,
    current: Affine,
    saved: Vec<Affine>,
}

impl<'a> Painter<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self {
            surface,
            current: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn transform(&self) -> Affine {
        self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved transform. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current *= Affine::translate(offset);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.current *= Affine::rotate(radians);
    }

    pub fn scale(&mut self, factor: f64) {
        self.current *= Affine::scale(factor);
    }

    pub fn fill(&mut self, path: &BezPath, brush: &Brush) {
        self.surface.fill_path(path, self.current, brush);
    }

    pub fn stroke(&mut self, path: &BezPath, brush: &Brush, width: f64) {
        self.surface.stroke_path(path, self.current, brush, width);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, brush: &Brush) {
        let path = kurbo::Circle::new(center, radius).to_path(ARC_TOLERANCE);
        self.fill(&path, brush);
    }

    pub fn fill_ellipse(&mut self, center: Point, radii: Vec2, brush: &Brush) {
        let path = kurbo::Ellipse::new(center, radii, 0.0).to_path(ARC_TOLERANCE);
        self.fill(&path, brush);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
