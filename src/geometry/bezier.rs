//! Cubic Bezier evaluation over four loose control points.

use crate::foundation::core::{Point, Vec2};

/// Position on the cubic Bezier `p0..p3` at parameter `t`.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate along the same polynomial.
pub fn cubic_point(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> Point {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    let w0 = uu * u;
    let w1 = 3.0 * uu * t;
    let w2 = 3.0 * u * tt;
    let w3 = tt * t;
    Point::new(
        w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
        w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
    )
}

/// First derivative of the same curve. Only the direction is meaningful.
pub fn cubic_tangent(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> Vec2 {
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
}

/// Heading of the tangent at `t`, in radians (`atan2(dy, dx)`).
pub fn tangent_angle(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    let d = cubic_tangent(t, p0, p1, p2, p3);
    d.y.atan2(d.x)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bezier.rs"]
mod tests;
