use std::sync::LazyLock;

use crate::foundation::core::{BezPath, Point};

static PETAL_OUTLINE: LazyLock<BezPath> = LazyLock::new(build_petal_outline);

/// The shared unit petal, built once per process.
///
/// The lobe starts at the origin, grows toward +y within roughly `[-0.6, 0.6] x [0, 1.1]`
/// and curves back to the origin without a closing segment. Callers place it with a
/// transform instead of copying it.
pub fn petal_outline() -> &'static BezPath {
    &PETAL_OUTLINE
}

fn build_petal_outline() -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::ORIGIN);
    path.curve_to((-0.4, 0.1), (-0.6, 0.4), (-0.3, 0.8));
    path.curve_to((-0.1, 1.1), (0.1, 1.1), (0.3, 0.8));
    path.curve_to((0.6, 0.4), (0.4, 0.1), (0.0, 0.0));
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/petal.rs"]
mod tests;
