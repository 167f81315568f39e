use super::*;
use kurbo::{PathEl, Shape};

#[test]
fn outline_is_shared() {
    assert!(std::ptr::eq(petal_outline(), petal_outline()));
}

#[test]
fn outline_starts_and_ends_at_origin() {
    let els = petal_outline().elements();
    assert_eq!(els.first(), Some(&PathEl::MoveTo(Point::ORIGIN)));
    let curves = els
        .iter()
        .filter(|el| matches!(el, PathEl::CurveTo(..)))
        .count();
    assert_eq!(curves, 3);
    // Three curves and nothing after: the outline stroke has no closing join.
    assert_eq!(els.len(), 4);
    assert!(matches!(els.last(), Some(PathEl::CurveTo(_, _, p)) if *p == Point::ORIGIN));
}

#[test]
fn outline_is_a_symmetric_unit_lobe() {
    let bb = petal_outline().bounding_box();
    assert!(bb.x0 >= -0.6 && bb.x1 <= 0.6, "{bb:?}");
    assert!(bb.y0 >= -1e-9 && bb.y1 <= 1.1, "{bb:?}");
    assert!((bb.x0 + bb.x1).abs() < 1e-9);
    assert!(bb.height() > 0.8);
}
