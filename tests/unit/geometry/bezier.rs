use super::*;
use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv};

fn sample_controls() -> [Point; 4] {
    [
        Point::new(500.0, 190.0),
        Point::new(512.0, 246.0),
        Point::new(491.0, 402.0),
        Point::new(500.0, 650.0),
    ]
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn endpoints_match_first_and_last_control_points() {
    let [p0, p1, p2, p3] = sample_controls();
    assert!(close(cubic_point(0.0, p0, p1, p2, p3), p0));
    assert!(close(cubic_point(1.0, p0, p1, p2, p3), p3));

    let q = [
        Point::new(-3.5, 7.25),
        Point::new(1e3, -2e3),
        Point::new(0.0, 0.0),
        Point::new(42.0, -0.5),
    ];
    assert!(close(cubic_point(0.0, q[0], q[1], q[2], q[3]), q[0]));
    assert!(close(cubic_point(1.0, q[0], q[1], q[2], q[3]), q[3]));
}

#[test]
fn agrees_with_kurbo_cubic() {
    let [p0, p1, p2, p3] = sample_controls();
    let reference = CubicBez::new(p0, p1, p2, p3);
    let deriv = reference.deriv();
    for t in [0.0, 0.13, 0.4, 0.5, 0.7, 0.99, 1.0] {
        assert!(close(cubic_point(t, p0, p1, p2, p3), reference.eval(t)));
        let ours = cubic_tangent(t, p0, p1, p2, p3);
        let theirs = deriv.eval(t).to_vec2();
        assert!((ours - theirs).hypot() < 1e-9, "t={t}");
    }
}

#[test]
fn extrapolates_outside_unit_interval() {
    let p0 = Point::new(0.0, 0.0);
    let p1 = Point::new(1.0, 0.0);
    let p2 = Point::new(2.0, 0.0);
    let p3 = Point::new(3.0, 0.0);
    // Evenly spaced collinear controls give a linear parameterization.
    assert!(close(cubic_point(2.0, p0, p1, p2, p3), Point::new(6.0, 0.0)));
    assert!(close(cubic_point(-1.0, p0, p1, p2, p3), Point::new(-3.0, 0.0)));
}

#[test]
fn tangent_angle_of_vertical_line_points_down() {
    let p0 = Point::new(10.0, 0.0);
    let p1 = Point::new(10.0, 1.0);
    let p2 = Point::new(10.0, 2.0);
    let p3 = Point::new(10.0, 3.0);
    let a = tangent_angle(0.4, p0, p1, p2, p3);
    assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}
