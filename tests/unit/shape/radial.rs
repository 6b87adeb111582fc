use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::{PathEl, Shape};

use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn zero_angle_points_up_and_turns_clockwise() {
    assert!(close(point_radial(0.0, 10.0), Point::new(0.0, -10.0)));
    assert!(close(point_radial(FRAC_PI_2, 10.0), Point::new(10.0, 0.0)));
    assert!(close(point_radial(PI, 10.0), Point::new(0.0, 10.0)));
}

#[test]
fn radial_line_maps_samples_before_curving() {
    let p = radial_line(
        CurveKind::LinearClosed,
        [(0.0, 5.0), (FRAC_PI_2, 5.0), (PI, 5.0)],
    )
    .unwrap();
    let PathEl::MoveTo(start) = p.elements()[0] else {
        panic!("expected move_to");
    };
    assert!(close(start, Point::new(0.0, -5.0)));
}

#[test]
fn arc_path_stays_on_the_circle() {
    let p = arc_path(20.0, 0.0, FRAC_PI_2);
    let PathEl::MoveTo(start) = p.elements()[0] else {
        panic!("expected move_to");
    };
    assert!(close(start, point_radial(0.0, 20.0)));

    let end = match p.elements().last().unwrap() {
        PathEl::CurveTo(_, _, e) => *e,
        other => panic!("unexpected {other:?}"),
    };
    assert!((end - point_radial(FRAC_PI_2, 20.0)).hypot() < 1e-6);
    assert!(p.bounding_box().width() <= 20.0 + 1e-6);
}
