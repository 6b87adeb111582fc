use crate::foundation::core::{BezPath, Point};
use crate::shape::curve::CurveKind;

/// Cartesian position of polar `(angle, radius)`.
///
/// Angle zero points up (toward negative y) and grows clockwise, matching screen coordinates.
pub fn point_radial(angle: f64, radius: f64) -> Point {
    Point::new(radius * angle.sin(), -radius * angle.cos())
}

/// Draw `curve` through polar `(angle, radius)` samples.
pub fn radial_line(
    curve: CurveKind,
    samples: impl IntoIterator<Item = (f64, f64)>,
) -> Option<BezPath> {
    curve.path(samples.into_iter().map(|(a, r)| point_radial(a, r)))
}

/// Arc of `radius` from `start` to `end` (clockwise), used as a label baseline.
pub fn arc_path(radius: f64, start: f64, end: f64) -> BezPath {
    let arc = kurbo::Arc {
        center: Point::ORIGIN,
        radii: kurbo::Vec2::new(radius, radius),
        start_angle: start - std::f64::consts::FRAC_PI_2,
        sweep_angle: end - start,
        x_rotation: 0.0,
    };
    let mut path = BezPath::new();
    path.move_to(point_radial(start, radius));
    arc.to_cubic_beziers(0.1, |p1, p2, p| path.curve_to(p1, p2, p));
    path
}

#[cfg(test)]
#[path = "../../tests/unit/shape/radial.rs"]
mod tests;
