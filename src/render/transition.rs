use tracing::debug;

use crate::animation::ease::Ease;
use crate::data::model::{Dataset, angular_position};
use crate::foundation::core::TimeMs;
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::scale::set::{ScaleSet, radial_scale};
use crate::scene::model::{MarkerElement, PointsHandle, RingElement, RingsHandle, Surface};
use crate::shape::curve::CurveKind;
use crate::shape::radial::point_radial;

/// Rebind every ring to its series in `dataset` and animate the outlines to the new values.
///
/// Stroke opacity is driven to fully opaque over the same interval, so a ring whose fade-in was
/// still pending becomes visible with the update.
#[tracing::instrument(
    skip(surface, handle, dataset, scales),
    fields(rings = dataset.series_count())
)]
pub fn transition_rings(
    surface: &mut Surface,
    handle: RingsHandle,
    dataset: &Dataset,
    scales: &ScaleSet,
    duration_ms: u64,
    curve: CurveKind,
    now: TimeMs,
) -> RingscopeResult<()> {
    let rings = surface.rings_mut(handle)?;
    check_ring_shape(rings, dataset)?;

    for (ring, series) in rings.iter_mut().zip(&dataset.series) {
        let ring_scale = scales.per_ring(ring.ring);
        let radii = series
            .points
            .iter()
            .map(|p| ring_scale.apply(p.value))
            .collect();

        ring.radii.retarget(now, radii, 0, duration_ms, Ease::Linear);
        ring.opacity.retarget(now, 1.0, 0, duration_ms, Ease::Linear);
        ring.curve = curve;
        ring.datum = series.clone();
    }
    debug!(duration_ms, "ring transition scheduled");
    Ok(())
}

/// Animate every marker center to the polar position of its point in `dataset`.
///
/// The radial scale is rebuilt from `inner`/`outer` and the dataset's series count. Marker
/// fades are not touched.
#[tracing::instrument(skip(surface, handle, dataset), fields(points = dataset.total_points()))]
pub fn transition_points(
    surface: &mut Surface,
    handle: PointsHandle,
    dataset: &Dataset,
    duration_ms: u64,
    inner: f64,
    outer: f64,
    now: TimeMs,
) -> RingscopeResult<()> {
    let groups = surface.marker_groups_mut(handle)?;
    check_marker_shape(groups, dataset)?;

    let radial = radial_scale(inner, outer, dataset.series_count());
    for (group, series) in groups.iter_mut().zip(&dataset.series) {
        let len = series.len();
        for (marker, point) in group.iter_mut().zip(&series.points) {
            let angle = angular_position(marker.index, len);
            let target = point_radial(angle, radial.apply(point.ring as f64 + point.value));
            marker.center.retarget(now, target, 0, duration_ms, Ease::Linear);
            marker.datum = *point;
        }
    }
    debug!(duration_ms, "point transition scheduled");
    Ok(())
}

fn check_ring_shape(rings: &[RingElement], dataset: &Dataset) -> RingscopeResult<()> {
    let matches = rings.len() == dataset.series_count()
        && rings
            .iter()
            .zip(&dataset.series)
            .all(|(r, s)| r.datum.len() == s.len());
    if !matches {
        return Err(RingscopeError::render(format!(
            "dataset shape {:?} does not match the {} mounted rings",
            dataset.shape(),
            rings.len()
        )));
    }
    Ok(())
}

fn check_marker_shape(groups: &[Vec<MarkerElement>], dataset: &Dataset) -> RingscopeResult<()> {
    let matches = groups.len() == dataset.series_count()
        && groups
            .iter()
            .zip(&dataset.series)
            .all(|(g, s)| g.len() == s.len());
    if !matches {
        return Err(RingscopeError::render(format!(
            "dataset shape {:?} does not match the mounted markers",
            dataset.shape()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/transition.rs"]
mod tests;
