use std::f64::consts::TAU;

use tracing::debug;

use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::assets::color::ring_color;
use crate::data::model::{Dataset, angular_position};
use crate::foundation::core::{BezPath, TimeMs};
use crate::foundation::error::RingscopeResult;
use crate::scale::set::ScaleSet;
use crate::scene::model::{
    AngularTick, ArcLabel, AxisLayer, MarkerElement, PointsHandle, RingElement, RingsHandle,
    Surface,
};
use crate::shape::curve::CurveKind;
use crate::shape::radial::{arc_path, point_radial};

pub const DEFAULT_ANGULAR_TICKS: usize = 12;
pub const MIN_ANGULAR_DIVISIONS: usize = 4;
pub const MOUNT_FADE_MS: u64 = 750;
/// Total stagger budget spread over all rings.
pub const MOUNT_STAGGER_MS: f64 = 1000.0;
pub const MARKER_RADIUS: f64 = 3.0;

/// Guide lines run this far past the outer radius.
const GUIDE_OVERSHOOT: f64 = 50.0;
const INNER_LABEL_INSET: f64 = 10.0;
const OUTER_LABEL_OUTSET: f64 = 20.0;
const INNER_LABEL_EVERY: usize = 3;

/// Tunables of the initial draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountOpts {
    /// Number of angular guide lines.
    pub angular_ticks: usize,
    /// Radial axis tick count; `None` uses `series_count + 1`.
    pub radial_ticks: Option<usize>,
    /// Curve used for the first draw of every ring.
    pub curve: CurveKind,
    pub fade_ms: u64,
    pub ease: Ease,
}

impl Default for MountOpts {
    fn default() -> Self {
        Self {
            angular_ticks: DEFAULT_ANGULAR_TICKS,
            radial_ticks: None,
            curve: CurveKind::LinearClosed,
            fade_ms: MOUNT_FADE_MS,
            ease: Ease::Linear,
        }
    }
}

/// Fade-in delay of ring `ring`, so rings reveal one after another.
pub fn stagger_delay_ms(ring: usize, series_count: usize) -> u64 {
    (ring as f64 * MOUNT_STAGGER_MS / series_count.max(1) as f64).round() as u64
}

/// Draw axes, rings and markers into a fresh surface.
///
/// Single-shot per surface generation: a second call fails until the surface is torn down.
#[tracing::instrument(
    skip_all,
    fields(rings = dataset.series_count(), points = dataset.total_points())
)]
pub fn mount(
    surface: &mut Surface,
    scales: &ScaleSet,
    dataset: &Dataset,
    opts: &MountOpts,
    now: TimeMs,
) -> RingscopeResult<(RingsHandle, PointsHandle)> {
    surface.begin_mount(scales.view.size())?;
    surface.axes = build_axes(scales, opts);

    let n = dataset.series_count();
    for (i, series) in dataset.series.iter().enumerate() {
        let delay = stagger_delay_ms(i, n);
        let color = ring_color(i, n);
        let ring_scale = scales.per_ring(i);
        let radii: Vec<f64> = series
            .points
            .iter()
            .map(|p| ring_scale.apply(p.value))
            .collect();

        surface.rings.push(RingElement {
            ring: i,
            datum: series.clone(),
            stroke: color,
            curve: opts.curve,
            radii: Tween::constant(radii),
            opacity: Tween::new(0.0, 1.0, now, delay, opts.fade_ms, opts.ease),
        });

        let len = series.len();
        let markers = series
            .points
            .iter()
            .enumerate()
            .map(|(j, p)| {
                let angle = angular_position(j, len);
                let center = point_radial(angle, scales.radius_of(p.ring, p.value));
                let delay = stagger_delay_ms(p.ring, n);
                MarkerElement {
                    datum: *p,
                    index: j,
                    fill: ring_color(p.ring, n),
                    radius: MARKER_RADIUS,
                    center: Tween::constant(center),
                    opacity: Tween::new(0.0, 1.0, now, delay, opts.fade_ms, opts.ease),
                }
            })
            .collect();
        surface.markers.push(markers);
    }

    let handles = surface.finish_mount();
    debug!(
        generation = surface.generation(),
        rings = handles.0.len(),
        markers = handles.1.len(),
        "surface mounted"
    );
    Ok(handles)
}

/// Fit an already-mounted surface to new scales: axes are rebuilt and geometry jumps to the
/// positions of the currently bound data. Fades in progress are left alone.
#[tracing::instrument(skip_all, fields(width = scales.view.width, height = scales.view.height))]
pub fn relayout(surface: &mut Surface, scales: &ScaleSet, opts: &MountOpts) {
    surface.set_size(scales.view.size());
    surface.axes = build_axes(scales, opts);

    for ring in &mut surface.rings {
        let ring_scale = scales.per_ring(ring.ring);
        let radii = ring
            .datum
            .points
            .iter()
            .map(|p| ring_scale.apply(p.value))
            .collect();
        ring.radii.snap(radii);
    }
    for group in &mut surface.markers {
        let len = group.len();
        for m in group.iter_mut() {
            let angle = angular_position(m.index, len);
            let radius = scales.radius_of(m.datum.ring, m.datum.value);
            m.center.snap(point_radial(angle, radius));
        }
    }
}

/// `ceil` with a small tolerance so exact multiples stay put.
pub(crate) fn ceil_degrees(deg: f64) -> f64 {
    // `+ 0.0` turns `-0` into `0`.
    (deg - 1e-9).ceil() + 0.0
}

fn degree_label(scales: &ScaleSet, angle: f64) -> String {
    format!("{}°", ceil_degrees(scales.angular.apply(angle)))
}

/// Angular guides with their label bands, and the radial axis circles.
pub fn build_axes(scales: &ScaleSet, opts: &MountOpts) -> AxisLayer {
    let inner = scales.inner_radius;
    let outer = scales.outer_radius;
    let step = TAU / opts.angular_ticks.max(MIN_ANGULAR_DIVISIONS) as f64;
    let inner_band = (inner - INNER_LABEL_INSET).max(0.0);
    let outer_band = outer + OUTER_LABEL_OUTSET;

    let angular = (0..opts.angular_ticks)
        .map(|i| {
            let angle = i as f64 * step;
            let mut guide = BezPath::new();
            guide.move_to(point_radial(angle, inner));
            guide.line_to(point_radial(angle, outer + GUIDE_OVERSHOOT));

            let label = degree_label(scales, angle);
            AngularTick {
                angle,
                guide,
                inner_label: ArcLabel {
                    id: format!("p-{i}"),
                    baseline: arc_path(inner_band, angle, angle + step),
                    text: if i % INNER_LABEL_EVERY == 0 {
                        label.clone()
                    } else {
                        String::new()
                    },
                    font_size: 10.0,
                    start_offset: 0.0,
                },
                outer_label: ArcLabel {
                    id: format!("po-{i}"),
                    baseline: arc_path(outer_band, angle, angle + step),
                    text: label,
                    font_size: 16.0,
                    start_offset: 6.0,
                },
            }
        })
        .collect();

    let radial_ticks = opts.radial_ticks.unwrap_or(scales.series_count + 1);
    let circles = scales
        .radial
        .ticks(radial_ticks)
        .into_iter()
        .rev()
        .map(|t| scales.radial.apply(t))
        .collect();

    AxisLayer { angular, circles }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mount.rs"]
mod tests;
