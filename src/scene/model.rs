use crate::animation::tween::Tween;
use crate::assets::color::ColorDef;
use crate::data::model::{Point as Datum, Series};
use crate::foundation::core::{BezPath, Point, Size, TimeMs};
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::scene::zoom::{ZoomBehavior, ZoomGesture, ZoomTransform};
use crate::shape::curve::CurveKind;
use crate::shape::radial::radial_line;

/// Text laid along a circular baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLabel {
    /// Element id the text refers to (`textPath href`).
    pub id: String,
    pub baseline: BezPath,
    /// Empty when the label is suppressed to avoid crowding.
    pub text: String,
    pub font_size: f64,
    pub start_offset: f64,
}

/// One angular tick: a dashed guide line plus its two label bands.
#[derive(Clone, Debug, PartialEq)]
pub struct AngularTick {
    pub angle: f64,
    pub guide: BezPath,
    pub inner_label: ArcLabel,
    pub outer_label: ArcLabel,
}

/// Static axis geometry, rebuilt only on mount or resize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisLayer {
    pub angular: Vec<AngularTick>,
    /// Radial axis circle radii, outermost first.
    pub circles: Vec<f64>,
}

/// Retained ring path: the bound series plus tweened geometry and opacity.
#[derive(Clone, Debug)]
pub struct RingElement {
    pub ring: usize,
    pub datum: Series,
    pub stroke: ColorDef,
    pub curve: CurveKind,
    pub(crate) radii: Tween<Vec<f64>>,
    pub(crate) opacity: Tween<f64>,
}

impl RingElement {
    pub fn radii_at(&self, now: TimeMs) -> Vec<f64> {
        self.radii.sample(now)
    }

    pub fn opacity_at(&self, now: TimeMs) -> f64 {
        self.opacity.sample(now)
    }

    /// Ring outline at `now`; `None` for a ring without points.
    pub fn path_at(&self, now: TimeMs) -> Option<BezPath> {
        let radii = self.radii.sample(now);
        radial_line(self.curve, self.datum.angles().zip(radii))
    }

    pub(crate) fn is_settled(&self, now: TimeMs) -> bool {
        self.radii.is_settled(now) && self.opacity.is_settled(now)
    }
}

/// Retained point marker.
#[derive(Clone, Debug)]
pub struct MarkerElement {
    pub datum: Datum,
    /// Index of the point within its ring.
    pub index: usize,
    pub fill: ColorDef,
    pub radius: f64,
    pub(crate) center: Tween<Point>,
    pub(crate) opacity: Tween<f64>,
}

impl MarkerElement {
    pub fn center_at(&self, now: TimeMs) -> Point {
        self.center.sample(now)
    }

    pub fn opacity_at(&self, now: TimeMs) -> f64 {
        self.opacity.sample(now)
    }

    pub(crate) fn is_settled(&self, now: TimeMs) -> bool {
        self.center.is_settled(now) && self.opacity.is_settled(now)
    }
}

/// Opaque reference to the ring paths drawn by one mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingsHandle {
    generation: u64,
    count: usize,
}

impl RingsHandle {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Opaque reference to the point markers drawn by one mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointsHandle {
    generation: u64,
    count: usize,
}

impl PointsHandle {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Retained vector surface owned by one chart instance.
///
/// Elements are only created by a mount; a surface can be mounted once per generation.
#[derive(Debug, Default)]
pub struct Surface {
    size: Option<Size>,
    zoom: ZoomBehavior,
    pub(crate) axes: AxisLayer,
    pub(crate) rings: Vec<RingElement>,
    /// Markers grouped by ring.
    pub(crate) markers: Vec<Vec<MarkerElement>>,
    generation: u64,
    mounted: bool,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn axes(&self) -> &AxisLayer {
        &self.axes
    }

    pub fn rings(&self) -> &[RingElement] {
        &self.rings
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerElement> {
        self.markers.iter().flatten()
    }

    pub fn marker_groups(&self) -> &[Vec<MarkerElement>] {
        &self.markers
    }

    pub fn zoom(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    /// Route a pointer gesture to the pan/zoom handler. Ignored before mount.
    pub fn handle_gesture(&mut self, gesture: ZoomGesture) -> Option<ZoomTransform> {
        if !self.mounted {
            return None;
        }
        Some(self.zoom.handle(gesture))
    }

    /// Return `true` when no element has an interpolation left to run after `now`.
    pub fn is_settled(&self, now: TimeMs) -> bool {
        self.rings.iter().all(|r| r.is_settled(now)) && self.markers().all(|m| m.is_settled(now))
    }

    /// Claim the surface for a mount. Fails when it is already mounted.
    pub(crate) fn begin_mount(&mut self, size: Size) -> RingscopeResult<()> {
        if self.mounted {
            return Err(RingscopeError::render(format!(
                "surface generation {} is already mounted",
                self.generation
            )));
        }
        if !size.is_measured() {
            return Err(RingscopeError::render("cannot mount an unmeasured surface"));
        }
        self.size = Some(size);
        self.mounted = true;
        Ok(())
    }

    pub(crate) fn finish_mount(&mut self) -> (RingsHandle, PointsHandle) {
        (
            RingsHandle {
                generation: self.generation,
                count: self.rings.len(),
            },
            PointsHandle {
                generation: self.generation,
                count: self.markers.iter().map(Vec::len).sum(),
            },
        )
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }

    /// Drop every element and start a new generation; old handles become stale.
    pub fn teardown(&mut self) {
        self.axes = AxisLayer::default();
        self.rings.clear();
        self.markers.clear();
        self.mounted = false;
        self.generation += 1;
    }

    pub(crate) fn rings_mut(&mut self, handle: RingsHandle) -> RingscopeResult<&mut [RingElement]> {
        self.check_generation(handle.generation)?;
        Ok(&mut self.rings)
    }

    pub(crate) fn marker_groups_mut(
        &mut self,
        handle: PointsHandle,
    ) -> RingscopeResult<&mut [Vec<MarkerElement>]> {
        self.check_generation(handle.generation)?;
        Ok(&mut self.markers)
    }

    fn check_generation(&self, generation: u64) -> RingscopeResult<()> {
        if !self.mounted || generation != self.generation {
            return Err(RingscopeError::render(format!(
                "stale handle: generation {generation}, surface at {} (mounted: {})",
                self.generation, self.mounted
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
