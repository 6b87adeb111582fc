use tracing::{debug, warn};

use crate::data::model::Dataset;
use crate::foundation::core::{Size, TimeMs};
use crate::foundation::error::RingscopeResult;
use crate::render::mount::{MountOpts, mount, relayout};
use crate::render::svg::{Theme, render_svg};
use crate::render::transition::{transition_points, transition_rings};
use crate::scale::set::{ScaleCache, ScaleSet, ViewConfig};
use crate::scene::model::{PointsHandle, RingsHandle, Surface};
use crate::scene::zoom::{ZoomGesture, ZoomTransform};
use crate::shape::curve::CurveKind;

#[derive(Clone, Copy, Debug)]
struct Mounted {
    rings: RingsHandle,
    points: PointsHandle,
}

/// One radial chart: owns its surface, the handles of the mounted elements and the scale cache.
#[derive(Debug)]
pub struct RadialChart {
    surface: Surface,
    scales: ScaleCache,
    view: Option<ViewConfig>,
    mounted: Option<Mounted>,
    /// Per-series point counts of the mounted dataset.
    shape: Vec<usize>,
    opts: MountOpts,
    mount_count: u64,
}

impl RadialChart {
    pub fn new(opts: MountOpts) -> Self {
        Self {
            surface: Surface::new(),
            scales: ScaleCache::new(),
            view: None,
            mounted: None,
            shape: Vec::new(),
            opts,
            mount_count: 0,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// How many times elements were drawn from scratch.
    pub fn mount_count(&self) -> u64 {
        self.mount_count
    }

    /// Scales of the current view, once a size is known.
    pub fn scales(&self) -> Option<ScaleSet> {
        self.scales.current()
    }

    /// React to a container size. The first measured size mounts; later ones re-fit.
    ///
    /// Returns `false` when the size is not renderable and nothing happened.
    pub fn on_viewport(
        &mut self,
        size: Size,
        dataset: &Dataset,
        now: TimeMs,
    ) -> RingscopeResult<bool> {
        if !size.is_measured() {
            debug!(width = size.width, height = size.height, "render skipped: unmeasured");
            return Ok(false);
        }
        let view = ViewConfig::new(size)?;
        self.view = Some(view);

        if self.mounted.is_none() {
            self.mount_fresh(dataset, now)?;
        } else {
            let scales = self.scales.get(view, self.shape.len());
            relayout(&mut self.surface, &scales, &self.opts);
            debug!(width = size.width, height = size.height, "chart re-fitted");
        }
        Ok(true)
    }

    /// Animate the mounted elements to `dataset`.
    ///
    /// A dataset with a different shape cannot be interpolated; the surface is rebuilt instead.
    /// Does nothing until the chart has a measured size.
    #[tracing::instrument(skip(self, dataset), fields(shape_len = dataset.series_count()))]
    pub fn update(
        &mut self,
        dataset: &Dataset,
        duration_ms: u64,
        curve: CurveKind,
        now: TimeMs,
    ) -> RingscopeResult<()> {
        let (Some(view), Some(mounted)) = (self.view, self.mounted) else {
            debug!("update skipped: chart not mounted");
            return Ok(());
        };

        if dataset.shape() != self.shape {
            warn!(
                old = ?self.shape,
                new = ?dataset.shape(),
                "dataset shape changed; remounting"
            );
            self.surface.teardown();
            self.mounted = None;
            return self.mount_fresh(dataset, now);
        }

        let scales = self.scales.get(view, dataset.series_count());
        transition_rings(
            &mut self.surface,
            mounted.rings,
            dataset,
            &scales,
            duration_ms,
            curve,
            now,
        )?;
        transition_points(
            &mut self.surface,
            mounted.points,
            dataset,
            duration_ms,
            scales.inner_radius,
            scales.outer_radius,
            now,
        )
    }

    /// Route a pan/zoom gesture to the surface; ignored before mount.
    pub fn handle_gesture(&mut self, gesture: ZoomGesture) -> Option<ZoomTransform> {
        self.surface.handle_gesture(gesture)
    }

    pub fn render_svg(&self, now: TimeMs, theme: &Theme) -> RingscopeResult<String> {
        render_svg(&self.surface, now, theme)
    }

    fn mount_fresh(&mut self, dataset: &Dataset, now: TimeMs) -> RingscopeResult<()> {
        let Some(view) = self.view else {
            return Ok(());
        };
        let scales = self.scales.get(view, dataset.series_count());
        let (rings, points) = mount(&mut self.surface, &scales, dataset, &self.opts, now)?;
        self.mounted = Some(Mounted { rings, points });
        self.shape = dataset.shape();
        self.mount_count += 1;
        Ok(())
    }
}

impl Default for RadialChart {
    fn default() -> Self {
        Self::new(MountOpts::default())
    }
}

#[cfg(test)]
#[path = "../tests/unit/chart.rs"]
mod tests;
