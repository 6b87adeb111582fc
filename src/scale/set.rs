use std::f64::consts::TAU;

use crate::foundation::core::Size;
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::scale::linear::LinearScale;

/// Inner radius as a fraction of the largest fitting radius.
pub const DEFAULT_INNER_RADIUS_RATIO: f64 = 1.0 / 16.0;
/// Outer radius as a fraction of the largest fitting radius.
pub const DEFAULT_OUTER_RADIUS_RATIO: f64 = 1.0;

/// Immutable description of the drawable area.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewConfig {
    pub width: f64,
    pub height: f64,
    pub inner_radius_ratio: f64,
    pub outer_radius_ratio: f64,
}

impl ViewConfig {
    /// View with the default radius ratios. Fails for unmeasured sizes.
    pub fn new(size: Size) -> RingscopeResult<Self> {
        Self::with_ratios(size, DEFAULT_INNER_RADIUS_RATIO, DEFAULT_OUTER_RADIUS_RATIO)
    }

    pub fn with_ratios(size: Size, inner: f64, outer: f64) -> RingscopeResult<Self> {
        if !size.is_measured() {
            return Err(RingscopeError::validation(format!(
                "view needs a measured size, got {}x{}",
                size.width, size.height
            )));
        }
        if !(inner.is_finite() && outer.is_finite() && 0.0 <= inner && inner < outer) {
            return Err(RingscopeError::validation(
                "radius ratios must satisfy 0 <= inner < outer",
            ));
        }
        Ok(Self {
            width: size.width,
            height: size.height,
            inner_radius_ratio: inner,
            outer_radius_ratio: outer,
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn inner_radius(&self) -> f64 {
        self.size().half_min() * self.inner_radius_ratio
    }

    pub fn outer_radius(&self) -> f64 {
        self.size().half_min() * self.outer_radius_ratio
    }
}

/// Every scale the renderer needs for one `(view, series_count)` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSet {
    pub view: ViewConfig,
    pub series_count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Ring index `[0, n]` to radius.
    pub radial: LinearScale,
    /// Radians to degrees, for axis labels only.
    pub angular: LinearScale,
}

impl ScaleSet {
    pub fn derive(view: ViewConfig, series_count: usize) -> Self {
        let inner_radius = view.inner_radius();
        let outer_radius = view.outer_radius();
        Self {
            view,
            series_count,
            inner_radius,
            outer_radius,
            radial: radial_scale(inner_radius, outer_radius, series_count),
            angular: LinearScale::new([0.0, TAU], [0.0, 360.0]),
        }
    }

    /// Value scale of ring `i`: `[0, 1]` onto the ring's annulus band.
    pub fn per_ring(&self, ring: usize) -> LinearScale {
        let r = ring as f64;
        LinearScale::new([0.0, 1.0], [self.radial.apply(r), self.radial.apply(r + 1.0)])
    }

    /// Radius of a value in ring `ring`.
    ///
    /// Equal to `per_ring(ring).apply(value)` and to `radial.apply(ring + value)`.
    pub fn radius_of(&self, ring: usize, value: f64) -> f64 {
        self.radial.apply(ring as f64 + value)
    }
}

/// Shared radial scale for `series_count` rings between the two radii.
pub fn radial_scale(inner_radius: f64, outer_radius: f64, series_count: usize) -> LinearScale {
    LinearScale::new([0.0, series_count as f64], [inner_radius, outer_radius])
}

/// Memoized [`ScaleSet`], re-derived only when the view or the ring count changes.
#[derive(Debug, Default)]
pub struct ScaleCache {
    current: Option<ScaleSet>,
    derivations: u64,
}

impl ScaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, view: ViewConfig, series_count: usize) -> ScaleSet {
        match self.current {
            Some(s) if s.view == view && s.series_count == series_count => s,
            _ => {
                let s = ScaleSet::derive(view, series_count);
                self.current = Some(s);
                self.derivations += 1;
                s
            }
        }
    }

    /// Last derived set, if any.
    pub fn current(&self) -> Option<ScaleSet> {
        self.current
    }

    /// How many times the set has been (re)derived.
    pub fn derivations(&self) -> u64 {
        self.derivations
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/set.rs"]
mod tests;
