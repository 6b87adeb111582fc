use crate::foundation::error::{RingscopeError, RingscopeResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Absolute instant on the session clock, in milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Clock origin.
    pub const ZERO: Self = Self(0);

    /// Instant `ms` milliseconds after `self` (saturating).
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Container size in CSS pixels, as reported by the viewport observer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a size without validation; an unmeasured container is `(0, 0)`.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size that is guaranteed to be renderable.
    pub fn measured(width: f64, height: f64) -> RingscopeResult<Self> {
        let s = Self { width, height };
        if !s.is_measured() {
            return Err(RingscopeError::validation(format!(
                "size must be finite and positive, got {width}x{height}"
            )));
        }
        Ok(s)
    }

    /// Return `true` when both dimensions are finite and strictly positive.
    pub fn is_measured(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Half of the smaller dimension; the largest radius that fits the container.
    pub fn half_min(self) -> f64 {
        self.width.min(self.height) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
