use std::f64::consts::TAU;

use crate::foundation::error::{RingscopeError, RingscopeResult};

/// One data sample inside a ring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Globally unique id, assigned series-major at generation time.
    pub id: u64,
    /// Index of the owning series.
    pub ring: usize,
    /// Normalized value in `[0, 1]`.
    pub value: f64,
}

/// Ordered points of one concentric ring.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Series {
    /// Points in angular order.
    pub points: Vec<Point>,
}

impl Series {
    /// Number of points in the ring.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when the ring has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Angular position of every point, in index order.
    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        let len = self.points.len();
        (0..len).map(move |j| angular_position(j, len))
    }
}

/// Snapshot of every ring. A new snapshot is produced per mutation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    /// Rings from innermost to outermost.
    pub series: Vec<Series>,
}

impl Dataset {
    /// Number of rings.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Point count of every ring.
    pub fn shape(&self) -> Vec<usize> {
        self.series.iter().map(Series::len).collect()
    }

    /// Return `true` when `other` has the same ring count and per-ring point counts.
    pub fn same_shape(&self, other: &Dataset) -> bool {
        self.series.len() == other.series.len()
            && self
                .series
                .iter()
                .zip(&other.series)
                .all(|(a, b)| a.len() == b.len())
    }

    /// Total number of points across every ring.
    pub fn total_points(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// Iterate all points in series-major order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.series.iter().flat_map(|s| s.points.iter())
    }
}

/// Angle, in radians, of the `index`-th point of a ring holding `len` points.
pub fn angular_position(index: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    (index as f64) * TAU / (len as f64)
}

/// Angular window `[start, end]` (radians) whose points are eligible for mutation.
///
/// Both bounds are inclusive, so a point that sits exactly on the boundary shared by two adjacent
/// windows is eligible in both.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MutationRange {
    /// Window start in radians.
    pub start: f64,
    /// Window end in radians.
    pub end: f64,
}

impl MutationRange {
    /// The whole circle, `[0, 2π]`.
    pub const FULL: Self = Self {
        start: 0.0,
        end: TAU,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build a window from degrees.
    pub fn from_degrees(start_deg: f64, end_deg: f64) -> Self {
        Self {
            start: start_deg.to_radians(),
            end: end_deg.to_radians(),
        }
    }

    /// Window bounds in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.start.to_degrees(), self.end.to_degrees())
    }

    pub fn contains(self, angle: f64) -> bool {
        angle >= self.start && angle <= self.end
    }
}

impl Default for MutationRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Build a dataset of `series_count` rings, the i-th holding `point_counts[i]` points.
///
/// Ids are assigned series-major starting from zero.
pub fn generate(
    series_count: usize,
    point_counts: &[usize],
    mut sampler: impl FnMut() -> f64,
) -> RingscopeResult<Dataset> {
    if point_counts.len() != series_count {
        return Err(RingscopeError::validation(format!(
            "expected {series_count} point counts, got {}",
            point_counts.len()
        )));
    }

    let mut next_id = 0u64;
    let series = point_counts
        .iter()
        .enumerate()
        .map(|(ring, &count)| {
            let points = (0..count)
                .map(|_| {
                    let id = next_id;
                    next_id += 1;
                    Point {
                        id,
                        ring,
                        value: sampler(),
                    }
                })
                .collect();
            Series { points }
        })
        .collect();

    Ok(Dataset { series })
}

/// Produce a new snapshot where every point inside `range` gets `sampler(old_value)`.
///
/// Points outside the window are copied unchanged. The input is never modified.
pub fn mutate(
    dataset: &Dataset,
    range: MutationRange,
    mut sampler: impl FnMut(f64) -> f64,
) -> Dataset {
    let series = dataset
        .series
        .iter()
        .map(|s| {
            let len = s.len();
            let points = s
                .points
                .iter()
                .enumerate()
                .map(|(j, p)| {
                    if range.contains(angular_position(j, len)) {
                        Point {
                            value: sampler(p.value),
                            ..*p
                        }
                    } else {
                        *p
                    }
                })
                .collect();
            Series { points }
        })
        .collect();

    Dataset { series }
}

#[cfg(test)]
#[path = "../../tests/unit/data/model.rs"]
mod tests;
