use std::f64::consts::{FRAC_PI_4, TAU};
use std::path::Path;

use anyhow::Context;

use crate::data::model::MutationRange;
use crate::foundation::core::Size;
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::render::mount::DEFAULT_ANGULAR_TICKS;
use crate::render::svg::Theme;
use crate::shape::curve::CurveKind;
use crate::sim::controller::{DEFAULT_TICK_MS, MAX_TICK_MS};

pub const DEFAULT_RINGS: usize = 30;
pub const DEFAULT_INITIAL_VALUE: f64 = 0.5;
pub const DEFAULT_CURVE: CurveKind = CurveKind::CardinalClosed;
pub const PRESET_COUNT: usize = 9;

/// Session setup, read from JSON. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    /// Number of concentric rings.
    pub rings: usize,
    /// Points per ring; defaults to `5 * i + 3` for ring `i`.
    pub point_counts: Option<Vec<usize>>,
    /// Value every point starts with.
    pub initial_value: f64,
    pub tick_ms: u64,
    pub curve: CurveKind,
    /// Index into [`mutation_presets`].
    pub preset: usize,
    /// Custom mutation window in degrees; overrides `preset`.
    pub range_deg: Option<[f64; 2]>,
    /// Start the simulation as soon as the session is created.
    pub start: bool,
    pub seed: u64,
    pub angular_ticks: usize,
    pub width: f64,
    pub height: f64,
    pub theme: Theme,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            rings: DEFAULT_RINGS,
            point_counts: None,
            initial_value: DEFAULT_INITIAL_VALUE,
            tick_ms: DEFAULT_TICK_MS,
            curve: DEFAULT_CURVE,
            preset: 0,
            range_deg: None,
            start: false,
            seed: 0,
            angular_ticks: DEFAULT_ANGULAR_TICKS,
            width: 800.0,
            height: 600.0,
            theme: Theme::default(),
        }
    }
}

impl PlaygroundConfig {
    pub fn from_json_str(s: &str) -> RingscopeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> RingscopeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> RingscopeResult<()> {
        if let Some(counts) = &self.point_counts {
            if counts.len() != self.rings {
                return Err(RingscopeError::validation(format!(
                    "point_counts has {} entries for {} rings",
                    counts.len(),
                    self.rings
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.initial_value) {
            return Err(RingscopeError::validation(
                "initial_value must be within [0, 1]",
            ));
        }
        if self.tick_ms > MAX_TICK_MS {
            return Err(RingscopeError::validation(format!(
                "tick_ms must be <= {MAX_TICK_MS}"
            )));
        }
        if self.preset >= PRESET_COUNT {
            return Err(RingscopeError::validation(format!(
                "preset must be < {PRESET_COUNT}"
            )));
        }
        if let Some([start, end]) = self.range_deg {
            if !(0.0..=360.0).contains(&start) || !(0.0..=360.0).contains(&end) {
                return Err(RingscopeError::validation(
                    "range_deg bounds must be within [0, 360]",
                ));
            }
        }
        Size::measured(self.width, self.height)?;
        Ok(())
    }

    /// Per-ring point counts after defaults are applied.
    pub fn resolved_point_counts(&self) -> Vec<usize> {
        self.point_counts
            .clone()
            .unwrap_or_else(|| (0..self.rings).map(default_point_count).collect())
    }

    /// Mutation window after defaults are applied.
    pub fn resolved_range(&self) -> MutationRange {
        match self.range_deg {
            Some([start, end]) => MutationRange::from_degrees(start, end),
            None => mutation_presets()
                .get(self.preset)
                .map_or(MutationRange::FULL, |p| p.range),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

pub fn default_point_count(ring: usize) -> usize {
    5 * ring + 3
}

/// Named mutation window offered by the control panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationPreset {
    pub label: String,
    pub range: MutationRange,
}

/// The whole circle followed by eight 45° slices.
pub fn mutation_presets() -> Vec<MutationPreset> {
    let full = MutationPreset {
        label: "[0, 360]".to_string(),
        range: MutationRange::new(0.0, TAU),
    };
    let slices = (0..8).map(|i| {
        let close = if i == 7 { ']' } else { ')' };
        MutationPreset {
            label: format!("[{}, {}{close}", i * 45, (i + 1) * 45),
            range: MutationRange::new(i as f64 * FRAC_PI_4, (i + 1) as f64 * FRAC_PI_4),
        }
    });
    std::iter::once(full).chain(slices).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/playground/config.rs"]
mod tests;
