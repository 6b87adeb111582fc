use tracing::info;

use crate::chart::RadialChart;
use crate::data::model::{Dataset, MutationRange, generate};
use crate::data::sampler::IrwinHall;
use crate::foundation::core::{Size, TimeMs};
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::playground::config::{DEFAULT_CURVE, PlaygroundConfig, mutation_presets};
use crate::render::mount::{MountOpts, ceil_degrees};
use crate::scale::linear::ticks;
use crate::scene::zoom::ZoomGesture;
use crate::shape::curve::CurveKind;
use crate::sim::controller::{DEFAULT_TICK_MS, SimulationController};
use crate::viewport::ViewportController;

/// Value produced by one control-panel widget.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlInput {
    ToggleSimulation,
    Reset,
    SetTickMs(u64),
    SelectCurve(CurveKind),
    /// Position in [`CurveKind::ALL`].
    SelectCurveIndex(usize),
    /// Position in [`mutation_presets`].
    SelectPreset(usize),
    SetRangeStartDeg(f64),
    SetRangeEndDeg(f64),
    Gesture(ZoomGesture),
}

/// What the control panel displays.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PanelStatus {
    pub running: bool,
    pub toggle_label: &'static str,
    pub tick_ms: u64,
    pub tick_label: String,
    pub curve: CurveKind,
    pub curve_label: &'static str,
    /// Selected preset; `None` once a custom degree was set.
    pub preset: Option<usize>,
    /// Window bounds in whole degrees.
    pub range_deg: [f64; 2],
    pub complexity: String,
    pub ticks: u64,
}

/// A running playground: viewport, chart and simulation on one virtual clock.
#[derive(Debug)]
pub struct Playground {
    config: PlaygroundConfig,
    viewport: ViewportController,
    chart: RadialChart,
    sim: SimulationController,
    curve: CurveKind,
    preset: Option<usize>,
    now: TimeMs,
}

impl Playground {
    pub fn new(config: PlaygroundConfig) -> RingscopeResult<Self> {
        config.validate()?;
        let mut sim = SimulationController::new(
            initial_dataset(&config)?,
            IrwinHall::uniform(config.seed),
            config.tick_ms,
        )?;
        sim.set_range(config.resolved_range());

        let chart = RadialChart::new(MountOpts {
            angular_ticks: config.angular_ticks,
            ..MountOpts::default()
        });
        let mut playground = Self {
            curve: config.curve,
            preset: config.range_deg.is_none().then_some(config.preset),
            viewport: ViewportController::new(),
            chart,
            sim,
            now: TimeMs::ZERO,
            config,
        };
        if playground.config.start {
            playground.sim.start(TimeMs::ZERO);
        }
        info!(
            rings = playground.config.rings,
            points = playground.sim.dataset().total_points(),
            "playground created"
        );
        Ok(playground)
    }

    pub fn now(&self) -> TimeMs {
        self.now
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn chart(&self) -> &RadialChart {
        &self.chart
    }

    pub fn simulation(&self) -> &SimulationController {
        &self.sim
    }

    pub fn dataset(&self) -> &Dataset {
        self.sim.dataset()
    }

    /// Report a container size. Returns whether the chart was (re)laid out.
    pub fn resize(&mut self, size: Size) -> RingscopeResult<bool> {
        match self.viewport.observe(size) {
            Some(size) => self.chart.on_viewport(size, self.sim.dataset(), self.now),
            None => Ok(false),
        }
    }

    /// Apply a control-panel input at the current instant.
    pub fn apply(&mut self, input: ControlInput) -> RingscopeResult<()> {
        let now = self.now;
        match input {
            ControlInput::ToggleSimulation => {
                self.sim.toggle(now);
            }
            ControlInput::Reset => self.reset()?,
            ControlInput::SetTickMs(ms) => self.sim.set_tick_ms(ms, now)?,
            ControlInput::SelectCurve(curve) => self.select_curve(curve)?,
            ControlInput::SelectCurveIndex(i) => self.select_curve(CurveKind::from_index(i)?)?,
            ControlInput::SelectPreset(i) => {
                let preset = mutation_presets().into_iter().nth(i).ok_or_else(|| {
                    RingscopeError::validation(format!("no mutation preset {i}"))
                })?;
                self.sim.set_range(preset.range);
                self.preset = Some(i);
            }
            ControlInput::SetRangeStartDeg(deg) => {
                let end = self.sim.range().end;
                self.sim.set_range(MutationRange::new(check_degrees(deg)?.to_radians(), end));
                self.preset = None;
            }
            ControlInput::SetRangeEndDeg(deg) => {
                let start = self.sim.range().start;
                self.sim.set_range(MutationRange::new(start, check_degrees(deg)?.to_radians()));
                self.preset = None;
            }
            ControlInput::Gesture(gesture) => {
                self.chart.handle_gesture(gesture);
            }
        }
        Ok(())
    }

    /// Run the clock forward to `until`, firing every simulation tick on the way.
    ///
    /// Each tick's snapshot is handed to the chart before the next timer fires.
    pub fn advance_to(&mut self, until: TimeMs) -> RingscopeResult<()> {
        if until < self.now {
            return Err(RingscopeError::schedule(format!(
                "clock cannot go back from {}ms to {}ms",
                self.now.0, until.0
            )));
        }
        while let Some(at) = self.sim.advance(until) {
            self.now = at;
            self.chart
                .update(self.sim.dataset(), self.sim.tick_ms(), self.curve, at)?;
        }
        self.now = until;
        Ok(())
    }

    pub fn advance_by(&mut self, ms: u64) -> RingscopeResult<()> {
        self.advance_to(self.now.after(ms))
    }

    /// The chart as SVG at the current instant.
    pub fn render_svg(&self) -> RingscopeResult<String> {
        self.chart.render_svg(self.now, &self.config.theme)
    }

    pub fn status(&self) -> PanelStatus {
        let running = self.sim.is_active();
        let tick_ms = self.sim.tick_ms();
        let (start, end) = self.sim.range().to_degrees();
        PanelStatus {
            running,
            toggle_label: if running { "stop" } else { "start simulation" },
            tick_ms,
            tick_label: format!("{}s", tick_ms as f64 / 1000.0),
            curve: self.curve,
            curve_label: self.curve.label(),
            preset: self.preset,
            range_deg: [ceil_degrees(start), ceil_degrees(end)],
            complexity: complexity(self.sim.dataset(), self.config.angular_ticks),
            ticks: self.sim.ticks(),
        }
    }

    fn select_curve(&mut self, curve: CurveKind) -> RingscopeResult<()> {
        self.curve = curve;
        self.chart
            .update(self.sim.dataset(), self.sim.tick_ms(), curve, self.now)
    }

    fn reset(&mut self) -> RingscopeResult<()> {
        self.sim.stop();
        self.sim.set_tick_ms(DEFAULT_TICK_MS, self.now)?;
        self.sim.set_range(MutationRange::FULL);
        self.sim.replace_dataset(initial_dataset(&self.config)?);
        self.curve = DEFAULT_CURVE;
        self.preset = Some(0);
        info!(at = self.now.0, "playground reset");
        self.chart
            .update(self.sim.dataset(), DEFAULT_TICK_MS, self.curve, self.now)
    }
}

fn initial_dataset(config: &PlaygroundConfig) -> RingscopeResult<Dataset> {
    let value = config.initial_value;
    generate(config.rings, &config.resolved_point_counts(), || value)
}

fn check_degrees(deg: f64) -> RingscopeResult<f64> {
    if !(0.0..=360.0).contains(&deg) {
        return Err(RingscopeError::validation(format!(
            "angle {deg}° is outside [0, 360]"
        )));
    }
    Ok(deg)
}

/// Rough element count of the drawing.
pub fn complexity(dataset: &Dataset, angular_ticks: usize) -> String {
    let rings = dataset.series_count();
    let radial = ticks(0.0, rings as f64, (rings + 1) as f64).len();
    format!(
        "O({rings} rings + {} points + {angular_ticks} angular axis lines + {radial} radial axis circles)",
        dataset.total_points()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/playground/session.rs"]
mod tests;
