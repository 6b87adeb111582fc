use tracing::{debug, info};

use crate::data::model::{Dataset, MutationRange, mutate};
use crate::data::sampler::IrwinHall;
use crate::foundation::core::TimeMs;
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::sim::timer::{TimerId, TimerQueue};

/// Delay between a start command and the repeating tick being scheduled.
pub const ARM_DELAY_MS: u64 = 500;
pub const DEFAULT_TICK_MS: u64 = 800;
pub const MAX_TICK_MS: u64 = 2000;
/// Granularity of the tick-duration slider.
pub const TICK_STEP_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SimEvent {
    Arm,
    Tick,
}

/// Lifecycle of the simulation; every non-idle state owns exactly one timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    Idle,
    /// Waiting for the arm delay to elapse.
    Armed { timer: TimerId },
    /// Repeating tick scheduled.
    Running { timer: TimerId },
}

/// Timer-driven producer of dataset snapshots.
#[derive(Debug)]
pub struct SimulationController {
    dataset: Dataset,
    range: MutationRange,
    sampler: IrwinHall,
    tick_ms: u64,
    state: SimState,
    timers: TimerQueue<SimEvent>,
    ticks: u64,
}

impl SimulationController {
    pub fn new(dataset: Dataset, sampler: IrwinHall, tick_ms: u64) -> RingscopeResult<Self> {
        check_tick_ms(tick_ms)?;
        Ok(Self {
            dataset,
            range: MutationRange::FULL,
            sampler,
            tick_ms,
            state: SimState::Idle,
            timers: TimerQueue::new(),
            ticks: 0,
        })
    }

    /// Current authoritative snapshot.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SimState::Idle
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn range(&self) -> MutationRange {
        self.range
    }

    /// Number of mutations performed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timers that can still fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Arm the simulation; the repeating tick starts [`ARM_DELAY_MS`] after `now`.
    ///
    /// Any previous schedule is discarded first.
    pub fn start(&mut self, now: TimeMs) {
        self.cancel();
        let timer = self.timers.set_timeout(now, ARM_DELAY_MS, SimEvent::Arm);
        self.state = SimState::Armed { timer };
        info!(at = now.0, tick_ms = self.tick_ms, "simulation armed");
    }

    /// Cancel the arm delay and the repeating tick.
    pub fn stop(&mut self) {
        if self.is_active() {
            self.cancel();
            info!(ticks = self.ticks, "simulation stopped");
        }
    }

    /// Start when idle, stop otherwise. Returns whether the simulation is active afterwards.
    pub fn toggle(&mut self, now: TimeMs) -> bool {
        if self.is_active() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_active()
    }

    /// Change the tick period; an active simulation is rescheduled from scratch.
    pub fn set_tick_ms(&mut self, tick_ms: u64, now: TimeMs) -> RingscopeResult<()> {
        check_tick_ms(tick_ms)?;
        self.tick_ms = tick_ms;
        if self.is_active() {
            self.start(now);
        }
        Ok(())
    }

    /// Window used by subsequent ticks.
    pub fn set_range(&mut self, range: MutationRange) {
        self.range = range;
    }

    /// Replace the current snapshot without touching the schedule.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    /// Due time of the next timer, if any.
    pub fn next_due(&mut self) -> Option<TimeMs> {
        self.timers.next_due()
    }

    /// Fire timers due at or before `until`, stopping after the first tick.
    ///
    /// Returns the instant of that tick; the new snapshot is available from [`Self::dataset`].
    /// `None` means no tick was due.
    pub fn advance(&mut self, until: TimeMs) -> Option<TimeMs> {
        while let Some((at, id, event)) = self.timers.pop_due(until) {
            match event {
                SimEvent::Arm => {
                    debug_assert_eq!(self.state, SimState::Armed { timer: id });
                    let timer = self.timers.set_interval(at, self.tick_ms, SimEvent::Tick);
                    self.state = SimState::Running { timer };
                    debug!(at = at.0, period_ms = self.tick_ms, "tick loop scheduled");
                }
                SimEvent::Tick => {
                    self.dataset = mutate(&self.dataset, self.range, |v| self.sampler.resample(v));
                    self.ticks += 1;
                    debug!(at = at.0, tick = self.ticks, "simulation tick");
                    return Some(at);
                }
            }
        }
        None
    }

    fn cancel(&mut self) {
        match self.state {
            SimState::Armed { timer } | SimState::Running { timer } => {
                self.timers.clear(timer);
                debug!(timer = ?timer, "simulation timer cleared");
            }
            SimState::Idle => {}
        }
        self.state = SimState::Idle;
    }
}

fn check_tick_ms(tick_ms: u64) -> RingscopeResult<()> {
    if tick_ms > MAX_TICK_MS {
        return Err(RingscopeError::schedule(format!(
            "tick duration {tick_ms}ms exceeds {MAX_TICK_MS}ms"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/sim/controller.rs"]
mod tests;
