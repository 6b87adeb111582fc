use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::trace;

use crate::foundation::core::TimeMs;

/// Shortest allowed interval period.
pub const MIN_PERIOD_MS: u64 = 4;

/// Handle of a scheduled timer; stays valid until the timer is cleared or a one-shot fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    event: E,
    period_ms: Option<u64>,
    /// Sequence number of the live heap slot; older slots for the same id are stale.
    seq: u64,
}

/// Deterministic timer queue on a virtual millisecond clock.
///
/// Timers fire in due-time order; ties fire in scheduling order. Cleared timers are dropped
/// lazily when they reach the front of the heap.
#[derive(Debug)]
pub struct TimerQueue<E> {
    due: BinaryHeap<Reverse<(TimeMs, u64, TimerId)>>,
    live: BTreeMap<TimerId, Entry<E>>,
    next_id: u64,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            due: BinaryHeap::new(),
            live: BTreeMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once, `delay_ms` after `now`.
    pub fn set_timeout(&mut self, now: TimeMs, delay_ms: u64, event: E) -> TimerId {
        self.insert(now.after(delay_ms), None, event)
    }

    /// Fire `event` every `period_ms` (at least [`MIN_PERIOD_MS`]), first at `now + period`.
    pub fn set_interval(&mut self, now: TimeMs, period_ms: u64, event: E) -> TimerId {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        self.insert(now.after(period_ms), Some(period_ms), event)
    }

    /// Cancel a timer. Returns `false` when it already fired or was cleared.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let removed = self.live.remove(&id).is_some();
        if removed {
            trace!(timer = id.0, "timer cleared");
        }
        removed
    }

    /// Number of timers that can still fire.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains_key(&id)
    }

    /// Due time of the next live timer.
    pub fn next_due(&mut self) -> Option<TimeMs> {
        self.prune();
        self.due.peek().map(|Reverse((at, _, _))| *at)
    }

    /// Pop the next timer due at or before `until`; intervals are re-armed one period later.
    pub fn pop_due(&mut self, until: TimeMs) -> Option<(TimeMs, TimerId, E)> {
        self.prune();
        let Reverse((at, _, id)) = *self.due.peek()?;
        if at > until {
            return None;
        }
        self.due.pop();

        let period = self.live.get(&id)?.period_ms;
        let event = match period {
            Some(period_ms) => {
                let seq = self.bump_seq();
                let entry = self.live.get_mut(&id)?;
                entry.seq = seq;
                self.due.push(Reverse((at.after(period_ms), seq, id)));
                entry.event.clone()
            }
            None => self.live.remove(&id)?.event,
        };
        Some((at, id, event))
    }

    fn insert(&mut self, at: TimeMs, period_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.live.insert(
            id,
            Entry {
                event,
                period_ms,
                seq,
            },
        );
        self.due.push(Reverse((at, seq, id)));
        trace!(timer = id.0, at = at.0, ?period_ms, "timer scheduled");
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn prune(&mut self) {
        while let Some(&Reverse((_, seq, id))) = self.due.peek() {
            match self.live.get(&id) {
                Some(entry) if entry.seq == seq => break,
                _ => {
                    self.due.pop();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/timer.rs"]
mod tests;
