use crate::animation::ease::Ease;
use crate::foundation::core::{Point, TimeMs};

/// Interpolation contract for tweened values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Vec<f64> {
    /// Element-wise; mismatched lengths jump straight to `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if a.len() != b.len() {
            return b.clone();
        }
        a.iter().zip(b).map(|(x, y)| x + (y - x) * t).collect()
    }
}

/// One scheduled interpolation of a single attribute channel.
///
/// Before `start` the tween reports `from`, after `start + duration` it reports `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: TimeMs,
    duration_ms: u64,
    ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// A settled channel holding `value`.
    pub fn constant(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: TimeMs::ZERO,
            duration_ms: 0,
            ease: Ease::Linear,
        }
    }

    /// Interpolate `from → to`, starting `delay_ms` after `now`.
    pub fn new(from: T, to: T, now: TimeMs, delay_ms: u64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start: now.after(delay_ms),
            duration_ms,
            ease,
        }
    }

    pub fn sample(&self, now: TimeMs) -> T {
        if now < self.start {
            return self.from.clone();
        }
        let elapsed = now.since(self.start);
        if self.duration_ms == 0 || elapsed >= self.duration_ms {
            return self.to.clone();
        }
        let t = self.ease.apply(elapsed as f64 / self.duration_ms as f64);
        T::lerp(&self.from, &self.to, t)
    }

    /// Replace the in-flight interpolation, continuing from the value at `now`.
    pub fn retarget(&mut self, now: TimeMs, to: T, delay_ms: u64, duration_ms: u64, ease: Ease) {
        let from = self.sample(now);
        *self = Self::new(from, to, now, delay_ms, duration_ms, ease);
    }

    /// Jump to `value` with no interpolation.
    pub fn snap(&mut self, value: T) {
        *self = Self::constant(value);
    }

    /// Final value of the current interpolation.
    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn start(&self) -> TimeMs {
        self.start
    }

    pub fn end(&self) -> TimeMs {
        self.start.after(self.duration_ms)
    }

    pub fn is_settled(&self, now: TimeMs) -> bool {
        now >= self.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
