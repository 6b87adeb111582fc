use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::error::{RingscopeError, RingscopeResult};

/// Irwin–Hall distributed values: the sum of `n` uniform samples in `[0, 1)`.
///
/// With `n = 1` this is a plain uniform sampler. Values are not normalized by `n`.
#[derive(Clone, Debug)]
pub struct IrwinHall {
    n: u32,
    rng: StdRng,
}

impl IrwinHall {
    pub fn new(n: u32, seed: u64) -> RingscopeResult<Self> {
        if n == 0 {
            return Err(RingscopeError::validation("irwin-hall n must be >= 1"));
        }
        Ok(Self {
            n,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Uniform sampler seeded with `seed`.
    pub fn uniform(seed: u64) -> Self {
        Self {
            n: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample(&mut self) -> f64 {
        (0..self.n).map(|_| self.rng.r#gen::<f64>()).sum()
    }

    /// Adapter for mutation: the previous value is ignored.
    pub fn resample(&mut self, _old: f64) -> f64 {
        self.sample()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/sampler.rs"]
mod tests;
