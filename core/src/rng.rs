//! Deterministic random number generation.
//!
//! RULE: nothing in the engine calls a platform RNG. Synthetic data
//! draws from a `SeededRng` derived from one master seed, one
//! stream per purpose, so adding a stream never shifts another.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct SeededRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SeededRng {
    pub fn new(master_seed: u64, stream: RngStream) -> Self {
        let derived_seed = master_seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            name: stream.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// u64 in [0, n). `n` must be non-zero.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// Stable stream assignments. Append only: reordering changes
/// every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Profiles = 0,
    Names    = 1,
}

impl RngStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Names    => "names",
        }
    }
}
