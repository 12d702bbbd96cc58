//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call a platform RNG directly.
//! All randomness flows through SimRng instances derived from the
//! single master seed of the run.
//!
//! Each slot gets its own stream per tick, seeded from
//! (master_seed, slot_index, tick). This means:
//!   - Drawing more values for one master category never shifts
//!     the other category's stream.
//!   - A given seed replays the exact same clusters, tick by tick.

use crate::types::Tick;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for one slot.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Create a slot RNG from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Integer in the inclusive range [min, max].
    pub fn int_between(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as i64
    }

    /// Float uniformly drawn from [min, max).
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Uniformly pick one element. Panics on an empty slice; vocabulary
    /// lists are validated before any generator runs.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}

/// All slot RNGs for a single run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// The RNG for `slot` at `tick`. Same (seed, slot, tick) yields the same stream.
    pub fn for_slot_at_tick(&self, slot: RngSlot, tick: Tick) -> SimRng {
        let tick_seed = self
            .master_seed
            .wrapping_add(tick.wrapping_mul(0xbf58_476d_1ce4_e5b9));
        SimRng::new(tick_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries; only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    MasterA = 0,
    MasterB = 1,
    Dependents = 2,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MasterA => "master_a",
            Self::MasterB => "master_b",
            Self::Dependents => "dependents",
        }
    }
}
