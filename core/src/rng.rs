//! Deterministic random number generation.
//!
//! RULE: No generator may call a platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed in the generator config.
//!
//! Each stage gets its own RNG stream, seeded from
//! (master_seed XOR slot * golden-ratio constant). This means:
//!   - Adding a new stage never changes existing stages' streams.
//!   - The call generator can be re-run against an existing customer
//!     file and reproduce the same calls for the same seed.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single generation stage.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable slot index.
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
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    pub fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as i64
    }

    /// Pick an index uniformly from a slice of length `len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }

    /// Categorical draw. Weights need not sum to 1.
    /// Falls back to the last entry when rounding leaves the roll uncovered.
    pub fn weighted<'a, T>(&mut self, choices: &'a [(T, f64)]) -> &'a T {
        assert!(!choices.is_empty(), "weighted() on empty choices");
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (value, weight) in choices {
            cumulative += weight;
            if roll < cumulative {
                return value;
            }
        }
        &choices[choices.len() - 1].0
    }
}

/// All stage RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Customer = 0,
    CallRecord = 1,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::CallRecord => "call_record",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngBank::new(7).for_stream(StreamSlot::Customer);
        let mut b = RngBank::new(7).for_stream(StreamSlot::Customer);
        for _ in 0..32 {
            assert_eq!(a.next_u64_below(1_000_000), b.next_u64_below(1_000_000));
        }
    }

    #[test]
    fn slots_are_independent_streams() {
        let mut a = RngBank::new(7).for_stream(StreamSlot::Customer);
        let mut b = RngBank::new(7).for_stream(StreamSlot::CallRecord);
        let xs: Vec<u64> = (0..8).map(|_| a.next_u64_below(u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.next_u64_below(u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn int_inclusive_hits_both_ends() {
        let mut rng = StreamRng::new(1, 0);
        let draws: Vec<i64> = (0..2_000).map(|_| rng.int_inclusive(20, 22)).collect();
        assert!(draws.iter().all(|d| (20..=22).contains(d)));
        assert!(draws.contains(&20));
        assert!(draws.contains(&22));
    }

    #[test]
    fn weighted_respects_zero_weight() {
        let mut rng = StreamRng::new(3, 0);
        let choices = [("a", 1.0), ("b", 0.0)];
        for _ in 0..500 {
            assert_eq!(*rng.weighted(&choices), "a");
        }
    }
}
