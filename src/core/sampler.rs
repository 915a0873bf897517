//! Weighted random ranking (Efraimidis–Spirakis).
//!
//! For an item with weight `w > 0` a uniform `v ∈ (0, 1)` is drawn and turned
//! into the key `v^(1/w)`. Taking the top-k items by descending key samples k
//! items without replacement, each with inclusion probability proportional to
//! its weight.
//!
//! Reference: Efraimidis & Spirakis, "Weighted random sampling with a
//! reservoir", Information Processing Letters 97(5), 2006.

use rand::distr::Open01;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::core::candidate::{AdmissionCandidate, TeamEvaluationData};

/// Assigns sampling keys from an injected random generator.
///
/// The generator belongs to one run; sharing it across runs breaks
/// reproducibility.
#[derive(Debug, Clone)]
pub struct WeightedSampler<R = ChaCha20Rng> {
    rng: R,
}

impl WeightedSampler<ChaCha20Rng> {
    /// Deterministic sampler: identical seeds reproduce identical orderings
    /// on every platform and release.
    ///
    /// The seed's little-endian bytes fill the first 8 bytes of the ChaCha20
    /// key; the rest stay zero.
    pub fn from_seed(seed: u64) -> Self {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(ChaCha20Rng::from_seed(key))
    }

    /// Sampler seeded from the high-resolution wall clock.
    pub fn from_clock() -> Self {
        Self::from_seed(crate::util::clock::now_nanos())
    }
}

impl<R: Rng> WeightedSampler<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one priority key for `weight`.
    ///
    /// Non-positive or non-finite weights get key `0.0` and rank below every
    /// valid item.
    pub fn sort_key(&mut self, weight: f64) -> f64 {
        if !(weight.is_finite() && weight > 0.0) {
            tracing::warn!(weight, "non-positive sampling weight, ranking last");
            return 0.0;
        }
        let v: f64 = self.rng.sample(Open01);
        v.powf(weight.recip())
    }

    /// Key each individual by its weighted score and sort descending.
    pub fn assign_individual_keys(&mut self, candidates: &mut [AdmissionCandidate]) {
        for candidate in candidates.iter_mut() {
            candidate.sort_key = self.sort_key(candidate.weighted_score);
        }
        candidates.sort_by(|a, b| b.sort_key.total_cmp(&a.sort_key));
    }

    /// Key each team by its average score and sort descending.
    pub fn assign_team_keys(&mut self, teams: &mut [TeamEvaluationData]) {
        for team in teams.iter_mut() {
            team.sort_key = self.sort_key(team.average_weighted_score);
        }
        teams.sort_by(|a, b| b.sort_key.total_cmp(&a.sort_key));
    }

    /// Release the generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}
