//! Two-pass, four-bucket admission of individual applicants.

use rand::Rng;

use crate::core::candidate::AdmissionCandidate;
use crate::core::classify::group_by_bucket_type;
use crate::core::quota::{BucketConfig, QuotaState};
use crate::core::sampler::WeightedSampler;

/// Number of sweeps over the buckets. Rollover only reaches the immediate
/// sibling, so quota rolled into a bucket during the first sweep is consumed
/// by the second and a third sweep cannot change the outcome.
pub const ROLLOVER_PASSES: usize = 2;

/// Admits individuals bucket by bucket against a shared [`QuotaState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IndividualAdmitter;

impl IndividualAdmitter {
    /// Admitter sweeping the buckets [`ROLLOVER_PASSES`] times.
    pub const fn new() -> Self {
        Self
    }

    /// Decide every individual. Returns `(accepted, rejected)`; together they
    /// contain each input candidate exactly once.
    pub fn accept_individuals<R: Rng>(
        &self,
        individuals: Vec<AdmissionCandidate>,
        quota: &mut QuotaState,
        sampler: &mut WeightedSampler<R>,
    ) -> (Vec<AdmissionCandidate>, Vec<AdmissionCandidate>) {
        let mut accepted = Vec::new();
        let mut pools = group_by_bucket_type(individuals);

        for pass in 0..ROLLOVER_PASSES {
            for config in BucketConfig::ALL {
                let pool = pools.entry(config.bucket).or_default();

                if pool.is_empty() {
                    quota.rollover(config);
                    continue;
                }

                sampler.assign_individual_keys(pool);

                let admitted = (quota.remaining(config.bucket) as usize).min(pool.len());
                for candidate in pool.drain(..admitted) {
                    let consumed = quota.admit_individual(config.bucket);
                    debug_assert!(consumed, "admitted past bucket quota");
                    accepted.push(candidate);
                }

                tracing::debug!(
                    pass,
                    bucket = %config.bucket,
                    admitted,
                    waiting = pool.len(),
                    quota_left = quota.remaining(config.bucket),
                    "bucket processed"
                );

                if quota.remaining(config.bucket) > 0 {
                    quota.rollover(config);
                }
            }
        }

        let rejected = pools.into_values().flatten().collect();
        (accepted, rejected)
    }
}
