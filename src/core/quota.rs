//! Remaining-capacity ledger for one admission run.
//!
//! `QuotaState` owns four category counters plus the team seat ceiling. Each
//! bucket is addressed through [`BucketType`] rather than through references
//! to individual fields, and [`BucketConfig`] records the one sibling that
//! receives a bucket's unused slots.

use serde::{Deserialize, Serialize};

use crate::core::candidate::{AdmissionCandidate, BucketType};

/// Remaining slots for one affiliation group, split by career stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuota {
    /// Slots left for early-career applicants.
    pub early_left: u32,
    /// Slots left for late-career applicants.
    pub late_left: u32,
}

impl CategoryQuota {
    /// Build a category quota.
    pub const fn new(early_left: u32, late_left: u32) -> Self {
        Self { early_left, late_left }
    }

    /// Sum of both career stages.
    pub const fn total(&self) -> u64 {
        self.early_left as u64 + self.late_left as u64
    }
}

/// Binds a bucket to its rollover partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketConfig {
    /// Bucket whose quota is consumed.
    pub bucket: BucketType,
    /// Sibling receiving leftover quota.
    pub rollover: BucketType,
}

impl BucketConfig {
    /// All four buckets in processing order.
    pub const ALL: [Self; 4] = [
        Self::for_bucket(BucketType::UfEarly),
        Self::for_bucket(BucketType::UfLate),
        Self::for_bucket(BucketType::OtherEarly),
        Self::for_bucket(BucketType::OtherLate),
    ];

    /// Config for a single bucket.
    pub const fn for_bucket(bucket: BucketType) -> Self {
        Self {
            bucket,
            rollover: bucket.rollover_partner(),
        }
    }
}

/// Per-bucket seat counts a team needs to be admitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRequirement {
    /// UF early-career members.
    pub uf_early: u32,
    /// UF late-career members.
    pub uf_late: u32,
    /// Non-UF early-career members.
    pub other_early: u32,
    /// Non-UF late-career members.
    pub other_late: u32,
}

impl TeamRequirement {
    /// Count members per bucket.
    pub fn from_members(members: &[AdmissionCandidate]) -> Self {
        let mut req = Self::default();
        for member in members {
            match member.bucket() {
                BucketType::UfEarly => req.uf_early += 1,
                BucketType::UfLate => req.uf_late += 1,
                BucketType::OtherEarly => req.other_early += 1,
                BucketType::OtherLate => req.other_late += 1,
            }
        }
        req
    }

    /// Seats required in one bucket.
    pub const fn get(&self, bucket: BucketType) -> u32 {
        match bucket {
            BucketType::UfEarly => self.uf_early,
            BucketType::UfLate => self.uf_late,
            BucketType::OtherEarly => self.other_early,
            BucketType::OtherLate => self.other_late,
        }
    }

    /// Total seats required.
    pub const fn size(&self) -> u32 {
        self.uf_early + self.uf_late + self.other_early + self.other_late
    }
}

/// The mutable allocation ledger for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaState {
    /// Running count of admitted applicants. Informational only.
    pub total_accepted: u32,
    /// Individual seats still available through team admission.
    pub team_slots_left: u32,
    /// University of Florida quota.
    pub uf: CategoryQuota,
    /// Everyone else.
    pub other: CategoryQuota,
}

impl QuotaState {
    /// Fresh ledger with nothing accepted yet.
    pub const fn new(team_slots_left: u32, uf: CategoryQuota, other: CategoryQuota) -> Self {
        Self {
            total_accepted: 0,
            team_slots_left,
            uf,
            other,
        }
    }

    /// Slots left in `bucket`.
    pub const fn remaining(&self, bucket: BucketType) -> u32 {
        match bucket {
            BucketType::UfEarly => self.uf.early_left,
            BucketType::UfLate => self.uf.late_left,
            BucketType::OtherEarly => self.other.early_left,
            BucketType::OtherLate => self.other.late_left,
        }
    }

    fn slot_mut(&mut self, bucket: BucketType) -> &mut u32 {
        match bucket {
            BucketType::UfEarly => &mut self.uf.early_left,
            BucketType::UfLate => &mut self.uf.late_left,
            BucketType::OtherEarly => &mut self.other.early_left,
            BucketType::OtherLate => &mut self.other.late_left,
        }
    }

    /// Sum of the four bucket counters.
    pub const fn bucket_sum(&self) -> u64 {
        self.uf.total() + self.other.total()
    }

    /// Move all of `config.bucket`'s remaining slots to its partner.
    /// Returns the number of slots moved; zero leaves the ledger unchanged.
    pub fn rollover(&mut self, config: BucketConfig) -> u32 {
        let moved = std::mem::take(self.slot_mut(config.bucket));
        if moved > 0 {
            let target = self.slot_mut(config.rollover);
            *target = target.saturating_add(moved);
            tracing::debug!(
                from = %config.bucket,
                to = %config.rollover,
                moved,
                "rolled over unused quota"
            );
        }
        moved
    }

    /// Consume one slot in `bucket` for an individual. Returns `false` if the
    /// bucket is already exhausted.
    pub fn admit_individual(&mut self, bucket: BucketType) -> bool {
        let slot = self.slot_mut(bucket);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        self.total_accepted = self.total_accepted.saturating_add(1);
        true
    }

    /// Whether a team of `size` members fits under the team seat ceiling.
    /// The ceiling is strict: a team needs more seats left than it has members.
    pub const fn team_fits(&self, size: u32) -> bool {
        self.team_slots_left > size
    }

    /// True iff every per-bucket requirement fits in the remaining quota.
    pub const fn can_accept_team(&self, req: &TeamRequirement) -> bool {
        req.uf_early <= self.uf.early_left
            && req.uf_late <= self.uf.late_left
            && req.other_early <= self.other.early_left
            && req.other_late <= self.other.late_left
    }

    /// Admit a whole team. All counters change together or not at all.
    /// Returns `false`, leaving the ledger untouched, if the team does not fit.
    pub fn apply_team(&mut self, req: &TeamRequirement) -> bool {
        let size = req.size();
        if !self.team_fits(size) || !self.can_accept_team(req) {
            return false;
        }
        self.uf.early_left -= req.uf_early;
        self.uf.late_left -= req.uf_late;
        self.other.early_left -= req.other_early;
        self.other.late_left -= req.other_late;
        self.team_slots_left -= size;
        self.total_accepted = self.total_accepted.saturating_add(size);
        true
    }
}
