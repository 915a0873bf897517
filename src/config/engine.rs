//! Engine, capacity and worker configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::quota::{CategoryQuota, QuotaState};
use crate::core::score::{equal_within_tolerance, WEIGHT_TOLERANCE};
use crate::core::AdmissionError;

/// Per-event capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// Ceiling on seats granted to team members.
    pub team_slots: u32,
    /// UF early-career seats.
    pub uf_early: u32,
    /// UF late-career seats.
    pub uf_late: u32,
    /// Non-UF early-career seats.
    pub other_early: u32,
    /// Non-UF late-career seats.
    pub other_late: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            team_slots: 50,
            uf_early: 210,
            uf_late: 140,
            other_early: 90,
            other_late: 60,
        }
    }
}

impl QuotaConfig {
    /// Fresh ledger for one run.
    pub const fn initial_state(&self) -> QuotaState {
        QuotaState::new(
            self.team_slots,
            CategoryQuota::new(self.uf_early, self.uf_late),
            CategoryQuota::new(self.other_early, self.other_late),
        )
    }

    /// Reject capacities the run ledger cannot count.
    ///
    /// Team seats are drawn from the bucket quotas, so only the bucket total
    /// is bounded.
    pub fn validate(&self) -> Result<(), AdmissionError> {
        let total = self.total_seats();
        if total > u64::from(u32::MAX) {
            return Err(AdmissionError::InvalidQuota(format!(
                "total capacity {total} exceeds {}",
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Total bucket seats.
    pub fn total_seats(&self) -> u64 {
        [self.uf_early, self.uf_late, self.other_early, self.other_late]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

/// Worker and queue settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name of the queue the worker consumes.
    pub queue_name: String,
    /// Maximum queued tasks before rejection.
    pub max_queue_depth: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_name: "bat".into(),
            max_queue_depth: 1024,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight of the passion rating.
    pub passion_weight: f64,
    /// Weight of the experience rating.
    pub experience_weight: f64,
    /// Default capacities, used when the event has no override.
    pub quota: QuotaConfig,
    /// Worker settings.
    pub worker: WorkerConfig,
    /// Fixed sampler seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            passion_weight: 0.5,
            experience_weight: 0.5,
            quota: QuotaConfig::default(),
            worker: WorkerConfig::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Validate weights and worker settings.
    pub fn validate(&self) -> Result<(), String> {
        if !self.passion_weight.is_finite() || !self.experience_weight.is_finite() {
            return Err("weights must be finite".into());
        }
        if !equal_within_tolerance(self.passion_weight + self.experience_weight, 1.0, WEIGHT_TOLERANCE) {
            return Err(format!(
                "passion_weight ({}) + experience_weight ({}) must equal 1.0",
                self.passion_weight, self.experience_weight
            ));
        }
        self.quota.validate().map_err(|e| e.to_string())?;
        if self.worker.max_queue_depth == 0 {
            return Err("max_queue_depth must be greater than 0".into());
        }
        if self.worker.queue_name.trim().is_empty() {
            return Err("queue_name must not be empty".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `.env` if present, apply `BAT_*` overrides onto the defaults and validate.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        let cfg = Self::default().with_overrides(|key| env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `BAT_*` overrides read through `lookup`. Absent keys keep their value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        override_with(&lookup, "BAT_PASSION_WEIGHT", &mut self.passion_weight)?;
        override_with(&lookup, "BAT_EXPERIENCE_WEIGHT", &mut self.experience_weight)?;
        override_with(&lookup, "BAT_TEAM_SLOTS", &mut self.quota.team_slots)?;
        override_with(&lookup, "BAT_UF_EARLY", &mut self.quota.uf_early)?;
        override_with(&lookup, "BAT_UF_LATE", &mut self.quota.uf_late)?;
        override_with(&lookup, "BAT_OTHER_EARLY", &mut self.quota.other_early)?;
        override_with(&lookup, "BAT_OTHER_LATE", &mut self.quota.other_late)?;
        override_with(&lookup, "BAT_MAX_QUEUE_DEPTH", &mut self.worker.max_queue_depth)?;
        if let Some(raw) = lookup("BAT_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("BAT_SEED: invalid value `{raw}`: {e}"))?;
            self.seed = Some(seed);
        }
        Ok(self)
    }
}

fn override_with<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) -> Result<(), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("{key}: invalid value `{raw}`: {e}"))?;
    }
    Ok(())
}
