//! Score distribution snapshot of a candidate pool, logged before each run.

use serde::{Deserialize, Serialize};

use crate::core::candidate::AdmissionCandidate;

/// Count and spread of weighted scores for one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    /// Number of candidates in the group.
    pub count: usize,
    #[serde(skip)]
    sum: f64,
    /// Lowest score, `None` for an empty group.
    pub min: Option<f64>,
    /// Highest score, `None` for an empty group.
    pub max: Option<f64>,
}

impl Default for ScoreStats {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: None,
            max: None,
        }
    }
}

impl ScoreStats {
    fn update(&mut self, score: f64) {
        self.count += 1;
        self.sum += score;
        self.min = Some(self.min.map_or(score, |m| m.min(score)));
        self.max = Some(self.max.map_or(score, |m| m.max(score)));
    }

    /// Mean score, `None` for an empty group.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Snapshot over the groups admissions staff look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdmissionStats {
    /// Everyone.
    pub overall: ScoreStats,
    /// UF students.
    pub uf_students: ScoreStats,
    /// Non-UF applicants.
    pub non_uf_students: ScoreStats,
    /// First and second years.
    pub early_career: ScoreStats,
    /// Third year and later.
    pub late_career: ScoreStats,
    /// Applicants on a team.
    pub team_applicants: ScoreStats,
    /// Applicants without a team.
    pub solo_applicants: ScoreStats,
}

impl AdmissionStats {
    /// Compute the snapshot.
    pub fn from_candidates<'a>(candidates: impl IntoIterator<Item = &'a AdmissionCandidate>) -> Self {
        let mut stats = Self::default();
        for c in candidates {
            let score = c.weighted_score;
            stats.overall.update(score);
            if c.is_uf_student {
                stats.uf_students.update(score);
            } else {
                stats.non_uf_students.update(score);
            }
            if c.is_early_career {
                stats.early_career.update(score);
            } else {
                stats.late_career.update(score);
            }
            if c.team_id.is_some() {
                stats.team_applicants.update(score);
            } else {
                stats.solo_applicants.update(score);
            }
        }
        stats
    }

    /// Emit the snapshot as one structured log line.
    pub fn log(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(
            total_applicants = self.overall.count,
            overall_mean = ?self.overall.mean(),
            stats = %json,
            "admissions statistics snapshot"
        );
    }
}
