//! The Balanced Admissions Thresher.
//!
//! `BatEngine` is the single entry point tying scoring, classification and
//! both admitters together. One call to [`BatEngine::allocate`] is one run:
//! teams are decided first against the run's [`QuotaState`], then individuals
//! consume what is left.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::candidate::{AdmissionCandidate, ApplicationProfile};
use crate::core::classify::classify;
use crate::core::individual::IndividualAdmitter;
use crate::core::quota::QuotaState;
use crate::core::sampler::WeightedSampler;
use crate::core::score::ScoreCalculator;
use crate::core::team::TeamAdmitter;
use crate::core::AdmissionError;
use crate::util::ids::ApplicantId;

/// Final partition of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionOutcome {
    /// Admitted candidates, teams first.
    pub accepted: Vec<AdmissionCandidate>,
    /// Everyone else.
    pub rejected: Vec<AdmissionCandidate>,
    /// Ledger state after the run.
    pub quota: QuotaState,
}

impl AdmissionOutcome {
    /// Identifiers of admitted applicants.
    pub fn accepted_ids(&self) -> Vec<ApplicantId> {
        self.accepted.iter().map(|c| c.applicant_id).collect()
    }

    /// Identifiers of rejected applicants.
    pub fn rejected_ids(&self) -> Vec<ApplicantId> {
        self.rejected.iter().map(|c| c.applicant_id).collect()
    }
}

/// Result of turning application profiles into candidates.
#[derive(Debug, Clone, Default)]
pub struct ScoredPool {
    /// Profiles that scored successfully.
    pub candidates: Vec<AdmissionCandidate>,
    /// Profiles left out of the run, with the reason.
    pub excluded: Vec<(ApplicantId, AdmissionError)>,
}

/// Admission engine: scoring configuration plus the two admitters.
#[derive(Debug, Clone, Copy)]
pub struct BatEngine {
    scorer: ScoreCalculator,
    teams: TeamAdmitter,
    individuals: IndividualAdmitter,
}

impl BatEngine {
    /// Build an engine; fails with `ImproperWeights` if the weights do not sum to 1.0.
    pub fn new(passion_weight: f64, experience_weight: f64) -> Result<Self, AdmissionError> {
        Ok(Self::with_scorer(ScoreCalculator::new(passion_weight, experience_weight)?))
    }

    /// Build an engine around an existing calculator.
    pub fn with_scorer(scorer: ScoreCalculator) -> Self {
        Self {
            scorer,
            teams: TeamAdmitter::new(),
            individuals: IndividualAdmitter::new(),
        }
    }

    /// The engine's score calculator.
    pub const fn scorer(&self) -> &ScoreCalculator {
        &self.scorer
    }

    /// Weighted score for one pair of ratings.
    pub fn calculate_weighted_score(&self, passion: i32, experience: i32) -> Result<f64, AdmissionError> {
        self.scorer.compute_weighted_score(passion, experience)
    }

    /// Score one application.
    pub fn candidate_from_profile(&self, profile: &ApplicationProfile) -> Result<AdmissionCandidate, AdmissionError> {
        let (Some(passion), Some(experience)) = (profile.passion_rating, profile.experience_rating) else {
            return Err(AdmissionError::MissingRatings(profile.applicant_id));
        };
        let score = self.scorer.compute_weighted_score(passion, experience)?;
        Ok(AdmissionCandidate::new(
            profile.applicant_id,
            profile.team_id,
            score,
            profile.is_uf_student(),
            profile.is_early_career(),
        ))
    }

    /// Score every application. Failures exclude only the affected applicant.
    pub fn score_profiles<'a>(&self, profiles: impl IntoIterator<Item = &'a ApplicationProfile>) -> ScoredPool {
        let mut pool = ScoredPool::default();
        for profile in profiles {
            match self.candidate_from_profile(profile) {
                Ok(candidate) => pool.candidates.push(candidate),
                Err(err) => {
                    tracing::warn!(applicant = %profile.applicant_id, error = %err, "excluding applicant from run");
                    pool.excluded.push((profile.applicant_id, err));
                }
            }
        }
        pool
    }

    /// Run one allocation over `candidates` starting from `quota`.
    pub fn allocate<R: Rng>(
        &self,
        candidates: Vec<AdmissionCandidate>,
        mut quota: QuotaState,
        sampler: &mut WeightedSampler<R>,
    ) -> AdmissionOutcome {
        let (teams, solo) = classify(candidates);
        let team_count = teams.len();
        let solo_count = solo.len();

        let (mut accepted, mut rejected) = self.teams.accept_teams(teams, &mut quota, sampler);
        let team_accepted = accepted.len();

        let (solo_accepted, solo_rejected) = self.individuals.accept_individuals(solo, &mut quota, sampler);
        accepted.extend(solo_accepted);
        rejected.extend(solo_rejected);

        tracing::info!(
            teams = team_count,
            individuals = solo_count,
            team_members_accepted = team_accepted,
            accepted = accepted.len(),
            rejected = rejected.len(),
            "allocation finished"
        );

        AdmissionOutcome {
            accepted,
            rejected,
            quota,
        }
    }
}
