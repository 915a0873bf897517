//! Candidate and team models consumed by the admitters.

use serde::{Deserialize, Serialize};

use crate::util::ids::{ApplicantId, TeamId};

/// School value identifying University of Florida applicants.
pub const UF_SCHOOL: &str = "University of Florida";
/// Academic years counted as early career.
pub const EARLY_CAREER_YEARS: [&str; 2] = ["first_year", "second_year"];

/// One of the four mutually exclusive individual-applicant buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketType {
    /// UF student, first or second year.
    UfEarly,
    /// UF student, third year or later.
    UfLate,
    /// Non-UF applicant, first or second year.
    OtherEarly,
    /// Non-UF applicant, third year or later.
    OtherLate,
}

impl BucketType {
    /// Fixed processing order used by the individual admitter.
    pub const ORDER: [Self; 4] = [Self::UfEarly, Self::UfLate, Self::OtherEarly, Self::OtherLate];

    /// Bucket for an `(is_uf_student, is_early_career)` pair.
    pub const fn from_flags(is_uf_student: bool, is_early_career: bool) -> Self {
        match (is_uf_student, is_early_career) {
            (true, true) => Self::UfEarly,
            (true, false) => Self::UfLate,
            (false, true) => Self::OtherEarly,
            (false, false) => Self::OtherLate,
        }
    }

    /// The sibling bucket that absorbs this bucket's unused quota.
    pub const fn rollover_partner(self) -> Self {
        match self {
            Self::UfEarly => Self::UfLate,
            Self::UfLate => Self::UfEarly,
            Self::OtherEarly => Self::OtherLate,
            Self::OtherLate => Self::OtherEarly,
        }
    }

    /// Stable label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UfEarly => "uf_early",
            Self::UfLate => "uf_late",
            Self::OtherEarly => "other_early",
            Self::OtherLate => "other_late",
        }
    }
}

impl std::fmt::Display for BucketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applicant under consideration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionCandidate {
    /// Applicant identifier.
    pub applicant_id: ApplicantId,
    /// Team the applicant belongs to; `None` for solo applicants.
    pub team_id: Option<TeamId>,
    /// Weighted review score, strictly positive.
    pub weighted_score: f64,
    /// Sampling key for the current pass only.
    #[serde(skip)]
    pub sort_key: f64,
    /// University of Florida student.
    pub is_uf_student: bool,
    /// First or second year.
    pub is_early_career: bool,
}

impl AdmissionCandidate {
    /// Build a candidate with a zeroed sort key.
    pub const fn new(
        applicant_id: ApplicantId,
        team_id: Option<TeamId>,
        weighted_score: f64,
        is_uf_student: bool,
        is_early_career: bool,
    ) -> Self {
        Self {
            applicant_id,
            team_id,
            weighted_score,
            sort_key: 0.0,
            is_uf_student,
            is_early_career,
        }
    }

    /// Bucket this candidate competes in as an individual.
    pub const fn bucket(&self) -> BucketType {
        BucketType::from_flags(self.is_uf_student, self.is_early_career)
    }
}

/// A team evaluated as one atomic unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamEvaluationData {
    /// Team identifier.
    pub team_id: TeamId,
    /// Members in a stable order.
    pub members: Vec<AdmissionCandidate>,
    /// Mean of the members' weighted scores.
    pub average_weighted_score: f64,
    /// Sampling key for the current pass only.
    pub sort_key: f64,
}

impl TeamEvaluationData {
    /// Build a team and compute its average score.
    pub fn new(team_id: TeamId, members: Vec<AdmissionCandidate>) -> Self {
        let mut team = Self {
            team_id,
            members,
            average_weighted_score: 0.0,
            sort_key: 0.0,
        };
        team.recompute_average();
        team
    }

    /// Number of members.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Recompute `average_weighted_score` over the current member set.
    /// An empty team averages to zero.
    pub fn recompute_average(&mut self) {
        if self.members.is_empty() {
            self.average_weighted_score = 0.0;
            return;
        }
        let total: f64 = self.members.iter().map(|m| m.weighted_score).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.members.len() as f64;
        self.average_weighted_score = total / count;
    }
}

/// Application data as provided by the data-access collaborator.
///
/// Ratings are optional because reviews may still be in progress when a run
/// is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationProfile {
    /// Applicant identifier.
    pub applicant_id: ApplicantId,
    /// Team identifier, if the applicant applied with a team.
    pub team_id: Option<TeamId>,
    /// Passion rating in `[0, 5]`.
    pub passion_rating: Option<i32>,
    /// Experience rating in `[0, 5]`.
    pub experience_rating: Option<i32>,
    /// School as entered on the application.
    pub school: String,
    /// Academic year code, e.g. `first_year`.
    pub year: String,
}

impl ApplicationProfile {
    /// True iff the applicant attends the University of Florida.
    pub fn is_uf_student(&self) -> bool {
        self.school == UF_SCHOOL
    }

    /// True iff the applicant is a first or second year.
    pub fn is_early_career(&self) -> bool {
        EARLY_CAREER_YEARS.contains(&self.year.as_str())
    }
}
