//! Atomic admission of whole teams.

use rand::Rng;

use crate::core::candidate::{AdmissionCandidate, TeamEvaluationData};
use crate::core::quota::{QuotaState, TeamRequirement};
use crate::core::sampler::WeightedSampler;

/// Admits or rejects teams as indivisible units against a shared [`QuotaState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamAdmitter;

impl TeamAdmitter {
    /// Create a team admitter.
    pub const fn new() -> Self {
        Self
    }

    /// Rank teams by weighted random key over their average score, then admit
    /// each team in that order if it fits both the team seat ceiling and every
    /// category quota. Returns `(accepted, rejected)` member lists; a team's
    /// members always land on the same side.
    pub fn accept_teams<R: Rng>(
        &self,
        mut teams: Vec<TeamEvaluationData>,
        quota: &mut QuotaState,
        sampler: &mut WeightedSampler<R>,
    ) -> (Vec<AdmissionCandidate>, Vec<AdmissionCandidate>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for team in &mut teams {
            team.recompute_average();
        }
        sampler.assign_team_keys(&mut teams);

        for team in teams {
            let size = u32::try_from(team.size()).unwrap_or(u32::MAX);

            if !quota.team_fits(size) {
                tracing::debug!(
                    team = %team.team_id,
                    size,
                    team_slots_left = quota.team_slots_left,
                    "team exceeds remaining team seats"
                );
                rejected.extend(team.members);
                continue;
            }

            let requirement = TeamRequirement::from_members(&team.members);
            if quota.can_accept_team(&requirement) && quota.apply_team(&requirement) {
                tracing::debug!(team = %team.team_id, size, "team admitted");
                accepted.extend(team.members);
            } else {
                tracing::debug!(team = %team.team_id, ?requirement, "team exceeds category quota");
                rejected.extend(team.members);
            }
        }

        (accepted, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quota::CategoryQuota;
    use uuid::Uuid;

    fn member(team: Uuid, uf: bool, early: bool) -> AdmissionCandidate {
        AdmissionCandidate::new(Uuid::new_v4(), Some(team), 3.0, uf, early)
    }

    fn team(members: &[(bool, bool)]) -> TeamEvaluationData {
        let id = Uuid::new_v4();
        TeamEvaluationData::new(id, members.iter().map(|(uf, early)| member(id, *uf, *early)).collect())
    }

    #[test]
    fn mixed_team_is_admitted() {
        let mut quota = QuotaState::new(10, CategoryQuota::new(5, 0), CategoryQuota::new(0, 5));
        let mut sampler = WeightedSampler::from_seed(4);

        let (accepted, rejected) = TeamAdmitter::new().accept_teams(
            vec![team(&[(true, true), (true, true), (false, false)])],
            &mut quota,
            &mut sampler,
        );

        assert_eq!(accepted.len(), 3);
        assert!(rejected.is_empty());
        assert_eq!(quota.team_slots_left, 7);
        assert_eq!(quota.uf.early_left, 3);
        assert_eq!(quota.other.late_left, 4);
        assert_eq!(quota.total_accepted, 3);
    }

    #[test]
    fn team_at_seat_ceiling_is_rejected() {
        let mut quota = QuotaState::new(3, CategoryQuota::new(10, 10), CategoryQuota::new(10, 10));
        let mut sampler = WeightedSampler::from_seed(4);
        let before = quota;

        let (accepted, rejected) = TeamAdmitter::new().accept_teams(
            vec![team(&[(true, true), (true, false), (false, true)])],
            &mut quota,
            &mut sampler,
        );

        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 3);
        assert_eq!(quota, before);
    }

    #[test]
    fn team_short_on_one_category_is_rejected_whole() {
        let mut quota = QuotaState::new(50, CategoryQuota::new(10, 10), CategoryQuota::new(1, 10));
        let mut sampler = WeightedSampler::from_seed(8);
        let before = quota;

        let (accepted, rejected) = TeamAdmitter::new().accept_teams(
            vec![team(&[(true, true), (false, true), (false, true)])],
            &mut quota,
            &mut sampler,
        );

        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 3);
        assert_eq!(quota, before);
    }

    #[test]
    fn teams_never_split() {
        let teams: Vec<_> = (0..12)
            .map(|i| team(&[(i % 2 == 0, true), (true, i % 3 == 0), (false, false)]))
            .collect();
        let mut quota = QuotaState::new(20, CategoryQuota::new(6, 4), CategoryQuota::new(3, 5));
        let mut sampler = WeightedSampler::from_seed(21);

        let (accepted, rejected) = TeamAdmitter::new().accept_teams(teams, &mut quota, &mut sampler);

        assert_eq!(accepted.len() + rejected.len(), 36);
        for side in [&accepted, &rejected] {
            for member in side.iter() {
                let count = side.iter().filter(|m| m.team_id == member.team_id).count();
                assert_eq!(count, 3);
            }
        }
    }
}
