//! Splits the candidate pool into teams and individuals, and individuals into buckets.

use std::collections::{BTreeMap, HashMap};

use crate::core::candidate::{AdmissionCandidate, BucketType, TeamEvaluationData};
use crate::util::ids::TeamId;

/// Individuals grouped by bucket. All four buckets are always present.
pub type BucketPools = BTreeMap<BucketType, Vec<AdmissionCandidate>>;

/// Partition candidates into teams and individuals.
///
/// Teams are returned in order of first appearance and members keep their
/// input order, so identical input yields identical output.
pub fn classify(
    candidates: impl IntoIterator<Item = AdmissionCandidate>,
) -> (Vec<TeamEvaluationData>, Vec<AdmissionCandidate>) {
    let mut team_index: HashMap<TeamId, usize> = HashMap::new();
    let mut grouped: Vec<(TeamId, Vec<AdmissionCandidate>)> = Vec::new();
    let mut individuals = Vec::new();

    for candidate in candidates {
        match candidate.team_id {
            Some(team_id) => {
                let slot = *team_index.entry(team_id).or_insert_with(|| {
                    grouped.push((team_id, Vec::new()));
                    grouped.len() - 1
                });
                grouped[slot].1.push(candidate);
            }
            None => individuals.push(candidate),
        }
    }

    let teams = grouped
        .into_iter()
        .map(|(team_id, members)| TeamEvaluationData::new(team_id, members))
        .collect();

    (teams, individuals)
}

/// Group individuals into the four buckets by `(is_uf_student, is_early_career)`.
pub fn group_by_bucket_type(
    individuals: impl IntoIterator<Item = AdmissionCandidate>,
) -> BucketPools {
    let mut pools: BucketPools = BucketType::ORDER.iter().map(|b| (*b, Vec::new())).collect();
    for candidate in individuals {
        pools.entry(candidate.bucket()).or_default().push(candidate);
    }
    pools
}
