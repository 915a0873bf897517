//! Property tests for quota conservation and team atomicity

use std::collections::{HashMap, HashSet};

use bat_admissions::core::{AdmissionCandidate, BatEngine, CategoryQuota, QuotaState, WeightedSampler};
use proptest::prelude::*;
use uuid::Uuid;

fn pool_strategy() -> impl Strategy<Value = Vec<(f64, bool, bool, Option<usize>)>> {
    prop::collection::vec(
        (0.1f64..5.1, any::<bool>(), any::<bool>(), prop::option::of(0usize..4)),
        0..40,
    )
}

fn build_pool(layout: &[(f64, bool, bool, Option<usize>)]) -> Vec<AdmissionCandidate> {
    let teams: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    layout.iter()
        .map(|&(score, uf, early, team)| {
            AdmissionCandidate::new(Uuid::new_v4(), team.map(|t| teams[t]), score, uf, early)
        })
        .collect()
}

proptest! {
    #[test]
    fn quota_is_conserved(
        layout in pool_strategy(),
        slots in prop::array::uniform4(0u32..12),
        team_slots in 0u32..20,
        seed in any::<u64>(),
    ) {
        let pool = build_pool(&layout);
        let quota = QuotaState::new(
            team_slots,
            CategoryQuota::new(slots[0], slots[1]),
            CategoryQuota::new(slots[2], slots[3]),
        );
        let engine = BatEngine::new(0.5, 0.5).unwrap();
        let outcome = engine.allocate(pool.clone(), quota, &mut WeightedSampler::from_seed(seed));

        let admitted = outcome.accepted.len() as u64;
        prop_assert_eq!(admitted + outcome.quota.bucket_sum(), quota.bucket_sum());
        prop_assert_eq!(u64::from(outcome.quota.total_accepted), admitted);

        let uf_admitted = outcome.accepted.iter().filter(|c| c.is_uf_student).count() as u64;
        prop_assert!(uf_admitted <= quota.uf.total());
        prop_assert!(admitted - uf_admitted <= quota.other.total());

        prop_assert_eq!(outcome.accepted.len() + outcome.rejected.len(), pool.len());
        let accepted: HashSet<_> = outcome.accepted_ids().into_iter().collect();
        prop_assert!(outcome.rejected_ids().iter().all(|id| !accepted.contains(id)));
    }

    #[test]
    fn teams_are_never_split(
        layout in pool_strategy(),
        slots in prop::array::uniform4(0u32..12),
        team_slots in 0u32..20,
        seed in any::<u64>(),
    ) {
        let pool = build_pool(&layout);
        let quota = QuotaState::new(
            team_slots,
            CategoryQuota::new(slots[0], slots[1]),
            CategoryQuota::new(slots[2], slots[3]),
        );
        let engine = BatEngine::new(0.5, 0.5).unwrap();
        let outcome = engine.allocate(pool, quota, &mut WeightedSampler::from_seed(seed));

        let mut sides: HashMap<Uuid, HashSet<bool>> = HashMap::new();
        for c in &outcome.accepted {
            if let Some(team) = c.team_id {
                sides.entry(team).or_default().insert(true);
            }
        }
        for c in &outcome.rejected {
            if let Some(team) = c.team_id {
                sides.entry(team).or_default().insert(false);
            }
        }
        prop_assert!(sides.values().all(|s| s.len() == 1));

        let team_members_admitted = outcome.accepted.iter().filter(|c| c.team_id.is_some()).count() as u32;
        prop_assert!(team_members_admitted == 0 || team_members_admitted < team_slots);
    }
}
