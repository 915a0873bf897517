//! Tests for the admission engine

use bat_admissions::core::{
    AdmissionCandidate, AdmissionError, BatEngine, BucketType, CategoryQuota, QuotaState, TeamAdmitter,
    TeamEvaluationData, WeightedSampler, BASE_CONSTANT,
};
use uuid::Uuid;

fn solo(score: f64, uf: bool, early: bool) -> AdmissionCandidate {
    AdmissionCandidate::new(Uuid::new_v4(), None, score, uf, early)
}

fn member(team: Uuid, uf: bool, early: bool) -> AdmissionCandidate {
    AdmissionCandidate::new(Uuid::new_v4(), Some(team), 3.0, uf, early)
}

fn engine() -> BatEngine {
    BatEngine::new(0.5, 0.5).unwrap()
}

#[test]
fn test_weight_invariant() {
    assert!(BatEngine::new(0.6, 0.4).is_ok());
    assert!(BatEngine::new(0.5, 0.5).is_ok());
    assert!(matches!(
        BatEngine::new(0.6, 0.5),
        Err(AdmissionError::ImproperWeights { .. })
    ));
}

#[test]
fn test_scores_are_bounded_below() {
    let engine = engine();
    for passion in 0..=5 {
        for experience in 0..=5 {
            let score = engine.calculate_weighted_score(passion, experience).unwrap();
            assert!(score >= BASE_CONSTANT);
        }
    }
    assert!(engine.calculate_weighted_score(-1, 3).is_err());
    assert!(engine.calculate_weighted_score(3, 6).is_err());
}

#[test]
fn test_single_bucket_without_rollover() {
    let candidates: Vec<_> = [3.1, 2.2, 1.9, 0.9].into_iter().map(|s| solo(s, true, true)).collect();
    let quota = QuotaState::new(0, CategoryQuota::new(2, 0), CategoryQuota::new(0, 0));
    let mut sampler = WeightedSampler::from_seed(11);

    let outcome = engine().allocate(candidates, quota, &mut sampler);

    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.rejected.len(), 2);
    assert_eq!(outcome.quota.uf.early_left, 0);
    assert!(outcome.accepted.iter().all(|c| c.bucket() == BucketType::UfEarly));
}

#[test]
fn test_team_admission_postconditions() {
    let team = Uuid::new_v4();
    let members = vec![member(team, true, true), member(team, true, true), member(team, false, false)];
    let mut quota = QuotaState::new(10, CategoryQuota::new(5, 0), CategoryQuota::new(0, 5));
    let mut sampler = WeightedSampler::from_seed(3);

    let (accepted, rejected) =
        TeamAdmitter::new().accept_teams(vec![TeamEvaluationData::new(team, members)], &mut quota, &mut sampler);

    assert_eq!(accepted.len(), 3);
    assert!(rejected.is_empty());
    assert_eq!(quota.team_slots_left, 7);
    assert_eq!(quota.uf.early_left, 3);
    assert_eq!(quota.other.late_left, 4);
}

#[test]
fn test_empty_bucket_quota_reaches_sibling() {
    let candidates: Vec<_> = (0..8).map(|_| solo(2.0, true, false)).collect();
    let quota = QuotaState::new(0, CategoryQuota::new(5, 0), CategoryQuota::new(0, 0));
    let mut sampler = WeightedSampler::from_seed(5);

    let outcome = engine().allocate(candidates, quota, &mut sampler);

    assert_eq!(outcome.accepted.len(), 5);
    assert_eq!(outcome.rejected.len(), 3);
    assert_eq!(outcome.quota.bucket_sum(), 0);
}

#[test]
fn test_team_at_seat_ceiling_is_rejected_whole() {
    let team = Uuid::new_v4();
    let candidates = vec![member(team, true, true), member(team, true, true)];
    let quota = QuotaState::new(2, CategoryQuota::new(10, 10), CategoryQuota::new(10, 10));
    let mut sampler = WeightedSampler::from_seed(9);

    let outcome = engine().allocate(candidates, quota, &mut sampler);

    assert!(outcome.accepted.is_empty());
    assert_eq!(outcome.rejected.len(), 2);
    assert_eq!(outcome.quota.team_slots_left, 2);
}

#[test]
fn test_same_seed_same_outcome() {
    let candidates: Vec<_> = (0..40)
        .map(|i| solo(f64::from(i % 5) + 0.5, i % 2 == 0, i % 3 == 0))
        .collect();
    let quota = QuotaState::new(0, CategoryQuota::new(3, 4), CategoryQuota::new(2, 1));

    let first = engine().allocate(candidates.clone(), quota, &mut WeightedSampler::from_seed(77));
    let second = engine().allocate(candidates, quota, &mut WeightedSampler::from_seed(77));

    assert_eq!(first.accepted_ids(), second.accepted_ids());
    assert_eq!(first.rejected_ids(), second.rejected_ids());
}
