//! Tests for configuration validation

use bat_admissions::config::{EngineConfig, QuotaConfig, WorkerConfig};
use bat_admissions::core::BucketType;

#[test]
fn test_default_config_is_valid() {
    let cfg = EngineConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.quota, QuotaConfig::default());
    assert_eq!(cfg.seed, None);
}

#[test]
fn test_weights_within_tolerance() {
    let cfg = EngineConfig {
        passion_weight: 0.6,
        experience_weight: 0.4,
        ..EngineConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_zero_queue_depth_rejected() {
    let cfg = EngineConfig {
        worker: WorkerConfig {
            queue_name: "bat".into(),
            max_queue_depth: 0,
        },
        ..EngineConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_from_json_str_full() {
    let json = r#"{
        "passion_weight": 0.7,
        "experience_weight": 0.3,
        "quota": {
            "team_slots": 20,
            "uf_early": 10,
            "uf_late": 10,
            "other_early": 5,
            "other_late": 5
        },
        "worker": { "queue_name": "admissions", "max_queue_depth": 16 },
        "seed": 1234
    }"#;
    let cfg = EngineConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.quota.team_slots, 20);
    assert_eq!(cfg.quota.total_seats(), 30);
    assert_eq!(cfg.worker.queue_name, "admissions");
    assert_eq!(cfg.seed, Some(1234));
}

#[test]
fn test_from_json_str_parse_error() {
    let err = EngineConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_initial_state_is_fresh_per_call() {
    let quota = QuotaConfig {
        team_slots: 10,
        uf_early: 5,
        uf_late: 4,
        other_early: 3,
        other_late: 2,
    };
    let mut first = quota.initial_state();
    assert!(first.admit_individual(BucketType::UfEarly));

    let second = quota.initial_state();
    assert_eq!(second.uf.early_left, 5);
    assert_eq!(second.total_accepted, 0);
}
