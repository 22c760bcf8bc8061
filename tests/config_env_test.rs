// ABOUTME: Integration tests for environment configuration and exercise config loading
// ABOUTME: Validates env parsing, JSON config overrides, threshold overrides, and fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assert_close, init_test_logging};
use form_coach::config::environment::{
    EXERCISE_CONFIG_VAR, FEEDBACK_SEED_VAR, GOOD_THRESHOLD_VAR, POOR_THRESHOLD_VAR,
};
use form_coach::config::{
    CoachConfig, ConfigError, ExerciseConfig, ExerciseConfigRegistry, MetricWeight,
};
use form_coach::errors::{AppError, ErrorCode};
use form_coach::models::ExerciseType;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ALL_VARS: [&str; 4] = [
    POOR_THRESHOLD_VAR,
    GOOD_THRESHOLD_VAR,
    EXERCISE_CONFIG_VAR,
    FEEDBACK_SEED_VAR,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    init_test_logging();
    clear_env();

    let config = CoachConfig::from_env();
    assert_eq!(config, CoachConfig::default());

    let registry = config.build_registry().unwrap();
    assert!(registry.is_configured(ExerciseType::BicepCurl));
    assert!(registry.is_configured(ExerciseType::Squat));
    assert!(registry.is_configured(ExerciseType::PushUp));
    assert!(!registry.is_configured(ExerciseType::Plank));
}

#[test]
#[serial]
fn test_parses_environment_values() {
    init_test_logging();
    clear_env();
    env::set_var(POOR_THRESHOLD_VAR, "55");
    env::set_var(GOOD_THRESHOLD_VAR, " 90.5 ");
    env::set_var(FEEDBACK_SEED_VAR, "1234");

    let config = CoachConfig::from_env();
    clear_env();

    assert_eq!(config.poor_threshold, Some(55.0));
    assert_eq!(config.good_threshold, Some(90.5));
    assert_eq!(config.feedback_seed, Some(1234));
    assert!(config.exercise_config_path.is_none());
}

#[test]
#[serial]
fn test_unparseable_values_are_ignored() {
    init_test_logging();
    clear_env();
    env::set_var(POOR_THRESHOLD_VAR, "sixty");
    env::set_var(FEEDBACK_SEED_VAR, "-4");

    let config = CoachConfig::from_env();
    clear_env();

    assert!(config.poor_threshold.is_none());
    assert!(config.feedback_seed.is_none());
}

#[test]
fn test_threshold_overrides_apply_to_every_config() {
    init_test_logging();
    let config = CoachConfig {
        poor_threshold: Some(70.0),
        good_threshold: Some(90.0),
        ..CoachConfig::default()
    };
    let registry = config.build_registry().unwrap();

    for exercise in ExerciseType::ALL {
        let thresholds = registry.get(exercise).thresholds;
        assert_close(thresholds.poor_threshold, 70.0);
        assert_close(thresholds.good_threshold, 90.0);
    }
}

#[test]
fn test_inverted_override_falls_back_to_default_config() {
    init_test_logging();
    let config = CoachConfig {
        poor_threshold: Some(95.0),
        ..CoachConfig::default()
    };
    let registry = config.build_registry().unwrap();

    assert!(!registry.is_configured(ExerciseType::BicepCurl));
    let fallback = registry.get(ExerciseType::BicepCurl);
    assert_eq!(fallback.exercise_type, "default");
    assert_close(fallback.thresholds.poor_threshold, 60.0);
    assert_close(fallback.thresholds.good_threshold, 85.0);
}

#[test]
#[serial]
fn test_json_config_file_replaces_builtins() {
    init_test_logging();
    clear_env();
    let file = config_file(
        r#"[
            {
                "exercise_type": " Bicep_Curl ",
                "thresholds": {"poor_threshold": 50, "good_threshold": 70},
                "metric_weights": [
                    {"name": "elbow_angle_score", "weight": 0.7, "is_critical": true},
                    {"name": "elbow_stability_score", "weight": 0.3}
                ],
                "feedback_templates": {
                    "poor": ["Fix it"],
                    "average": ["Okay"],
                    "excellent": ["Great"]
                }
            },
            {
                "exercise_type": "squat",
                "thresholds": {"poor_threshold": 90, "good_threshold": 80},
                "feedback_templates": {"poor": ["a"], "average": ["b"], "excellent": ["c"]}
            },
            {
                "exercise_type": "deadlift",
                "feedback_templates": {"poor": ["a"], "average": ["b"], "excellent": ["c"]}
            }
        ]"#,
    );
    env::set_var(EXERCISE_CONFIG_VAR, file.path());

    let config = CoachConfig::from_env();
    clear_env();
    let registry = config.build_registry().unwrap();

    let curl = registry.get(ExerciseType::BicepCurl);
    assert_eq!(curl.exercise_type, "bicep_curl");
    assert_close(curl.thresholds.poor_threshold, 50.0);
    assert!(!curl.weight_for("elbow_stability_score").unwrap().is_critical);

    assert!(!registry.is_configured(ExerciseType::Squat));
    assert!(!registry.is_configured(ExerciseType::PushUp));
}

#[test]
fn test_missing_config_file_is_a_config_error() {
    init_test_logging();
    let config = CoachConfig {
        exercise_config_path: Some("/nonexistent/form-coach/exercises.json".into()),
        ..CoachConfig::default()
    };
    let error = config.build_registry().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.source.is_some());
}

#[test]
fn test_malformed_config_document_is_invalid() {
    init_test_logging();
    let error = ExerciseConfigRegistry::from_json("{\"not\": \"a list\"}").unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_validation_failures() {
    let mut config = ExerciseConfig::builtin(ExerciseType::Squat).unwrap();
    config.metric_weights.push(MetricWeight::new("extra", 0.5, false));
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));

    let mut config = ExerciseConfig::builtin(ExerciseType::Squat).unwrap();
    config.metric_weights[0].weight = 1.5;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));

    let mut config = ExerciseConfig::builtin(ExerciseType::PushUp).unwrap();
    config.feedback_templates.average.clear();
    assert!(matches!(config.validate(), Err(ConfigError::MissingTemplates(_))));

    let mut config = ExerciseConfig::default_config();
    config.thresholds.good_threshold = 120.0;
    let error: AppError = config.validate().unwrap_err().into();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}
