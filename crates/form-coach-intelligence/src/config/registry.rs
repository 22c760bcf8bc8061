// ABOUTME: Immutable registry of validated exercise configs, shared read-only across sessions
// ABOUTME: Substitutes the default config for unconfigured or invalid exercises without failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use super::exercise::ExerciseConfig;
use form_coach_core::errors::AppResult;
use form_coach_core::models::ExerciseType;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Exercise configs validated once at load time
///
/// Lookups never fail: anything missing resolves to the default config.
#[derive(Debug, Clone)]
pub struct ExerciseConfigRegistry {
    configs: HashMap<ExerciseType, Arc<ExerciseConfig>>,
    default: Arc<ExerciseConfig>,
}

impl Default for ExerciseConfigRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExerciseConfigRegistry {
    /// Registry holding the configs that ship with the engine
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_configs(ExerciseType::ALL.into_iter().filter_map(ExerciseConfig::builtin))
    }

    /// Registry built from caller-supplied configs
    ///
    /// Configs that fail validation or name an unknown exercise are logged and
    /// dropped, so their exercise falls back to the default config.
    pub fn from_configs(configs: impl IntoIterator<Item = ExerciseConfig>) -> Self {
        let mut registered = HashMap::new();
        for mut config in configs {
            config.normalize();
            let exercise = match config.exercise_type.parse::<ExerciseType>() {
                Ok(exercise) => exercise,
                Err(e) => {
                    error!(
                        exercise.type = %config.exercise_type,
                        error = %e,
                        "Ignoring config for unknown exercise"
                    );
                    continue;
                }
            };
            if let Err(e) = config.validate() {
                error!(
                    exercise.type = %exercise,
                    error = %e,
                    "Invalid exercise config, falling back to default"
                );
                continue;
            }
            registered.insert(exercise, Arc::new(config));
        }

        info!(
            configured = registered.len(),
            "Exercise config registry loaded"
        );
        Self {
            configs: registered,
            default: Arc::new(ExerciseConfig::default_config()),
        }
    }

    /// Registry built from a JSON array of configs
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the document is not a JSON array of
    /// config records. Individual invalid records fall back to the default.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let configs: Vec<ExerciseConfig> = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(format!("exercise config document: {e}")))?;
        Ok(Self::from_configs(configs))
    }

    /// Copy of this registry with global threshold overrides applied
    ///
    /// The overrides reach the default config too, so unconfigured exercises
    /// pick them up. Configs whose thresholds become invalid are dropped and
    /// fall back to the default; a default that would become invalid keeps
    /// its own thresholds.
    #[must_use]
    pub fn with_threshold_overrides(&self, poor: Option<f64>, good: Option<f64>) -> Self {
        if poor.is_none() && good.is_none() {
            return self.clone();
        }
        let mut registry = Self::from_configs(
            self.configs
                .values()
                .map(|config| override_thresholds(config, poor, good)),
        );

        let default = override_thresholds(&self.default, poor, good);
        match default.validate() {
            Ok(()) => registry.default = Arc::new(default),
            Err(e) => warn!(
                error = %e,
                "Threshold overrides invalid for the default config, keeping its thresholds"
            ),
        }
        registry
    }

    /// Config for an exercise, or the default config
    #[must_use]
    pub fn get(&self, exercise: ExerciseType) -> Arc<ExerciseConfig> {
        self.configs.get(&exercise).map_or_else(
            || {
                warn!(
                    exercise.type = %exercise,
                    "No quality config for exercise, using default configuration"
                );
                Arc::clone(&self.default)
            },
            Arc::clone,
        )
    }

    /// Whether an exercise has its own config
    #[must_use]
    pub fn is_configured(&self, exercise: ExerciseType) -> bool {
        self.configs.contains_key(&exercise)
    }

    /// The fallback config
    #[must_use]
    pub fn default_config(&self) -> Arc<ExerciseConfig> {
        Arc::clone(&self.default)
    }
}

fn override_thresholds(
    config: &ExerciseConfig,
    poor: Option<f64>,
    good: Option<f64>,
) -> ExerciseConfig {
    let mut config = config.clone();
    if let Some(poor) = poor {
        config.thresholds.poor_threshold = poor;
    }
    if let Some(good) = good {
        config.thresholds.good_threshold = good;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_coach_core::errors::ErrorCode;

    #[test]
    fn test_builtin_configures_three_exercises() {
        let registry = ExerciseConfigRegistry::builtin();
        assert!(registry.is_configured(ExerciseType::BicepCurl));
        assert!(registry.is_configured(ExerciseType::Squat));
        assert!(registry.is_configured(ExerciseType::PushUp));
        assert!(!registry.is_configured(ExerciseType::Plank));
        assert_eq!(registry.get(ExerciseType::Plank).exercise_type, "default");
    }

    #[test]
    fn test_invalid_override_falls_back_to_default() {
        let registry = ExerciseConfigRegistry::builtin().with_threshold_overrides(Some(90.0), None);
        assert!(!registry.is_configured(ExerciseType::BicepCurl));
        assert!(registry.get(ExerciseType::BicepCurl).metric_weights.is_empty());
        assert!((registry.default_config().thresholds.poor_threshold - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overrides_reach_default_config() {
        let registry =
            ExerciseConfigRegistry::builtin().with_threshold_overrides(Some(50.0), Some(75.0));
        let plank = registry.get(ExerciseType::Plank);
        assert_eq!(plank.exercise_type, "default");
        assert!((plank.thresholds.poor_threshold - 50.0).abs() < f64::EPSILON);
        assert!((plank.thresholds.good_threshold - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_normalizes_names() {
        let registry = ExerciseConfigRegistry::from_json(
            r#"[{
                "exercise_type": "  SQUAT ",
                "thresholds": {"poor_threshold": 50.0, "good_threshold": 80.0},
                "metric_weights": [{"name": "depth_score", "weight": 1.0, "is_critical": true}],
                "feedback_templates": {"poor": ["p"], "average": ["a"], "excellent": ["e"]}
            }]"#,
        )
        .unwrap();
        let squat = registry.get(ExerciseType::Squat);
        assert_eq!(squat.exercise_type, "squat");
        assert!((squat.thresholds.poor_threshold - 50.0).abs() < f64::EPSILON);
        assert!(!registry.is_configured(ExerciseType::BicepCurl));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let error = ExerciseConfigRegistry::from_json("{not json").unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
    }
}
