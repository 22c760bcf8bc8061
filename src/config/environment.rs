// ABOUTME: Environment-based configuration for the form coach engine
// ABOUTME: Reads threshold overrides, an optional exercise config file, and the feedback seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration. No config file is required; a JSON
//! exercise config document can be pointed to when the built-ins need
//! replacing.

use form_coach_core::errors::{AppError, AppResult};
use form_coach_intelligence::ExerciseConfigRegistry;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Global override of every config's poor threshold
pub const POOR_THRESHOLD_VAR: &str = "FORM_COACH_POOR_THRESHOLD";
/// Global override of every config's good threshold
pub const GOOD_THRESHOLD_VAR: &str = "FORM_COACH_GOOD_THRESHOLD";
/// Path to a JSON array of exercise configs replacing the built-ins
pub const EXERCISE_CONFIG_VAR: &str = "FORM_COACH_EXERCISE_CONFIG";
/// Seed for feedback template selection
pub const FEEDBACK_SEED_VAR: &str = "FORM_COACH_FEEDBACK_SEED";

/// Engine configuration loaded from the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoachConfig {
    /// Override for the poor threshold of every exercise config
    pub poor_threshold: Option<f64>,
    /// Override for the good threshold of every exercise config
    pub good_threshold: Option<f64>,
    /// JSON exercise config document replacing the built-ins
    pub exercise_config_path: Option<PathBuf>,
    /// Seed for reproducible feedback templates
    pub feedback_seed: Option<u64>,
}

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self {
            poor_threshold: parse_env(POOR_THRESHOLD_VAR),
            good_threshold: parse_env(GOOD_THRESHOLD_VAR),
            exercise_config_path: env::var_os(EXERCISE_CONFIG_VAR).map(PathBuf::from),
            feedback_seed: parse_env(FEEDBACK_SEED_VAR),
        };
        info!(
            poor_threshold = ?config.poor_threshold,
            good_threshold = ?config.good_threshold,
            exercise_config = ?config.exercise_config_path,
            seeded = config.feedback_seed.is_some(),
            "Loaded form coach configuration from environment"
        );
        config
    }

    /// Build the exercise config registry this configuration describes
    ///
    /// Threshold overrides apply to every loaded config and to the default
    /// config used by unconfigured exercises. A config the overrides make
    /// invalid falls back to the default config.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the exercise config file cannot be
    /// read or is not a JSON array of configs
    pub fn build_registry(&self) -> AppResult<ExerciseConfigRegistry> {
        let base = match &self.exercise_config_path {
            Some(path) => {
                let document = fs::read_to_string(path).map_err(|e| {
                    AppError::config(format!(
                        "Failed to read exercise config {}",
                        path.display()
                    ))
                    .with_source(e)
                })?;
                ExerciseConfigRegistry::from_json(&document)?
            }
            None => ExerciseConfigRegistry::builtin(),
        };
        Ok(base.with_threshold_overrides(self.poor_threshold, self.good_threshold))
    }
}

/// Parse an environment variable, ignoring it when absent or malformed
fn parse_env<T: FromStr>(env_var: &str) -> Option<T> {
    let value = env::var(env_var).ok()?;
    value.trim().parse().map_or_else(
        |_| {
            warn!(variable = env_var, value = %value, "Ignoring unparseable environment value");
            None
        },
        Some,
    )
}
