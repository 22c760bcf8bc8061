// ABOUTME: Exercise quality configuration: thresholds, metric weights, and feedback templates
// ABOUTME: Built-in configs for curls, squats, and push-ups plus the generic default config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise Configuration
//!
//! Static records consumed by the quality evaluator. They are validated once
//! when the registry is built and never mutated afterwards.

use super::error::ConfigError;
use form_coach_core::constants::metric_names::{
    BACK_POSITION_SCORE, BODY_ALIGNMENT_SCORE, DEPTH_SCORE, ELBOW_ANGLE_SCORE,
    ELBOW_STABILITY_SCORE, KNEE_ALIGNMENT_SCORE,
};
use form_coach_core::constants::scoring::{
    DEFAULT_GOOD_THRESHOLD, DEFAULT_POOR_THRESHOLD, MAX_SCORE, MIN_SCORE, WEIGHT_SUM_TOLERANCE,
};
use form_coach_core::models::{ExerciseType, QualityCategory};
use serde::{Deserialize, Serialize};

/// Name used by the fallback configuration
pub const DEFAULT_CONFIG_NAME: &str = "default";

/// Score boundaries between quality categories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Scores below this are poor
    pub poor_threshold: f64,
    /// Scores at or above this are excellent
    pub good_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            poor_threshold: DEFAULT_POOR_THRESHOLD,
            good_threshold: DEFAULT_GOOD_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    /// Check both bounds lie in [0, 100] and `poor < good`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] when either check fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |value: f64| (MIN_SCORE..=MAX_SCORE).contains(&value);
        if !in_range(self.poor_threshold) || !in_range(self.good_threshold) {
            return Err(ConfigError::InvalidRange(format!(
                "thresholds must lie in [0, 100], got poor={} good={}",
                self.poor_threshold, self.good_threshold
            )));
        }
        if self.poor_threshold >= self.good_threshold {
            return Err(ConfigError::InvalidRange(format!(
                "poor_threshold ({}) must be less than good_threshold ({})",
                self.poor_threshold, self.good_threshold
            )));
        }
        Ok(())
    }

    /// Category of a score, using half-open intervals
    #[must_use]
    pub fn categorize(&self, score: f64) -> QualityCategory {
        if score < self.poor_threshold {
            QualityCategory::Poor
        } else if score < self.good_threshold {
            QualityCategory::Average
        } else {
            QualityCategory::Excellent
        }
    }
}

/// Weight of one form metric in the aggregate quality score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    /// Metric name as produced by the metrics calculator
    pub name: String,
    /// Relative weight in [0, 1]
    pub weight: f64,
    /// Safety-relevant metric, amplified in the aggregate and preferred for hints
    #[serde(default)]
    pub is_critical: bool,
}

impl MetricWeight {
    /// Create a weight entry
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64, is_critical: bool) -> Self {
        Self {
            name: name.into(),
            weight,
            is_critical,
        }
    }
}

/// Coaching sentences per quality category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTemplates {
    /// Templates for poor form
    pub poor: Vec<String>,
    /// Templates for average form
    pub average: Vec<String>,
    /// Templates for excellent form
    pub excellent: Vec<String>,
}

impl FeedbackTemplates {
    fn from_slices(poor: &[&str], average: &[&str], excellent: &[&str]) -> Self {
        let owned = |templates: &[&str]| templates.iter().map(|t| (*t).to_owned()).collect();
        Self {
            poor: owned(poor),
            average: owned(average),
            excellent: owned(excellent),
        }
    }

    /// Templates for a category (possibly empty)
    #[must_use]
    pub fn for_category(&self, category: QualityCategory) -> &[String] {
        match category {
            QualityCategory::Poor => &self.poor,
            QualityCategory::Average => &self.average,
            QualityCategory::Excellent => &self.excellent,
        }
    }
}

/// Complete quality configuration for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Exercise identifier, or `"default"` for the fallback
    pub exercise_type: String,
    /// Category boundaries
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Metric weights (empty for the fallback)
    #[serde(default)]
    pub metric_weights: Vec<MetricWeight>,
    /// Coaching sentences
    #[serde(default)]
    pub feedback_templates: FeedbackTemplates,
}

impl ExerciseConfig {
    /// Trim and lower-case the exercise identifier
    pub fn normalize(&mut self) {
        self.exercise_type = self.exercise_type.trim().to_lowercase();
    }

    /// Validate thresholds, templates, and weights
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;

        for category in [
            QualityCategory::Poor,
            QualityCategory::Average,
            QualityCategory::Excellent,
        ] {
            if self.feedback_templates.for_category(category).is_empty() {
                return Err(ConfigError::MissingTemplates(format!(
                    "'{category}' templates for {} are empty",
                    self.exercise_type
                )));
            }
        }

        if self.metric_weights.is_empty() {
            return Ok(());
        }

        if let Some(bad) = self
            .metric_weights
            .iter()
            .find(|metric| !(0.0..=1.0).contains(&metric.weight))
        {
            return Err(ConfigError::InvalidWeights(format!(
                "weight for {} must be between 0 and 1, got {}",
                bad.name, bad.weight
            )));
        }

        let total: f64 = self.metric_weights.iter().map(|metric| metric.weight).sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "metric weights for {} must sum to 1.0, got {total}",
                self.exercise_type
            )));
        }

        Ok(())
    }

    /// Configured weight entry for a metric
    #[must_use]
    pub fn weight_for(&self, metric: &str) -> Option<&MetricWeight> {
        self.metric_weights.iter().find(|entry| entry.name == metric)
    }

    /// Fallback used for unconfigured or invalid exercises
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            exercise_type: DEFAULT_CONFIG_NAME.to_owned(),
            thresholds: ThresholdConfig::default(),
            metric_weights: Vec::new(),
            feedback_templates: FeedbackTemplates::from_slices(
                &["Focus on your form!"],
                &["Good work! Keep improving!"],
                &["Perfect! Keep it up!"],
            ),
        }
    }

    /// Built-in config for an exercise, if one ships with the engine
    #[must_use]
    pub fn builtin(exercise: ExerciseType) -> Option<Self> {
        let (metric_weights, feedback_templates) = match exercise {
            ExerciseType::BicepCurl => (
                vec![
                    MetricWeight::new(ELBOW_ANGLE_SCORE, 0.5, true),
                    MetricWeight::new(ELBOW_STABILITY_SCORE, 0.5, true),
                ],
                FeedbackTemplates::from_slices(
                    &[
                        "Lock those elbows in! Keep them tight to your sides.",
                        "Slow down and control the movement. Quality over speed!",
                        "Extend your arms fully at the bottom - get that full range!",
                    ],
                    &[
                        "Good effort! Try keeping your elbows even closer to your body.",
                        "Nice work! Focus on that full extension at the bottom.",
                        "You're getting there! Maintain a steady, controlled tempo.",
                    ],
                    &[
                        "Perfect form! Keep it up!",
                        "Excellent control! That's how it's done!",
                        "Outstanding technique! You're crushing it!",
                    ],
                ),
            ),
            ExerciseType::Squat => (
                vec![
                    MetricWeight::new(DEPTH_SCORE, 0.33, false),
                    MetricWeight::new(KNEE_ALIGNMENT_SCORE, 0.33, true),
                    MetricWeight::new(BACK_POSITION_SCORE, 0.34, true),
                ],
                FeedbackTemplates::from_slices(
                    &[
                        "Go deeper! Aim to get your thighs parallel to the ground.",
                        "Keep your knees aligned with your feet - don't let them cave in!",
                        "Straighten that back! Engage your core for stability.",
                    ],
                    &[
                        "Good depth! Try going just a bit lower for maximum benefit.",
                        "Nice form! Keep focusing on that knee alignment.",
                        "Solid work! Remember to push through your heels.",
                    ],
                    &[
                        "Perfect squat! That's textbook form!",
                        "Incredible depth and control! Keep it going!",
                        "Flawless technique! You're a squat master!",
                    ],
                ),
            ),
            ExerciseType::PushUp => (
                vec![
                    MetricWeight::new(BODY_ALIGNMENT_SCORE, 0.5, true),
                    MetricWeight::new(ELBOW_ANGLE_SCORE, 0.5, false),
                ],
                FeedbackTemplates::from_slices(
                    &[
                        "Keep your body straight! Don't let those hips sag.",
                        "Lower yourself more - aim for a 90-degree elbow bend.",
                        "Engage your core! Your body should be a straight line.",
                    ],
                    &[
                        "Good form! Try to keep your body even straighter.",
                        "Nice work! Focus on that full range of motion.",
                        "You're doing well! Keep that core tight throughout.",
                    ],
                    &[
                        "Perfect push-up! Textbook form!",
                        "Excellent alignment and control! Keep it up!",
                        "Outstanding! That's how push-ups are done!",
                    ],
                ),
            ),
            ExerciseType::ShoulderPress | ExerciseType::Lunge | ExerciseType::Plank => {
                return None
            }
        };

        Some(Self {
            exercise_type: exercise.as_str().to_owned(),
            thresholds: ThresholdConfig::default(),
            metric_weights,
            feedback_templates,
        })
    }
}
