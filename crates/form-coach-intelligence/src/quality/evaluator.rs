// ABOUTME: Weighted quality scoring, category thresholds, rolling history, and coaching text
// ABOUTME: One evaluator per session; template choice draws from an injected random source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Quality Evaluator
//!
//! Turns a frame's form metrics into a single 0-100 score and a coaching
//! sentence. Critical metrics weigh 1.5x in the aggregate and take priority
//! when choosing a correction hint. The evaluator keeps the last
//! [`MAX_HISTORY_LEN`] scores of its session to detect trends.

use super::hints::correction_hint;
use crate::config::ExerciseConfig;
use crate::form_metrics::FormMetrics;
use form_coach_core::constants::history::{MAX_HISTORY_LEN, TREND_DELTA_POINTS, TREND_MIN_HISTORY};
use form_coach_core::constants::messages::{
    GENERIC_FEEDBACK, NO_POSE_FEEDBACK, TREND_IMPROVING, TREND_SLIPPING,
};
use form_coach_core::constants::scoring::{
    CRITICAL_WEIGHT_MULTIPLIER, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE, NO_POSE_SCORE,
};
use form_coach_core::models::{ExerciseType, MetricScores, QualityAssessment, QualityCategory};
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Clamp into the score range, mapping NaN to the neutral score
fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        NEUTRAL_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Per-session quality evaluator
pub struct QualityEvaluator {
    exercise: ExerciseType,
    config: Arc<ExerciseConfig>,
    history: VecDeque<f64>,
    rng: Box<dyn RngCore + Send>,
}

impl fmt::Debug for QualityEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QualityEvaluator")
            .field("exercise", &self.exercise)
            .field("config", &self.config.exercise_type)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl QualityEvaluator {
    /// Evaluator with an entropy-seeded template picker
    #[must_use]
    pub fn new(exercise: ExerciseType, config: Arc<ExerciseConfig>) -> Self {
        Self::with_rng(exercise, config, ChaCha8Rng::from_entropy())
    }

    /// Evaluator whose template choice is reproducible
    #[must_use]
    pub fn with_seed(exercise: ExerciseType, config: Arc<ExerciseConfig>, seed: u64) -> Self {
        Self::with_rng(exercise, config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Evaluator drawing templates from a caller-supplied source
    #[must_use]
    pub fn with_rng(
        exercise: ExerciseType,
        config: Arc<ExerciseConfig>,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        info!(
            exercise.type = %exercise,
            config = %config.exercise_type,
            "Initialized quality evaluator"
        );
        Self {
            exercise,
            config,
            history: VecDeque::with_capacity(MAX_HISTORY_LEN + 1),
            rng: Box::new(rng),
        }
    }

    /// Exercise being evaluated
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Active config (possibly the default fallback)
    #[must_use]
    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Weighted aggregate of the metric scores, always in [0, 100]
    #[must_use]
    pub fn calculate_quality_score(&self, metrics: &MetricScores) -> f64 {
        let weights = &self.config.metric_weights;
        if metrics.is_empty() && weights.is_empty() {
            return NEUTRAL_SCORE;
        }

        let (weighted_sum, total_weight) =
            weights
                .iter()
                .fold((0.0, 0.0), |(sum, total), metric_weight| {
                    let score =
                        clamp_score(metrics.get(&metric_weight.name).copied().unwrap_or(NEUTRAL_SCORE));
                    let multiplier = if metric_weight.is_critical {
                        CRITICAL_WEIGHT_MULTIPLIER
                    } else {
                        1.0
                    };
                    let effective = metric_weight.weight * multiplier;
                    (score.mul_add(effective, sum), total + effective)
                });

        let score = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else if metrics.is_empty() {
            NEUTRAL_SCORE
        } else {
            let count = metrics.len() as f64;
            metrics.values().sum::<f64>() / count
        };

        clamp_score(score)
    }

    /// Category of a score under the configured thresholds
    #[must_use]
    pub fn get_feedback_category(&self, score: f64) -> QualityCategory {
        self.config.thresholds.categorize(score)
    }

    /// Append a score, dropping the oldest beyond the window
    pub fn update_history(&mut self, score: f64) {
        self.history.push_back(score);
        while self.history.len() > MAX_HISTORY_LEN {
            self.history.pop_front();
        }
    }

    /// Mean of the retained history, `None` when empty
    #[must_use]
    pub fn historical_average(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let count = self.history.len() as f64;
        Some(self.history.iter().sum::<f64>() / count)
    }

    /// Retained scores, oldest first
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// Number of retained scores
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget every retained score
    pub fn reset_history(&mut self) {
        self.history.clear();
        info!(exercise.type = %self.exercise, "Reset quality history");
    }

    /// Coaching sentence for a scored frame
    ///
    /// The trend clause compares `score` against the history as it stands, so
    /// call this before [`Self::update_history`] for the same frame.
    pub fn generate_feedback_message(
        &mut self,
        score: f64,
        category: QualityCategory,
        metrics: &MetricScores,
    ) -> String {
        let mut message = self
            .config
            .feedback_templates
            .for_category(category)
            .choose(self.rng.as_mut())
            .map_or_else(|| GENERIC_FEEDBACK.to_owned(), Clone::clone);

        if category == QualityCategory::Poor && !metrics.is_empty() {
            if let Some(hint) = self.correction_for(metrics) {
                hint.clone_into(&mut message);
            }
        }

        if self.history.len() >= TREND_MIN_HISTORY {
            if let Some(average) = self.historical_average() {
                let delta = score - average;
                if delta < -TREND_DELTA_POINTS {
                    message.push_str(TREND_SLIPPING);
                } else if delta > TREND_DELTA_POINTS {
                    message.push_str(TREND_IMPROVING);
                }
            }
        }

        message
    }

    /// Full per-frame evaluation: score, category, feedback, then history
    pub fn evaluate(&mut self, metrics: &FormMetrics) -> QualityAssessment {
        let quality_score = self.calculate_quality_score(&metrics.scores);
        let quality_category = self.get_feedback_category(quality_score);
        let real_time_feedback =
            self.generate_feedback_message(quality_score, quality_category, &metrics.scores);
        self.update_history(quality_score);

        QualityAssessment {
            quality_score,
            quality_category,
            real_time_feedback,
            historical_average: self.historical_average(),
        }
    }

    /// Assessment for a frame without a detected person; history is untouched
    #[must_use]
    pub fn no_pose_assessment(&self) -> QualityAssessment {
        QualityAssessment {
            quality_score: NO_POSE_SCORE,
            quality_category: QualityCategory::Poor,
            real_time_feedback: NO_POSE_FEEDBACK.to_owned(),
            historical_average: self.historical_average(),
        }
    }

    /// Hint for the worst configured metric, critical metrics first
    fn correction_for(&self, metrics: &MetricScores) -> Option<&'static str> {
        let scored = || {
            self.config.metric_weights.iter().filter_map(|entry| {
                metrics
                    .get(&entry.name)
                    .map(|score| (entry.name.as_str(), *score, entry.is_critical))
            })
        };
        let worst = |critical: bool| {
            scored()
                .filter(|(_, _, is_critical)| *is_critical == critical)
                .min_by(|a, b| a.1.total_cmp(&b.1))
        };

        let (name, _, _) = worst(true).or_else(|| worst(false))?;
        correction_hint(self.exercise, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExerciseConfig, MetricWeight};

    fn evaluator_for(exercise: ExerciseType) -> QualityEvaluator {
        let config = ExerciseConfig::builtin(exercise).unwrap_or_else(ExerciseConfig::default_config);
        QualityEvaluator::with_seed(exercise, Arc::new(config), 7)
    }

    fn scores(pairs: &[(&str, f64)]) -> MetricScores {
        pairs
            .iter()
            .map(|(name, score)| ((*name).to_owned(), *score))
            .collect()
    }

    #[test]
    fn test_critical_amplification_cancels_for_equal_weights() {
        let evaluator = evaluator_for(ExerciseType::BicepCurl);
        let score = evaluator.calculate_quality_score(&scores(&[
            ("elbow_angle_score", 100.0),
            ("elbow_stability_score", 0.0),
        ]));
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_critical_metric_dominates() {
        let evaluator = evaluator_for(ExerciseType::PushUp);
        // body alignment is critical, elbow angle is not
        let score = evaluator.calculate_quality_score(&scores(&[
            ("body_alignment_score", 100.0),
            ("elbow_angle_score", 0.0),
        ]));
        assert!((score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_unweighted_mean_when_weights_zero() {
        let mut config = ExerciseConfig::default_config();
        config.metric_weights = vec![MetricWeight::new("elbow_angle_score", 0.0, false)];
        let evaluator = QualityEvaluator::with_seed(ExerciseType::BicepCurl, Arc::new(config), 1);
        let score = evaluator.calculate_quality_score(&scores(&[("a", 40.0), ("b", 80.0)]));
        assert!((score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_nan_metric_is_neutral() {
        let evaluator = evaluator_for(ExerciseType::BicepCurl);
        let score = evaluator.calculate_quality_score(&scores(&[
            ("elbow_angle_score", f64::NAN),
            ("elbow_stability_score", 50.0),
        ]));
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_critical_hint_preferred_over_worse_cosmetic_metric() {
        let mut evaluator = evaluator_for(ExerciseType::Squat);
        let message = evaluator.generate_feedback_message(
            30.0,
            QualityCategory::Poor,
            &scores(&[
                ("depth_score", 0.0),
                ("knee_alignment_score", 40.0),
                ("back_position_score", 55.0),
            ]),
        );
        assert_eq!(
            message,
            "Keep your knees aligned with your feet - don't let them cave in!"
        );
    }

    #[test]
    fn test_trend_needs_three_entries() {
        let mut evaluator = evaluator_for(ExerciseType::BicepCurl);
        evaluator.update_history(90.0);
        evaluator.update_history(90.0);
        let message =
            evaluator.generate_feedback_message(70.0, QualityCategory::Average, &MetricScores::new());
        assert!(!message.ends_with(TREND_SLIPPING));

        evaluator.update_history(90.0);
        let message =
            evaluator.generate_feedback_message(70.0, QualityCategory::Average, &MetricScores::new());
        assert!(message.ends_with(TREND_SLIPPING));
    }

    #[test]
    fn test_reset_history() {
        let mut evaluator = evaluator_for(ExerciseType::BicepCurl);
        evaluator.update_history(80.0);
        evaluator.reset_history();
        assert_eq!(evaluator.historical_average(), None);
    }
}
