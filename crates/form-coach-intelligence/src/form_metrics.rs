// ABOUTME: Per-exercise form metric bank turning keypoints into named 0-100 sub-scores
// ABOUTME: Degrades to neutral scores on missing landmarks and to an empty map on no pose
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Form Metrics
//!
//! Each exercise defines its own metrics and scoring curves. The calculator never
//! fails:
//!
//! - an empty keypoint map (no pose) yields an empty metric map
//! - an exercise without a metric profile yields an empty metric map
//! - any required landmark at the missing sentinel yields the exercise's metric
//!   names at the neutral score, flagged as `uncertain`

use crate::geometry::{angle, horizontal_offset};
use form_coach_core::constants::landmarks::{
    RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use form_coach_core::constants::metric_names::{
    BACK_POSITION_SCORE, BODY_ALIGNMENT_SCORE, DEPTH_SCORE, ELBOW_ANGLE_SCORE,
    ELBOW_STABILITY_SCORE, KNEE_ALIGNMENT_SCORE,
};
use form_coach_core::constants::scoring::NEUTRAL_SCORE;
use form_coach_core::models::{ExerciseType, Keypoints, MetricScores};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Metric scores computed for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormMetrics {
    /// Metric name to score in [0, 100]
    pub scores: MetricScores,
    /// Scores are neutral placeholders because landmarks were missing
    pub uncertain: bool,
}

impl FormMetrics {
    /// Score for a metric, if computed
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }

    /// Whether no metric was computed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn measured(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores
                .iter()
                .map(|(name, score)| ((*name).to_owned(), *score))
                .collect(),
            uncertain: false,
        }
    }

    fn neutral(names: &[&str]) -> Self {
        Self {
            scores: names
                .iter()
                .map(|name| ((*name).to_owned(), NEUTRAL_SCORE))
                .collect(),
            uncertain: true,
        }
    }
}

/// Which metric bank applies to an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetricProfile {
    BicepCurl,
    Squat,
    PushUp,
    Unmeasured,
}

impl MetricProfile {
    const fn for_exercise(exercise: ExerciseType) -> Self {
        match exercise {
            ExerciseType::BicepCurl => Self::BicepCurl,
            ExerciseType::Squat => Self::Squat,
            ExerciseType::PushUp => Self::PushUp,
            ExerciseType::ShoulderPress | ExerciseType::Lunge | ExerciseType::Plank => {
                Self::Unmeasured
            }
        }
    }
}

/// Computes form metrics for one exercise, selected once per session
#[derive(Debug, Clone, Copy)]
pub struct FormMetricsCalculator {
    exercise: ExerciseType,
    profile: MetricProfile,
}

impl FormMetricsCalculator {
    /// Create the calculator for an exercise
    #[must_use]
    pub const fn for_exercise(exercise: ExerciseType) -> Self {
        Self {
            exercise,
            profile: MetricProfile::for_exercise(exercise),
        }
    }

    /// Exercise this calculator scores
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Whether this exercise has any metrics at all
    #[must_use]
    pub fn has_metrics(&self) -> bool {
        self.profile != MetricProfile::Unmeasured
    }

    /// One-shot computation without keeping a calculator around
    #[must_use]
    pub fn compute_for(exercise: ExerciseType, keypoints: &Keypoints) -> FormMetrics {
        Self::for_exercise(exercise).compute(keypoints)
    }

    /// Compute every metric for a frame
    #[must_use]
    pub fn compute(&self, keypoints: &Keypoints) -> FormMetrics {
        if keypoints.is_empty() {
            warn!(
                exercise.type = %self.exercise,
                "No key points provided, returning empty metrics"
            );
            return FormMetrics::default();
        }

        match self.profile {
            MetricProfile::BicepCurl => self.bicep_curl(keypoints),
            MetricProfile::Squat => self.squat(keypoints),
            MetricProfile::PushUp => self.push_up(keypoints),
            MetricProfile::Unmeasured => FormMetrics::default(),
        }
    }

    fn bicep_curl(&self, keypoints: &Keypoints) -> FormMetrics {
        const REQUIRED: [&str; 3] = [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST];
        if keypoints.any_missing(&REQUIRED) {
            self.log_missing();
            return FormMetrics::neutral(&[ELBOW_ANGLE_SCORE, ELBOW_STABILITY_SCORE]);
        }

        let shoulder = keypoints.get(RIGHT_SHOULDER);
        let elbow = keypoints.get(RIGHT_ELBOW);
        let wrist = keypoints.get(RIGHT_WRIST);

        FormMetrics::measured(&[
            (
                ELBOW_ANGLE_SCORE,
                curl_elbow_angle_score(angle(shoulder, elbow, wrist)),
            ),
            (
                ELBOW_STABILITY_SCORE,
                elbow_stability_score(horizontal_offset(elbow, shoulder)),
            ),
        ])
    }

    fn squat(&self, keypoints: &Keypoints) -> FormMetrics {
        const REQUIRED: [&str; 4] = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE, RIGHT_SHOULDER];
        if keypoints.any_missing(&REQUIRED) {
            self.log_missing();
            return FormMetrics::neutral(&[
                DEPTH_SCORE,
                KNEE_ALIGNMENT_SCORE,
                BACK_POSITION_SCORE,
            ]);
        }

        let hip = keypoints.get(RIGHT_HIP);
        let knee = keypoints.get(RIGHT_KNEE);
        let ankle = keypoints.get(RIGHT_ANKLE);
        let shoulder = keypoints.get(RIGHT_SHOULDER);

        FormMetrics::measured(&[
            (DEPTH_SCORE, squat_depth_score(angle(hip, knee, ankle))),
            (
                KNEE_ALIGNMENT_SCORE,
                knee_alignment_score(horizontal_offset(knee, ankle)),
            ),
            (
                BACK_POSITION_SCORE,
                back_position_score(angle(shoulder, hip, knee)),
            ),
        ])
    }

    fn push_up(&self, keypoints: &Keypoints) -> FormMetrics {
        const REQUIRED: [&str; 5] = [
            RIGHT_SHOULDER,
            RIGHT_ELBOW,
            RIGHT_WRIST,
            RIGHT_HIP,
            RIGHT_ANKLE,
        ];
        if keypoints.any_missing(&REQUIRED) {
            self.log_missing();
            return FormMetrics::neutral(&[BODY_ALIGNMENT_SCORE, ELBOW_ANGLE_SCORE]);
        }

        let shoulder = keypoints.get(RIGHT_SHOULDER);
        let elbow = keypoints.get(RIGHT_ELBOW);
        let wrist = keypoints.get(RIGHT_WRIST);
        let hip = keypoints.get(RIGHT_HIP);
        let ankle = keypoints.get(RIGHT_ANKLE);

        FormMetrics::measured(&[
            (
                BODY_ALIGNMENT_SCORE,
                body_alignment_score(angle(shoulder, hip, ankle)),
            ),
            (
                ELBOW_ANGLE_SCORE,
                push_up_elbow_angle_score(angle(shoulder, elbow, wrist)),
            ),
        ])
    }

    fn log_missing(&self) {
        warn!(
            exercise.type = %self.exercise,
            "Missing key points for form metrics, using neutral scores"
        );
    }
}

/// Bicep curl range of motion: full flexion below 80 degrees, full extension above 170
#[must_use]
pub fn curl_elbow_angle_score(elbow_angle: f64) -> f64 {
    if elbow_angle < 80.0 {
        2.0f64.mul_add(-(80.0 - elbow_angle), 100.0).max(0.0)
    } else if elbow_angle > 170.0 {
        100.0
    } else if elbow_angle > 160.0 {
        2.0f64.mul_add(elbow_angle - 160.0, 80.0)
    } else {
        60.0
    }
}

/// Elbow drift from the shoulder line, in normalized image units
#[must_use]
pub fn elbow_stability_score(drift: f64) -> f64 {
    if drift <= 0.08 {
        100.0
    } else if drift <= 0.12 {
        100.0 - ((drift - 0.08) / 0.04) * 30.0
    } else {
        200.0f64.mul_add(-(drift - 0.12), 70.0).max(0.0)
    }
}

/// Squat depth from the knee angle: 90 degrees or deeper is full marks
#[must_use]
pub fn squat_depth_score(knee_angle: f64) -> f64 {
    if knee_angle <= 90.0 {
        100.0
    } else if knee_angle <= 110.0 {
        100.0 - ((knee_angle - 90.0) / 20.0) * 40.0
    } else if knee_angle <= 140.0 {
        60.0 - ((knee_angle - 110.0) / 30.0) * 40.0
    } else {
        (20.0 - (knee_angle - 140.0)).max(0.0)
    }
}

/// Knee travel past the ankle, in normalized image units
#[must_use]
pub fn knee_alignment_score(offset: f64) -> f64 {
    if offset <= 0.05 {
        100.0
    } else if offset <= 0.10 {
        100.0 - ((offset - 0.05) / 0.05) * 20.0
    } else {
        300.0f64.mul_add(-(offset - 0.10), 80.0).max(0.0)
    }
}

/// Back rounding from the shoulder-hip-knee angle
#[must_use]
pub fn back_position_score(hip_angle: f64) -> f64 {
    if hip_angle >= 150.0 {
        100.0
    } else if hip_angle >= 130.0 {
        100.0 - ((150.0 - hip_angle) / 20.0) * 30.0
    } else {
        2.0f64.mul_add(-(130.0 - hip_angle), 70.0).max(0.0)
    }
}

/// Push-up straight-body band of 160-180 degrees at the hip
#[must_use]
pub fn body_alignment_score(body_angle: f64) -> f64 {
    if (160.0..=180.0).contains(&body_angle) {
        100.0
    } else if body_angle >= 150.0 {
        100.0 - ((160.0 - body_angle) / 10.0) * 20.0
    } else if body_angle >= 140.0 {
        80.0 - ((150.0 - body_angle) / 10.0) * 30.0
    } else {
        (50.0 - (140.0 - body_angle)).max(0.0)
    }
}

/// Push-up elbow angle: rewards both the ~90 degree bottom and the locked-out top
#[must_use]
pub fn push_up_elbow_angle_score(elbow_angle: f64) -> f64 {
    if (80.0..=100.0).contains(&elbow_angle) || elbow_angle >= 170.0 {
        100.0
    } else if elbow_angle >= 160.0 {
        2.0f64.mul_add(elbow_angle - 160.0, 80.0)
    } else if elbow_angle <= 110.0 {
        80.0
    } else {
        60.0
    }
}
