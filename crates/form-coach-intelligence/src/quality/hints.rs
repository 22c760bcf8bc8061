// ABOUTME: Exercise-specific corrective sentences keyed by the worst-scoring form metric
// ABOUTME: Used to replace the random template when form is poor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use form_coach_core::constants::metric_names::{
    BACK_POSITION_SCORE, BODY_ALIGNMENT_SCORE, DEPTH_SCORE, ELBOW_ANGLE_SCORE,
    ELBOW_STABILITY_SCORE, KNEE_ALIGNMENT_SCORE,
};
use form_coach_core::models::ExerciseType;

/// Corrective sentence for a metric, if one exists for the exercise
#[must_use]
pub fn correction_hint(exercise: ExerciseType, metric: &str) -> Option<&'static str> {
    let hint = match (exercise, metric) {
        (ExerciseType::BicepCurl, ELBOW_ANGLE_SCORE) => {
            "Extend your arms fully at the bottom - get that full range!"
        }
        (ExerciseType::BicepCurl, ELBOW_STABILITY_SCORE) => {
            "Lock those elbows in! Keep them tight to your sides."
        }
        (ExerciseType::Squat, DEPTH_SCORE) => {
            "Go deeper! Aim to get your thighs parallel to the ground."
        }
        (ExerciseType::Squat, KNEE_ALIGNMENT_SCORE) => {
            "Keep your knees aligned with your feet - don't let them cave in!"
        }
        (ExerciseType::Squat, BACK_POSITION_SCORE) => {
            "Straighten that back! Engage your core for stability."
        }
        (ExerciseType::PushUp, BODY_ALIGNMENT_SCORE) => {
            "Keep your body straight! Don't let those hips sag."
        }
        (ExerciseType::PushUp, ELBOW_ANGLE_SCORE) => {
            "Lower yourself more - aim for a 90-degree elbow bend."
        }
        _ => return None,
    };
    Some(hint)
}
