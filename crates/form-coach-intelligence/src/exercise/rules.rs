// ABOUTME: Per-exercise movement rules: hysteresis thresholds, calorie rates, and form checks
// ABOUTME: Closed variant over exercises, selected once when a state machine is created
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::geometry::{angle, horizontal_offset};
use form_coach_core::constants::calories::{
    BICEP_CURL_PER_REP, PLANK_PER_MINUTE, PUSH_UP_PER_REP, SHOULDER_PRESS_PER_REP, SQUAT_PER_REP,
};
use form_coach_core::constants::landmarks::{
    RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use form_coach_core::models::{AnalysisResult, ExerciseType, Keypoints, Stage};

/// Joint angle measured from three landmarks, vertex in the middle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointAngle {
    /// Key reported in `AnalysisResult::angles`
    pub name: &'static str,
    /// Landmarks `[a, vertex, c]`
    pub landmarks: [&'static str; 3],
}

impl JointAngle {
    const ELBOW: Self = Self {
        name: "elbow",
        landmarks: [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
    };
    const KNEE: Self = Self {
        name: "knee",
        landmarks: [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
    };
    const HIP: Self = Self {
        name: "hip",
        landmarks: [RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE],
    };
    const BODY: Self = Self {
        name: "body",
        landmarks: [RIGHT_SHOULDER, RIGHT_HIP, RIGHT_ANKLE],
    };

    /// Measure this joint in a frame
    #[must_use]
    pub fn measure(&self, keypoints: &Keypoints) -> f64 {
        let [a, vertex, c] = self.landmarks;
        angle(keypoints.get(a), keypoints.get(vertex), keypoints.get(c))
    }
}

/// Repetition rule with two thresholds forming a hysteresis band
///
/// A rep opens when the angle drops below `flexed_below` and closes when it
/// rises above `extended_above`. The rep is counted on the closing transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepRule {
    /// Joint driving the stage transitions
    pub joint: JointAngle,
    /// Angle below which the joint counts as flexed
    pub flexed_below: f64,
    /// Angle above which the joint counts as extended
    pub extended_above: f64,
    /// Stage entered on flexion (opens a rep)
    pub flexed_stage: Stage,
    /// Stage entered on extension (closes a rep)
    pub extended_stage: Stage,
    /// Calories credited per completed rep
    pub calories_per_rep: f64,
    /// Word used in the completion message
    pub rep_label: &'static str,
}

/// Static hold rule, progress measured in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldRule {
    /// Joint reported while holding
    pub joint: JointAngle,
    /// Calories credited per minute held
    pub calories_per_minute: f64,
}

/// Movement rules for one exercise
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementRules {
    /// Counted in reps
    Repetition(RepRule),
    /// Counted in seconds held
    Hold(HoldRule),
    /// No rules implemented for this exercise
    Unsupported,
}

impl MovementRules {
    /// Rules for an exercise
    #[must_use]
    pub const fn for_exercise(exercise: ExerciseType) -> Self {
        match exercise {
            ExerciseType::BicepCurl => Self::Repetition(RepRule {
                joint: JointAngle::ELBOW,
                flexed_below: 80.0,
                extended_above: 160.0,
                flexed_stage: Stage::Up,
                extended_stage: Stage::Down,
                calories_per_rep: BICEP_CURL_PER_REP,
                rep_label: "Rep",
            }),
            ExerciseType::Squat => Self::Repetition(RepRule {
                joint: JointAngle::KNEE,
                flexed_below: 150.0,
                extended_above: 160.0,
                flexed_stage: Stage::Down,
                extended_stage: Stage::Up,
                calories_per_rep: SQUAT_PER_REP,
                rep_label: "Squat",
            }),
            ExerciseType::PushUp => Self::Repetition(RepRule {
                joint: JointAngle::ELBOW,
                flexed_below: 90.0,
                extended_above: 160.0,
                flexed_stage: Stage::Down,
                extended_stage: Stage::Up,
                calories_per_rep: PUSH_UP_PER_REP,
                rep_label: "Push-up",
            }),
            ExerciseType::ShoulderPress => Self::Repetition(RepRule {
                joint: JointAngle::ELBOW,
                flexed_below: 100.0,
                extended_above: 160.0,
                flexed_stage: Stage::Up,
                extended_stage: Stage::Down,
                calories_per_rep: SHOULDER_PRESS_PER_REP,
                rep_label: "Shoulder Press",
            }),
            ExerciseType::Plank => Self::Hold(HoldRule {
                joint: JointAngle::BODY,
                calories_per_minute: PLANK_PER_MINUTE,
            }),
            ExerciseType::Lunge => Self::Unsupported,
        }
    }

    /// Landmarks that must be present for a frame to move the state machine
    #[must_use]
    pub const fn required_landmarks(exercise: ExerciseType) -> &'static [&'static str] {
        match exercise {
            ExerciseType::BicepCurl | ExerciseType::ShoulderPress => {
                &[RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST]
            }
            ExerciseType::Squat => &[RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
            ExerciseType::PushUp => &[
                RIGHT_SHOULDER,
                RIGHT_ELBOW,
                RIGHT_WRIST,
                RIGHT_HIP,
                RIGHT_ANKLE,
            ],
            ExerciseType::Plank => &[RIGHT_SHOULDER, RIGHT_HIP, RIGHT_ANKLE],
            ExerciseType::Lunge => &[],
        }
    }
}

/// Geometric guards evaluated every frame
///
/// They append to `feedback`, `warnings`, and `errors` and may record extra
/// angles, but never touch stage or counters.
pub fn apply_form_checks(
    exercise: ExerciseType,
    keypoints: &Keypoints,
    primary_angle: f64,
    result: &mut AnalysisResult,
) {
    match exercise {
        ExerciseType::BicepCurl => check_bicep_curl(keypoints, primary_angle, result),
        ExerciseType::Squat => check_squat(keypoints, primary_angle, result),
        ExerciseType::PushUp => check_push_up(keypoints, result),
        ExerciseType::ShoulderPress => check_shoulder_press(keypoints, primary_angle, result),
        ExerciseType::Plank => check_plank(keypoints, primary_angle, result),
        ExerciseType::Lunge => {}
    }
}

fn check_bicep_curl(keypoints: &Keypoints, elbow_angle: f64, result: &mut AnalysisResult) {
    let drift = horizontal_offset(keypoints.get(RIGHT_ELBOW), keypoints.get(RIGHT_SHOULDER));
    if drift > 0.12 {
        result.errors.push("Keep elbows tight to your body".to_owned());
    } else if drift > 0.08 {
        result.warnings.push("Elbows starting to drift out".to_owned());
    }

    // `result.stage` is the stage after this frame's transition
    if elbow_angle > 170.0 && result.stage != Stage::Start {
        result
            .warnings
            .push("Fully extend arms for maximum range".to_owned());
    }
}

fn check_squat(keypoints: &Keypoints, knee_angle: f64, result: &mut AnalysisResult) {
    let hip_angle = JointAngle::HIP.measure(keypoints);
    result.angles.insert(JointAngle::HIP.name.to_owned(), hip_angle);

    if knee_angle < 90.0 {
        result.feedback.push("Great depth!".to_owned());
    } else if knee_angle < 110.0 {
        result.warnings.push("Go deeper for better results".to_owned());
    } else {
        result.errors.push("Not deep enough - aim for 90°".to_owned());
    }

    if horizontal_offset(keypoints.get(RIGHT_KNEE), keypoints.get(RIGHT_ANKLE)) > 0.1 {
        result.errors.push("Keep knees aligned with ankles".to_owned());
    }

    if hip_angle < 150.0 {
        result.errors.push("Keep your back straight".to_owned());
    }
}

fn check_push_up(keypoints: &Keypoints, result: &mut AnalysisResult) {
    let body_angle = JointAngle::BODY.measure(keypoints);
    result
        .angles
        .insert(JointAngle::BODY.name.to_owned(), body_angle);

    if body_angle < 160.0 {
        result
            .errors
            .push("Keep your body straight - don't let your hips sag".to_owned());
    }
}

fn check_shoulder_press(keypoints: &Keypoints, elbow_angle: f64, result: &mut AnalysisResult) {
    if elbow_angle < 90.0 {
        result
            .feedback
            .push("Good depth - keep elbows at 90°".to_owned());
    }
    if horizontal_offset(keypoints.get(RIGHT_ELBOW), keypoints.get(RIGHT_SHOULDER)) > 0.15 {
        result
            .errors
            .push("Keep elbows in front of shoulders".to_owned());
    }
}

fn check_plank(keypoints: &Keypoints, body_angle: f64, result: &mut AnalysisResult) {
    if body_angle < 160.0 {
        result
            .errors
            .push("Keep your body straight - don't sag".to_owned());
    } else if body_angle > 175.0 {
        result.warnings.push("Don't raise hips too high".to_owned());
    } else {
        let held = result.duration.unwrap_or_default();
        result
            .feedback
            .push(format!("Perfect plank form! {held:.0}s"));
    }

    // Image y grows downwards
    if keypoints.get(RIGHT_HIP).y > keypoints.get(RIGHT_SHOULDER).y + 0.1 {
        result.errors.push("Hips are too low - engage core".to_owned());
    }
}
