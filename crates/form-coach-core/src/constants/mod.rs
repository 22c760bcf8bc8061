// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Landmark vocabulary, metric names, and scoring constants for form analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than collected in a single flat list.

/// Landmark names produced by the pose provider
///
/// Only the right side is tracked.
pub mod landmarks {
    /// Right shoulder
    pub const RIGHT_SHOULDER: &str = "right_shoulder";
    /// Right elbow
    pub const RIGHT_ELBOW: &str = "right_elbow";
    /// Right wrist
    pub const RIGHT_WRIST: &str = "right_wrist";
    /// Right hip
    pub const RIGHT_HIP: &str = "right_hip";
    /// Right knee
    pub const RIGHT_KNEE: &str = "right_knee";
    /// Right ankle
    pub const RIGHT_ANKLE: &str = "right_ankle";
}

/// Form metric names emitted by the metrics calculator
pub mod metric_names {
    /// Elbow range of motion (bicep curl, push-up)
    pub const ELBOW_ANGLE_SCORE: &str = "elbow_angle_score";
    /// Elbow drift away from the torso (bicep curl)
    pub const ELBOW_STABILITY_SCORE: &str = "elbow_stability_score";
    /// Squat depth from knee angle
    pub const DEPTH_SCORE: &str = "depth_score";
    /// Knee tracking over the ankle
    pub const KNEE_ALIGNMENT_SCORE: &str = "knee_alignment_score";
    /// Back rounding from hip angle
    pub const BACK_POSITION_SCORE: &str = "back_position_score";
    /// Shoulder-hip-ankle straightness (push-up)
    pub const BODY_ALIGNMENT_SCORE: &str = "body_alignment_score";
}

/// Scoring bounds and fallbacks
pub mod scoring {
    /// Lowest possible score
    pub const MIN_SCORE: f64 = 0.0;
    /// Highest possible score
    pub const MAX_SCORE: f64 = 100.0;
    /// Score substituted when a metric cannot be measured
    pub const NEUTRAL_SCORE: f64 = 50.0;
    /// Quality score reported when no pose was detected
    pub const NO_POSE_SCORE: f64 = 0.0;
    /// Multiplier applied to the weight of safety-relevant metrics
    pub const CRITICAL_WEIGHT_MULTIPLIER: f64 = 1.5;
    /// Default upper bound of the poor category
    pub const DEFAULT_POOR_THRESHOLD: f64 = 60.0;
    /// Default lower bound of the excellent category
    pub const DEFAULT_GOOD_THRESHOLD: f64 = 85.0;
    /// Allowed deviation of the metric weight sum from 1.0
    pub const WEIGHT_SUM_TOLERANCE: f64 = 0.05;
}

/// Rolling quality history and trend detection
pub mod history {
    /// Maximum number of quality scores retained per session
    pub const MAX_HISTORY_LEN: usize = 100;
    /// Minimum history length before a trend clause is considered
    ///
    /// Carried over unchanged from the first release; not tuned against data.
    pub const TREND_MIN_HISTORY: usize = 3;
    /// Point difference from the historical average that counts as a trend
    ///
    /// Carried over unchanged from the first release; not tuned against data.
    pub const TREND_DELTA_POINTS: f64 = 10.0;
}

/// Calorie accrual estimates
pub mod calories {
    /// Bicep curl, per rep
    pub const BICEP_CURL_PER_REP: f64 = 0.5;
    /// Squat, per rep
    pub const SQUAT_PER_REP: f64 = 1.0;
    /// Push-up, per rep
    pub const PUSH_UP_PER_REP: f64 = 0.5;
    /// Shoulder press, per rep
    pub const SHOULDER_PRESS_PER_REP: f64 = 0.6;
    /// Plank, per minute held
    pub const PLANK_PER_MINUTE: f64 = 3.0;
}

/// Rep tempo consistency checks
pub mod tempo {
    /// A rep slower than this multiple of the mean duration is flagged
    pub const SLOW_REP_FACTOR: f64 = 1.5;
    /// A rep faster than this multiple of the mean duration is flagged
    pub const FAST_REP_FACTOR: f64 = 0.5;
    /// Completed reps required before tempo is compared
    pub const MIN_REPS_FOR_TEMPO: usize = 2;
}

/// User-facing messages shared between crates
pub mod messages {
    /// Error reported when the keypoint map is empty
    pub const NO_PERSON_DETECTED: &str = "No person detected";
    /// Error reported for exercises without rules
    pub const EXERCISE_NOT_SUPPORTED: &str = "Exercise not supported";
    /// Warning reported when required landmarks are at the sentinel
    pub const LANDMARKS_NOT_VISIBLE: &str =
        "Some joints are out of view - step back so your whole body is visible";
    /// Coaching text for frames without a pose
    pub const NO_POSE_FEEDBACK: &str =
        "We can't see you - step into the frame to continue.";
    /// Fallback template when a category has none configured
    pub const GENERIC_FEEDBACK: &str = "Keep going!";
    /// Trend clause appended on a significant drop
    pub const TREND_SLIPPING: &str = " You're slipping a bit - refocus on form!";
    /// Trend clause appended on a significant rise
    pub const TREND_IMPROVING: &str = " You're improving - great progress!";
}
