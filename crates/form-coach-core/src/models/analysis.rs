// ABOUTME: Per-frame output types produced by the state machine and quality evaluator
// ABOUTME: Analysis results, quality categories, coaching assessments, and the combined frame record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::exercise::{ExerciseType, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Named 0-100 form sub-scores, ordered by name for stable output
pub type MetricScores = BTreeMap<String, f64>;

/// Repetition tracking output for a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Exercise the frame was analyzed as
    pub exercise_type: ExerciseType,
    /// Measured joint angles in degrees, keyed by joint
    pub angles: BTreeMap<String, f64>,
    /// Completed repetitions so far
    pub rep_count: u32,
    /// Current set (set detection is not implemented, always 1)
    pub set_count: u32,
    /// Current movement stage
    pub stage: Stage,
    /// Estimated calories burned so far
    pub calories: f64,
    /// Positive or informational messages
    pub feedback: Vec<String>,
    /// Form issues worth correcting
    pub warnings: Vec<String>,
    /// Form faults and unrecoverable frame problems
    pub errors: Vec<String>,
    /// Seconds held, for time-based exercises only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl AnalysisResult {
    /// Empty result carrying the current counters
    #[must_use]
    pub const fn new(exercise_type: ExerciseType, rep_count: u32, stage: Stage, calories: f64) -> Self {
        Self {
            exercise_type,
            angles: BTreeMap::new(),
            rep_count,
            set_count: 1,
            stage,
            calories,
            feedback: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            duration: None,
        }
    }

    /// Whether the frame produced any hard error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Coarse classification of a quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityCategory {
    /// Below the poor threshold
    Poor,
    /// Between the poor and good thresholds
    Average,
    /// At or above the good threshold
    Excellent,
}

impl QualityCategory {
    /// Wire identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Average => "average",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality verdict and coaching text for a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Aggregated form score in [0, 100]
    pub quality_score: f64,
    /// Category of `quality_score`
    pub quality_category: QualityCategory,
    /// Trainer-style feedback sentence
    pub real_time_feedback: String,
    /// Mean of the retained history, `None` before the first scored frame
    pub historical_average: Option<f64>,
}

/// Everything the transport layer renders for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Session the frame belongs to
    pub session_id: Uuid,
    /// Repetition tracking output
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    /// Quality verdict
    #[serde(flatten)]
    pub quality: QualityAssessment,
    /// Form sub-scores behind the verdict
    pub form_metrics: MetricScores,
    /// True when sub-scores fell back to neutral because landmarks were missing
    pub metrics_uncertain: bool,
}
