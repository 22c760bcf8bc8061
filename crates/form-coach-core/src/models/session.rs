// ABOUTME: Session lifecycle records emitted for external persistence
// ABOUTME: Session status and the flat end-of-session summary written by storage collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::exercise::ExerciseType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Accepting frames
    #[default]
    Active,
    /// Ended by the caller
    Completed,
}

/// Flat end-of-session record suitable for append-only JSON storage
///
/// The engine only emits this record; it never reads one back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: Uuid,
    /// Owner, when the caller supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Exercise performed
    pub exercise_type: ExerciseType,
    /// When the session was created
    pub start_time: DateTime<Utc>,
    /// When the session was ended
    pub end_time: DateTime<Utc>,
    /// Completed repetitions (zero for time-based exercises)
    pub reps: u32,
    /// Wall-clock seconds between start and end
    pub duration_seconds: f64,
    /// Estimated calories burned
    pub calories: f64,
    /// Mean quality score over the retained history
    pub quality_score: Option<f64>,
    /// Final status, always `completed` for emitted summaries
    pub status: SessionStatus,
}
