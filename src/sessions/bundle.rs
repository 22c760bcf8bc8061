// ABOUTME: One workout session's exclusively-owned engine state and per-frame pipeline
// ABOUTME: Bundles the state machine, metrics calculator, and quality evaluator with session metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use form_coach_core::models::{
    ExerciseType, FrameAnalysis, Keypoints, MetricScores, SessionStatus, SessionSummary,
};
use form_coach_intelligence::{ExerciseStateMachine, FormMetricsCalculator, QualityEvaluator};
use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

/// Lightweight view of a live session for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    /// Session identifier
    pub session_id: Uuid,
    /// Owner, when the caller supplied one
    pub user_id: Option<String>,
    /// Exercise performed
    pub exercise_type: ExerciseType,
    /// Completed repetitions so far
    pub rep_count: u32,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last frame or lookup
    pub last_activity: DateTime<Utc>,
    /// Lifecycle state
    pub status: SessionStatus,
}

/// Engine state owned by exactly one session
///
/// Nothing in here is shared with other sessions. The only shared input is
/// the read-only exercise config the evaluator was built with.
#[derive(Debug)]
pub struct SessionBundle {
    session_id: Uuid,
    user_id: Option<String>,
    exercise_type: ExerciseType,
    state_machine: ExerciseStateMachine,
    metrics: FormMetricsCalculator,
    evaluator: QualityEvaluator,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    status: SessionStatus,
}

impl SessionBundle {
    /// Assemble a fresh session around an evaluator
    #[must_use]
    pub fn new(
        session_id: Uuid,
        exercise_type: ExerciseType,
        user_id: Option<String>,
        evaluator: QualityEvaluator,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            user_id,
            exercise_type,
            state_machine: ExerciseStateMachine::new(exercise_type),
            metrics: FormMetricsCalculator::for_exercise(exercise_type),
            evaluator,
            created_at: now,
            last_activity: now,
            status: SessionStatus::Active,
        }
    }

    /// Session identifier
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Owner, when the caller supplied one
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Exercise performed
    #[must_use]
    pub const fn exercise_type(&self) -> ExerciseType {
        self.exercise_type
    }

    /// When the session was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last frame or lookup
    #[must_use]
    pub const fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Lifecycle state
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Repetition tracker
    #[must_use]
    pub const fn state_machine(&self) -> &ExerciseStateMachine {
        &self.state_machine
    }

    /// Mutable repetition tracker
    pub fn state_machine_mut(&mut self) -> &mut ExerciseStateMachine {
        &mut self.state_machine
    }

    /// Quality evaluator
    #[must_use]
    pub const fn evaluator(&self) -> &QualityEvaluator {
        &self.evaluator
    }

    /// Record activity now
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Run one frame through the engine using the current clock
    pub fn analyze_frame(&mut self, keypoints: &Keypoints) -> FrameAnalysis {
        self.analyze_frame_at(keypoints, Instant::now())
    }

    /// Run one frame observed at `now` through the engine
    ///
    /// Frames without a pose still produce a result: counters are unchanged,
    /// the quality score is zero, and the history is left alone.
    pub fn analyze_frame_at(&mut self, keypoints: &Keypoints, now: Instant) -> FrameAnalysis {
        self.touch();
        let analysis = self.state_machine.update_at(keypoints, now);

        if keypoints.is_empty() {
            return FrameAnalysis {
                session_id: self.session_id,
                analysis,
                quality: self.evaluator.no_pose_assessment(),
                form_metrics: MetricScores::new(),
                metrics_uncertain: false,
            };
        }

        let metrics = self.metrics.compute(keypoints);
        let quality = self.evaluator.evaluate(&metrics);
        FrameAnalysis {
            session_id: self.session_id,
            analysis,
            quality,
            form_metrics: metrics.scores,
            metrics_uncertain: metrics.uncertain,
        }
    }

    /// Zero the counters and restart the clock, keeping quality history
    pub fn reset(&mut self) {
        self.state_machine.reset();
        self.touch();
    }

    /// Mark the session completed and produce its terminal summary
    pub fn complete(&mut self) -> SessionSummary {
        self.status = SessionStatus::Completed;
        self.summary(Utc::now())
    }

    /// Summary as of `end_time`
    #[must_use]
    pub fn summary(&self, end_time: DateTime<Utc>) -> SessionSummary {
        let elapsed = end_time
            .signed_duration_since(self.created_at)
            .to_std()
            .unwrap_or_default();
        SessionSummary {
            session_id: self.session_id,
            user_id: self.user_id.clone(),
            exercise_type: self.exercise_type,
            start_time: self.created_at,
            end_time,
            reps: self.state_machine.rep_count(),
            duration_seconds: elapsed.as_secs_f64(),
            calories: self.state_machine.calories(),
            quality_score: self.evaluator.historical_average(),
            status: self.status,
        }
    }

    /// Listing snapshot
    #[must_use]
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.session_id,
            user_id: self.user_id.clone(),
            exercise_type: self.exercise_type,
            rep_count: self.state_machine.rep_count(),
            created_at: self.created_at,
            last_activity: self.last_activity,
            status: self.status,
        }
    }
}
