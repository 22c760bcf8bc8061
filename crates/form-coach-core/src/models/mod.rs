// ABOUTME: Core data models shared by the analysis engine and its callers
// ABOUTME: Keypoints, exercise catalog, per-frame results, and session records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models
//!
//! Everything here is plain data: no decision logic and no interior state.

/// Per-frame results and quality verdicts
pub mod analysis;
/// Exercise identifiers, catalog entries, and movement stages
pub mod exercise;
/// Landmark points and the per-frame landmark map
pub mod keypoint;
/// Session status and the end-of-session summary
pub mod session;

pub use analysis::{AnalysisResult, FrameAnalysis, MetricScores, QualityAssessment, QualityCategory};
pub use exercise::{ExerciseInfo, ExerciseKind, ExerciseType, Stage};
pub use keypoint::{Keypoint, Keypoints};
pub use session::{SessionStatus, SessionSummary};
