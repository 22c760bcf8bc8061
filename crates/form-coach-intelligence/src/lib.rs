// ABOUTME: Exercise analysis engine: joint geometry, form metrics, rep tracking, and quality scoring
// ABOUTME: Pure CPU-bound decision logic with no I/O, driven one frame at a time by the session layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Form Coach Intelligence
//!
//! Every entry point here is total over the keypoint and exercise space:
//! missing data degrades to neutral values and unsupported exercises report
//! their problem as data instead of failing.

/// Exercise quality configuration and the shared config registry
pub mod config;
/// Repetition state machine and per-exercise movement rules
pub mod exercise;
/// Per-exercise form metric bank
pub mod form_metrics;
/// Planar joint geometry
pub mod geometry;
/// Weighted quality scoring and coaching feedback
pub mod quality;

pub use config::{ConfigError, ExerciseConfig, ExerciseConfigRegistry, MetricWeight, ThresholdConfig};
pub use exercise::{ExerciseStateMachine, MovementRules};
pub use form_metrics::{FormMetrics, FormMetricsCalculator};
pub use quality::QualityEvaluator;
