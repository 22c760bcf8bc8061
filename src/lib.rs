// ABOUTME: Main library entry point for the form coach exercise analysis engine
// ABOUTME: Session registry, environment configuration, and logging over the intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Form Coach
//!
//! Real-time exercise form analysis from per-frame body keypoints. A pose
//! provider supplies named landmarks for each video frame; the engine counts
//! repetitions, scores form, and produces trainer-style feedback.
//!
//! ## Architecture
//!
//! - **`form-coach-core`**: errors, constants, and plain data models
//! - **`form-coach-intelligence`**: angle math, form metrics, the repetition
//!   state machine, exercise configs, and the quality evaluator
//! - **Sessions**: one engine bundle per workout session behind a
//!   concurrency-safe registry
//! - **Config**: environment overrides layered over the built-in configs
//! - **Logging**: structured `tracing` output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use form_coach::config::CoachConfig;
//! use form_coach::errors::AppResult;
//! use form_coach::models::{ExerciseType, Keypoints};
//! use form_coach::sessions::SessionRegistry;
//! use std::sync::Arc;
//!
//! fn main() -> AppResult<()> {
//!     let config = CoachConfig::from_env();
//!     let registry = SessionRegistry::new(Arc::new(config.build_registry()?));
//!
//!     let session_id = registry.create_session(ExerciseType::BicepCurl, None)?;
//!     let frame = registry.analyze_frame(session_id, &Keypoints::new())?;
//!     println!("{}", frame.quality.real_time_feedback);
//!
//!     Ok(())
//! }
//! ```

/// Environment configuration and exercise config re-exports
pub mod config;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Workout sessions and the session registry
pub mod sessions;

/// Core data models (keypoints, exercises, analysis results, session records)
pub use form_coach_core::models;

/// Domain constants (landmark names, metric names, scoring)
pub use form_coach_core::constants;

pub use form_coach_intelligence::{
    ExerciseStateMachine, FormMetrics, FormMetricsCalculator, QualityEvaluator,
};
