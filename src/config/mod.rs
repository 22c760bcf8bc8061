// ABOUTME: Configuration management module for engine settings loaded at startup
// ABOUTME: Environment overrides layered on top of the built-in exercise configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the form coach
//!
//! - **Environment**: threshold overrides, config file path, and feedback seed
//! - **Exercise configs**: re-exported from `form-coach-intelligence`

/// Environment configuration
pub mod environment;

pub use environment::CoachConfig;
pub use form_coach_intelligence::config::{
    ConfigError, ExerciseConfig, ExerciseConfigRegistry, FeedbackTemplates, MetricWeight,
    ThresholdConfig,
};
