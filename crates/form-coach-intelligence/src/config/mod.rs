// ABOUTME: Configuration module for form-coach-intelligence crate
// ABOUTME: Re-exports exercise quality configuration types and the config registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration validation errors
pub mod error;
/// Per-exercise thresholds, weights, and templates
pub mod exercise;
/// Validated, shared config lookup
pub mod registry;

pub use error::ConfigError;
pub use exercise::{
    ExerciseConfig, FeedbackTemplates, MetricWeight, ThresholdConfig, DEFAULT_CONFIG_NAME,
};
pub use registry::ExerciseConfigRegistry;
