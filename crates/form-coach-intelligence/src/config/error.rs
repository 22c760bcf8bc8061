// ABOUTME: Configuration error types for exercise quality config validation
// ABOUTME: Defines error variants for invalid thresholds, weights, templates, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for exercise config validation.

use form_coach_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., threshold not between 0-100)
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Weights don't sum to the required total or lie outside [0, 1]
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// A feedback category has no templates
    #[error("Missing feedback templates: {0}")]
    MissingTemplates(String),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config_invalid(error.to_string())
    }
}
