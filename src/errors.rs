// ABOUTME: Error types for the form coach, re-exported from the core crate
// ABOUTME: Keeps `form_coach::errors` as the single import path for callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! [`AppError`] carries an [`ErrorCode`] and message. Frame analysis never
//! fails; errors only surface at the seams: exercise name parsing, unknown
//! session ids, config loading, and lock poisoning.

pub use form_coach_core::errors::{AppError, AppResult, ErrorCode};
pub use form_coach_intelligence::ConfigError;
