// ABOUTME: Core types and constants for the form coach exercise analysis engine
// ABOUTME: Foundation crate with error handling, keypoint models, and domain constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Form Coach Core
//!
//! Foundation crate providing shared types and constants for the form coach
//! analysis engine. It holds no decision logic; the repetition state machine,
//! form metrics, and quality evaluator live in `form-coach-intelligence`.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Landmark names, metric names, and scoring constants
//! - **models**: Keypoints, exercise types, stages, and per-frame results

/// Unified error handling system with standard error codes
pub mod errors;

/// Domain constants organized by concern
pub mod constants;

/// Core data models (keypoints, exercises, analysis results, session records)
pub mod models;
