// ABOUTME: Quality evaluation module: weighted form scoring and coaching feedback
// ABOUTME: Re-exports the per-session evaluator and the correction hint table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Per-session scoring, history, and feedback
pub mod evaluator;
/// Corrective sentences per exercise and metric
pub mod hints;

pub use evaluator::QualityEvaluator;
pub use hints::correction_hint;
