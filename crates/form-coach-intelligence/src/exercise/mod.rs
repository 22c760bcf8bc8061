// ABOUTME: Exercise tracking module: movement rules and the per-session repetition state machine
// ABOUTME: Rules are fixed per exercise; the state machine owns all mutable tracking state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Per-exercise thresholds and form checks
pub mod rules;
/// Repetition state machine
pub mod state_machine;

pub use rules::{apply_form_checks, HoldRule, JointAngle, MovementRules, RepRule};
pub use state_machine::ExerciseStateMachine;
