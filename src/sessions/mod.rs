// ABOUTME: Workout session management: per-session engine bundles and the shared session registry
// ABOUTME: One state machine and one quality evaluator per session, never shared across sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sessions
//!
//! The registry map is the only shared mutable state in the engine. Each
//! bundle behind it is owned by exactly one session.

/// Per-session engine state and frame pipeline
pub mod bundle;
/// Concurrent session map and lifecycle operations
pub mod registry;

pub use bundle::{SessionBundle, SessionInfo};
pub use registry::{EndedSession, SessionHandle, SessionRegistry};
