// ABOUTME: Shared test utilities and keypoint fixtures for integration tests
// ABOUTME: Quiet tracing setup plus pose builders with exact joint angles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `form_coach`
//!
//! Pose builders place the tracked joint at a fixed vertex and swing the
//! distal segment so the measured angle equals the requested degrees.

use form_coach::models::{Keypoint, Keypoints};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests stay quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Point at `length` from `origin` in the direction `(dx, dy)`
fn offset(origin: Keypoint, dx: f64, dy: f64, length: f64) -> Keypoint {
    Keypoint::planar(length.mul_add(dx, origin.x), length.mul_add(dy, origin.y))
}

/// Right arm with the elbow bent to `degrees`, upper arm hanging vertically
///
/// The elbow sits directly below the shoulder, so elbow drift is zero.
pub fn arm_at(degrees: f64) -> Keypoints {
    let shoulder = Keypoint::planar(0.5, 0.3);
    let elbow = Keypoint::planar(0.5, 0.5);
    let radians = degrees.to_radians();
    Keypoints::new()
        .with("right_shoulder", shoulder)
        .with("right_elbow", elbow)
        .with("right_wrist", offset(elbow, radians.sin(), -radians.cos(), 0.2))
}

/// Right arm bent to `degrees` with the elbow `drift` to the side of the shoulder
pub fn arm_with_drift(degrees: f64, drift: f64) -> Keypoints {
    let shoulder = Keypoint::planar(0.5 - drift, 0.3);
    let elbow = Keypoint::planar(0.5, 0.5);
    let (upper_x, upper_y) = (shoulder.x - elbow.x, shoulder.y - elbow.y);
    let norm = upper_x.hypot(upper_y);
    let (ux, uy) = (upper_x / norm, upper_y / norm);
    // Rotate the upper-arm direction by `degrees` around the elbow
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (wx, wy) = (ux.mul_add(cos, -(uy * sin)), ux.mul_add(sin, uy * cos));
    Keypoints::new()
        .with("right_shoulder", shoulder)
        .with("right_elbow", elbow)
        .with("right_wrist", offset(elbow, wx, wy, 0.2))
}

/// Right leg with the knee bent to `knee_degrees`
///
/// The shin is vertical (knee over ankle) and the torso continues the thigh
/// line, so knee alignment and back position score perfectly.
pub fn squat_at(knee_degrees: f64) -> Keypoints {
    let knee = Keypoint::planar(0.5, 0.7);
    let ankle = Keypoint::planar(0.5, 0.9);
    let radians = knee_degrees.to_radians();
    let (dx, dy) = (-radians.sin(), radians.cos());
    let hip = offset(knee, dx, dy, 0.2);
    let shoulder = offset(hip, dx, dy, 0.3);
    Keypoints::new()
        .with("right_shoulder", shoulder)
        .with("right_hip", hip)
        .with("right_knee", knee)
        .with("right_ankle", ankle)
}

/// Horizontal body line with the hip bent to `body_degrees`
fn body_line(body_degrees: f64) -> (Keypoint, Keypoint, Keypoint) {
    let shoulder = Keypoint::planar(0.3, 0.5);
    let hip = Keypoint::planar(0.55, 0.5);
    let radians = body_degrees.to_radians();
    let ankle = offset(hip, -radians.cos(), radians.sin(), 0.25);
    (shoulder, hip, ankle)
}

/// Push-up pose with the elbow at `elbow_degrees` and the body at `body_degrees`
pub fn push_up_at(elbow_degrees: f64, body_degrees: f64) -> Keypoints {
    let (shoulder, hip, ankle) = body_line(body_degrees);
    let elbow = Keypoint::planar(shoulder.x, 0.65);
    let radians = elbow_degrees.to_radians();
    Keypoints::new()
        .with("right_shoulder", shoulder)
        .with("right_elbow", elbow)
        .with("right_wrist", offset(elbow, radians.sin(), -radians.cos(), 0.15))
        .with("right_hip", hip)
        .with("right_ankle", ankle)
}

/// Plank pose with the shoulder-hip-ankle angle at `body_degrees`
pub fn plank_at(body_degrees: f64) -> Keypoints {
    let (shoulder, hip, ankle) = body_line(body_degrees);
    Keypoints::new()
        .with("right_shoulder", shoulder)
        .with("right_hip", hip)
        .with("right_ankle", ankle)
}

/// Assert two floats agree to within `1e-6`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
