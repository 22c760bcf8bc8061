// ABOUTME: Planar joint geometry used by rep counting and form metrics
// ABOUTME: Angle at a vertex between two rays and Euclidean distance, both on x/y only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Joint geometry
//!
//! Depth (`z`) from monocular pose providers is noisy, so every measurement
//! here uses the x/y components only. Inputs are not checked for visibility;
//! callers filter out the missing sentinel before measuring.

use form_coach_core::models::Keypoint;

/// Rays shorter than this are treated as degenerate
const MIN_RAY_LENGTH: f64 = 1e-9;

/// Angle in degrees at vertex `b` between rays `b -> a` and `b -> c`
///
/// Returns `0.0` for degenerate input (coincident points or non-finite
/// coordinates) instead of failing.
#[must_use]
pub fn angle(a: Keypoint, b: Keypoint, c: Keypoint) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);

    let norm_ba = bax.hypot(bay);
    let norm_bc = bcx.hypot(bcy);
    if !(norm_ba.is_finite() && norm_bc.is_finite())
        || norm_ba < MIN_RAY_LENGTH
        || norm_bc < MIN_RAY_LENGTH
    {
        return 0.0;
    }

    let cosine = (bax.mul_add(bcx, bay * bcy) / (norm_ba * norm_bc)).clamp(-1.0, 1.0);
    let degrees = cosine.acos().to_degrees();
    if degrees.is_finite() {
        degrees
    } else {
        0.0
    }
}

/// Planar Euclidean distance between two points
#[must_use]
pub fn distance(p: Keypoint, q: Keypoint) -> f64 {
    (q.x - p.x).hypot(q.y - p.y)
}

/// Absolute horizontal offset between two points
#[must_use]
pub fn horizontal_offset(p: Keypoint, q: Keypoint) -> f64 {
    (p.x - q.x).abs()
}
