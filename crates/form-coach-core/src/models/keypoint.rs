// ABOUTME: Body landmark types supplied by the pose provider for each frame
// ABOUTME: Keypoint coordinates, the all-zero missing sentinel, and the per-frame landmark map
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single named body landmark in normalized image coordinates
///
/// Accepts either the object form `{"x":..,"y":..,"z":..,"visibility":..}` or the
/// provider's compact `[x, y, z, visibility]` quadruple when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "KeypointRepr")]
pub struct Keypoint {
    /// Horizontal position, 0.0 at the left edge
    pub x: f64,
    /// Vertical position, 0.0 at the top edge
    pub y: f64,
    /// Depth relative to the hips (ignored by the angle math)
    pub z: f64,
    /// Detection confidence in [0, 1]
    pub visibility: f64,
}

impl Keypoint {
    /// Sentinel used for landmarks the provider did not report
    pub const MISSING: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        visibility: 0.0,
    };

    /// Create a keypoint from its four components
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }

    /// Planar keypoint with full visibility, mostly useful for fixtures
    #[must_use]
    pub const fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 1.0)
    }

    /// Whether this is the all-zero sentinel
    ///
    /// Sentinel points carry no geometric meaning and must never feed an angle.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        [self.x, self.y, self.z, self.visibility]
            .iter()
            .all(|component| component.abs() < f64::EPSILON)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeypointRepr {
    Quad([f64; 4]),
    Object {
        x: f64,
        y: f64,
        #[serde(default)]
        z: f64,
        #[serde(default)]
        visibility: f64,
    },
}

impl From<KeypointRepr> for Keypoint {
    fn from(repr: KeypointRepr) -> Self {
        match repr {
            KeypointRepr::Quad([x, y, z, visibility]) => Self::new(x, y, z, visibility),
            KeypointRepr::Object {
                x,
                y,
                z,
                visibility,
            } => Self::new(x, y, z, visibility),
        }
    }
}

/// Landmarks detected in one frame, keyed by landmark name
///
/// An empty map means no person was detected. Lookups of absent landmarks
/// yield [`Keypoint::MISSING`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keypoints(HashMap<String, Keypoint>);

impl Keypoints {
    /// Empty frame (no pose detected)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Landmark by name, or the missing sentinel
    #[must_use]
    pub fn get(&self, name: &str) -> Keypoint {
        self.0.get(name).copied().unwrap_or(Keypoint::MISSING)
    }

    /// Insert or replace a landmark
    pub fn insert(&mut self, name: impl Into<String>, keypoint: Keypoint) {
        self.0.insert(name.into(), keypoint);
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, keypoint: Keypoint) -> Self {
        self.insert(name, keypoint);
        self
    }

    /// Whether the provider detected no person at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any of the named landmarks is absent or at the sentinel
    #[must_use]
    pub fn any_missing(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.get(name).is_missing())
    }
}
