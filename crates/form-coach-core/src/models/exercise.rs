// ABOUTME: Exercise catalog types: exercise identifiers, movement stages, and catalog entries
// ABOUTME: Parses caller-supplied exercise names into a closed enumeration selected once per session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercises known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Standing dumbbell curl, tracked on the right arm
    BicepCurl,
    /// Bodyweight or barbell squat, tracked on the right leg
    Squat,
    /// Push-up, tracked on the right side
    PushUp,
    /// Overhead press, tracked on the right arm
    ShoulderPress,
    /// Catalogued but without movement rules yet
    Lunge,
    /// Time-based front plank
    Plank,
}

impl ExerciseType {
    /// Every catalogued exercise in display order
    pub const ALL: [Self; 6] = [
        Self::BicepCurl,
        Self::Squat,
        Self::PushUp,
        Self::ShoulderPress,
        Self::Lunge,
        Self::Plank,
    ];

    /// Wire identifier (`bicep_curl`, `push_up`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BicepCurl => "bicep_curl",
            Self::Squat => "squat",
            Self::PushUp => "push_up",
            Self::ShoulderPress => "shoulder_press",
            Self::Lunge => "lunge",
            Self::Plank => "plank",
        }
    }

    /// Whether progress is measured in reps or in time held
    #[must_use]
    pub const fn kind(self) -> ExerciseKind {
        match self {
            Self::Plank => ExerciseKind::TimeBased,
            Self::BicepCurl | Self::Squat | Self::PushUp | Self::ShoulderPress | Self::Lunge => {
                ExerciseKind::RepBased
            }
        }
    }

    /// Catalog entry for the exercise listing
    #[must_use]
    pub const fn info(self) -> ExerciseInfo {
        let (name, muscle) = match self {
            Self::BicepCurl => ("Bicep Curls", "Biceps"),
            Self::Squat => ("Squats", "Quadriceps, Glutes"),
            Self::PushUp => ("Push-ups", "Chest, Triceps"),
            Self::ShoulderPress => ("Shoulder Press", "Shoulders, Triceps"),
            Self::Lunge => ("Lunges", "Quadriceps, Glutes"),
            Self::Plank => ("Plank", "Core, Abs"),
        };
        ExerciseInfo {
            id: self,
            name,
            muscle,
            kind: self.kind(),
        }
    }

    /// Full catalog
    #[must_use]
    pub fn catalog() -> Vec<ExerciseInfo> {
        Self::ALL.iter().map(|exercise| exercise.info()).collect()
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|exercise| exercise.as_str() == normalized)
            .ok_or_else(|| AppError::unknown_exercise(s))
    }
}

/// How an exercise measures progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Counted in repetitions
    RepBased,
    /// Measured in seconds held
    TimeBased,
}

/// Catalog entry returned by the exercise listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExerciseInfo {
    /// Exercise identifier
    pub id: ExerciseType,
    /// Display name
    pub name: &'static str,
    /// Primary muscles worked
    pub muscle: &'static str,
    /// Rep-based or time-based
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
}

/// Phase of the current repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// No movement observed yet
    #[default]
    Start,
    /// Concentric phase for curls and presses, standing phase for squats
    Up,
    /// Extended phase for curls and presses, bottom phase for squats
    Down,
    /// Static hold (plank)
    Hold,
}

impl Stage {
    /// Wire identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Up => "up",
            Self::Down => "down",
            Self::Hold => "hold",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
