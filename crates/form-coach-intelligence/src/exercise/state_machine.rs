// ABOUTME: Per-session repetition state machine turning a keypoint stream into reps, stage, and calories
// ABOUTME: Hysteresis transitions for rep exercises, wall-clock accrual for holds, tempo tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::rules::{apply_form_checks, HoldRule, MovementRules, RepRule};
use form_coach_core::constants::messages::{
    EXERCISE_NOT_SUPPORTED, LANDMARKS_NOT_VISIBLE, NO_PERSON_DETECTED,
};
use form_coach_core::constants::tempo::{FAST_REP_FACTOR, MIN_REPS_FOR_TEMPO, SLOW_REP_FACTOR};
use form_coach_core::models::{AnalysisResult, ExerciseType, Keypoints, Stage};
use std::time::{Duration, Instant};
use tracing::debug;

/// Tracks stage, rep count, and calories for one exercise session
///
/// The machine only ever moves forward: reps and calories never decrease
/// except through [`ExerciseStateMachine::reset`]. Frames without a pose,
/// frames with missing landmarks, and unsupported exercises leave every
/// counter unchanged and report the problem in the result instead.
#[derive(Debug, Clone)]
pub struct ExerciseStateMachine {
    exercise: ExerciseType,
    rules: MovementRules,
    stage: Stage,
    rep_count: u32,
    calories: f64,
    started_at: Instant,
    rep_started_at: Option<Instant>,
    rep_durations: Vec<f64>,
}

impl ExerciseStateMachine {
    /// Create a machine for an exercise, starting its clock now
    #[must_use]
    pub fn new(exercise: ExerciseType) -> Self {
        Self::started_at(exercise, Instant::now())
    }

    /// Create a machine with an explicit start instant
    #[must_use]
    pub fn started_at(exercise: ExerciseType, started_at: Instant) -> Self {
        Self {
            exercise,
            rules: MovementRules::for_exercise(exercise),
            stage: Stage::Start,
            rep_count: 0,
            calories: 0.0,
            started_at,
            rep_started_at: None,
            rep_durations: Vec::new(),
        }
    }

    /// Exercise this machine tracks
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Current stage
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Completed reps
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Calories accrued so far
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.calories
    }

    /// Whether the exercise has movement rules
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self.rules, MovementRules::Unsupported)
    }

    /// Durations of completed reps in seconds, oldest first
    #[must_use]
    pub fn rep_durations(&self) -> &[f64] {
        &self.rep_durations
    }

    /// Seconds since the machine started or was last reset
    #[must_use]
    pub fn elapsed_seconds(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64()
    }

    /// Counters as they stand, without consuming a frame
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> AnalysisResult {
        let mut result = self.blank_result();
        if matches!(self.rules, MovementRules::Hold(_)) {
            result.duration = Some(self.elapsed_seconds(now));
        }
        result
    }

    /// Consume one frame using the current wall clock
    pub fn update(&mut self, keypoints: &Keypoints) -> AnalysisResult {
        self.update_at(keypoints, Instant::now())
    }

    /// Consume one frame observed at `now`
    pub fn update_at(&mut self, keypoints: &Keypoints, now: Instant) -> AnalysisResult {
        if keypoints.is_empty() {
            let mut result = self.snapshot(now);
            result.errors.push(NO_PERSON_DETECTED.to_owned());
            return result;
        }

        match self.rules {
            MovementRules::Unsupported => {
                let mut result = self.blank_result();
                result.errors.push(EXERCISE_NOT_SUPPORTED.to_owned());
                result
            }
            MovementRules::Repetition(rule) => self.update_repetition(rule, keypoints, now),
            MovementRules::Hold(rule) => self.update_hold(rule, keypoints, now),
        }
    }

    /// Zero every counter and restart the clock
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    /// Zero every counter and restart the clock at `now`
    pub fn reset_at(&mut self, now: Instant) {
        self.stage = Stage::Start;
        self.rep_count = 0;
        self.calories = 0.0;
        self.started_at = now;
        self.rep_started_at = None;
        self.rep_durations.clear();
    }

    fn blank_result(&self) -> AnalysisResult {
        AnalysisResult::new(self.exercise, self.rep_count, self.stage, self.calories)
    }

    fn landmarks_missing(&self, keypoints: &Keypoints) -> bool {
        keypoints.any_missing(MovementRules::required_landmarks(self.exercise))
    }

    fn update_repetition(&mut self, rule: RepRule, keypoints: &Keypoints, now: Instant) -> AnalysisResult {
        if self.landmarks_missing(keypoints) {
            let mut result = self.blank_result();
            result.warnings.push(LANDMARKS_NOT_VISIBLE.to_owned());
            return result;
        }

        let joint_angle = rule.joint.measure(keypoints);
        let mut completion = None;

        let opens_rep = self.stage == Stage::Start || self.stage == rule.extended_stage;
        if opens_rep && joint_angle < rule.flexed_below {
            self.stage = rule.flexed_stage;
            self.rep_started_at = Some(now);
            debug!(
                exercise.type = %self.exercise,
                stage = %self.stage,
                angle = joint_angle,
                "Repetition opened"
            );
        } else if self.stage == rule.flexed_stage && joint_angle > rule.extended_above {
            self.stage = rule.extended_stage;
            self.rep_count += 1;
            self.calories += rule.calories_per_rep;
            completion = Some(self.close_rep(now));
            debug!(
                exercise.type = %self.exercise,
                rep.count = self.rep_count,
                angle = joint_angle,
                "Repetition completed"
            );
        }

        let mut result = self.blank_result();
        result
            .angles
            .insert(rule.joint.name.to_owned(), joint_angle);

        if let Some(rep_seconds) = completion {
            result.feedback.push(format!(
                "{} {} completed! ({rep_seconds:.1}s)",
                rule.rep_label, self.rep_count
            ));
            if let Some(tempo_warning) = self.tempo_warning(rep_seconds) {
                result.warnings.push(tempo_warning.to_owned());
            }
        }

        apply_form_checks(self.exercise, keypoints, joint_angle, &mut result);
        result
    }

    fn update_hold(&mut self, rule: HoldRule, keypoints: &Keypoints, now: Instant) -> AnalysisResult {
        let held = self.elapsed_seconds(now);
        self.stage = Stage::Hold;
        self.calories = held * rule.calories_per_minute / 60.0;

        let mut result = self.blank_result();
        result.duration = Some(held);

        if self.landmarks_missing(keypoints) {
            result.warnings.push(LANDMARKS_NOT_VISIBLE.to_owned());
            return result;
        }

        let joint_angle = rule.joint.measure(keypoints);
        result
            .angles
            .insert(rule.joint.name.to_owned(), joint_angle);
        apply_form_checks(self.exercise, keypoints, joint_angle, &mut result);
        result
    }

    /// Record the duration of the rep that just closed
    fn close_rep(&mut self, now: Instant) -> f64 {
        let seconds = self
            .rep_started_at
            .take()
            .map_or(Duration::ZERO, |started| now.saturating_duration_since(started))
            .as_secs_f64();
        self.rep_durations.push(seconds);
        seconds
    }

    fn tempo_warning(&self, rep_seconds: f64) -> Option<&'static str> {
        if self.rep_durations.len() < MIN_REPS_FOR_TEMPO {
            return None;
        }
        let mean = self.rep_durations.iter().sum::<f64>() / self.rep_durations.len() as f64;
        if rep_seconds > mean * SLOW_REP_FACTOR {
            Some("Slow down - maintain consistent tempo")
        } else if rep_seconds < mean * FAST_REP_FACTOR {
            Some("Speed up - don't rush the movement")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_coach_core::models::Keypoint;

    /// Right arm posed so the elbow angle equals `degrees`
    fn arm_at(degrees: f64) -> Keypoints {
        let radians = degrees.to_radians();
        Keypoints::new()
            .with("right_shoulder", Keypoint::planar(0.5, 0.3))
            .with("right_elbow", Keypoint::planar(0.5, 0.5))
            .with(
                "right_wrist",
                Keypoint::planar(0.2f64.mul_add(radians.sin(), 0.5), 0.2f64.mul_add(-radians.cos(), 0.5)),
            )
    }

    #[test]
    fn test_curl_counts_on_extension() {
        let t0 = Instant::now();
        let mut machine = ExerciseStateMachine::started_at(ExerciseType::BicepCurl, t0);

        let result = machine.update_at(&arm_at(170.0), t0);
        assert_eq!(result.stage, Stage::Start);
        assert_eq!(result.rep_count, 0);

        let result = machine.update_at(&arm_at(60.0), t0 + Duration::from_secs(1));
        assert_eq!(result.stage, Stage::Up);
        assert_eq!(result.rep_count, 0);

        let result = machine.update_at(&arm_at(170.0), t0 + Duration::from_secs(2));
        assert_eq!(result.stage, Stage::Down);
        assert_eq!(result.rep_count, 1);
        assert!((result.calories - 0.5).abs() < 1e-9);
        assert_eq!(result.feedback, vec!["Rep 1 completed! (1.0s)".to_owned()]);
    }

    #[test]
    fn test_dead_band_does_not_count() {
        let t0 = Instant::now();
        let mut machine = ExerciseStateMachine::started_at(ExerciseType::BicepCurl, t0);
        machine.update_at(&arm_at(60.0), t0);
        for degrees in [100.0, 150.0, 120.0, 90.0] {
            let result = machine.update_at(&arm_at(degrees), t0);
            assert_eq!(result.stage, Stage::Up);
            assert_eq!(result.rep_count, 0);
        }
    }

    #[test]
    fn test_missing_landmarks_keep_state() {
        let t0 = Instant::now();
        let mut machine = ExerciseStateMachine::started_at(ExerciseType::BicepCurl, t0);
        machine.update_at(&arm_at(60.0), t0);

        let partial = Keypoints::new().with("right_shoulder", Keypoint::planar(0.5, 0.3));
        let result = machine.update_at(&partial, t0);
        assert_eq!(result.stage, Stage::Up);
        assert!(result.angles.is_empty());
        assert_eq!(result.warnings, vec![LANDMARKS_NOT_VISIBLE.to_owned()]);
    }

    #[test]
    fn test_unsupported_exercise_reports_error() {
        let mut machine = ExerciseStateMachine::new(ExerciseType::Lunge);
        let result = machine.update(&arm_at(60.0));
        assert_eq!(result.errors, vec![EXERCISE_NOT_SUPPORTED.to_owned()]);
        assert_eq!(result.rep_count, 0);
        assert!(!machine.is_supported());
    }

    #[test]
    fn test_tempo_warning_on_slow_rep() {
        let t0 = Instant::now();
        let mut machine = ExerciseStateMachine::started_at(ExerciseType::BicepCurl, t0);
        let mut clock = t0;
        let mut rep = |seconds: u64| {
            machine.update_at(&arm_at(60.0), clock);
            clock += Duration::from_secs(seconds);
            let result = machine.update_at(&arm_at(165.0), clock);
            clock += Duration::from_secs(1);
            result
        };

        assert!(rep(1).warnings.is_empty());
        assert!(rep(1).warnings.is_empty());
        let slow = rep(4);
        assert_eq!(
            slow.warnings,
            vec!["Slow down - maintain consistent tempo".to_owned()]
        );
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let t0 = Instant::now();
        let mut machine = ExerciseStateMachine::started_at(ExerciseType::BicepCurl, t0);
        machine.update_at(&arm_at(60.0), t0);
        machine.update_at(&arm_at(170.0), t0 + Duration::from_secs(1));
        assert_eq!(machine.rep_count(), 1);

        machine.reset_at(t0 + Duration::from_secs(5));
        assert_eq!(machine.rep_count(), 0);
        assert_eq!(machine.stage(), Stage::Start);
        assert!(machine.calories().abs() < f64::EPSILON);
        assert!(machine.rep_durations().is_empty());
    }
}
