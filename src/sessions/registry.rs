// ABOUTME: Concurrency-safe registry mapping session ids to exclusively-owned session bundles
// ABOUTME: Linearizable create/get/reset/end under one coarse lock, plus listing helpers for expiry policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Mutex poisoning errors are converted to AppError::internal

use super::bundle::{SessionBundle, SessionInfo};
use chrono::Utc;
use form_coach_core::errors::{AppError, AppResult};
use form_coach_core::models::{ExerciseType, FrameAnalysis, Keypoints, SessionSummary};
use form_coach_intelligence::{ExerciseConfigRegistry, QualityEvaluator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared handle to one live session
///
/// Callers must serialize frames within a session; the bundle lock only
/// protects against torn state, not against interleaved frame order.
pub type SessionHandle = Arc<Mutex<SessionBundle>>;

/// Session removed by [`SessionRegistry::end_session`]
#[derive(Debug)]
pub struct EndedSession {
    /// Terminal summary for persistence
    pub summary: SessionSummary,
    /// The former bundle, already marked completed
    pub session: SessionHandle,
}

/// Live sessions keyed by id
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionHandle>>,
    configs: Arc<ExerciseConfigRegistry>,
    feedback_seed: Option<u64>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Arc::new(ExerciseConfigRegistry::builtin()))
    }
}

impl SessionRegistry {
    /// Empty registry drawing configs from `configs`
    #[must_use]
    pub fn new(configs: Arc<ExerciseConfigRegistry>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            configs,
            feedback_seed: None,
        }
    }

    /// Seed every session's template picker for reproducible feedback
    #[must_use]
    pub const fn with_feedback_seed(mut self, seed: Option<u64>) -> Self {
        self.feedback_seed = seed;
        self
    }

    /// Config registry shared by all sessions
    #[must_use]
    pub fn configs(&self) -> &ExerciseConfigRegistry {
        &self.configs
    }

    fn lock_sessions(&self) -> AppResult<MutexGuard<'_, HashMap<Uuid, SessionHandle>>> {
        self.sessions
            .lock()
            .map_err(|_| AppError::internal("Mutex poisoned: session map lock"))
    }

    fn lock_bundle(handle: &SessionHandle) -> AppResult<MutexGuard<'_, SessionBundle>> {
        handle
            .lock()
            .map_err(|_| AppError::internal("Mutex poisoned: session bundle lock"))
    }

    /// Start a session and return its id
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry lock is poisoned
    pub fn create_session(
        &self,
        exercise_type: ExerciseType,
        user_id: Option<String>,
    ) -> AppResult<Uuid> {
        let session_id = Uuid::new_v4();
        let config = self.configs.get(exercise_type);
        let evaluator = match self.feedback_seed {
            Some(seed) => QualityEvaluator::with_seed(exercise_type, config, seed),
            None => QualityEvaluator::new(exercise_type, config),
        };
        let bundle = SessionBundle::new(session_id, exercise_type, user_id, evaluator);

        self.lock_sessions()?
            .insert(session_id, Arc::new(Mutex::new(bundle)));

        info!(
            session.id = %session_id,
            exercise.type = %exercise_type,
            "Session created"
        );
        Ok(session_id)
    }

    /// Look up a session and mark it active
    ///
    /// # Errors
    ///
    /// Returns an internal error if a lock is poisoned
    pub fn get_session(&self, session_id: Uuid) -> AppResult<Option<SessionHandle>> {
        let sessions = self.lock_sessions()?;
        let Some(handle) = sessions.get(&session_id) else {
            return Ok(None);
        };
        Self::lock_bundle(handle)?.touch();
        Ok(Some(Arc::clone(handle)))
    }

    /// Whether a session is live
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry lock is poisoned
    pub fn session_exists(&self, session_id: Uuid) -> AppResult<bool> {
        Ok(self.lock_sessions()?.contains_key(&session_id))
    }

    /// Zero a session's counters, keeping its quality history
    ///
    /// Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a lock is poisoned
    pub fn reset_session(&self, session_id: Uuid) -> AppResult<bool> {
        let sessions = self.lock_sessions()?;
        let Some(handle) = sessions.get(&session_id) else {
            warn!(session.id = %session_id, "Reset requested for unknown session");
            return Ok(false);
        };
        Self::lock_bundle(handle)?.reset();
        info!(session.id = %session_id, "Session reset");
        Ok(true)
    }

    /// Complete a session and remove it from the live map
    ///
    /// # Errors
    ///
    /// Returns an internal error if a lock is poisoned
    pub fn end_session(&self, session_id: Uuid) -> AppResult<Option<EndedSession>> {
        let mut sessions = self.lock_sessions()?;
        let Some(handle) = sessions.remove(&session_id) else {
            return Ok(None);
        };
        let summary = Self::lock_bundle(&handle)?.complete();
        drop(sessions);

        info!(
            session.id = %session_id,
            exercise.type = %summary.exercise_type,
            rep.count = summary.reps,
            "Session ended"
        );
        Ok(Some(EndedSession {
            summary,
            session: handle,
        }))
    }

    /// Analyze one frame for a session
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, or an internal error if a
    /// lock is poisoned. Frame content never causes an error.
    pub fn analyze_frame(
        &self,
        session_id: Uuid,
        keypoints: &Keypoints,
    ) -> AppResult<FrameAnalysis> {
        let handle = self
            .get_session(session_id)?
            .ok_or_else(|| AppError::not_found(format!("Session {session_id}")))?;
        let analysis = Self::lock_bundle(&handle)?.analyze_frame(keypoints);
        Ok(analysis)
    }

    /// Snapshots of every live session
    ///
    /// # Errors
    ///
    /// Returns an internal error if a lock is poisoned
    pub fn list_sessions(&self) -> AppResult<Vec<SessionInfo>> {
        let sessions = self.lock_sessions()?;
        sessions
            .values()
            .map(|handle| Self::lock_bundle(handle).map(|bundle| bundle.info()))
            .collect()
    }

    /// Number of live sessions
    ///
    /// # Errors
    ///
    /// Returns an internal error if the registry lock is poisoned
    pub fn active_count(&self) -> AppResult<usize> {
        Ok(self.lock_sessions()?.len())
    }

    /// Ids of sessions with no activity for at least `idle_for`
    ///
    /// The registry never expires sessions itself; this is input for an
    /// external expiry policy.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a lock is poisoned
    pub fn idle_sessions(&self, idle_for: Duration) -> AppResult<Vec<Uuid>> {
        let now = Utc::now();
        let sessions = self.lock_sessions()?;
        let mut idle = Vec::new();
        for (session_id, handle) in sessions.iter() {
            let last_activity = Self::lock_bundle(handle)?.last_activity();
            let quiet = now
                .signed_duration_since(last_activity)
                .to_std()
                .unwrap_or_default();
            if quiet >= idle_for {
                idle.push(*session_id);
            }
        }
        Ok(idle)
    }
}
