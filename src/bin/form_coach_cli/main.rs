// ABOUTME: Form coach CLI - replays recorded keypoint streams through an analysis session
// ABOUTME: Lists the exercise catalog and prints per-frame analyses and the session summary as JSON lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List supported exercises
//! form-coach-cli exercises
//!
//! # Replay a recorded session (one keypoint map per line)
//! form-coach-cli replay --exercise bicep_curl --input curls.jsonl
//!
//! # Reproducible feedback text
//! form-coach-cli replay --exercise squat --input squats.jsonl --seed 7
//! ```
//!
//! Each input line is either a bare keypoint map or an object
//! `{"t": <seconds>, "keypoints": {...}}`. Bare frames are spaced by `--fps`.

use clap::{Parser, Subcommand};
use form_coach::config::CoachConfig;
use form_coach::errors::{AppError, AppResult};
use form_coach::logging::LoggingConfig;
use form_coach::models::{ExerciseType, FrameAnalysis, Keypoints};
use form_coach::sessions::{SessionHandle, SessionRegistry};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "form-coach-cli",
    about = "Form Coach analysis CLI",
    long_about = "Replay recorded pose keypoints through the form analysis engine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the exercise catalog
    Exercises,

    /// Feed a recorded keypoint stream through one session
    Replay {
        /// Exercise performed in the recording (e.g. `bicep_curl`)
        #[arg(long)]
        exercise: String,

        /// JSON lines file with one frame per line
        #[arg(long)]
        input: PathBuf,

        /// Seed for feedback template selection (overrides the environment)
        #[arg(long)]
        seed: Option<u64>,

        /// User id recorded on the session
        #[arg(long)]
        user: Option<String>,

        /// Frame rate assumed for frames without a timestamp
        #[arg(long, default_value = "30")]
        fps: f64,
    },
}

/// One recorded frame
#[derive(Deserialize)]
#[serde(untagged)]
enum ReplayFrame {
    Timed {
        #[serde(default)]
        t: Option<f64>,
        keypoints: Keypoints,
    },
    Bare(Keypoints),
}

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
enum OutputRecord<T: Serialize> {
    Frame(T),
    Summary(T),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Command::Exercises => print_catalog(),
        Command::Replay {
            exercise,
            input,
            seed,
            user,
            fps,
        } => replay(&exercise, &input, seed, user, fps),
    }
}

fn print_catalog() -> AppResult<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for info in ExerciseType::catalog() {
        serde_json::to_writer(&mut out, &info)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn replay(
    exercise: &str,
    input: &Path,
    seed: Option<u64>,
    user: Option<String>,
    fps: f64,
) -> AppResult<()> {
    let exercise_type: ExerciseType = exercise.parse()?;
    if !(fps.is_finite() && fps > 0.0) {
        return Err(AppError::invalid_input(format!(
            "Frame rate must be positive, got {fps}"
        )));
    }

    let config = CoachConfig::from_env();
    let registry = SessionRegistry::new(Arc::new(config.build_registry()?))
        .with_feedback_seed(seed.or(config.feedback_seed));
    let session_id = registry.create_session(exercise_type, user)?;
    let handle = registry
        .get_session(session_id)?
        .ok_or_else(|| AppError::internal(format!("Session {session_id} vanished")))?;

    let file = File::open(input).map_err(|e| {
        AppError::invalid_input(format!("Cannot open {}", input.display())).with_source(e)
    })?;
    let mut out = BufWriter::new(io::stdout().lock());
    let started = Instant::now();
    let frame_interval = 1.0 / fps;
    let mut frames = 0_usize;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: ReplayFrame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping unparseable frame");
                continue;
            }
        };
        let (timestamp, keypoints) = match frame {
            ReplayFrame::Timed { t, keypoints } => {
                (t.unwrap_or(frames as f64 * frame_interval), keypoints)
            }
            ReplayFrame::Bare(keypoints) => (frames as f64 * frame_interval, keypoints),
        };
        let offset = Duration::try_from_secs_f64(timestamp).map_err(|e| {
            AppError::invalid_input(format!("Invalid timestamp on line {}", index + 1))
                .with_source(e)
        })?;

        let analysis = analyze_at(&handle, &keypoints, started + offset)?;
        serde_json::to_writer(&mut out, &OutputRecord::Frame(analysis))?;
        writeln!(out)?;
        frames += 1;
    }

    let ended = registry
        .end_session(session_id)?
        .ok_or_else(|| AppError::internal(format!("Session {session_id} vanished")))?;
    serde_json::to_writer(&mut out, &OutputRecord::Summary(&ended.summary))?;
    writeln!(out)?;
    out.flush()?;

    info!(
        session.id = %session_id,
        frames,
        rep.count = ended.summary.reps,
        "Replay finished"
    );
    Ok(())
}

fn analyze_at(
    handle: &SessionHandle,
    keypoints: &Keypoints,
    at: Instant,
) -> AppResult<FrameAnalysis> {
    let mut bundle = handle
        .lock()
        .map_err(|_| AppError::internal("Mutex poisoned: session bundle lock"))?;
    Ok(bundle.analyze_frame_at(keypoints, at))
}
