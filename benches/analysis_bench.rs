// ABOUTME: Criterion benchmarks for the per-frame analysis pipeline
// ABOUTME: Measures form metrics, state machine updates, quality scoring, and full session frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the per-frame analysis pipeline.
//!
//! A live camera feed delivers 30 frames per second per session, so the full
//! pipeline has a budget of a few milliseconds per frame at most.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use form_coach::models::{ExerciseType, Keypoint, Keypoints};
use form_coach::sessions::SessionRegistry;
use form_coach::{ExerciseStateMachine, FormMetricsCalculator, QualityEvaluator};
use form_coach_intelligence::ExerciseConfigRegistry;
use std::f64::consts::TAU;

/// Frames in one simulated set (two seconds of curls at 30 fps)
const FRAMES_PER_SET: usize = 60;

/// Full-body frame with the right elbow at `degrees`
fn curl_frame(degrees: f64) -> Keypoints {
    let radians = degrees.to_radians();
    Keypoints::new()
        .with("right_shoulder", Keypoint::new(0.5, 0.3, -0.1, 0.99))
        .with("right_elbow", Keypoint::new(0.52, 0.5, -0.05, 0.97))
        .with(
            "right_wrist",
            Keypoint::new(
                0.2f64.mul_add(radians.sin(), 0.52),
                0.2f64.mul_add(-radians.cos(), 0.5),
                0.0,
                0.95,
            ),
        )
        .with("right_hip", Keypoint::new(0.5, 0.6, 0.0, 0.99))
        .with("right_knee", Keypoint::new(0.5, 0.75, 0.0, 0.98))
        .with("right_ankle", Keypoint::new(0.5, 0.9, 0.0, 0.98))
}

/// One set of curls sweeping between full extension and full flexion
#[allow(clippy::cast_precision_loss)]
fn curl_set() -> Vec<Keypoints> {
    (0..FRAMES_PER_SET)
        .map(|i| {
            let phase = (i as f64 / FRAMES_PER_SET as f64) * TAU * 2.0;
            curl_frame(phase.cos().mul_add(60.0, 115.0))
        })
        .collect()
}

fn bench_form_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_metrics");
    let frame = curl_frame(90.0);

    for exercise in [ExerciseType::BicepCurl, ExerciseType::Squat, ExerciseType::PushUp] {
        let calculator = FormMetricsCalculator::for_exercise(exercise);
        group.bench_with_input(
            BenchmarkId::new("compute", exercise.as_str()),
            &frame,
            |b, frame| b.iter(|| calculator.compute(black_box(frame))),
        );
    }

    group.finish();
}

fn bench_state_machine(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_machine");
    let frames = curl_set();

    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("curl_set", |b| {
        b.iter(|| {
            let mut machine = ExerciseStateMachine::new(ExerciseType::BicepCurl);
            for frame in &frames {
                black_box(machine.update(black_box(frame)));
            }
            machine.rep_count()
        });
    });

    group.finish();
}

fn bench_quality_evaluator(c: &mut Criterion) {
    let mut group = c.benchmark_group("quality_evaluator");
    let configs = ExerciseConfigRegistry::builtin();
    let metrics = FormMetricsCalculator::compute_for(ExerciseType::BicepCurl, &curl_frame(70.0));

    group.bench_function("evaluate", |b| {
        let mut evaluator = QualityEvaluator::with_seed(
            ExerciseType::BicepCurl,
            configs.get(ExerciseType::BicepCurl),
            11,
        );
        b.iter(|| evaluator.evaluate(black_box(&metrics)));
    });

    group.finish();
}

fn bench_frame_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_pipeline");
    let frames = curl_set();
    let registry = SessionRegistry::default().with_feedback_seed(Some(3));

    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("session_curl_set", |b| {
        b.iter(|| {
            let Ok(session_id) = registry.create_session(ExerciseType::BicepCurl, None) else {
                return;
            };
            for frame in &frames {
                let _ = black_box(registry.analyze_frame(session_id, black_box(frame)));
            }
            let _ = registry.end_session(session_id);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_form_metrics,
    bench_state_machine,
    bench_quality_evaluator,
    bench_frame_pipeline
);
criterion_main!(benches);
