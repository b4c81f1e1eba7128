#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::consts::RECORDING_TOLERANCE;

fn kf(time: f32, position: Vec3) -> CameraKeyframe {
    CameraKeyframe { time, position, target: Vec3::ZERO }
}

fn random_path(rng: &mut StdRng, len: usize) -> Vec<CameraKeyframe> {
    let mut time = 0.0;
    (0..len)
        .map(|_| {
            time += rng.random_range(0.01..0.1);
            CameraKeyframe {
                time,
                position: Vec3::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)),
                target: Vec3::new(rng.random_range(-1.0..1.0), 0.0, rng.random_range(-1.0..1.0)),
            }
        })
        .collect()
}

fn is_subsequence(sub: &[CameraKeyframe], full: &[CameraKeyframe]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| f == s))
}

fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

// =============================================================
// Simplify
// =============================================================

#[test]
fn straight_line_collapses_to_endpoints() {
    let points: Vec<_> = (0..10).map(|i| kf(i as f32 * 0.1, Vec3::new(i as f32, 0.0, 0.0))).collect();
    let out = simplify(&points, RECORDING_TOLERANCE);
    assert_eq!(out, vec![points[0], points[9]]);
}

#[test]
fn short_inputs_are_unchanged() {
    let one = vec![kf(0.0, Vec3::ZERO)];
    assert_eq!(simplify(&one, 0.0), one);
    let two = vec![kf(0.0, Vec3::ZERO), kf(1.0, Vec3::ONE)];
    assert_eq!(simplify(&two, 0.0), two);
    assert!(simplify(&[], 0.0).is_empty());
}

#[test]
fn corner_is_kept() {
    let points = vec![
        kf(0.0, Vec3::new(0.0, 0.0, 0.0)),
        kf(1.0, Vec3::new(1.0, 0.0, 0.0)),
        kf(2.0, Vec3::new(1.0, 1.0, 0.0)),
    ];
    assert_eq!(simplify(&points, 0.05), points);
}

#[test]
fn uneven_timing_counts_as_deviation() {
    // Same straight line in space, but the middle sample is early in time.
    let points = vec![kf(0.0, Vec3::ZERO), kf(0.1, Vec3::new(1.0, 0.0, 0.0)), kf(2.0, Vec3::new(2.0, 0.0, 0.0))];
    assert_eq!(simplify(&points, 0.05).len(), 3);
}

#[test]
fn random_paths_keep_endpoints_and_subsequence() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let len = rng.random_range(2..40);
        let points = random_path(&mut rng, len);
        let epsilon = rng.random_range(0.0..3.0);
        let out = simplify(&points, epsilon);
        assert!(out.len() >= 2);
        assert_eq!(out.first(), points.first());
        assert_eq!(out.last(), points.last());
        assert!(is_subsequence(&out, &points));
    }
}

#[test]
fn simplify_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let len = rng.random_range(2..40);
        let points = random_path(&mut rng, len);
        let epsilon = rng.random_range(0.0..3.0);
        let once = simplify(&points, epsilon);
        assert_eq!(simplify(&once, epsilon), once);
    }
}

// =============================================================
// Recorder
// =============================================================

#[test]
fn recorder_samples_every_other_frame() {
    let mut recorder = Recorder::new();
    for i in 0..10 {
        recorder.on_frame(0.016, CameraPose::new(Vec3::new(i as f32, 0.0, 0.0), Vec3::ZERO));
    }
    assert_eq!(recorder.samples().len(), 5);
    assert_eq!(recorder.samples()[0].time, 0.0);
    assert!((recorder.samples()[1].time - 0.032).abs() < 1e-6);
}

#[test]
fn short_recording_is_discarded() {
    let mut recorder = Recorder::new();
    recorder.on_frame(0.016, CameraPose::default());
    assert!(recorder.finish(RECORDING_TOLERANCE).is_none());
}

#[test]
fn finish_simplifies() {
    let mut recorder = Recorder::new();
    for i in 0..20 {
        recorder.on_frame(0.016, CameraPose::new(Vec3::new(i as f32, 0.0, 0.0), Vec3::ZERO));
    }
    let keyframes = recorder.finish(RECORDING_TOLERANCE).unwrap();
    assert_eq!(keyframes.len(), 2);
}

// =============================================================
// Playback
// =============================================================

#[test]
fn playback_hits_keyframes_exactly() {
    let frames = vec![kf(0.0, Vec3::ZERO), kf(1.0, Vec3::new(2.0, 0.0, 0.0)), kf(3.0, Vec3::new(2.0, 4.0, 0.0))];
    assert_eq!(sample_path(&frames, 0.0, false).unwrap().position, Vec3::ZERO);
    assert_eq!(sample_path(&frames, 1.0, false).unwrap().position, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(sample_path(&frames, 3.0, false).unwrap().position, Vec3::new(2.0, 4.0, 0.0));
}

#[test]
fn playback_eases_midpoint() {
    let frames = vec![kf(0.0, Vec3::ZERO), kf(1.0, Vec3::new(2.0, 0.0, 0.0))];
    let pose = sample_path(&frames, 0.5, false).unwrap();
    assert!(approx_eq(pose.position, Vec3::new(1.0, 0.0, 0.0)));
    let early = sample_path(&frames, 0.25, false).unwrap();
    // smoothstep(0.25) = 0.15625
    assert!(approx_eq(early.position, Vec3::new(0.3125, 0.0, 0.0)));
}

#[test]
fn playback_loops_and_clamps() {
    let frames = vec![kf(0.0, Vec3::ZERO), kf(2.0, Vec3::new(2.0, 0.0, 0.0))];
    let looped = sample_path(&frames, 3.0, true).unwrap();
    assert!(approx_eq(looped.position, Vec3::new(1.0, 0.0, 0.0)));
    let clamped = sample_path(&frames, 30.0, false).unwrap();
    assert_eq!(clamped.position, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn playback_needs_two_keyframes() {
    assert!(sample_path(&[kf(0.0, Vec3::ZERO)], 0.0, true).is_none());
    assert_eq!(duration(&[]), 0.0);
}
