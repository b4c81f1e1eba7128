//! Camera path recording, simplification and playback.
//!
//! Recording samples the live pose every [`RECORD_SAMPLE_EVERY_FRAMES`]
//! frames. On stop the dense path is reduced with Ramer-Douglas-Peucker over
//! the 6D curve (position + target) parameterized by time, which keeps the
//! recording short enough to persist and share. Playback walks the keyframes
//! with the same smoothstep easing used by scroll-bound slides.

#[cfg(test)]
#[path = "recorder_test.rs"]
mod recorder_test;

use crate::camera::smoothstep;
use crate::consts::RECORD_SAMPLE_EVERY_FRAMES;
use crate::doc::{CameraKeyframe, CameraPose};

/// Accumulates camera samples while a recording is in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    samples: Vec<CameraKeyframe>,
    elapsed: f32,
    frame: u64,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one rendered frame. `dt` is the time since the previous frame.
    pub fn on_frame(&mut self, dt: f32, pose: CameraPose) {
        if self.frame > 0 && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.frame % RECORD_SAMPLE_EVERY_FRAMES == 0 {
            self.samples.push(CameraKeyframe { time: self.elapsed, position: pose.position, target: pose.target });
        }
        self.frame += 1;
    }

    /// Raw samples captured so far.
    #[must_use]
    pub fn samples(&self) -> &[CameraKeyframe] {
        &self.samples
    }

    /// Seconds since recording started.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Stop recording and simplify. `None` if fewer than two samples exist.
    #[must_use]
    pub fn finish(self, epsilon: f32) -> Option<Vec<CameraKeyframe>> {
        if self.samples.len() < 2 {
            return None;
        }
        Some(simplify(&self.samples, epsilon))
    }
}

/// Ramer-Douglas-Peucker over the 6D camera curve.
///
/// Each interior point is compared against the chord between the segment
/// endpoints evaluated at the point's time fraction. The result is a
/// subsequence of `points` that always keeps the first and last element;
/// inputs of two or fewer points are returned unchanged.
#[must_use]
pub fn simplify(points: &[CameraKeyframe], epsilon: f32) -> Vec<CameraKeyframe> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let (index, deviation) = max_deviation(points, first, last);
        if deviation > epsilon {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, last));
        }
    }

    points.iter().zip(keep).filter_map(|(p, k)| k.then_some(*p)).collect()
}

/// Index and distance of the first interior point with the largest deviation.
fn max_deviation(points: &[CameraKeyframe], first: usize, last: usize) -> (usize, f32) {
    let a = points[first];
    let b = points[last];
    let span = b.time - a.time;
    let mut best = (first, f32::NEG_INFINITY);
    for (offset, p) in points[first + 1..last].iter().enumerate() {
        let index = first + 1 + offset;
        let frac = if span > 0.0 {
            (p.time - a.time) / span
        } else {
            // Zero-length time span: fall back to sample order.
            (index - first) as f32 / (last - first) as f32
        };
        let chord = a.pose().lerp(b.pose(), frac);
        let d_position = p.position - chord.position;
        let d_target = p.target - chord.target;
        let distance = (d_position.length_squared() + d_target.length_squared()).sqrt();
        if distance > best.1 {
            best = (index, distance);
        }
    }
    best
}

/// Total duration of a keyframe sequence in seconds.
#[must_use]
pub fn duration(keyframes: &[CameraKeyframe]) -> f32 {
    match (keyframes.first(), keyframes.last()) {
        (Some(first), Some(last)) => (last.time - first.time).max(0.0),
        _ => 0.0,
    }
}

/// Camera pose at `elapsed` seconds into playback.
///
/// Looping wraps `elapsed` modulo the total duration; otherwise it clamps to
/// the last keyframe. Returns `None` for fewer than two keyframes.
#[must_use]
pub fn sample_path(keyframes: &[CameraKeyframe], elapsed: f32, looped: bool) -> Option<CameraPose> {
    let (first, last) = match keyframes {
        [first, .., last] => (first, last),
        _ => return None,
    };
    let total = duration(keyframes);
    let local = if !elapsed.is_finite() || elapsed <= 0.0 {
        0.0
    } else if looped && total > 0.0 {
        elapsed.rem_euclid(total)
    } else {
        elapsed.min(total)
    };
    let t = first.time + local;

    for pair in keyframes.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.time {
            let span = b.time - a.time;
            let u = if span > 0.0 { ((t - a.time) / span).clamp(0.0, 1.0) } else { 1.0 };
            return Some(a.pose().lerp(b.pose(), smoothstep(u)));
        }
    }
    Some(last.pose())
}
