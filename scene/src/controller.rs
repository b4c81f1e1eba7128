//! Camera controller: orbit input plus the camera state machine.
//!
//! MODES
//! =====
//! - `Orbit`: user-driven; the pose only changes on orbit input.
//! - `Flying`: lerps position and target toward a slide pose each frame,
//!   snapping exactly onto it on arrival. Orbit input is ignored.
//! - `ScrollBound`: pose is a pure function of the scroll offset across the
//!   slide list, plus a smoothed pointer drift. Only used in embed context
//!   with at least two slides.
//! - `Recording`: orbit input drives the pose while samples are captured.
//! - `Playback`: pose follows a stored keyframe path.
//!
//! The controller is the only writer of `SharedRefs::camera` and
//! `SharedRefs::camera_mouse_offset`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::f32::consts::PI;

use glam::Vec3;
use tracing::{debug, info};

use crate::camera::{Point, lerp3, smoothstep};
use crate::consts::{
    CAMERA_PARALLAX_INTENSITY, CAMERA_PARALLAX_LERP, FLY_ARRIVE_EPSILON, FLY_LERP, MIN_SLIDE_DURATION,
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_POLAR_MARGIN, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP,
};
use crate::doc::{CameraKeyframe, CameraPose, Slide, SlideId};
use crate::recorder::{self, Recorder};
use crate::shared::SharedRefs;

// =============================================================================
// ORBIT CONTROLS
// =============================================================================

/// Spherical orbit around a target point.
///
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar angle
/// from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl OrbitControls {
    #[must_use]
    pub fn from_pose(pose: CameraPose) -> Self {
        let mut controls = Self { target: pose.target, radius: 1.0, theta: 0.0, phi: PI / 2.0 };
        controls.sync_to_pose(pose);
        controls
    }

    /// Re-derive the spherical state from a pose set by something else.
    pub fn sync_to_pose(&mut self, pose: CameraPose) {
        let offset = pose.position - pose.target;
        let radius = offset.length();
        self.target = pose.target;
        if radius <= f32::EPSILON {
            self.radius = ORBIT_MIN_DISTANCE;
            return;
        }
        self.radius = radius;
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        CameraPose::new(self.target + offset, self.target)
    }

    /// Rotate by a pointer drag of `delta` pixels on a viewport `height` tall.
    pub fn rotate(&mut self, delta: Point, height: f32) {
        if height <= 0.0 {
            return;
        }
        let per_px = 2.0 * PI * ORBIT_ROTATE_SPEED / height;
        self.theta -= delta.x * per_px;
        self.phi = (self.phi - delta.y * per_px).clamp(ORBIT_POLAR_MARGIN, PI - ORBIT_POLAR_MARGIN);
    }

    /// Dolly toward (negative) or away from (positive) the target.
    pub fn dolly(&mut self, wheel_delta_y: f32) {
        if !wheel_delta_y.is_finite() {
            return;
        }
        let scale = ORBIT_ZOOM_STEP.powf(-wheel_delta_y / 100.0);
        self.radius = (self.radius * scale).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

// =============================================================================
// MODES
// =============================================================================

/// Where the controller is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    /// Authoring; never scroll-bound.
    #[default]
    Editor,
    /// Published/exported runtime; scroll-bound when two or more slides exist.
    Embed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraMode {
    Orbit,
    Flying { slide_id: SlideId, target: CameraPose },
    ScrollBound,
    Recording(Recorder),
    Playback { keyframes: Vec<CameraKeyframe>, elapsed: f32, looped: bool },
}

impl CameraMode {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Orbit => "orbit",
            Self::Flying { .. } => "flying",
            Self::ScrollBound => "scroll",
            Self::Recording(_) => "recording",
            Self::Playback { .. } => "playback",
        }
    }
}

/// Something the host should react to after a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraEvent {
    /// A flight reached its slide.
    Arrived(SlideId),
    /// The scroll-bound slide index changed.
    SlideChanged(usize),
    /// A non-looping playback reached its end.
    PlaybackFinished,
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Debug, Clone)]
pub struct CameraController {
    mode: CameraMode,
    orbit: OrbitControls,
    context: Context,
    slide_index: Option<usize>,
}

impl CameraController {
    #[must_use]
    pub fn new(context: Context, pose: CameraPose) -> Self {
        Self { mode: CameraMode::Orbit, orbit: OrbitControls::from_pose(pose), context, slide_index: None }
    }

    #[must_use]
    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    #[must_use]
    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    #[must_use]
    pub fn context(&self) -> Context {
        self.context
    }

    /// Whether orbit input currently moves the camera.
    #[must_use]
    pub fn orbit_enabled(&self) -> bool {
        matches!(self.mode, CameraMode::Orbit | CameraMode::Recording(_))
    }

    /// Put the camera at `pose` and resync orbit state. Used on scene load.
    pub fn reset(&mut self, pose: CameraPose, shared: &mut SharedRefs) {
        self.set_mode(CameraMode::Orbit);
        self.slide_index = None;
        shared.camera.set_pose(pose);
        shared.camera_mouse_offset = Vec3::ZERO;
        self.orbit.sync_to_pose(pose);
    }

    // --- Orbit input ---

    /// Orbit drag. Ignored unless orbit input is enabled.
    pub fn on_orbit_drag(&mut self, delta: Point, shared: &mut SharedRefs) {
        if !self.orbit_enabled() {
            return;
        }
        self.orbit.rotate(delta, shared.camera.viewport_height);
        shared.camera.set_pose(self.orbit.pose());
    }

    /// Wheel dolly. Ignored unless orbit input is enabled.
    pub fn on_wheel(&mut self, delta_y: f32, shared: &mut SharedRefs) {
        if !self.orbit_enabled() {
            return;
        }
        self.orbit.dolly(delta_y);
        shared.camera.set_pose(self.orbit.pose());
    }

    // --- Transitions ---

    /// Start flying to `slide`. A flight already in progress is redirected.
    ///
    /// Ignored while recording, playing back or scroll-bound.
    pub fn fly_to(&mut self, slide: &Slide) {
        match self.mode {
            CameraMode::Orbit | CameraMode::Flying { .. } => {
                self.set_mode(CameraMode::Flying { slide_id: slide.id.clone(), target: slide.pose() });
            }
            _ => debug!(slide = %slide.id, mode = self.mode.name(), "fly-to ignored"),
        }
    }

    /// Abort a flight, leaving the camera where it currently is.
    pub fn cancel_flight(&mut self, shared: &SharedRefs) {
        if matches!(self.mode, CameraMode::Flying { .. }) {
            self.orbit.sync_to_pose(shared.camera.pose());
            self.set_mode(CameraMode::Orbit);
        }
    }

    /// Begin capturing the camera path. Orbit input stays live.
    pub fn start_recording(&mut self, shared: &SharedRefs) {
        self.orbit.sync_to_pose(shared.camera.pose());
        self.set_mode(CameraMode::Recording(Recorder::new()));
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.mode, CameraMode::Recording(_))
    }

    /// Stop recording and return the simplified path.
    ///
    /// `None` when not recording or when fewer than two samples were taken.
    pub fn stop_recording(&mut self, epsilon: f32) -> Option<Vec<CameraKeyframe>> {
        if !self.is_recording() {
            return None;
        }
        let CameraMode::Recording(recorder) = std::mem::replace(&mut self.mode, CameraMode::Orbit) else {
            return None;
        };
        debug!(from = "recording", to = "orbit", "camera mode");
        let raw = recorder.samples().len();
        let keyframes = recorder.finish(epsilon);
        match &keyframes {
            Some(kept) => info!(raw, kept = kept.len(), "camera recording simplified"),
            None => info!(raw, "camera recording too short; discarded"),
        }
        keyframes
    }

    /// Play a stored path. Returns `false` if it has fewer than two keyframes.
    pub fn start_playback(&mut self, keyframes: Vec<CameraKeyframe>, looped: bool) -> bool {
        if keyframes.len() < 2 {
            return false;
        }
        self.set_mode(CameraMode::Playback { keyframes, elapsed: 0.0, looped });
        true
    }

    pub fn stop_playback(&mut self, shared: &SharedRefs) {
        if matches!(self.mode, CameraMode::Playback { .. }) {
            self.orbit.sync_to_pose(shared.camera.pose());
            self.set_mode(CameraMode::Orbit);
        }
    }

    // --- Frame ---

    /// Advance one rendered frame and write the resulting pose to `shared`.
    pub fn frame(&mut self, dt: f32, slides: &[Slide], shared: &mut SharedRefs) -> Vec<CameraEvent> {
        let mut events = Vec::new();
        self.select_scroll_mode(slides);

        match &mut self.mode {
            CameraMode::Orbit => {}
            CameraMode::Flying { slide_id, target } => {
                let target = *target;
                let next = shared.camera.pose().lerp(target, FLY_LERP);
                if next.position.distance(target.position) < FLY_ARRIVE_EPSILON {
                    let slide_id = slide_id.clone();
                    shared.camera.set_pose(target);
                    self.orbit.sync_to_pose(target);
                    self.set_mode(CameraMode::Orbit);
                    events.push(CameraEvent::Arrived(slide_id));
                } else {
                    shared.camera.set_pose(next);
                }
            }
            CameraMode::ScrollBound => {
                let desired = shared.pointer.map_or(Vec3::ZERO, |p| {
                    Vec3::new(p.x * CAMERA_PARALLAX_INTENSITY, p.y * CAMERA_PARALLAX_INTENSITY, 0.0)
                });
                shared.camera_mouse_offset = lerp3(shared.camera_mouse_offset, desired, CAMERA_PARALLAX_LERP);
                if let Some(mut pose) = scroll_pose(slides, shared.scroll_offset) {
                    pose.position += shared.camera_mouse_offset;
                    shared.camera.set_pose(pose);
                }
                let index = slide_index(slides.len(), shared.scroll_offset);
                if index != self.slide_index {
                    self.slide_index = index;
                    if let Some(index) = index {
                        events.push(CameraEvent::SlideChanged(index));
                    }
                }
            }
            CameraMode::Recording(recorder) => recorder.on_frame(dt, shared.camera.pose()),
            CameraMode::Playback { keyframes, elapsed, looped } => {
                if dt.is_finite() && dt > 0.0 {
                    *elapsed += dt;
                }
                if let Some(pose) = recorder::sample_path(keyframes, *elapsed, *looped) {
                    shared.camera.set_pose(pose);
                    self.orbit.sync_to_pose(pose);
                }
                if !*looped && *elapsed >= recorder::duration(keyframes) {
                    self.set_mode(CameraMode::Orbit);
                    events.push(CameraEvent::PlaybackFinished);
                }
            }
        }
        events
    }

    fn select_scroll_mode(&mut self, slides: &[Slide]) {
        let scrollable = self.context == Context::Embed && slides.len() >= 2;
        match self.mode {
            CameraMode::Orbit if scrollable => self.set_mode(CameraMode::ScrollBound),
            CameraMode::ScrollBound if !scrollable => {
                self.slide_index = None;
                self.set_mode(CameraMode::Orbit);
            }
            _ => {}
        }
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if self.mode.name() != mode.name() {
            debug!(from = self.mode.name(), to = mode.name(), "camera mode");
        }
        self.mode = mode;
    }
}

// =============================================================================
// SCROLL MAPPING
// =============================================================================

/// Camera pose for a scroll offset across `slides`.
///
/// Segment `i` spans slides `i` and `i + 1` and is weighted by slide `i`'s
/// duration. The local parameter is smoothstep-eased before lerping, so the
/// ends of every segment land exactly on the slide poses. A single slide pins
/// the camera; no slides yields `None`.
#[must_use]
pub fn scroll_pose(slides: &[Slide], offset: f32) -> Option<CameraPose> {
    match slides {
        [] => return None,
        [only] => return Some(only.pose()),
        _ => {}
    }
    let offset = if offset.is_finite() { offset.clamp(0.0, 1.0) } else { 0.0 };
    let segments = slides.len() - 1;
    let weight = |s: &Slide| s.duration.max(MIN_SLIDE_DURATION);
    let total: f32 = slides[..segments].iter().map(weight).sum();
    let goal = offset * total;

    let mut start = 0.0;
    for i in 0..segments {
        let w = weight(&slides[i]);
        if goal <= start + w || i + 1 == segments {
            let local = ((goal - start) / w).clamp(0.0, 1.0);
            return Some(slides[i].pose().lerp(slides[i + 1].pose(), smoothstep(local)));
        }
        start += w;
    }
    slides.last().map(Slide::pose)
}

/// Index of the slide whose caption is current at `offset`.
#[must_use]
pub fn slide_index(len: usize, offset: f32) -> Option<usize> {
    if len == 0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let raw = (offset.clamp(0.0, 1.0) * len as f32).floor() as usize;
    Some(raw.min(len - 1))
}
