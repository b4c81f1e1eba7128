#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::consts::RECORDING_TOLERANCE;

fn slide(id: &str, position: [f32; 3], target: [f32; 3], duration: f32) -> Slide {
    Slide {
        id: id.into(),
        name: id.into(),
        camera_position: Vec3::from_array(position),
        camera_target: Vec3::from_array(target),
        text: None,
        duration,
    }
}

fn two_slides() -> Vec<Slide> {
    vec![slide("slide-1", [0.0, 0.0, 10.0], [0.0, 0.0, 0.0], 1.0), slide("slide-2", [10.0, 2.0, 0.0], [0.0, 1.0, 0.0], 1.0)]
}

fn shared_with_viewport() -> SharedRefs {
    let mut shared = SharedRefs::default();
    shared.camera.viewport_width = 800.0;
    shared.camera.viewport_height = 600.0;
    shared
}

fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// =============================================================
// Orbit controls
// =============================================================

#[test]
fn orbit_round_trips_pose() {
    let pose = CameraPose::new(Vec3::new(5.0, 4.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
    let controls = OrbitControls::from_pose(pose);
    assert!(approx_eq(controls.pose().position, pose.position));
    assert_eq!(controls.pose().target, pose.target);
}

#[test]
fn orbit_rotate_keeps_radius_and_clamps_poles() {
    let mut controls = OrbitControls::from_pose(CameraPose::default());
    let radius = controls.radius;
    controls.rotate(Point::new(120.0, 0.0), 600.0);
    assert!((controls.pose().position.length() - radius).abs() < 1e-4);
    controls.rotate(Point::new(0.0, 100_000.0), 600.0);
    assert!(controls.phi >= ORBIT_POLAR_MARGIN);
}

#[test]
fn dolly_clamps_distance() {
    let mut controls = OrbitControls::from_pose(CameraPose::default());
    for _ in 0..500 {
        controls.dolly(-500.0);
    }
    assert_eq!(controls.radius, ORBIT_MIN_DISTANCE);
    controls.dolly(100.0);
    assert!(controls.radius > ORBIT_MIN_DISTANCE);
}

// =============================================================
// Scroll mapping
// =============================================================

#[test]
fn scroll_midpoint_with_equal_weights() {
    let slides = two_slides();
    let pose = scroll_pose(&slides, 0.5).unwrap();
    let mid = slides[0].pose().lerp(slides[1].pose(), 0.5);
    assert!(approx_eq(pose.position, mid.position));
    assert!(approx_eq(pose.target, mid.target));
}

#[test]
fn scroll_ends_hit_slides_exactly() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let mut v = || Vec3::new(rng.random_range(-9.0..9.0), rng.random_range(-9.0..9.0), rng.random_range(-9.0..9.0));
        let slides = vec![
            Slide { camera_position: v(), camera_target: v(), ..slide("a", [0.0; 3], [0.0; 3], 1.0) },
            Slide { camera_position: v(), camera_target: v(), ..slide("b", [0.0; 3], [0.0; 3], 1.0) },
        ];
        assert_eq!(scroll_pose(&slides, 0.0).unwrap(), slides[0].pose());
        assert_eq!(scroll_pose(&slides, 1.0).unwrap(), slides[1].pose());
    }
}

#[test]
fn scroll_segment_boundary_lands_on_middle_slide() {
    let mut slides = two_slides();
    slides.push(slide("slide-3", [0.0, 5.0, 0.0], [0.0, 0.0, 0.0], 1.0));
    slides[0].duration = 3.0;
    // Weights 3 and 1: the middle slide sits at 3/4 of the range.
    assert_eq!(scroll_pose(&slides, 0.75).unwrap(), slides[1].pose());
}

#[test]
fn single_slide_pins_camera() {
    let slides = vec![slide("slide-1", [1.0, 2.0, 3.0], [0.0; 3], 1.0)];
    for offset in [0.0, 0.3, 1.0] {
        assert_eq!(scroll_pose(&slides, offset).unwrap(), slides[0].pose());
    }
    assert!(scroll_pose(&[], 0.5).is_none());
}

#[test]
fn out_of_range_offsets_clamp() {
    let slides = two_slides();
    assert_eq!(scroll_pose(&slides, -3.0).unwrap(), slides[0].pose());
    assert_eq!(scroll_pose(&slides, 7.0).unwrap(), slides[1].pose());
    assert_eq!(scroll_pose(&slides, f32::NAN).unwrap(), slides[0].pose());
}

#[test]
fn scroll_offset_stays_clamped() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut shared = SharedRefs::default();
    for _ in 0..1000 {
        shared.scroll_by(rng.random_range(-0.5..0.5));
        assert!((0.0..=1.0).contains(&shared.scroll_offset));
    }
    shared.scroll_by(f32::INFINITY);
    assert!((0.0..=1.0).contains(&shared.scroll_offset));
}

#[test]
fn slide_index_floors_and_clamps() {
    assert_eq!(slide_index(0, 0.5), None);
    assert_eq!(slide_index(3, 0.0), Some(0));
    assert_eq!(slide_index(3, 0.5), Some(1));
    assert_eq!(slide_index(3, 1.0), Some(2));
}

// =============================================================
// Flying
// =============================================================

#[test]
fn flight_snaps_on_arrival_and_resyncs_orbit() {
    let slides = two_slides();
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Editor, shared.camera.pose());
    controller.fly_to(&slides[1]);
    assert!(!controller.orbit_enabled());

    let mut arrived = false;
    for _ in 0..500 {
        let events = controller.frame(0.016, &slides, &mut shared);
        if events.contains(&CameraEvent::Arrived("slide-2".into())) {
            arrived = true;
            break;
        }
    }
    assert!(arrived);
    assert_eq!(shared.camera.pose(), slides[1].pose());
    assert_eq!(controller.mode(), &CameraMode::Orbit);
    assert_eq!(controller.orbit().target, slides[1].camera_target);

    // Orbit state matches the snapped pose, so a zero drag does not jump.
    controller.on_orbit_drag(Point::new(0.0, 0.0), &mut shared);
    assert!(approx_eq(shared.camera.position, slides[1].camera_position));
}

#[test]
fn flight_ignores_orbit_input() {
    let slides = two_slides();
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Editor, shared.camera.pose());
    controller.fly_to(&slides[0]);
    let before = shared.camera.pose();
    controller.on_orbit_drag(Point::new(50.0, 0.0), &mut shared);
    controller.on_wheel(100.0, &mut shared);
    assert_eq!(shared.camera.pose(), before);
}

#[test]
fn cancel_flight_keeps_current_pose() {
    let slides = two_slides();
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Editor, shared.camera.pose());
    controller.fly_to(&slides[0]);
    controller.frame(0.016, &slides, &mut shared);
    controller.frame(0.016, &slides, &mut shared);
    let reached = shared.camera.pose();
    controller.cancel_flight(&shared);
    assert_eq!(controller.mode(), &CameraMode::Orbit);
    controller.frame(0.016, &slides, &mut shared);
    assert_eq!(shared.camera.pose(), reached);
}

#[test]
fn editor_never_scroll_binds() {
    let slides = two_slides();
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Editor, shared.camera.pose());
    controller.frame(0.016, &slides, &mut shared);
    assert_eq!(controller.mode(), &CameraMode::Orbit);
}

// =============================================================
// Scroll-bound embed
// =============================================================

#[test]
fn embed_with_two_slides_follows_scroll() {
    let slides = two_slides();
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Embed, shared.camera.pose());
    shared.set_scroll(1.0);
    let events = controller.frame(0.016, &slides, &mut shared);
    assert_eq!(controller.mode(), &CameraMode::ScrollBound);
    assert_eq!(shared.camera.pose(), slides[1].pose());
    assert_eq!(events, vec![CameraEvent::SlideChanged(1)]);

    // Same index next frame: no event.
    assert!(controller.frame(0.016, &slides, &mut shared).is_empty());
}

#[test]
fn embed_pointer_drift_is_smoothed() {
    let slides = two_slides();
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Embed, shared.camera.pose());
    shared.pointer = Some(Point::new(1.0, 0.0));
    controller.frame(0.016, &slides, &mut shared);
    let first = shared.camera_mouse_offset.x;
    assert!(first > 0.0 && first < CAMERA_PARALLAX_INTENSITY);
    for _ in 0..400 {
        controller.frame(0.016, &slides, &mut shared);
    }
    assert!((shared.camera_mouse_offset.x - CAMERA_PARALLAX_INTENSITY).abs() < 1e-3);
}

#[test]
fn embed_with_one_slide_stays_orbit() {
    let slides = vec![slide("slide-1", [1.0, 1.0, 1.0], [0.0; 3], 1.0)];
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Embed, shared.camera.pose());
    controller.frame(0.016, &slides, &mut shared);
    assert_eq!(controller.mode(), &CameraMode::Orbit);
}

// =============================================================
// Recording / playback
// =============================================================

#[test]
fn recording_captures_orbit_moves() {
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Editor, shared.camera.pose());
    controller.start_recording(&shared);
    assert!(controller.orbit_enabled());
    for _ in 0..30 {
        controller.on_orbit_drag(Point::new(10.0, 0.0), &mut shared);
        controller.frame(0.016, &[], &mut shared);
    }
    let keyframes = controller.stop_recording(RECORDING_TOLERANCE).unwrap();
    assert!(keyframes.len() >= 2);
    assert_eq!(controller.mode(), &CameraMode::Orbit);
}

#[test]
fn stop_without_recording_is_none() {
    let mut controller = CameraController::new(Context::Editor, CameraPose::default());
    assert!(controller.stop_recording(RECORDING_TOLERANCE).is_none());
    assert_eq!(controller.mode(), &CameraMode::Orbit);
}

#[test]
fn playback_requires_two_keyframes() {
    let mut controller = CameraController::new(Context::Editor, CameraPose::default());
    let one = vec![CameraKeyframe { time: 0.0, position: Vec3::ONE, target: Vec3::ZERO }];
    assert!(!controller.start_playback(one, true));
}

#[test]
fn one_shot_playback_finishes_at_last_keyframe() {
    let mut shared = shared_with_viewport();
    let mut controller = CameraController::new(Context::Editor, shared.camera.pose());
    let keyframes = vec![
        CameraKeyframe { time: 0.0, position: Vec3::new(1.0, 0.0, 0.0), target: Vec3::ZERO },
        CameraKeyframe { time: 0.1, position: Vec3::new(2.0, 0.0, 0.0), target: Vec3::Y },
    ];
    assert!(controller.start_playback(keyframes, false));
    let mut finished = false;
    for _ in 0..20 {
        if controller.frame(0.016, &[], &mut shared).contains(&CameraEvent::PlaybackFinished) {
            finished = true;
            break;
        }
    }
    assert!(finished);
    assert_eq!(shared.camera.position, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(controller.orbit().target, Vec3::Y);
}
