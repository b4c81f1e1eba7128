#![allow(clippy::float_cmp)]

use scene::doc::{CameraKeyframe, Slide};

use super::*;

fn slide(id: &str, z: f32) -> Slide {
    Slide {
        id: id.into(),
        name: id.into(),
        camera_position: [0.0, 0.0, z].into(),
        camera_target: [0.0, 0.0, 0.0].into(),
        text: None,
        duration: 1.0,
    }
}

fn options(frames: u32, scroll: ScrollDriver) -> PreviewOptions {
    PreviewOptions { frames, fps: 60.0, scroll }
}

#[test]
fn emits_one_frame_per_tick() {
    let frames = run(SceneSnapshot::default(), options(5, ScrollDriver::None));
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[4].frame, 4);
    assert!(frames.iter().all(|f| f.mode == "orbit"));
}

#[test]
fn sweep_lands_on_last_slide() {
    let snapshot = SceneSnapshot { slides: vec![slide("slide-1", 10.0), slide("slide-2", 4.0)], ..SceneSnapshot::default() };
    let frames = run(snapshot, options(30, ScrollDriver::Sweep));
    assert_eq!(frames[0].position, [0.0, 0.0, 10.0]);
    assert_eq!(frames[29].position, [0.0, 0.0, 4.0]);
    assert_eq!(frames[0].actions, vec!["SlideChanged(0)".to_owned()]);
    assert!(frames.iter().all(|f| f.mode == "scroll"));
}

#[test]
fn fixed_scroll_holds_midpoint() {
    let snapshot = SceneSnapshot { slides: vec![slide("slide-1", 10.0), slide("slide-2", 4.0)], ..SceneSnapshot::default() };
    let frames = run(snapshot, options(3, ScrollDriver::Fixed(0.5)));
    assert!((frames[2].position[2] - 7.0).abs() < 1e-4);
}

#[test]
fn recording_plays_back() {
    let snapshot = SceneSnapshot {
        camera_recording: vec![
            CameraKeyframe { time: 0.0, position: [0.0, 0.0, 10.0].into(), target: [0.0, 0.0, 0.0].into() },
            CameraKeyframe { time: 1.0, position: [10.0, 0.0, 0.0].into(), target: [0.0, 0.0, 0.0].into() },
        ],
        ..SceneSnapshot::default()
    };
    let frames = run(snapshot, options(10, ScrollDriver::None));
    assert!(frames.iter().all(|f| f.mode == "playback"));
    assert_ne!(frames[0].position, frames[9].position);
}

#[test]
fn frames_serialize_compactly() {
    let frame = PreviewFrame { frame: 1, mode: "orbit", position: [1.0, 2.0, 3.0], target: [0.0; 3], actions: Vec::new() };
    let json = serde_json::to_string(&frame).unwrap();
    assert_eq!(json, r#"{"frame":1,"mode":"orbit","position":[1.0,2.0,3.0],"target":[0.0,0.0,0.0]}"#);
}
