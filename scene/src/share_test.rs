#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use glam::Vec3;

use super::*;
use crate::doc::{Geometry, Slide};
use crate::store::default_object;

fn sample() -> SceneSnapshot {
    let mut textured = default_object(Geometry::Box, "obj-1".into(), 1);
    textured.texture_url = Some("https://cdn.example/wood.png".into());
    let mut inlined = default_object(Geometry::ExternalModel, "obj-2".into(), 2);
    inlined.model_url = Some("data:model/gltf-binary;base64,AAAA".into());
    let mut remote = default_object(Geometry::ExternalModel, "obj-3".into(), 3);
    remote.model_url = Some("https://cdn.example/duck.glb".into());

    SceneSnapshot {
        objects: vec![textured, inlined, remote],
        slides: vec![Slide {
            id: "slide-1".into(),
            name: "Intro".into(),
            camera_position: Vec3::new(1.0, 2.0, 3.0),
            camera_target: Vec3::ZERO,
            text: Some("Hello".into()),
            duration: 2.0,
        }],
        environment: "sunset".into(),
        ..SceneSnapshot::default()
    }
}

// =============================================================
// Stripping
// =============================================================

#[test]
fn strip_removes_textures_and_inlined_models() {
    let out = stripped(&sample());
    assert!(out.objects.iter().all(|o| o.texture_url.is_none()));
    assert_eq!(out.objects[1].model_url, None);
    assert_eq!(out.objects[2].model_url.as_deref(), Some("https://cdn.example/duck.glb"));
}

#[test]
fn strip_leaves_input_untouched() {
    let snapshot = sample();
    let _stripped = stripped(&snapshot);
    assert!(snapshot.objects[0].texture_url.is_some());
}

// =============================================================
// Links
// =============================================================

#[test]
fn link_decodes_to_stripped_snapshot() {
    let snapshot = sample();
    let url = share_url("https://tresde.app/", &snapshot).unwrap();
    assert!(url.starts_with("https://tresde.app/embed#scene="));

    let decoded = decode_url(&url).unwrap();
    assert_eq!(decoded, stripped(&snapshot));
    assert_eq!(decoded.slides[0].text.as_deref(), Some("Hello"));
    assert_eq!(decoded.environment, "sunset");
}

#[test]
fn payload_is_url_safe() {
    let payload = encode(&sample()).unwrap();
    assert!(payload.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[test]
fn hash_without_prefix_is_rejected() {
    assert!(matches!(decode_fragment("#other=abc"), Err(ShareError::MissingPrefix)));
    assert!(matches!(decode_url("https://tresde.app/embed"), Err(ShareError::MissingPrefix)));
}

#[test]
fn garbage_payload_is_an_error() {
    assert!(matches!(decode_fragment("#scene=!!!"), Err(ShareError::Base64(_))));
    // Valid base64, not deflate.
    assert!(decode_fragment("#scene=aGVsbG8").is_err());
}

#[test]
fn non_object_json_is_an_error() {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"[1,2,3]").unwrap();
    let payload = URL_SAFE_NO_PAD.encode(encoder.finish().unwrap());
    assert!(matches!(decode(&payload), Err(ShareError::Snapshot(SnapshotError::NotAnObject))));
}

#[test]
fn partial_json_degrades_to_defaults() {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"objects":[],"environment":"night"}"#).unwrap();
    let payload = URL_SAFE_NO_PAD.encode(encoder.finish().unwrap());
    let decoded = decode(&payload).unwrap();
    assert_eq!(decoded.environment, "night");
    assert_eq!(decoded.camera_position, SceneSnapshot::default().camera_position);
}
