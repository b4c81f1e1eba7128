#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::Geometry;
use crate::store::SceneStore;

fn make_object(position: Vec3) -> SceneObject {
    let mut store = SceneStore::empty();
    let id = store.add_object(Geometry::Box, Some(position), None);
    let mut obj = store.object(&id).unwrap().clone();
    obj.color = "#808080".into();
    obj
}

fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn lift_raises_and_scales() {
    let obj = make_object(Vec3::new(1.0, 0.5, 0.0));
    let partial = resolve_preset(HoverPreset::Lift, &obj);
    assert!(approx_eq(partial.hover_position.unwrap().unwrap(), Vec3::new(1.0, 0.8, 0.0)));
    assert!(approx_eq(partial.hover_scale.unwrap().unwrap(), Vec3::splat(1.05)));
    assert_eq!(partial.hover_rotation, Some(None));
    assert_eq!(partial.hover_preset, Some(Some(HoverPreset::Lift)));
}

#[test]
fn spin_adds_quarter_turn() {
    let obj = make_object(Vec3::ZERO);
    let partial = resolve_preset(HoverPreset::Spin, &obj);
    assert!(approx_eq(partial.hover_rotation.unwrap().unwrap(), Vec3::new(0.0, FRAC_PI_2, 0.0)));
}

#[test]
fn glow_brightens_color() {
    let obj = make_object(Vec3::ZERO);
    let partial = resolve_preset(HoverPreset::Glow, &obj);
    // 0x80 * 1.4 = 179.2 -> 0xb3
    assert_eq!(partial.hover_color, Some(Some("#b3b3b3".into())));
}

#[test]
fn glow_with_unparseable_color_skips_color() {
    let mut obj = make_object(Vec3::ZERO);
    obj.color = "purple".into();
    let partial = resolve_preset(HoverPreset::Glow, &obj);
    assert_eq!(partial.hover_color, Some(None));
    assert!(partial.hover_scale.unwrap().is_some());
}

#[test]
fn explode_pushes_outward_and_assigns_group() {
    let obj = make_object(Vec3::new(2.0, 0.0, 0.0));
    let partial = resolve_preset(HoverPreset::Explode, &obj);
    assert!(approx_eq(partial.hover_position.unwrap().unwrap(), Vec3::new(2.6, 0.2, 0.0)));
    assert_eq!(partial.hover_group, Some(Some(DEFAULT_EXPLODE_GROUP.into())));
}

#[test]
fn explode_keeps_existing_group() {
    let mut obj = make_object(Vec3::new(0.0, 0.0, -1.0));
    obj.hover_group = Some("logo".into());
    let partial = resolve_preset(HoverPreset::Explode, &obj);
    assert_eq!(partial.hover_group, Some(Some("logo".into())));
    assert!(approx_eq(partial.hover_position.unwrap().unwrap(), Vec3::new(0.0, 0.2, -1.6)));
}

#[test]
fn none_clears_every_hover_field() {
    let mut obj = make_object(Vec3::ZERO);
    obj.apply_partial(&resolve_preset(HoverPreset::Explode, &obj));
    assert!(obj.has_hover());
    obj.apply_partial(&resolve_preset(HoverPreset::None, &obj));
    assert!(!obj.has_hover());
    assert!(obj.hover_group.is_none());
    assert!(obj.hover_preset.is_none());
}

#[test]
fn switching_presets_drops_stale_fields() {
    let mut obj = make_object(Vec3::ZERO);
    obj.apply_partial(&resolve_preset(HoverPreset::Lift, &obj));
    obj.apply_partial(&resolve_preset(HoverPreset::Spin, &obj));
    assert!(obj.hover_position.is_none());
    assert!(obj.hover_scale.is_none());
    assert!(obj.hover_rotation.is_some());
}
