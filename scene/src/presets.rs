//! Hover presets resolved against an object's current rest pose.
//!
//! A preset is a shortcut for the four hover fields. Applying one writes all
//! of them (fields the preset does not use are cleared) so switching presets
//! never leaves a stale field from the previous one behind.

#[cfg(test)]
#[path = "presets_test.rs"]
mod presets_test;

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::doc::{HoverPreset, PartialSceneObject, Rgb, SceneObject};

/// Color multiplier for `glow`.
pub const GLOW_BRIGHTEN: f32 = 1.4;

/// Horizontal push distance for `explode`.
pub const EXPLODE_DISTANCE: f32 = 0.6;

/// Group name given to an exploding object that has none yet.
pub const DEFAULT_EXPLODE_GROUP: &str = "explode";

/// Sparse update that applies `preset` to `obj`.
#[must_use]
pub fn resolve_preset(preset: HoverPreset, obj: &SceneObject) -> PartialSceneObject {
    let p = obj.position;
    let r = obj.rotation;
    let s = obj.scale;

    let mut position = None;
    let mut rotation = None;
    let mut scale = None;
    let mut color = None;
    let mut group = obj.hover_group.clone();

    match preset {
        HoverPreset::None => group = None,
        HoverPreset::Lift => {
            position = Some(p + Vec3::new(0.0, 0.3, 0.0));
            scale = Some(s * 1.05);
        }
        HoverPreset::Grow => scale = Some(s * 1.2),
        HoverPreset::Spin => rotation = Some(r + Vec3::new(0.0, FRAC_PI_2, 0.0)),
        HoverPreset::Tilt => rotation = Some(r + Vec3::new(0.15, 0.15, 0.0)),
        HoverPreset::Glow => {
            color = Rgb::parse_hex(&obj.color).map(|c| c.brighten(GLOW_BRIGHTEN).to_hex());
            scale = Some(s * 1.05);
        }
        HoverPreset::Explode => {
            // An object on the vertical axis only rises.
            let dir = Vec3::new(p.x, 0.0, p.z).try_normalize().unwrap_or(Vec3::ZERO);
            position = Some(p + dir * EXPLODE_DISTANCE + Vec3::new(0.0, 0.2, 0.0));
            rotation = Some(r + Vec3::new(0.1, 0.2, 0.1));
            group = group.or_else(|| Some(DEFAULT_EXPLODE_GROUP.to_owned()));
        }
    }

    PartialSceneObject {
        hover_position: Some(position),
        hover_rotation: Some(rotation),
        hover_scale: Some(scale),
        hover_color: Some(color),
        hover_group: Some(group),
        hover_preset: Some((preset != HoverPreset::None).then_some(preset)),
        ..PartialSceneObject::default()
    }
}
