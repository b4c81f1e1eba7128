//! Bundled scenes.
//!
//! Template object ids are placeholders; [`crate::store::SceneStore::load_template`]
//! mints fresh ids when a template is loaded.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use glam::Vec3;

use crate::doc::{Animation, Geometry, HoverPreset, Material, SceneObject};
use crate::presets::resolve_preset;
use crate::store::default_object;

/// A named set of objects plus an optional environment preset.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: &'static str,
    pub environment: Option<&'static str>,
    pub objects: Vec<SceneObject>,
}

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 3] = ["starter", "glass-hero", "epic-hero"];

/// Look up a bundled template.
#[must_use]
pub fn by_name(name: &str) -> Option<Template> {
    match name {
        "starter" => Some(Template { name: "starter", environment: None, objects: starter() }),
        "glass-hero" => Some(Template { name: "glass-hero", environment: Some("city"), objects: glass_hero() }),
        "epic-hero" => Some(Template { name: "epic-hero", environment: Some("sunset"), objects: epic_hero() }),
        _ => None,
    }
}

/// The scene a fresh editor opens with.
#[must_use]
pub fn starter() -> Vec<SceneObject> {
    let mut text = object("Text", Geometry::Text3d, Vec3::new(-0.6, 0.8, 0.0));
    text.text = Some("Hola".into());

    let mut sphere = object("Sphere", Geometry::Sphere, Vec3::new(1.2, 0.6, 0.0));
    sphere.animation = Animation::Float;
    vec![text, sphere]
}

/// Glass torus over a wobbling sphere with a hover group.
#[must_use]
pub fn glass_hero() -> Vec<SceneObject> {
    let mut torus = object("Glass Ring", Geometry::Torus, Vec3::new(0.0, 1.0, 0.0));
    torus.material = Material::Transmissive;
    torus.color = "#ffffff".into();
    torus.roughness = 0.05;
    torus.scale = Vec3::splat(1.6);
    torus.animation = Animation::Rotate;

    let mut core = object("Core", Geometry::Sphere, Vec3::new(0.0, 1.0, 0.0));
    core.material = Material::Wobble;
    core.color = "#ec4899".into();
    core.scale = Vec3::splat(0.6);
    core.parallax_intensity = 1.0;

    let mut title = object("Title", Geometry::Text3d, Vec3::new(-1.2, -0.4, 0.0));
    title.text = Some("tresde".into());
    title.material = Material::Standard;
    title.metalness = 0.8;
    title.roughness = 0.2;
    let lift = resolve_preset(HoverPreset::Lift, &title);
    title.apply_partial(&lift);

    vec![torus, core, title]
}

/// Exploding cluster of primitives around a distorted centerpiece.
#[must_use]
pub fn epic_hero() -> Vec<SceneObject> {
    let mut center = object("Center", Geometry::Dodecahedron, Vec3::new(0.0, 1.2, 0.0));
    center.material = Material::Distort;
    center.color = "#f59e0b".into();
    center.scale = Vec3::splat(1.4);
    center.draggable = true;

    let satellites = [
        ("Shard A", Geometry::Box, Vec3::new(1.6, 1.0, 0.4), "#f43f5e"),
        ("Shard B", Geometry::RoundedBox, Vec3::new(-1.5, 1.3, -0.2), "#fb923c"),
        ("Shard C", Geometry::Sphere, Vec3::new(0.3, 0.6, 1.5), "#facc15"),
        ("Coin", Geometry::Cylinder, Vec3::new(-0.4, 1.9, -1.3), "#fde68a"),
    ];
    let mut objects = vec![center];
    for (name, geometry, position, color) in satellites {
        let mut obj = object(name, geometry, position);
        obj.color = color.into();
        obj.metalness = 0.6;
        obj.hover_group = Some("epic".into());
        let explode = resolve_preset(HoverPreset::Explode, &obj);
        obj.apply_partial(&explode);
        objects.push(obj);
    }

    let mut orbiter = object("Moon", Geometry::Sphere, Vec3::new(2.0, 1.2, 0.0));
    orbiter.scale = Vec3::splat(0.3);
    orbiter.animation = Animation::Orbit;
    orbiter.orbit_radius = Some(2.4);
    orbiter.orbit_speed = Some(0.6);
    orbiter.draggable = true;
    objects.push(orbiter);
    objects
}

fn object(name: &str, geometry: Geometry, position: Vec3) -> SceneObject {
    let mut obj = default_object(geometry, String::new(), 0);
    obj.name = name.to_owned();
    obj.position = position;
    obj
}
