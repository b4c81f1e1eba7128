#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::doc::Animation;
use crate::store::SceneStore;

fn make_object(geometry: Geometry) -> SceneObject {
    let mut store = SceneStore::empty();
    let id = store.add_object(geometry, None, None);
    store.object(&id).unwrap().clone()
}

fn bare_object(geometry: Geometry, material: Material) -> SceneObject {
    let mut obj = make_object(geometry);
    obj.material = material;
    obj.transmission = None;
    obj.thickness = None;
    obj.distort = None;
    obj.speed = None;
    obj
}

// =============================================================
// Primitives
// =============================================================

#[test]
fn every_geometry_resolves() {
    for geometry in Geometry::ALL {
        let spec = resolve(&make_object(geometry));
        let matches_geometry = match (geometry, &spec.primitive) {
            (Geometry::Box, Primitive::Box { .. })
            | (Geometry::Sphere, Primitive::Sphere { .. })
            | (Geometry::Torus, Primitive::Torus { .. })
            | (Geometry::RoundedBox, Primitive::RoundedBox { .. })
            | (Geometry::Dodecahedron, Primitive::Dodecahedron { .. })
            | (Geometry::Cylinder, Primitive::Cylinder { .. })
            | (Geometry::Text3d, Primitive::Text { .. })
            | (Geometry::ExternalModel, Primitive::Model { .. }) => true,
            _ => false,
        };
        assert!(matches_geometry, "{geometry:?} resolved to {:?}", spec.primitive);
    }
}

#[test]
fn sphere_and_coin_parameters() {
    assert_eq!(
        primitive(&make_object(Geometry::Sphere)),
        Primitive::Sphere { radius: 0.6, width_segments: 32, height_segments: 32 }
    );
    assert_eq!(
        primitive(&make_object(Geometry::Cylinder)),
        Primitive::Cylinder { radius_top: 0.5, radius_bottom: 0.5, height: 0.1, radial_segments: 64 }
    );
}

#[test]
fn empty_text_uses_default() {
    let mut obj = make_object(Geometry::Text3d);
    obj.text = Some(String::new());
    let Primitive::Text { text, font, .. } = primitive(&obj) else {
        panic!("expected text primitive");
    };
    assert_eq!(text, DEFAULT_TEXT);
    assert_eq!(font, FONT_PATH);
}

#[test]
fn model_format_from_url() {
    assert_eq!(ModelFormat::from_url("/a/b/Chair.OBJ"), ModelFormat::Obj);
    assert_eq!(ModelFormat::from_url("/a/b/chair.glb"), ModelFormat::Gltf);
    assert_eq!(ModelFormat::Obj.mime(), "text/plain");
    assert_eq!(ModelFormat::Gltf.mime(), "model/gltf-binary");
}

#[test]
fn model_without_url_is_gltf_placeholder() {
    let obj = make_object(Geometry::ExternalModel);
    assert_eq!(primitive(&obj), Primitive::Model { url: None, format: ModelFormat::Gltf, animation: None });
}

// =============================================================
// Materials
// =============================================================

#[test]
fn transmission_defaults_when_absent() {
    let spec = surface(&bare_object(Geometry::Sphere, Material::Transmissive));
    assert_eq!(spec.shading, Shading::Transmission { transmission: 0.9, thickness: 0.5 });
}

#[test]
fn wobble_factor_comes_from_distort() {
    let mut obj = bare_object(Geometry::Box, Material::Wobble);
    obj.distort = Some(0.7);
    assert_eq!(surface(&obj).shading, Shading::Wobble { factor: 0.7, speed: DEFAULT_SPEED });
}

#[test]
fn distort_defaults() {
    let spec = surface(&bare_object(Geometry::Box, Material::Distort));
    assert_eq!(spec.shading, Shading::Distort { distort: 0.4, speed: 2.0 });
}

#[test]
fn standard_keeps_surface_fields() {
    let mut obj = make_object(Geometry::Box);
    obj.texture_url = Some("/t.png".into());
    let spec = surface(&obj);
    assert_eq!(spec.shading, Shading::Standard);
    assert_eq!(spec.color, DEFAULT_COLOR);
    assert_eq!(spec.texture_url.as_deref(), Some("/t.png"));
}

// =============================================================
// Baked defaults
// =============================================================

#[test]
fn baked_defaults_resolve_identically() {
    for material in [Material::Standard, Material::Transmissive, Material::Distort, Material::Wobble] {
        let obj = bare_object(Geometry::Torus, material);
        let baked = with_resolved_defaults(&obj);
        assert_eq!(resolve(&obj), resolve(&baked));
        assert_eq!(baked.transmission, Some(DEFAULT_TRANSMISSION));
    }
}

#[test]
fn baked_orbit_parameters_only_for_orbit() {
    let mut obj = make_object(Geometry::Box);
    assert!(with_resolved_defaults(&obj).orbit_radius.is_none());
    obj.animation = Animation::Orbit;
    let baked = with_resolved_defaults(&obj);
    assert_eq!(baked.orbit_radius, Some(DEFAULT_ORBIT_RADIUS));
    assert_eq!(baked.orbit_speed, Some(DEFAULT_ORBIT_SPEED));
}
