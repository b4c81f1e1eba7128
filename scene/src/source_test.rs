use super::*;
use crate::doc::{Geometry, Material};
use crate::store::SceneStore;

fn scene_with(geometry: Geometry, material: Material) -> SceneSnapshot {
    let mut store = SceneStore::empty();
    let id = store.add_object(geometry, None, None);
    store.update_object(&id, &crate::doc::PartialSceneObject { material: Some(material), ..Default::default() });
    store.snapshot()
}

#[test]
fn empty_scene_is_a_component() {
    let src = generate(&SceneSnapshot::default());
    assert!(src.contains("export default function Scene()"));
    assert!(src.contains("<Environment preset=\"city\" />"));
    assert!(src.contains("fov: 50"));
    assert!(src.trim_end().ends_with('}'));
}

#[test]
fn transmission_uses_resolved_defaults() {
    let mut snapshot = scene_with(Geometry::Sphere, Material::Transmissive);
    snapshot.objects[0].transmission = None;
    let src = generate(&snapshot);
    assert!(src.contains("transmission={0.9}"), "{src}");
    assert!(src.contains("<sphereGeometry args={[0.6, 32, 32]} />"));
}

#[test]
fn wobble_factor_matches_resolver() {
    let src = generate(&scene_with(Geometry::Box, Material::Wobble));
    assert!(src.contains("factor={0.4}"));
    assert!(src.contains("speed={2}"));
}

#[test]
fn float_wraps_mesh() {
    let mut snapshot = scene_with(Geometry::Torus, Material::Standard);
    snapshot.objects[0].animation = Animation::Float;
    let src = generate(&snapshot);
    let open = src.find("<Float").unwrap();
    let mesh = src.find("<mesh").unwrap();
    let close = src.find("</Float>").unwrap();
    assert!(open < mesh && mesh < close);
}

#[test]
fn text_is_escaped() {
    let mut snapshot = scene_with(Geometry::Text3d, Material::Standard);
    snapshot.objects[0].text = Some("a{b}".into());
    let src = generate(&snapshot);
    assert!(src.contains("a{\"{\"}b{\"}\"}"));
    assert!(src.contains("font=\"/fonts/inter_bold.json\""));
}

#[test]
fn positions_use_two_decimals() {
    let snapshot = scene_with(Geometry::Box, Material::Standard);
    let src = generate(&snapshot);
    assert!(src.contains("position={[0.00, 0.50, 0.00]}"));
}
