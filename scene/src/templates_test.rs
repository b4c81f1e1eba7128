use super::*;
use crate::store::SceneStore;

#[test]
fn every_name_resolves() {
    for name in NAMES {
        let template = by_name(name).unwrap();
        assert_eq!(template.name, name);
        assert!(!template.objects.is_empty());
    }
    assert!(by_name("nope").is_none());
}

#[test]
fn starter_has_text_and_sphere() {
    let objects = starter();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].geometry, Geometry::Text3d);
    assert_eq!(objects[1].geometry, Geometry::Sphere);
}

#[test]
fn epic_hero_satellites_share_group() {
    let objects = epic_hero();
    let grouped: Vec<_> = objects.iter().filter(|o| o.hover_group.as_deref() == Some("epic")).collect();
    assert_eq!(grouped.len(), 4);
    assert!(grouped.iter().all(|o| o.hover_preset == Some(HoverPreset::Explode)));
}

#[test]
fn loading_template_mints_unique_ids() {
    let mut store = SceneStore::empty();
    store.load_template(epic_hero());
    let mut ids: Vec<_> = store.scene().objects.iter().map(|o| o.id.clone()).collect();
    let len = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), len);
    assert!(ids.iter().all(|id| id.starts_with("obj-")));
}
