#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;

fn make_item(id: &str, x: f64, y: f64, w: f64, h: f64) -> Item {
    Item::new(id, ItemKind::File, x, y, w, h)
}

fn ids(scene: &Scene) -> Vec<&str> {
    scene.iter().map(|item| item.id.as_str()).collect()
}

// =============================================================
// ItemId
// =============================================================

#[test]
fn item_id_from_str_and_string() {
    let a = ItemId::from("file:///a.rs");
    let b = ItemId::from(String::from("file:///a.rs"));
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "file:///a.rs");
    assert_eq!(a.to_string(), "file:///a.rs");
}

#[test]
fn item_id_random_is_unique() {
    let a = ItemId::random();
    let b = ItemId::random();
    assert_ne!(a, b);
    assert_eq!(a.as_str().len(), 36);
}

#[test]
fn item_id_serializes_as_plain_string() {
    let json = serde_json::to_string(&ItemId::new("n1")).unwrap();
    assert_eq!(json, "\"n1\"");
}

// =============================================================
// ItemKind serde
// =============================================================

#[test]
fn kind_serde_all_variants() {
    let cases = [
        (ItemKind::File, "\"file\""),
        (ItemKind::Folder, "\"folder\""),
        (ItemKind::Connection, "\"connection\""),
        (ItemKind::Note, "\"note\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        let back: ItemKind = serde_json::from_str(expected).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_deserialize_unknown_fails() {
    assert!(serde_json::from_str::<ItemKind>("\"widget\"").is_err());
}

// =============================================================
// Item
// =============================================================

#[test]
fn item_deserialize_without_payload() {
    let item: Item =
        serde_json::from_value(json!({"id": "a", "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0, "kind": "note"}))
            .unwrap();
    assert_eq!(item.id, ItemId::new("a"));
    assert_eq!(item.kind, ItemKind::Note);
    assert!(item.payload.is_null());
}

#[test]
fn item_keeps_payload_verbatim() {
    let payload = json!({"name": "main.rs", "uri": "file:///src/main.rs", "size": 42});
    let item = make_item("a", 0.0, 0.0, 10.0, 10.0).with_payload(payload.clone());
    assert_eq!(item.payload, payload);
}

#[test]
fn item_bounds_and_center() {
    let item = make_item("a", 10.0, 20.0, 100.0, 60.0);
    assert_eq!(item.bounds(), Bounds::from_rect(10.0, 20.0, 100.0, 60.0));
    assert_eq!(item.center(), Point::new(60.0, 50.0));
}

#[test]
fn item_is_finite_checks_geometry() {
    assert!(make_item("a", -5.0, 0.0, 10.0, 0.0).is_finite());
    assert!(!make_item("a", f64::NAN, 0.0, 10.0, 10.0).is_finite());
    assert!(!make_item("a", 0.0, 0.0, f64::INFINITY, 10.0).is_finite());
    assert!(!make_item("a", 0.0, 0.0, 10.0, f64::NEG_INFINITY).is_finite());
}

#[test]
fn item_contains_inclusive_edges() {
    let item = make_item("a", 10.0, 10.0, 20.0, 20.0);
    assert!(item.contains(Point::new(15.0, 15.0)));
    assert!(item.contains(Point::new(10.0, 30.0)));
    assert!(!item.contains(Point::new(5.0, 5.0)));
}

#[test]
fn item_zero_size_contains_its_corner() {
    let item = make_item("a", 10.0, 10.0, 0.0, 0.0);
    assert!(item.contains(Point::new(10.0, 10.0)));
    assert!(!item.contains(Point::new(10.5, 10.0)));
}

// =============================================================
// Payload
// =============================================================

#[test]
fn payload_name_present() {
    let value = json!({"name": "lib.rs"});
    assert_eq!(Payload::new(&value).name(), Some("lib.rs"));
}

#[test]
fn payload_name_missing_or_empty() {
    for value in [json!(null), json!({}), json!({"name": ""}), json!({"name": 7})] {
        assert_eq!(Payload::new(&value).name(), None, "{value}");
    }
}

// =============================================================
// Scene
// =============================================================

#[test]
fn new_scene_is_empty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert!(scene.items().is_empty());
}

#[test]
fn insert_preserves_order() {
    let mut scene = Scene::new();
    for id in ["c", "a", "b"] {
        assert!(scene.insert(make_item(id, 0.0, 0.0, 1.0, 1.0)).is_none());
    }
    assert_eq!(ids(&scene), ["c", "a", "b"]);
    assert_eq!(scene.len(), 3);
}

#[test]
fn insert_existing_id_replaces_in_place() {
    let mut scene = Scene::new();
    scene.insert(make_item("a", 0.0, 0.0, 1.0, 1.0));
    scene.insert(make_item("b", 0.0, 0.0, 1.0, 1.0));

    let previous = scene.insert(make_item("a", 50.0, 50.0, 5.0, 5.0));

    assert_eq!(previous.map(|item| item.x), Some(0.0));
    assert_eq!(ids(&scene), ["a", "b"]);
    assert_eq!(scene.get(&ItemId::new("a")).map(|item| item.x), Some(50.0));
}

#[test]
fn get_and_contains() {
    let mut scene = Scene::new();
    scene.insert(make_item("a", 1.0, 2.0, 3.0, 4.0));
    assert!(scene.contains(&ItemId::new("a")));
    assert!(!scene.contains(&ItemId::new("z")));
    assert_eq!(scene.get(&ItemId::new("a")).map(|item| item.y), Some(2.0));
    assert!(scene.get(&ItemId::new("z")).is_none());
}

#[test]
fn remove_reindexes_tail() {
    let mut scene = Scene::new();
    for id in ["a", "b", "c", "d"] {
        scene.insert(make_item(id, 0.0, 0.0, 1.0, 1.0));
    }

    let removed = scene.remove(&ItemId::new("b"));

    assert_eq!(removed.map(|item| item.id), Some(ItemId::new("b")));
    assert_eq!(ids(&scene), ["a", "c", "d"]);
    assert_eq!(scene.get(&ItemId::new("c")).map(|item| item.id.as_str()), Some("c"));
    assert_eq!(scene.get(&ItemId::new("d")).map(|item| item.id.as_str()), Some("d"));
}

#[test]
fn remove_missing_is_none() {
    let mut scene = Scene::new();
    scene.insert(make_item("a", 0.0, 0.0, 1.0, 1.0));
    assert!(scene.remove(&ItemId::new("zzz")).is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn insert_after_remove_goes_on_top() {
    let mut scene = Scene::new();
    for id in ["a", "b"] {
        scene.insert(make_item(id, 0.0, 0.0, 1.0, 1.0));
    }
    scene.remove(&ItemId::new("a"));
    scene.insert(make_item("a", 0.0, 0.0, 1.0, 1.0));
    assert_eq!(ids(&scene), ["b", "a"]);
}

#[test]
fn clear_empties_scene() {
    let mut scene = Scene::new();
    scene.insert(make_item("a", 0.0, 0.0, 1.0, 1.0));
    scene.clear();
    assert!(scene.is_empty());
    assert!(!scene.contains(&ItemId::new("a")));
}

#[test]
fn load_replaces_contents() {
    let mut scene = Scene::new();
    scene.insert(make_item("old", 0.0, 0.0, 1.0, 1.0));

    scene.load(vec![
        make_item("x", 0.0, 0.0, 1.0, 1.0),
        make_item("y", 0.0, 0.0, 1.0, 1.0),
        make_item("x", 9.0, 0.0, 1.0, 1.0),
    ]);

    assert_eq!(ids(&scene), ["x", "y"]);
    assert!(!scene.contains(&ItemId::new("old")));
    assert_eq!(scene.get(&ItemId::new("x")).map(|item| item.x), Some(9.0));
}

#[test]
fn scene_iterates_by_reference() {
    let mut scene = Scene::new();
    scene.insert(make_item("a", 0.0, 0.0, 1.0, 1.0));
    let mut count = 0;
    for item in &scene {
        assert_eq!(item.id.as_str(), "a");
        count += 1;
    }
    assert_eq!(count, 1);
}
