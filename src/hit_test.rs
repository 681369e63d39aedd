#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::scene::ItemKind;

fn make_item(id: &str, x: f64, y: f64, w: f64, h: f64) -> Item {
    Item::new(id, ItemKind::Folder, x, y, w, h)
}

fn scene_of(items: Vec<Item>) -> Scene {
    let mut scene = Scene::new();
    scene.load(items);
    scene
}

fn hit_id(scene: &Scene, x: f64, y: f64, order: HitOrder) -> Option<&str> {
    item_at(scene, Point::new(x, y), order).map(|item| item.id.as_str())
}

// =============================================================
// HitOrder
// =============================================================

#[test]
fn hit_order_defaults_to_first_inserted() {
    assert_eq!(HitOrder::default(), HitOrder::FirstInserted);
}

#[test]
fn hit_order_serde_snake_case() {
    assert_eq!(serde_json::to_string(&HitOrder::TopmostDrawn).unwrap(), "\"topmost_drawn\"");
    let back: HitOrder = serde_json::from_str("\"first_inserted\"").unwrap();
    assert_eq!(back, HitOrder::FirstInserted);
}

// =============================================================
// item_at
// =============================================================

#[test]
fn hit_inside_item() {
    let scene = scene_of(vec![make_item("a", 10.0, 10.0, 20.0, 20.0)]);
    assert_eq!(hit_id(&scene, 15.0, 15.0, HitOrder::FirstInserted), Some("a"));
}

#[test]
fn miss_outside_item() {
    let scene = scene_of(vec![make_item("a", 10.0, 10.0, 20.0, 20.0)]);
    assert_eq!(hit_id(&scene, 5.0, 5.0, HitOrder::FirstInserted), None);
}

#[test]
fn hit_on_edges_and_corners() {
    let scene = scene_of(vec![make_item("a", 10.0, 10.0, 20.0, 20.0)]);
    for (x, y) in [(10.0, 10.0), (30.0, 30.0), (10.0, 30.0), (30.0, 10.0), (20.0, 10.0)] {
        assert_eq!(hit_id(&scene, x, y, HitOrder::FirstInserted), Some("a"), "({x}, {y})");
    }
}

#[test]
fn empty_scene_hits_nothing() {
    let scene = Scene::new();
    assert_eq!(hit_id(&scene, 0.0, 0.0, HitOrder::FirstInserted), None);
    assert_eq!(hit_id(&scene, 0.0, 0.0, HitOrder::TopmostDrawn), None);
}

#[test]
fn overlap_first_inserted_wins() {
    let scene = scene_of(vec![make_item("A", 0.0, 0.0, 100.0, 100.0), make_item("B", 50.0, 50.0, 100.0, 100.0)]);
    assert_eq!(hit_id(&scene, 60.0, 60.0, HitOrder::FirstInserted), Some("A"));
}

#[test]
fn overlap_topmost_drawn_wins() {
    let scene = scene_of(vec![make_item("A", 0.0, 0.0, 100.0, 100.0), make_item("B", 50.0, 50.0, 100.0, 100.0)]);
    assert_eq!(hit_id(&scene, 60.0, 60.0, HitOrder::TopmostDrawn), Some("B"));
}

#[test]
fn non_overlapping_region_unaffected_by_order() {
    let scene = scene_of(vec![make_item("A", 0.0, 0.0, 100.0, 100.0), make_item("B", 50.0, 50.0, 100.0, 100.0)]);
    assert_eq!(hit_id(&scene, 10.0, 10.0, HitOrder::TopmostDrawn), Some("A"));
    assert_eq!(hit_id(&scene, 140.0, 140.0, HitOrder::FirstInserted), Some("B"));
}

// =============================================================
// compute_bounds
// =============================================================

#[test]
fn bounds_of_empty_scene_is_none() {
    assert!(compute_bounds(&Scene::new()).is_none());
}

#[test]
fn bounds_of_single_item() {
    let scene = scene_of(vec![make_item("a", 10.0, 20.0, 30.0, 40.0)]);
    assert_eq!(compute_bounds(&scene), Some(Bounds::from_rect(10.0, 20.0, 30.0, 40.0)));
}

#[test]
fn bounds_cover_all_items() {
    let scene = scene_of(vec![
        make_item("a", 0.0, 0.0, 100.0, 50.0),
        make_item("b", 200.0, 300.0, 10.0, 10.0),
        make_item("c", -50.0, 25.0, 10.0, 10.0),
    ]);
    let bounds = compute_bounds(&scene);
    assert_eq!(bounds, Some(Bounds { min_x: -50.0, min_y: 0.0, max_x: 210.0, max_y: 310.0 }));
}

// =============================================================
// items_intersecting
// =============================================================

#[test]
fn intersecting_filters_and_keeps_order() {
    let scene = scene_of(vec![
        make_item("in-late", 50.0, 50.0, 10.0, 10.0),
        make_item("out", 500.0, 500.0, 10.0, 10.0),
        make_item("straddle", 95.0, 95.0, 20.0, 20.0),
    ]);
    let region = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
    let found: Vec<&str> = items_intersecting(&scene, region).map(|item| item.id.as_str()).collect();
    assert_eq!(found, ["in-late", "straddle"]);
}
