//! Hit-testing and bounds queries against the scene.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::scene::{Item, Scene};
use crate::viewport::{Bounds, Point};

/// Precedence among overlapping items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitOrder {
    /// Walk items in insertion order; the earliest-added item wins.
    #[default]
    FirstInserted,
    /// Walk items in reverse insertion order; the item drawn on top wins.
    TopmostDrawn,
}

/// Return the item whose box contains `world_pt`, if any.
///
/// Bounds are inclusive on every edge. With several candidates the winner is
/// decided by `order`.
#[must_use]
pub fn item_at(scene: &Scene, world_pt: Point, order: HitOrder) -> Option<&Item> {
    match order {
        HitOrder::FirstInserted => scene.iter().find(|item| item.contains(world_pt)),
        HitOrder::TopmostDrawn => scene.iter().rev().find(|item| item.contains(world_pt)),
    }
}

/// Union bounding box of every item, or `None` for an empty scene.
#[must_use]
pub fn compute_bounds(scene: &Scene) -> Option<Bounds> {
    scene
        .iter()
        .map(Item::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// Items whose box overlaps `region`, in paint order.
pub fn items_intersecting(scene: &Scene, region: Bounds) -> impl Iterator<Item = &Item> {
    scene.iter().filter(move |item| item.bounds().intersects(&region))
}
