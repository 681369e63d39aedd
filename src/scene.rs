//! Scene model: canvas items, their opaque payload, and the ordered store.
//!
//! This module defines what sits on the canvas (`Item`, `ItemKind`), a typed
//! accessor for the open-ended payload JSON (`Payload`), and the store that
//! owns all placed items (`Scene`).
//!
//! Insertion order is significant: it is both the paint order (earlier items
//! are drawn first, later items on top) and the iteration order hit-testing
//! walks. `Scene` therefore keeps items in a `Vec` and maintains a separate
//! id → position index for lookups.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::viewport::{Bounds, Point};

/// Unique identifier for a canvas item.
///
/// Hosts normally derive it from a stable source identifier (a file URI, a
/// note key). [`ItemId::random`] covers items that have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh identifier backed by a v4 UUID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of a canvas item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A source file card.
    File,
    /// A directory card.
    Folder,
    /// A link drawn between other items.
    Connection,
    /// A free-form note.
    Note,
}

/// An item placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this item.
    pub id: ItemId,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
    /// What the item represents.
    pub kind: ItemKind,
    /// Host-owned data. The engine never inspects it beyond the optional label.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Item {
    /// Build an item with an empty payload.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, kind: ItemKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            kind,
            payload: serde_json::Value::Null,
        }
    }

    /// Attach a payload, replacing any existing one.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// World-space box covering `[x, x + width] × [y, y + height]`.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Whether position and size are all finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Inclusive containment test in world space.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        self.bounds().contains(world)
    }
}

/// Typed, read-only access to common payload fields.
pub struct Payload<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Payload<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Display label. `None` when absent or empty.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Insertion-ordered store of canvas items.
#[derive(Debug, Default)]
pub struct Scene {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item at the top of the order.
    ///
    /// If an item with the same id already exists it is replaced in place and
    /// keeps its original position; the previous value is returned.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        if let Some(&pos) = self.index.get(&item.id) {
            return Some(std::mem::replace(&mut self.items[pos], item));
        }
        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        None
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let pos = self.index.remove(id)?;
        let removed = self.items.remove(pos);
        for item in &self.items[pos..] {
            if let Some(slot) = self.index.get_mut(&item.id) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Replace all items with `items`, in order. Later duplicates overwrite
    /// earlier ones in place.
    pub fn load(&mut self, items: Vec<Item>) {
        self.clear();
        for item in items {
            self.insert(item);
        }
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// All items in insertion (paint) order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in insertion (paint) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Number of items currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the scene contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
