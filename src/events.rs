//! Change notifications and the per-engine subscription registry.
//!
//! Observers are plain closures registered on an engine instance. There is no
//! global bus: each [`Observers`] belongs to exactly one engine and is invoked
//! synchronously, after the engine state has been updated and before the
//! mutating call returns.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::fmt;

use crate::scene::Item;
use crate::viewport::Viewport;

/// A notification delivered to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// The viewport changed; carries the new state.
    ViewportChanged(Viewport),
    /// A pointer release landed on an item.
    ItemClicked(Item),
    /// A double-click landed on an item.
    ItemDoubleClicked(Item),
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CanvasEvent)>;

/// Ordered list of event listeners.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event. Listeners run in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&CanvasEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a listener that only sees viewport changes.
    pub fn on_viewport_changed(&mut self, mut listener: impl FnMut(&Viewport) + 'static) -> SubscriptionId {
        self.subscribe(move |event| {
            if let CanvasEvent::ViewportChanged(viewport) = event {
                listener(viewport);
            }
        })
    }

    /// Register a listener that only sees item clicks.
    pub fn on_item_clicked(&mut self, mut listener: impl FnMut(&Item) + 'static) -> SubscriptionId {
        self.subscribe(move |event| {
            if let CanvasEvent::ItemClicked(item) = event {
                listener(item);
            }
        })
    }

    /// Register a listener that only sees item double-clicks.
    pub fn on_item_double_clicked(&mut self, mut listener: impl FnMut(&Item) + 'static) -> SubscriptionId {
        self.subscribe(move |event| {
            if let CanvasEvent::ItemDoubleClicked(item) = event {
                listener(item);
            }
        })
    }

    /// Remove a listener. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener.
    pub fn emit(&mut self, event: &CanvasEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
