use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::CanvasConfig;
use crate::consts::{CURSOR_GRAB, CURSOR_GRABBING};
use crate::error::CanvasError;
use crate::events::{CanvasEvent, Observers, SubscriptionId};
use crate::hit;
use crate::input::{InputState, WheelDelta};
use crate::render::{DefaultRenderer, Frame, RenderStrategy};
use crate::scene::{Item, ItemId, Scene};
use crate::viewport::{Bounds, Point, Viewport, ZoomDirection};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects requested by the core, in the order they must be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Deliver a notification to observers.
    Notify(CanvasEvent),
    /// Change the canvas cursor (CSS cursor name).
    SetCursor(String),
    /// Repaint from current state.
    RenderNeeded,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Holds no browser types; [`Engine`] wraps it. Every mutating method
/// updates state first and then returns the [`Action`]s describing what
/// observers and the renderer must see.
#[derive(Debug)]
pub struct EngineCore {
    pub scene: Scene,
    pub viewport: Viewport,
    pub input: InputState,
    pub config: CanvasConfig,
    /// Visible canvas width in CSS pixels.
    pub view_width: f64,
    /// Visible canvas height in CSS pixels.
    pub view_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    #[must_use]
    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            scene: Scene::new(),
            viewport: Viewport::default(),
            input: InputState::Idle,
            config,
            view_width: 0.0,
            view_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Scene ---

    /// Add an item on top of the scene, or replace the item with the same id.
    ///
    /// Items with non-finite geometry are rejected and leave the scene unchanged.
    pub fn add_item(&mut self, item: Item) -> Vec<Action> {
        if !item.is_finite() {
            reject_item(&item);
            return Vec::new();
        }
        tracing::debug!(id = %item.id, kind = ?item.kind, "item added");
        self.scene.insert(item);
        vec![Action::RenderNeeded]
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &ItemId) -> Vec<Action> {
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        tracing::debug!(%id, "item removed");
        vec![Action::RenderNeeded]
    }

    /// Remove every item.
    pub fn clear(&mut self) -> Vec<Action> {
        tracing::debug!(count = self.scene.len(), "scene cleared");
        self.scene.clear();
        vec![Action::RenderNeeded]
    }

    /// Replace the whole scene with `items`, keeping their order. Items with
    /// non-finite geometry are skipped.
    pub fn load_items(&mut self, items: Vec<Item>) -> Vec<Action> {
        let (valid, rejected): (Vec<Item>, Vec<Item>) = items.into_iter().partition(Item::is_finite);
        rejected.iter().for_each(reject_item);
        self.scene.load(valid);
        tracing::debug!(count = self.scene.len(), "scene loaded");
        vec![Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Replace the viewport state. The scale is clamped; non-finite input is rejected.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        if !viewport.is_finite() {
            tracing::warn!(?viewport, "ignoring non-finite viewport");
            return Vec::new();
        }
        let limits = self.config.scale_limits();
        if self.viewport.replace(viewport, limits) { self.viewport_changed() } else { Vec::new() }
    }

    /// Update canvas dimensions (CSS pixels) and device pixel ratio.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        self.view_width = width;
        self.view_height = height;
        self.dpr = dpr;
        tracing::debug!(width, height, dpr, "canvas resized");
        vec![Action::RenderNeeded]
    }

    /// Zoom one step around a screen-space anchor.
    pub fn zoom_at(&mut self, screen_pt: Point, direction: ZoomDirection) -> Vec<Action> {
        let limits = self.config.scale_limits();
        if self
            .viewport
            .zoom_at(screen_pt, direction, self.config.zoom_factor, limits)
        {
            self.viewport_changed()
        } else {
            Vec::new()
        }
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) -> Vec<Action> {
        if self.viewport.pan_by(delta) { self.viewport_changed() } else { Vec::new() }
    }

    /// Fit `bounds`, padded by `padding` world units, into the canvas.
    pub fn fit_to_bounds(&mut self, bounds: Bounds, padding: f64) -> Vec<Action> {
        let limits = self.config.scale_limits();
        if self
            .viewport
            .fit_to_bounds(bounds, self.view_width, self.view_height, padding, limits)
        {
            self.viewport_changed()
        } else {
            Vec::new()
        }
    }

    /// Fit every item into the canvas. An empty scene leaves the viewport untouched.
    pub fn fit_to_items(&mut self) -> Vec<Action> {
        let Some(bounds) = hit::compute_bounds(&self.scene) else {
            return Vec::new();
        };
        self.fit_to_bounds(bounds, self.config.fit_padding)
    }

    /// Center the canvas on an item without changing scale. Unknown ids are ignored.
    ///
    /// Focusing an item that is already centered sends no notification.
    pub fn focus_on_item(&mut self, id: &ItemId) -> Vec<Action> {
        let Some(center) = self.scene.get(id).map(Item::center) else {
            return Vec::new();
        };
        if self
            .viewport
            .center_on(center, self.view_width, self.view_height)
        {
            self.viewport_changed()
        } else {
            Vec::new()
        }
    }

    // --- Input events ---

    /// Pointer pressed: start (or restart) a drag anchored at `screen_pt`.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        tracing::trace!(x = screen_pt.x, y = screen_pt.y, "pointer down");
        self.input = InputState::dragging_from(screen_pt);
        vec![Action::SetCursor(CURSOR_GRABBING.to_owned())]
    }

    /// Pointer moved: pan by the delta since the last event while dragging.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { start_screen, last_screen } = self.input else {
            return Vec::new();
        };
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        self.input = InputState::Dragging { start_screen, last_screen: screen_pt };
        self.pan_by(screen_pt - last_screen)
    }

    /// Pointer released: end the drag and click whatever item is under the pointer.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(travel) = self.input.travel_to(screen_pt) else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let mut actions = vec![Action::SetCursor(CURSOR_GRAB.to_owned())];
        if self.config.click_slop_px.is_some_and(|slop| travel > slop) {
            tracing::trace!(travel, "release after drag; no click");
            return actions;
        }
        if let Some(item) = self.item_at_screen(screen_pt) {
            tracing::debug!(id = %item.id, "item clicked");
            actions.push(Action::Notify(CanvasEvent::ItemClicked(item.clone())));
        }
        actions
    }

    /// Pointer left or was cancelled: end the drag without a click.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::SetCursor(CURSOR_GRAB.to_owned())]
    }

    /// Wheel: zoom in for upward scroll, out otherwise. Drag state is untouched.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.zoom_at(screen_pt, ZoomDirection::from_wheel(delta.dy))
    }

    /// Double-click: notify with the item under the pointer, if any.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.item_at_screen(screen_pt) {
            Some(item) => {
                tracing::debug!(id = %item.id, "item double-clicked");
                vec![Action::Notify(CanvasEvent::ItemDoubleClicked(item.clone()))]
            }
            None => Vec::new(),
        }
    }

    // --- Queries ---

    /// The current viewport state.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// All items in paint order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.scene.items()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.scene.get(id)
    }

    /// Item under a world-space point, using the configured hit order.
    #[must_use]
    pub fn item_at(&self, world_pt: Point) -> Option<&Item> {
        hit::item_at(&self.scene, world_pt, self.config.hit_order)
    }

    /// Item under a screen-space point.
    #[must_use]
    pub fn item_at_screen(&self, screen_pt: Point) -> Option<&Item> {
        self.item_at(self.viewport.screen_to_world(screen_pt))
    }

    /// Union bounds of all items; `None` when the scene is empty.
    #[must_use]
    pub fn compute_bounds(&self) -> Option<Bounds> {
        hit::compute_bounds(&self.scene)
    }

    fn viewport_changed(&self) -> Vec<Action> {
        tracing::debug!(
            scale = self.viewport.scale,
            offset_x = self.viewport.offset_x,
            offset_y = self.viewport.offset_y,
            "viewport changed"
        );
        vec![Action::Notify(CanvasEvent::ViewportChanged(self.viewport)), Action::RenderNeeded]
    }
}

/// What the host wrapper must do after delivering a batch of actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delivery {
    /// Last cursor requested in the batch.
    pub cursor: Option<String>,
    /// Whether any action asked for a repaint.
    pub render: bool,
}

/// Deliver notifications to observers, in order, and summarize the remaining effects.
pub fn deliver(observers: &mut Observers, actions: &[Action]) -> Delivery {
    let mut delivery = Delivery::default();
    for action in actions {
        match action {
            Action::Notify(event) => observers.emit(event),
            Action::SetCursor(cursor) => delivery.cursor = Some(cursor.clone()),
            Action::RenderNeeded => delivery.render = true,
        }
    }
    delivery
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Each input or mutation method runs the core transition, notifies observers,
/// applies cursor changes, and repaints before returning. The returned actions
/// are informational for the host.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    renderer: Box<dyn RenderStrategy>,
    observers: Observers,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextUnavailable`] if the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, CanvasError> {
        Self::with_config(canvas, CanvasConfig::default())
    }

    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextUnavailable`] if the element has no 2D context.
    pub fn with_config(canvas: HtmlCanvasElement, config: CanvasConfig) -> Result<Self, CanvasError> {
        let ctx = context_2d(&canvas)?;
        let mut engine = Self {
            canvas,
            ctx,
            renderer: Box::new(DefaultRenderer),
            observers: Observers::new(),
            core: EngineCore::with_config(config),
        };
        engine.set_cursor(CURSOR_GRAB);
        engine.sync_size();
        tracing::info!(width = engine.core.view_width, height = engine.core.view_height, "canvas engine ready");
        Ok(engine)
    }

    // --- Rendering ---

    /// Replace the render strategy and repaint.
    pub fn set_render_strategy(&mut self, renderer: Box<dyn RenderStrategy>) {
        self.renderer = renderer;
        self.render();
    }

    /// Draw the current state to the canvas.
    pub fn render(&mut self) {
        let frame = Frame::from_core(&self.core);
        if let Err(e) = self.renderer.render(&self.ctx, &frame) {
            tracing::warn!(error = %e, "render failed");
        }
    }

    /// Read the element's CSS size and the device pixel ratio, resize the
    /// backing store, and repaint. Call on every window resize.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sync_size(&mut self) -> Vec<Action> {
        let width = f64::from(self.canvas.client_width()).max(1.0);
        let height = f64::from(self.canvas.client_height()).max(1.0);
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()).max(1.0);
        self.canvas.set_width((width * dpr).round() as u32);
        self.canvas.set_height((height * dpr).round() as u32);
        let actions = self.core.resize(width, height, dpr);
        self.apply(actions)
    }

    // --- Subscriptions ---

    pub fn subscribe(&mut self, listener: impl FnMut(&CanvasEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn on_viewport_changed(&mut self, listener: impl FnMut(&Viewport) + 'static) -> SubscriptionId {
        self.observers.on_viewport_changed(listener)
    }

    pub fn on_item_clicked(&mut self, listener: impl FnMut(&Item) + 'static) -> SubscriptionId {
        self.observers.on_item_clicked(listener)
    }

    pub fn on_item_double_clicked(&mut self, listener: impl FnMut(&Item) + 'static) -> SubscriptionId {
        self.observers.on_item_double_clicked(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Delegated mutations ---

    pub fn add_item(&mut self, item: Item) -> Vec<Action> {
        let actions = self.core.add_item(item);
        self.apply(actions)
    }

    pub fn remove_item(&mut self, id: &ItemId) -> Vec<Action> {
        let actions = self.core.remove_item(id);
        self.apply(actions)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        let actions = self.core.clear();
        self.apply(actions)
    }

    pub fn load_items(&mut self, items: Vec<Item>) -> Vec<Action> {
        let actions = self.core.load_items(items);
        self.apply(actions)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        let actions = self.core.set_viewport(viewport);
        self.apply(actions)
    }

    pub fn zoom_at(&mut self, screen_pt: Point, direction: ZoomDirection) -> Vec<Action> {
        let actions = self.core.zoom_at(screen_pt, direction);
        self.apply(actions)
    }

    pub fn pan_by(&mut self, delta: Point) -> Vec<Action> {
        let actions = self.core.pan_by(delta);
        self.apply(actions)
    }

    pub fn fit_to_items(&mut self) -> Vec<Action> {
        let actions = self.core.fit_to_items();
        self.apply(actions)
    }

    pub fn focus_on_item(&mut self, id: &ItemId) -> Vec<Action> {
        let actions = self.core.focus_on_item(id);
        self.apply(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen_pt);
        self.apply(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen_pt);
        self.apply(actions)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen_pt);
        self.apply(actions)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel();
        self.apply(actions)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let actions = self.core.on_wheel(screen_pt, delta);
        self.apply(actions)
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_double_click(screen_pt);
        self.apply(actions)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.core.items()
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.core.item(id)
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The 2D context handed to render strategies.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let delivery = deliver(&mut self.observers, &actions);
        if let Some(cursor) = delivery.cursor.as_deref() {
            self.set_cursor(cursor);
        }
        if delivery.render {
            self.render();
        }
        actions
    }

    fn set_cursor(&self, cursor: &str) {
        if let Err(e) = self.canvas.style().set_property("cursor", cursor) {
            tracing::warn!(error = %CanvasError::from(e), %cursor, "failed to set cursor");
        }
    }
}

fn reject_item(item: &Item) {
    tracing::warn!(
        id = %item.id,
        x = item.x,
        y = item.y,
        width = item.width,
        height = item.height,
        "rejecting item with non-finite geometry"
    );
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
    let Some(ctx) = canvas.get_context("2d")? else {
        return Err(CanvasError::ContextUnavailable);
    };
    ctx.dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CanvasError::ContextUnavailable)
}
