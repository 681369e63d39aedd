//! Rendering: the pluggable strategy seam and the default scene painter.
//!
//! A [`RenderStrategy`] receives the 2D context and a read-only [`Frame`]
//! snapshot of engine state and produces pixels. It never mutates the scene
//! or the viewport. [`crate::engine::Engine::render`] owns the context and
//! logs any error a strategy returns.
//!
//! All world-space drawing happens under the viewport transform, so sizes
//! meant to stay constant on screen (stroke width, label font, dash length)
//! go through [`Viewport::screen_dist_to_world`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{CONNECTION_DASH_PX, GRID_ALPHA, GRID_COLOR, ITEM_STROKE_PX, LABEL_FONT_PX};
use crate::engine::EngineCore;
use crate::error::CanvasError;
use crate::hit;
use crate::scene::{Item, ItemKind, Payload, Scene};
use crate::viewport::{Bounds, Viewport};

/// Read-only view of everything a strategy needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub viewport: Viewport,
    /// Canvas width in CSS pixels.
    pub width: f64,
    /// Canvas height in CSS pixels.
    pub height: f64,
    pub dpr: f64,
    /// Grid spacing in world units, or `None` when the grid is hidden.
    pub grid: Option<f64>,
}

impl<'a> Frame<'a> {
    #[must_use]
    pub fn from_core(core: &'a EngineCore) -> Self {
        Self {
            scene: &core.scene,
            viewport: core.viewport,
            width: core.view_width,
            height: core.view_height,
            dpr: core.dpr,
            grid: core.config.show_grid.then_some(core.config.grid_size),
        }
    }

    /// World-space region visible on the canvas.
    #[must_use]
    pub fn visible_world(&self) -> Bounds {
        self.viewport.visible_world_bounds(self.width, self.height)
    }

    /// Items overlapping the visible region, in paint order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&'a Item> {
        hit::items_intersecting(self.scene, self.visible_world()).collect()
    }
}

/// Draws a frame to a 2D context. Swap implementations with
/// [`crate::engine::Engine::set_render_strategy`].
pub trait RenderStrategy {
    /// Draw `frame`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    fn render(&mut self, ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) -> Result<(), CanvasError>;
}

/// Grid background plus one styled box per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl RenderStrategy for DefaultRenderer {
    fn render(&mut self, ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) -> Result<(), CanvasError> {
        begin_frame(ctx, frame)?;
        if let Some(grid_size) = frame.grid {
            draw_grid(ctx, frame, grid_size);
        }
        for item in frame.visible_items() {
            draw_item(ctx, item, &frame.viewport)?;
        }
        ctx.restore();
        Ok(())
    }
}

/// Clear the canvas, then save state and apply the device-pixel and viewport
/// transforms. Pair with `ctx.restore()` after drawing.
///
/// # Errors
///
/// Returns `Err` if a transform call fails.
pub fn begin_frame(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) -> Result<(), JsValue> {
    ctx.set_transform(frame.dpr, 0.0, 0.0, frame.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, frame.width, frame.height);
    ctx.save();
    ctx.translate(frame.viewport.offset_x, frame.viewport.offset_y)?;
    ctx.scale(frame.viewport.scale, frame.viewport.scale)?;
    Ok(())
}

// =============================================================
// Grid
// =============================================================

/// World-space extent of the grid lines covering the visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpan {
    pub start_x: f64,
    pub end_x: f64,
    pub start_y: f64,
    pub end_y: f64,
    pub step: f64,
}

impl GridSpan {
    /// Snap the visible region outward to multiples of `step`.
    #[must_use]
    pub fn covering(viewport: &Viewport, width: f64, height: f64, step: f64) -> Self {
        let visible = viewport.visible_world_bounds(width, height);
        let start_x = (visible.min_x / step).floor() * step;
        let start_y = (visible.min_y / step).floor() * step;
        Self {
            start_x,
            end_x: visible.max_x + step,
            start_y,
            end_y: visible.max_y + step,
            step,
        }
    }

    /// World x positions of the vertical lines.
    pub fn columns(&self) -> impl Iterator<Item = f64> + '_ {
        steps(self.start_x, self.end_x, self.step)
    }

    /// World y positions of the horizontal lines.
    pub fn rows(&self) -> impl Iterator<Item = f64> + '_ {
        steps(self.start_y, self.end_y, self.step)
    }
}

fn steps(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let valid = step > 0.0 && step.is_finite() && start.is_finite() && end.is_finite();
    std::iter::successors(valid.then_some(start), move |v| Some(v + step)).take_while(move |v| *v <= end)
}

/// Draw grid lines under the viewport transform.
pub fn draw_grid(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, grid_size: f64) {
    let span = GridSpan::covering(&frame.viewport, frame.width, frame.height, grid_size);

    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(frame.viewport.screen_dist_to_world(1.0));
    ctx.set_global_alpha(GRID_ALPHA);
    ctx.begin_path();
    for x in span.columns() {
        ctx.move_to(x, span.start_y);
        ctx.line_to(x, span.end_y);
    }
    for y in span.rows() {
        ctx.move_to(span.start_x, y);
        ctx.line_to(span.end_x, y);
    }
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Items
// =============================================================

/// Fill and outline colors for an item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    /// Outline drawn dashed instead of solid.
    pub dashed: bool,
}

#[must_use]
pub fn item_style(kind: ItemKind) -> ItemStyle {
    match kind {
        ItemKind::File => ItemStyle { fill: "#007acc", stroke: "#005a9e", dashed: false },
        ItemKind::Folder => ItemStyle { fill: "#ffb347", stroke: "#e09000", dashed: false },
        ItemKind::Note => ItemStyle { fill: "#90ee90", stroke: "#32cd32", dashed: false },
        ItemKind::Connection => ItemStyle { fill: "#d0d0d0", stroke: "#a0a0a0", dashed: true },
    }
}

/// CSS font for item labels under `viewport`, constant on screen.
#[must_use]
pub fn label_font(viewport: &Viewport) -> String {
    format!("{}px Arial", viewport.screen_dist_to_world(LABEL_FONT_PX))
}

/// Draw one item box with its outline and optional name label.
///
/// # Errors
///
/// Returns `Err` if a dash or text call fails.
pub fn draw_item(ctx: &CanvasRenderingContext2d, item: &Item, viewport: &Viewport) -> Result<(), JsValue> {
    let style = item_style(item.kind);
    let b = item.bounds();

    ctx.save();
    ctx.set_fill_style_str(style.fill);
    ctx.fill_rect(b.min_x, b.min_y, b.width(), b.height());

    ctx.set_stroke_style_str(style.stroke);
    ctx.set_line_width(viewport.screen_dist_to_world(ITEM_STROKE_PX));
    if style.dashed {
        let dash = JsValue::from_f64(viewport.screen_dist_to_world(CONNECTION_DASH_PX));
        ctx.set_line_dash(&js_sys::Array::of2(&dash, &dash))?;
    }
    ctx.stroke_rect(b.min_x, b.min_y, b.width(), b.height());

    if let Some(name) = Payload::new(&item.payload).name() {
        let center = b.center();
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font(&label_font(viewport));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(name, center.x, center.y)?;
    }
    ctx.restore();
    Ok(())
}
