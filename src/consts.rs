//! Shared numeric constants for the canvas engine.

// ── Viewport ────────────────────────────────────────────────────

/// Multiplicative zoom step applied per wheel notch.
pub const ZOOM_FACTOR: f64 = 1.1;

/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 5.0;

/// Auto-fit never zooms in past 100%.
pub const FIT_MAX_SCALE: f64 = 1.0;

/// Padding added around the scene bounds by fit-to-items, in world units.
pub const FIT_PADDING: f64 = 50.0;

// ── Rendering ───────────────────────────────────────────────────

/// Grid spacing in world units.
pub const GRID_SIZE: f64 = 50.0;

/// Grid line opacity.
pub const GRID_ALPHA: f64 = 0.3;

/// Grid line colour.
pub const GRID_COLOR: &str = "#f0f0f0";

/// Item outline width in screen pixels.
pub const ITEM_STROKE_PX: f64 = 2.0;

/// Item label font size in screen pixels.
pub const LABEL_FONT_PX: f64 = 12.0;

/// Dash segment length for connection outlines, in screen pixels.
pub const CONNECTION_DASH_PX: f64 = 6.0;

// ── Cursors ─────────────────────────────────────────────────────

/// Cursor shown while the canvas is idle.
pub const CURSOR_GRAB: &str = "grab";

/// Cursor shown while a drag is in progress.
pub const CURSOR_GRABBING: &str = "grabbing";
