//! Pannable, zoomable 2D canvas engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns a
//! `<canvas>` element and an insertion-ordered scene of rectangular items,
//! maps pointer gestures to pan/zoom, hit-tests pointer releases and
//! double-clicks against items, and notifies registered observers of viewport
//! changes and item clicks. The host page only wires DOM events to the engine
//! and supplies items.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Item types and the insertion-ordered item store |
//! | [`viewport`] | Scale/offset transform, bounds, and fit/zoom math |
//! | [`input`] | Wheel deltas and the drag state machine |
//! | [`hit`] | Hit-testing and bounds queries |
//! | [`events`] | Change notifications and observer registry |
//! | [`render`] | Render strategy trait and the default painter |
//! | [`config`] | JSON-configurable engine tunables |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (zoom limits, grid, styling) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod events;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod viewport;

pub use engine::{Action, Engine, EngineCore};
pub use error::CanvasError;
