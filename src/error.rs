//! Error type shared by engine construction, configuration, and rendering.

use wasm_bindgen::JsValue;

/// Errors surfaced by the canvas engine.
///
/// Only [`CanvasError::ContextUnavailable`] is fatal; it aborts
/// [`crate::engine::Engine::new`]. Render errors are logged by the engine and
/// configuration errors are returned to the host before an engine exists.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("canvas call failed: {0}")]
    Js(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => Self::Js(message),
            None => Self::Js(format!("{value:?}")),
        }
    }
}

impl From<serde_json::Error> for CanvasError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
