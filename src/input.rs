//! Input model: wheel deltas and the drag gesture state machine.
//!
//! The protocol has two states. A pointer-down anywhere on the canvas starts
//! `Dragging`; moves while dragging pan the viewport by the screen delta;
//! releasing returns to `Idle` and hit-tests the release point for a click.
//! Wheel and double-click events are handled in either state and never change
//! it. Transitions themselves live on [`crate::engine::EngineCore`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::viewport::Point;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The pointer is held down and moves pan the canvas.
    Dragging {
        /// Screen-space position where the pointer went down.
        start_screen: Point,
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}

impl InputState {
    /// Start a drag anchored at `screen`.
    #[must_use]
    pub fn dragging_from(screen: Point) -> Self {
        Self::Dragging { start_screen: screen, last_screen: screen }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Straight-line screen distance from the drag start to `screen`.
    ///
    /// `None` while idle.
    #[must_use]
    pub fn travel_to(&self, screen: Point) -> Option<f64> {
        match self {
            Self::Idle => None,
            Self::Dragging { start_screen, .. } => Some((screen - *start_screen).length()),
        }
    }
}
