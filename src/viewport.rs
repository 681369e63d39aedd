//! Viewport transform: the affine map between screen space and world space.
//!
//! `screen = world * scale + offset`. Screen coordinates are CSS pixels
//! relative to the canvas origin; world coordinates are unbounded. All
//! operations here are pure state updates. Notification and re-rendering are
//! layered on top by [`crate::engine::EngineCore`].

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{FIT_MAX_SCALE, MAX_SCALE, MIN_SCALE};

/// A point (or delta) in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is used as a delta.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned box with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Build a box from an origin and a size. Negative sizes are normalized.
    #[must_use]
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x.min(x + width),
            min_y: y.min(y + height),
            max_x: x.max(x + width),
            max_y: y.max(y + height),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Inclusive containment: points on the edge are inside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Whether the two boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    /// Smallest box covering both.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow the box by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: scrolling up (negative `dy`) zooms in, anything else zooms out.
    #[must_use]
    pub fn from_wheel(dy: f64) -> Self {
        if dy < 0.0 { Self::In } else { Self::Out }
    }

    /// Scale multiplier for one step with the given zoom factor.
    #[must_use]
    pub fn multiplier(self, factor: f64) -> f64 {
        match self {
            Self::In => factor,
            Self::Out => 1.0 / factor,
        }
    }
}

/// Inclusive range the viewport scale is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: MIN_SCALE, max: MAX_SCALE }
    }
}

impl ScaleLimits {
    /// Build limits from two bounds in either order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Clamp `scale` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Viewport state: uniform scale plus a screen-space offset.
///
/// `scale` is kept inside [`ScaleLimits`] by every mutating method, so it is
/// never zero and `screen_to_world` is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.scale.is_finite() && self.offset_x.is_finite() && self.offset_y.is_finite()
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        debug_assert!(self.scale != 0.0, "viewport scale must be non-zero");
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// World-space region visible through a `width` x `height` screen area.
    #[must_use]
    pub fn visible_world_bounds(&self, width: f64, height: f64) -> Bounds {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(width, height));
        Bounds {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: bottom_right.x,
            max_y: bottom_right.y,
        }
    }

    /// Zoom one step around `anchor` (screen space).
    ///
    /// The world point under `anchor` before the zoom stays under `anchor`
    /// afterwards. Returns `true` if the viewport changed.
    pub fn zoom_at(&mut self, anchor: Point, direction: ZoomDirection, factor: f64, limits: ScaleLimits) -> bool {
        let scale = limits.clamp(self.scale * direction.multiplier(factor));
        if (scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        let world = self.screen_to_world(anchor);
        self.commit(Viewport {
            scale,
            offset_x: anchor.x - world.x * scale,
            offset_y: anchor.y - world.y * scale,
        })
    }

    /// Pan by a screen-space delta. Independent of scale.
    ///
    /// A non-finite delta is ignored. Returns `true` if the viewport changed.
    pub fn pan_by(&mut self, delta: Point) -> bool {
        if delta == Point::ZERO {
            return false;
        }
        self.commit(Viewport {
            offset_x: self.offset_x + delta.x,
            offset_y: self.offset_y + delta.y,
            ..*self
        })
    }

    /// Fit `bounds` (grown by `padding` on each side) into a `width` x `height`
    /// screen area and center it.
    ///
    /// The fitted scale is `min(scale_x, scale_y, 1.0)`, so auto-fit only ever
    /// zooms out, and is then clamped into `limits`. A non-positive screen area
    /// or a result that is not finite is a no-op. Returns `true` if the
    /// viewport changed.
    pub fn fit_to_bounds(&mut self, bounds: Bounds, width: f64, height: f64, padding: f64, limits: ScaleLimits) -> bool {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return false;
        }
        let content_w = bounds.width() + 2.0 * padding;
        let content_h = bounds.height() + 2.0 * padding;
        let scale_x = if content_w > 0.0 { width / content_w } else { f64::INFINITY };
        let scale_y = if content_h > 0.0 { height / content_h } else { f64::INFINITY };
        let scale = limits.clamp(scale_x.min(scale_y).min(FIT_MAX_SCALE));

        let center = bounds.center();
        self.commit(Viewport {
            scale,
            offset_x: width * 0.5 - center.x * scale,
            offset_y: height * 0.5 - center.y * scale,
        })
    }

    /// Move the viewport so `world` sits at the center of a `width` x `height`
    /// screen area. Scale is unchanged; a non-finite target is ignored.
    /// Returns `true` if the viewport changed.
    pub fn center_on(&mut self, world: Point, width: f64, height: f64) -> bool {
        self.commit(Viewport {
            offset_x: width * 0.5 - world.x * self.scale,
            offset_y: height * 0.5 - world.y * self.scale,
            ..*self
        })
    }

    /// Replace this state with `next`, clamping its scale.
    ///
    /// Non-finite input is rejected and leaves the viewport untouched.
    /// Returns `true` if the viewport changed.
    pub fn replace(&mut self, next: Viewport, limits: ScaleLimits) -> bool {
        self.commit(Viewport { scale: limits.clamp(next.scale), ..next })
    }

    /// Adopt `next` unless it is not finite. Returns `true` if the state changed.
    fn commit(&mut self, next: Viewport) -> bool {
        if !next.is_finite() || next == *self {
            return false;
        }
        *self = next;
        true
    }
}
