//! Engine configuration, parsed from JSON supplied by the host page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{FIT_PADDING, GRID_SIZE, MAX_SCALE, MIN_SCALE, ZOOM_FACTOR};
use crate::error::CanvasError;
use crate::hit::HitOrder;
use crate::viewport::ScaleLimits;

/// Tunables for zoom, fitting, hit-testing, and the grid background.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Scale multiplier per wheel step. Must be greater than 1.
    pub zoom_factor: f64,
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
    /// World-unit padding around the scene when fitting to items.
    pub fit_padding: f64,
    /// Grid spacing in world units.
    pub grid_size: f64,
    /// Whether the default renderer draws the grid.
    pub show_grid: bool,
    /// Precedence among overlapping items.
    pub hit_order: HitOrder,
    /// Maximum pointer travel, in screen pixels, for a release to count as a
    /// click. `None` fires a click on every release over an item.
    pub click_slop_px: Option<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_factor: ZOOM_FACTOR,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            fit_padding: FIT_PADDING,
            grid_size: GRID_SIZE,
            show_grid: true,
            hit_order: HitOrder::default(),
            click_slop_px: None,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] when the JSON is malformed or a
    /// value fails [`CanvasConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, CanvasError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()
    }

    /// Normalize the scale range and reject values the engine cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] naming the offending field.
    pub fn validate(self) -> Result<Self, CanvasError> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(invalid("zoom_factor", "must be a finite number greater than 1"));
        }
        for (field, value) in [("min_scale", self.min_scale), ("max_scale", self.max_scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a finite positive number"));
            }
        }
        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            return Err(invalid("fit_padding", "must be a finite non-negative number"));
        }
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(invalid("grid_size", "must be a finite positive number"));
        }
        if let Some(slop) = self.click_slop_px {
            if !slop.is_finite() || slop < 0.0 {
                return Err(invalid("click_slop_px", "must be a finite non-negative number"));
            }
        }

        let limits = ScaleLimits::new(self.min_scale, self.max_scale);
        Ok(Self { min_scale: limits.min, max_scale: limits.max, ..self })
    }

    /// Scale range as a [`ScaleLimits`].
    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.min_scale, self.max_scale)
    }
}

fn invalid(field: &str, reason: &str) -> CanvasError {
    tracing::warn!(%field, %reason, "rejecting canvas config");
    CanvasError::InvalidConfig(format!("{field} {reason}"))
}
