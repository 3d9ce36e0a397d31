//! Engine configuration: gesture thresholds, zoom limits, timings, and styling.
//!
//! Every field has a default (see [`crate::consts`]); hosts override only what
//! they need, typically by passing a JSON object through [`CanvasConfig::from_json`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::CanvasError;
use crate::style::{LegendEntry, StatusPalette, default_legend};
use crate::viewport::ZoomLimits;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub tap_slop_px: f64,
    pub click_slop_px: f64,
    pub tap_max_ms: f64,
    pub close_path_radius_px: f64,
    pub wheel_zoom_step: f64,
    pub image_zoom_min: f64,
    pub image_zoom_max: f64,
    pub transparent_zoom_max: f64,
    pub transparent_pan_min_scale: f64,
    pub fit_margin: f64,
    pub zone_focus_fill: f64,
    pub zoom_animation_ms: f64,
    pub label_min_zoom: f64,
    pub palette: StatusPalette,
    pub legend: Vec<LegendEntry>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tap_slop_px: consts::TAP_SLOP_PX,
            click_slop_px: consts::CLICK_SLOP_PX,
            tap_max_ms: consts::TAP_MAX_MS,
            close_path_radius_px: consts::CLOSE_PATH_RADIUS_PX,
            wheel_zoom_step: consts::WHEEL_ZOOM_STEP,
            image_zoom_min: consts::IMAGE_ZOOM_MIN,
            image_zoom_max: consts::IMAGE_ZOOM_MAX,
            transparent_zoom_max: consts::TRANSPARENT_ZOOM_MAX,
            transparent_pan_min_scale: consts::TRANSPARENT_PAN_MIN_SCALE,
            fit_margin: consts::FIT_MARGIN,
            zone_focus_fill: consts::ZONE_FOCUS_FILL,
            zoom_animation_ms: consts::ZOOM_ANIMATION_MS,
            label_min_zoom: consts::LABEL_MIN_ZOOM,
            palette: StatusPalette::default(),
            legend: default_legend(),
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ConfigParse`] for malformed JSON and
    /// [`CanvasError::InvalidConfig`] when a value breaks a limit rule.
    pub fn from_json(raw: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric rules the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let positive = [
            ("tap_slop_px", self.tap_slop_px),
            ("click_slop_px", self.click_slop_px),
            ("tap_max_ms", self.tap_max_ms),
            ("close_path_radius_px", self.close_path_radius_px),
            ("image_zoom_min", self.image_zoom_min),
            ("fit_margin", self.fit_margin),
            ("zone_focus_fill", self.zone_focus_fill),
            ("zoom_animation_ms", self.zoom_animation_ms),
            ("label_min_zoom", self.label_min_zoom),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(CanvasError::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
        }
        if self.wheel_zoom_step.is_nan() || self.wheel_zoom_step <= 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "wheel_zoom_step must be > 1, got {}",
                self.wheel_zoom_step
            )));
        }
        if self.image_zoom_max.is_nan() || self.image_zoom_min >= self.image_zoom_max {
            return Err(CanvasError::InvalidConfig(format!(
                "image_zoom_min ({}) must be below image_zoom_max ({})",
                self.image_zoom_min, self.image_zoom_max
            )));
        }
        if self.transparent_zoom_max.is_nan() || self.transparent_zoom_max < 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "transparent_zoom_max must be >= 1, got {}",
                self.transparent_zoom_max
            )));
        }
        if !self.transparent_pan_min_scale.is_finite() || self.transparent_pan_min_scale < 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "transparent_pan_min_scale must be a finite value >= 1, got {}",
                self.transparent_pan_min_scale
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn image_limits(&self) -> ZoomLimits {
        ZoomLimits { min: self.image_zoom_min, max: self.image_zoom_max }
    }

    /// Transparent mode never zooms out past the host's natural size.
    #[must_use]
    pub fn transparent_limits(&self) -> ZoomLimits {
        ZoomLimits { min: 1.0, max: self.transparent_zoom_max }
    }
}
