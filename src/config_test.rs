#![allow(clippy::float_cmp)]

use super::*;
use crate::style::Rgb;
use crate::zone::ZoneStatus;

#[test]
fn defaults_match_documented_thresholds() {
    let c = CanvasConfig::default();
    assert_eq!(c.tap_slop_px, 3.0);
    assert_eq!(c.click_slop_px, 4.0);
    assert_eq!(c.tap_max_ms, 500.0);
    assert_eq!(c.close_path_radius_px, 18.0);
    assert_eq!(c.image_zoom_min, 0.15);
    assert_eq!(c.image_zoom_max, 8.0);
    assert_eq!(c.transparent_zoom_max, 4.0);
    assert_eq!(c.zoom_animation_ms, 400.0);
    assert_eq!(c.legend.len(), 3);
}

#[test]
fn defaults_validate() {
    assert!(CanvasConfig::default().validate().is_ok());
}

#[test]
fn from_json_empty_object_is_default() {
    let c = CanvasConfig::from_json("{}").unwrap();
    assert_eq!(c, CanvasConfig::default());
}

#[test]
fn from_json_overrides_single_field() {
    let c = CanvasConfig::from_json(r#"{ "close_path_radius_px": 24 }"#).unwrap();
    assert_eq!(c.close_path_radius_px, 24.0);
    assert_eq!(c.tap_slop_px, 3.0);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = CanvasConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, CanvasError::ConfigParse(_)));
}

#[test]
fn from_json_rejects_inverted_zoom_limits() {
    let err = CanvasConfig::from_json(r#"{ "image_zoom_min": 9, "image_zoom_max": 8 }"#).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(ref msg) if msg.contains("image_zoom_min")));
}

#[test]
fn from_json_rejects_non_positive_threshold() {
    let err = CanvasConfig::from_json(r#"{ "tap_max_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(ref msg) if msg.contains("tap_max_ms")));
}

#[test]
fn from_json_rejects_transparent_max_below_one() {
    let err = CanvasConfig::from_json(r#"{ "transparent_zoom_max": 0.5 }"#).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(_)));
}

#[test]
fn from_json_rejects_wheel_step_that_cannot_zoom() {
    assert!(CanvasConfig::from_json(r#"{ "wheel_zoom_step": 1.0 }"#).is_err());
}

#[test]
fn from_json_rejects_bad_label_min_zoom() {
    let err = CanvasConfig::from_json(r#"{ "label_min_zoom": -1 }"#).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(ref msg) if msg.contains("label_min_zoom")));
    let nan = CanvasConfig { label_min_zoom: f64::NAN, ..CanvasConfig::default() };
    assert!(nan.validate().is_err());
}

#[test]
fn from_json_rejects_pan_threshold_below_one() {
    let err = CanvasConfig::from_json(r#"{ "transparent_pan_min_scale": 0.5 }"#).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(ref msg) if msg.contains("transparent_pan_min_scale")));
    let inf = CanvasConfig { transparent_pan_min_scale: f64::INFINITY, ..CanvasConfig::default() };
    assert!(inf.validate().is_err());
}

#[test]
fn partial_palette_keeps_default_statuses() {
    let c = CanvasConfig::from_json(r#"{ "palette": { "entries": { "sold": { "color": [1, 2, 3] } } } }"#).unwrap();
    assert_eq!(c.palette.style_for(&ZoneStatus::Available).color, Rgb(34, 197, 94));
    assert_eq!(c.palette.style_for(&ZoneStatus::Sold).color, Rgb(1, 2, 3));
}

#[test]
fn limits_per_mode() {
    let c = CanvasConfig::default();
    assert_eq!(c.image_limits(), ZoomLimits { min: 0.15, max: 8.0 });
    assert_eq!(c.transparent_limits(), ZoomLimits { min: 1.0, max: 4.0 });
}

#[test]
fn error_messages_are_readable() {
    let err = CanvasError::InvalidConfig("x".into());
    assert_eq!(err.to_string(), "invalid config: x");
    assert_eq!(CanvasError::ContextUnavailable.to_string(), "2d rendering context unavailable");
}
