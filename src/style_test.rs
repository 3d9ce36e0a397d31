use serde_json::json;

use super::*;

#[test]
fn default_palette_covers_known_statuses() {
    let palette = StatusPalette::default();
    for status in [
        ZoneStatus::Available,
        ZoneStatus::ComingSoon,
        ZoneStatus::SoldOut,
        ZoneStatus::Reserved,
        ZoneStatus::Sold,
    ] {
        assert_ne!(palette.style_for(&status), &palette.fallback, "{status} fell back");
    }
}

#[test]
fn unknown_status_uses_fallback() {
    let palette = StatusPalette::default();
    let style = palette.style_for(&ZoneStatus::from("under_offer"));
    assert_eq!(style, &palette.fallback);
}

#[test]
fn palette_is_extensible() {
    let mut palette = StatusPalette::default();
    let status = ZoneStatus::from("under_offer");
    palette.set(&status, ZoneStyle::with_color(Rgb(1, 2, 3)));
    assert_eq!(palette.style_for(&status).color, Rgb(1, 2, 3));
}

#[test]
fn fill_css_switches_alpha_on_emphasis() {
    let style = ZoneStyle::with_color(Rgb(10, 20, 30));
    assert_eq!(style.fill_css(false), "rgba(10, 20, 30, 0.25)");
    assert_eq!(style.fill_css(true), "rgba(10, 20, 30, 0.45)");
    assert_eq!(style.stroke_css(), "rgb(10, 20, 30)");
}

#[test]
fn line_width_is_thicker_when_active() {
    let style = ZoneStyle::default();
    assert!(style.line_width(true) > style.line_width(false));
}

#[test]
fn palette_deserializes_partial_style() {
    let palette: StatusPalette = serde_json::from_value(json!({
        "entries": { "available": { "color": [0, 255, 0], "fill_alpha": 0.1 } }
    }))
    .unwrap();
    let style = palette.style_for(&ZoneStatus::Available);
    assert_eq!(style.color, Rgb(0, 255, 0));
    assert!((style.fill_alpha - 0.1).abs() < f64::EPSILON);
    assert!((style.stroke_width - 2.0).abs() < f64::EPSILON);
    assert_eq!(palette.style_for(&ZoneStatus::Sold).color, Rgb(220, 38, 38));
    assert_eq!(palette.fallback, ZoneStyle::default());
}

#[test]
fn palette_overrides_merge_over_defaults() {
    let palette: StatusPalette = serde_json::from_value(json!({
        "entries": { "under_offer": { "color": [9, 9, 9] } },
        "fallback": { "color": [1, 1, 1] }
    }))
    .unwrap();
    assert_eq!(palette.style_for(&ZoneStatus::from("under_offer")).color, Rgb(9, 9, 9));
    assert_eq!(palette.style_for(&ZoneStatus::Available).color, Rgb(34, 197, 94));
    assert_eq!(palette.style_for(&ZoneStatus::from("unknown")).color, Rgb(1, 1, 1));
}

#[test]
fn empty_palette_object_is_default() {
    let palette: StatusPalette = serde_json::from_value(json!({})).unwrap();
    assert_eq!(palette, StatusPalette::default());
}

#[test]
fn default_legend_has_three_rows() {
    let legend = default_legend();
    assert_eq!(legend.len(), 3);
    assert_eq!(legend[0].status, ZoneStatus::Available);
    assert_eq!(legend[2].label, "Sold");
}
