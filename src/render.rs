//! Rendering: draws the full zone canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it never mutates anything.
//!
//! Layers, bottom first: background (image mode), zones, labels, the path being
//! drawn, then screen-fixed overlays (legend, control cluster, hint). Zones and
//! the path are drawn in content space. Sizes meant to look constant on screen
//! are divided by the view scale, because in image mode the context applies the
//! zoom and in transparent mode the host scales the whole surface.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::controls::{self, ControlKind};
use crate::coords::Size;
use crate::engine::{BackgroundState, EngineCore};
use crate::geometry::{Point, vertex_centroid};
use crate::input::{EditTool, Mode};
use crate::style::{LegendEntry, StatusPalette};
use crate::viewport::ViewTransform;

/// Fill behind the zones while the image loads or after it failed.
const NEUTRAL_FILL: &str = "#e5e7eb";
/// Dash segment length for the in-progress path, in screen pixels.
const PATH_DASH_PX: f64 = 6.0;
const PATH_COLOR: &str = "#2563eb";
const PATH_MARKER_RADIUS_PX: f64 = 4.0;
const LABEL_FONT_PX: f64 = 13.0;
const OVERLAY_FONT: &str = "12px sans-serif";
const LEGEND_ROW_PX: f64 = 20.0;
const LEGEND_SWATCH_PX: f64 = 12.0;
const LEGEND_PADDING_PX: f64 = 10.0;
const LEGEND_WIDTH_PX: f64 = 130.0;

/// Canvas matrix `[a, b, c, d, e, f]` as taken by `setTransform`.
pub type Matrix = [f64; 6];

/// Matrix for drawing in content space.
///
/// Image mode applies zoom and pan; transparent mode draws in surface pixels
/// and lets the host transform the element.
#[must_use]
pub fn content_matrix(transform: &ViewTransform, dpr: f64) -> Matrix {
    match transform {
        ViewTransform::Image { zoom, pan } => [dpr * zoom, 0.0, 0.0, dpr * zoom, dpr * pan.x, dpr * pan.y],
        ViewTransform::Transparent { .. } => [dpr, 0.0, 0.0, dpr, 0.0, 0.0],
    }
}

/// Matrix for drawing screen-fixed overlays.
///
/// In transparent mode this undoes the host transform so overlays stay put
/// while the surface underneath is scaled.
#[must_use]
pub fn overlay_matrix(transform: &ViewTransform, dpr: f64) -> Matrix {
    match transform {
        ViewTransform::Image { .. } => [dpr, 0.0, 0.0, dpr, 0.0, 0.0],
        ViewTransform::Transparent { scale, translate } => {
            let k = dpr / scale;
            [k, 0.0, 0.0, k, -translate.x * k, -translate.y * k]
        }
    }
}

/// Content-space length that appears as `px` screen pixels.
#[must_use]
pub fn screen_px(transform: &ViewTransform, px: f64) -> f64 {
    px / transform.scale()
}

/// Labels are always shown in transparent mode, and in image mode once zoomed
/// in far enough to be legible.
#[must_use]
pub fn labels_visible(transform: &ViewTransform, min_zoom: f64) -> bool {
    match transform {
        ViewTransform::Image { zoom, .. } => *zoom >= min_zoom,
        ViewTransform::Transparent { .. } => true,
    }
}

/// Top-left corner of the legend box: bottom-left of the container.
#[must_use]
pub fn legend_origin(container: Size, rows: usize) -> Point {
    let height = legend_height(rows);
    Point::new(LEGEND_PADDING_PX, container.height - LEGEND_PADDING_PX - height)
}

#[allow(clippy::cast_precision_loss)]
fn legend_height(rows: usize) -> f64 {
    rows as f64 * LEGEND_ROW_PX + LEGEND_PADDING_PX
}

/// Draw the full scene.
///
/// `image` is the loaded background image, if any.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, image: Option<&HtmlImageElement>, core: &EngineCore) -> Result<(), JsValue> {
    let container = core.viewport.container();
    let transform = core.transform();
    let dpr = core.dpr;

    // Layer 1: clear.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, container.width, container.height);

    // Layer 2: content space.
    let [a, b, c, d, e, f] = content_matrix(&transform, dpr);
    ctx.set_transform(a, b, c, d, e, f)?;
    draw_background(ctx, image, core)?;
    draw_zones(ctx, core)?;
    if core.ui.is_drawing() {
        draw_path(ctx, core)?;
    }

    // Layer 3: screen-fixed overlays.
    let [a, b, c, d, e, f] = overlay_matrix(&transform, dpr);
    ctx.set_transform(a, b, c, d, e, f)?;
    draw_legend(ctx, &core.config.legend, &core.config.palette, container)?;
    if core.ui.mode == Mode::Edit {
        draw_controls(ctx, core)?;
        draw_hint(ctx, core)?;
    }
    Ok(())
}

// =============================================================
// Background
// =============================================================

fn draw_background(
    ctx: &CanvasRenderingContext2d,
    image: Option<&HtmlImageElement>,
    core: &EngineCore,
) -> Result<(), JsValue> {
    let size = match core.background {
        BackgroundState::External => return Ok(()),
        BackgroundState::Loaded(size) => size,
        BackgroundState::Loading | BackgroundState::Failed => core.viewport.container(),
    };
    match (core.background, image) {
        (BackgroundState::Loaded(_), Some(image)) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, size.width, size.height)?;
        }
        _ => {
            ctx.set_fill_style_str(NEUTRAL_FILL);
            ctx.fill_rect(0.0, 0.0, size.width, size.height);
        }
    }
    Ok(())
}

// =============================================================
// Zones
// =============================================================

fn draw_zones(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let space = core.space();
    let transform = core.transform();
    let show_labels = labels_visible(&transform, core.config.label_min_zoom);

    for zone in core.zones.renderable() {
        let points: Vec<Point> = zone.points.iter().map(|p| space.normalized_to_content(*p)).collect();
        let active = core.ui.is_active(&zone.id);
        let style = core.config.palette.style_for(&zone.status);

        trace_polygon(ctx, &points);
        ctx.set_fill_style_str(&style.fill_css(active));
        ctx.fill();
        ctx.set_stroke_style_str(&style.stroke_css());
        ctx.set_line_width(screen_px(&transform, style.line_width(active)));
        ctx.stroke();
    }

    if show_labels {
        for zone in core.zones.renderable().filter(|z| !z.label.is_empty()) {
            let points: Vec<Point> = zone.points.iter().map(|p| space.normalized_to_content(*p)).collect();
            if let Some(anchor) = vertex_centroid(&points) {
                draw_label(ctx, &zone.label, anchor, &transform)?;
            }
        }
    }
    Ok(())
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.close_path();
}

fn draw_label(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    anchor: Point,
    transform: &ViewTransform,
) -> Result<(), JsValue> {
    let font_size = screen_px(transform, LABEL_FONT_PX);
    ctx.set_font(&format!("600 {font_size}px sans-serif"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    // Halo keeps the label readable over any background.
    ctx.set_line_width(screen_px(transform, 3.0));
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.85)");
    ctx.stroke_text(text, anchor.x, anchor.y)?;
    ctx.set_fill_style_str("#111827");
    ctx.fill_text(text, anchor.x, anchor.y)?;
    Ok(())
}

// =============================================================
// In-progress path
// =============================================================

fn draw_path(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    if core.path.is_empty() {
        return Ok(());
    }
    let space = core.space();
    let transform = core.transform();
    let points: Vec<Point> = core.path.points().iter().map(|p| space.normalized_to_content(*p)).collect();

    ctx.save();
    let dash = screen_px(&transform, PATH_DASH_PX);
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(PATH_COLOR);
    ctx.set_line_width(screen_px(&transform, 2.0));

    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    // Preview segment to the pointer.
    if let (Some(pointer), Some(last)) = (core.ui.pointer, points.last()) {
        let target = if core.path.near_start() { points[0] } else { space.screen_to_content(pointer) };
        ctx.move_to(last.x, last.y);
        ctx.line_to(target.x, target.y);
    }
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;

    let marker = screen_px(&transform, PATH_MARKER_RADIUS_PX);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_line_width(screen_px(&transform, 1.5));
    for p in &points {
        ctx.begin_path();
        ctx.arc(p.x, p.y, marker, 0.0, 2.0 * PI)?;
        ctx.fill();
        ctx.stroke();
    }

    if core.path.near_start() {
        let start = points[0];
        ctx.begin_path();
        ctx.arc(start.x, start.y, screen_px(&transform, core.config.close_path_radius_px), 0.0, 2.0 * PI)?;
        ctx.set_fill_style_str("rgba(37, 99, 235, 0.15)");
        ctx.fill();
        ctx.set_line_width(screen_px(&transform, 2.0));
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Overlays
// =============================================================

fn draw_legend(
    ctx: &CanvasRenderingContext2d,
    legend: &[LegendEntry],
    palette: &StatusPalette,
    container: Size,
) -> Result<(), JsValue> {
    if legend.is_empty() {
        return Ok(());
    }
    let origin = legend_origin(container, legend.len());
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
    ctx.fill_rect(origin.x, origin.y, LEGEND_WIDTH_PX, legend_height(legend.len()));

    ctx.set_font(OVERLAY_FONT);
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    let mut y = origin.y + LEGEND_PADDING_PX * 0.5 + LEGEND_ROW_PX * 0.5;
    for entry in legend {
        let style = palette.style_for(&entry.status);
        let x = origin.x + LEGEND_PADDING_PX;
        ctx.set_fill_style_str(&style.stroke_css());
        ctx.fill_rect(x, y - LEGEND_SWATCH_PX * 0.5, LEGEND_SWATCH_PX, LEGEND_SWATCH_PX);
        ctx.set_fill_style_str("#111827");
        ctx.fill_text(&entry.label, x + LEGEND_SWATCH_PX + 8.0, y)?;
        y += LEGEND_ROW_PX;
    }
    Ok(())
}

fn draw_controls(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("18px sans-serif");
    for button in controls::layout(core.viewport.container()) {
        let pressed = match button.kind {
            ControlKind::Select => core.ui.tool == EditTool::Select,
            ControlKind::Draw => core.ui.tool == EditTool::Draw,
            ControlKind::Delete => false,
        };
        let enabled = button.kind != ControlKind::Delete || core.ui.selected.is_some();

        ctx.set_fill_style_str(if pressed { "#2563eb" } else { "#ffffff" });
        ctx.fill_rect(button.origin.x, button.origin.y, button.size, button.size);
        ctx.set_stroke_style_str("#d1d5db");
        ctx.set_line_width(1.0);
        ctx.stroke_rect(button.origin.x, button.origin.y, button.size, button.size);

        let glyph_color = match (pressed, enabled) {
            (true, _) => "#ffffff",
            (false, true) => "#111827",
            (false, false) => "#9ca3af",
        };
        ctx.set_fill_style_str(glyph_color);
        let center = button.center();
        ctx.fill_text(button.kind.glyph(), center.x, center.y)?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_hint(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let text = if core.ui.is_drawing() {
        core.path.hint()
    } else if core.ui.selected.is_some() {
        "Delete removes the selected zone".to_owned()
    } else {
        "Click a zone to select it".to_owned()
    };
    ctx.set_font(OVERLAY_FONT);
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    let width = match ctx.measure_text(&text) {
        Ok(metrics) => metrics.width(),
        Err(_) => text.chars().count() as f64 * 7.0,
    };
    let x = LEGEND_PADDING_PX;
    let y = LEGEND_PADDING_PX;
    ctx.set_fill_style_str("rgba(17, 24, 39, 0.8)");
    ctx.fill_rect(x, y, width + 16.0, 26.0);
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_text(&text, x + 8.0, y + 13.0)?;
    Ok(())
}
