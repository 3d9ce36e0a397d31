//! Shared numeric constants for the zone canvas.
//!
//! These are the defaults behind [`crate::config::CanvasConfig`]; the engine
//! always reads the live values from the config, never from here directly.

// ── Gestures ────────────────────────────────────────────────────

/// Touch movement (screen px) at which a tentative tap becomes a drag.
pub const TAP_SLOP_PX: f64 = 3.0;

/// Mouse movement (screen px) below which a press/release counts as a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

/// Longest touch (ms) that can still be classified as a tap.
pub const TAP_MAX_MS: f64 = 500.0;

/// Multiplicative zoom step for one wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

// ── Drawing ─────────────────────────────────────────────────────

/// Screen-space radius around the first path point that closes the polygon.
pub const CLOSE_PATH_RADIUS_PX: f64 = 18.0;

// ── Zoom limits ─────────────────────────────────────────────────

/// Smallest zoom reachable by wheel/pinch in image mode.
pub const IMAGE_ZOOM_MIN: f64 = 0.15;

/// Largest zoom reachable in image mode.
pub const IMAGE_ZOOM_MAX: f64 = 8.0;

/// Largest host scale in transparent mode.
pub const TRANSPARENT_ZOOM_MAX: f64 = 4.0;

/// Transparent-mode scale above which a single finger pans instead of scrolling the page.
pub const TRANSPARENT_PAN_MIN_SCALE: f64 = 1.05;

/// Share of the container the fitted image occupies.
pub const FIT_MARGIN: f64 = 0.95;

/// Share of the viewport a zone's bounding box fills after zoom-to-zone.
pub const ZONE_FOCUS_FILL: f64 = 0.6;

// ── Animation / rendering ───────────────────────────────────────

/// Duration of the zoom-to-zone and reset-view animation.
pub const ZOOM_ANIMATION_MS: f64 = 400.0;

/// Image-mode zoom at or above which zone labels are drawn.
pub const LABEL_MIN_ZOOM: f64 = 0.6;
