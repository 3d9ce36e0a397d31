//! In-progress polygon authoring.
//!
//! Points are kept normalized so the path survives pan/zoom between clicks.
//! All proximity checks (duplicate clicks, closing on the first point) are made
//! in screen space against the current [`CoordinateSpace`], so they feel the
//! same at every zoom level.

#[cfg(test)]
#[path = "drawing_test.rs"]
mod drawing_test;

use crate::coords::CoordinateSpace;
use crate::geometry::{Point, ZonePoint};
use crate::zone::MIN_POLYGON_POINTS;

/// What the next click will do; drives the on-canvas hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStep {
    /// Nothing placed yet.
    FirstPoint,
    /// Fewer than three points; `remaining` more are needed.
    MorePoints { remaining: usize },
    /// Closable; the pointer is away from the first point.
    CanClose,
    /// Closable and the pointer is over the first point.
    WillClose,
}

impl DrawStep {
    #[must_use]
    pub fn hint(self) -> String {
        match self {
            Self::FirstPoint => "Click to place the first point".to_owned(),
            Self::MorePoints { remaining: 1 } => "Add 1 more point".to_owned(),
            Self::MorePoints { remaining } => format!("Add {remaining} more points"),
            Self::CanClose => "Click the first point or double-click to finish (Esc cancels)".to_owned(),
            Self::WillClose => "Click to close the zone".to_owned(),
        }
    }
}

/// The polygon being drawn.
#[derive(Debug, Clone, Default)]
pub struct DrawPath {
    points: Vec<ZonePoint>,
    near_start: bool,
}

impl DrawPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn points(&self) -> &[ZonePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The pointer was within the close radius of the first point at the last check.
    #[must_use]
    pub fn near_start(&self) -> bool {
        self.near_start
    }

    /// Enough points to form a zone.
    #[must_use]
    pub fn is_closable(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }

    /// First point in screen space.
    #[must_use]
    pub fn start_on_screen(&self, space: &CoordinateSpace) -> Option<Point> {
        self.points.first().map(|p| space.normalized_to_screen(*p))
    }

    /// Whether `screen` would close the path: more than two points and within
    /// `radius_px` of the first one.
    #[must_use]
    pub fn is_near_start(&self, screen: Point, space: &CoordinateSpace, radius_px: f64) -> bool {
        self.points.len() > 2
            && self.start_on_screen(space).is_some_and(|start| start.distance_to(screen) <= radius_px)
    }

    /// Whether `screen` repeats the last point (e.g. the second click of a double-click).
    #[must_use]
    pub fn is_duplicate(&self, screen: Point, space: &CoordinateSpace, slop_px: f64) -> bool {
        self.points.last().is_some_and(|last| space.normalized_to_screen(*last).distance_to(screen) < slop_px)
    }

    /// Recompute the near-start flag for the pointer at `screen`. Returns whether it changed.
    pub fn update_near_start(&mut self, screen: Point, space: &CoordinateSpace, radius_px: f64) -> bool {
        let near = self.is_near_start(screen, space, radius_px);
        let changed = near != self.near_start;
        self.near_start = near;
        changed
    }

    /// Drop the near-start flag, e.g. when the pointer leaves the canvas.
    pub fn clear_near_start(&mut self) {
        self.near_start = false;
    }

    pub fn push(&mut self, point: ZonePoint) {
        self.points.push(point);
    }

    /// Hand the points over and start fresh.
    pub fn take(&mut self) -> Vec<ZonePoint> {
        self.near_start = false;
        std::mem::take(&mut self.points)
    }

    /// Discard the path. Returns whether there was anything to discard.
    pub fn clear(&mut self) -> bool {
        let had_points = !self.points.is_empty();
        self.points.clear();
        self.near_start = false;
        had_points
    }

    #[must_use]
    pub fn step(&self) -> DrawStep {
        match self.points.len() {
            0 => DrawStep::FirstPoint,
            n if n < MIN_POLYGON_POINTS => DrawStep::MorePoints { remaining: MIN_POLYGON_POINTS - n },
            _ if self.near_start => DrawStep::WillClose,
            _ => DrawStep::CanClose,
        }
    }

    /// Text describing the current step.
    #[must_use]
    pub fn hint(&self) -> String {
        self.step().hint()
    }
}
