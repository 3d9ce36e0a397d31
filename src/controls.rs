//! Edit-mode control cluster: select, draw, and delete buttons drawn in the
//! canvas's top-right corner. Positions are in screen pixels and do not move
//! with pan/zoom.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use crate::coords::Size;
use crate::geometry::Point;

/// Button edge length in screen pixels.
pub const BUTTON_SIZE_PX: f64 = 36.0;
/// Gap between buttons.
pub const BUTTON_GAP_PX: f64 = 8.0;
/// Distance from the canvas edges.
pub const CLUSTER_MARGIN_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Select,
    Draw,
    Delete,
}

impl ControlKind {
    pub const ALL: [Self; 3] = [Self::Select, Self::Draw, Self::Delete];

    /// Short glyph drawn inside the button.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Select => "↖",
            Self::Draw => "✎",
            Self::Delete => "🗑",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlButton {
    pub kind: ControlKind,
    /// Top-left corner.
    pub origin: Point,
    pub size: f64,
}

impl ControlButton {
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.origin.x + self.size * 0.5, self.origin.y + self.size * 0.5)
    }
}

/// Buttons in `ControlKind::ALL` order, left to right, flush with the top-right corner.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layout(container: Size) -> [ControlButton; 3] {
    let count = ControlKind::ALL.len() as f64;
    let total = count * BUTTON_SIZE_PX + (count - 1.0) * BUTTON_GAP_PX;
    let left = container.width - CLUSTER_MARGIN_PX - total;
    let mut x = left;
    ControlKind::ALL.map(|kind| {
        let button = ControlButton { kind, origin: Point::new(x, CLUSTER_MARGIN_PX), size: BUTTON_SIZE_PX };
        x += BUTTON_SIZE_PX + BUTTON_GAP_PX;
        button
    })
}

/// The control under `screen`, if any.
#[must_use]
pub fn hit(screen: Point, container: Size) -> Option<ControlKind> {
    layout(container).into_iter().find(|b| b.contains(screen)).map(|b| b.kind)
}
