//! Input model: modes, edit tools, mouse buttons, keys, and the press state machine.
//!
//! `Mode` and `EditTool` capture what the user is doing at the time of a pointer
//! event. `InputState` is the mouse press being tracked between pointer-down and
//! pointer-up; it decides whether the release is a click or the end of a pan.
//! Touch bookkeeping lives in [`crate::gesture`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::zone::ZoneId;

/// Top-level interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browse: hover highlights, clicks report zones.
    #[default]
    View,
    /// Author: select zones, draw new polygons, propose deletions.
    Edit,
}

/// Which edit tool is active. Ignored in view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTool {
    /// Click toggles the selection.
    #[default]
    Select,
    /// Clicks append polygon points.
    Draw,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by `KeyboardEvent.key` (e.g. `"Escape"`, `"Enter"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, which zooms out).
    pub dy: f64,
}

/// One active touch in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// `Touch.identifier`, stable for the lifetime of the finger.
    pub id: i32,
    pub point: Point,
}

impl TouchPoint {
    #[must_use]
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, point: Point::new(x, y) }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    pub tool: EditTool,
    /// Zone under the pointer.
    pub hovered: Option<ZoneId>,
    /// Zone selected in edit mode.
    pub selected: Option<ZoneId>,
    /// Zone emphasised by the host.
    pub highlighted: Option<ZoneId>,
    /// Last pointer position in screen space, if the pointer is over the canvas.
    pub pointer: Option<Point>,
}

impl UiState {
    /// Whether clicks currently append polygon points.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Edit && self.tool == EditTool::Draw
    }

    /// Whether `id` should be drawn emphasised.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        [&self.hovered, &self.selected, &self.highlighted]
            .into_iter()
            .any(|slot| slot.as_deref() == Some(id))
    }
}

/// Mouse press state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No button held.
    #[default]
    Idle,
    /// Primary button held. Becomes a pan once `moved` is set.
    Pressing {
        /// Screen position at pointer-down; click slop is measured from here.
        origin: Point,
        /// Screen position at the previous move, for pan deltas.
        last: Point,
        /// Movement has exceeded the click slop.
        moved: bool,
    },
}
