//! Touch gesture bookkeeping: tap candidates, one-finger drags, and pinches.
//!
//! Browsers deliver the full touch list on every event, so the tracker is
//! rebuilt from that list each time instead of trusting incremental updates.
//! The tracker only classifies; the engine decides what a pan or pinch does
//! to the viewport and whether the page may keep the gesture.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::collections::BTreeMap;

use crate::geometry::Point;
use crate::input::TouchPoint;

/// How a finished single-finger touch should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    /// Short and still: acts like a click.
    Tap,
    /// Moved at least the slop distance.
    Drag,
    /// Still, but held too long to be a tap.
    Press,
}

/// Classify a touch from its start/end points and duration.
#[must_use]
pub fn classify_touch(origin: Point, end: Point, elapsed_ms: f64, slop_px: f64, tap_max_ms: f64) -> TouchKind {
    if origin.distance_to(end) >= slop_px {
        TouchKind::Drag
    } else if elapsed_ms < tap_max_ms {
        TouchKind::Tap
    } else {
        TouchKind::Press
    }
}

/// What a touch-move asks the viewport to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchUpdate {
    /// Nothing to apply (still within slop, or fingers changed identity).
    None,
    /// One finger dragged by a screen-space delta.
    Pan { dx: f64, dy: f64 },
    /// Two fingers moved from `prev` to `cur`.
    Pinch { prev: (Point, Point), cur: (Point, Point) },
}

#[derive(Debug, Clone, Copy)]
struct TapCandidate {
    origin: Point,
    started_ms: f64,
}

/// Per-gesture touch state. Reset whenever the last finger lifts.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    touches: BTreeMap<i32, Point>,
    tap: Option<TapCandidate>,
    moved: bool,
    pinching: bool,
}

impl TouchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingers went down. `touches` is the full active list.
    pub fn begin(&mut self, touches: &[TouchPoint], now_ms: f64) {
        self.sync(touches);
        match touches {
            [only] if !self.pinching && self.tap.is_none() => {
                self.tap = Some(TapCandidate { origin: only.point, started_ms: now_ms });
                self.moved = false;
            }
            [] | [_] => {}
            _ => {
                self.pinching = true;
                self.tap = None;
            }
        }
    }

    /// Fingers moved. Returns the viewport update implied by the movement since
    /// the previous event.
    pub fn update(&mut self, touches: &[TouchPoint], slop_px: f64) -> TouchUpdate {
        let update = match touches {
            [only] => self.single_update(*only, slop_px),
            [a, b, ..] => {
                self.pinching = true;
                self.tap = None;
                match (self.touches.get(&a.id), self.touches.get(&b.id)) {
                    (Some(&pa), Some(&pb)) => TouchUpdate::Pinch { prev: (pa, pb), cur: (a.point, b.point) },
                    _ => TouchUpdate::None,
                }
            }
            [] => TouchUpdate::None,
        };
        self.sync(touches);
        update
    }

    fn single_update(&mut self, touch: TouchPoint, slop_px: f64) -> TouchUpdate {
        // A finger left over from a pinch only re-anchors; it never pans or taps.
        if self.pinching {
            return TouchUpdate::None;
        }
        let Some(last) = self.touches.get(&touch.id).copied() else {
            return TouchUpdate::None;
        };
        if !self.moved {
            let origin = self.tap.map_or(last, |t| t.origin);
            if origin.distance_to(touch.point) < slop_px {
                return TouchUpdate::None;
            }
            self.moved = true;
            self.tap = None;
        }
        TouchUpdate::Pan { dx: touch.point.x - last.x, dy: touch.point.y - last.y }
    }

    /// Fingers lifted. `remaining` is the still-active list, `changed` the lifted
    /// ones. Returns the tap point when the gesture ends as a tap.
    pub fn end(
        &mut self,
        remaining: &[TouchPoint],
        changed: &[TouchPoint],
        now_ms: f64,
        slop_px: f64,
        tap_max_ms: f64,
    ) -> Option<Point> {
        if !remaining.is_empty() {
            self.sync(remaining);
            self.tap = None;
            return None;
        }
        let tap = match (changed, self.tap) {
            ([lifted], Some(candidate)) if !self.pinching && !self.moved => {
                let kind =
                    classify_touch(candidate.origin, lifted.point, now_ms - candidate.started_ms, slop_px, tap_max_ms);
                (kind == TouchKind::Tap).then_some(lifted.point)
            }
            _ => None,
        };
        self.reset();
        tap
    }

    /// Replace the finger positions with `touches`.
    fn sync(&mut self, touches: &[TouchPoint]) {
        self.touches = touches.iter().map(|t| (t.id, t.point)).collect();
    }

    /// Drop all bookkeeping (last finger lifted, or the gesture was cancelled).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinching
    }
}
