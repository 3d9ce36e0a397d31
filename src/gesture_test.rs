use super::*;

const SLOP: f64 = 3.0;
const TAP_MS: f64 = 500.0;

fn touch(id: i32, x: f64, y: f64) -> TouchPoint {
    TouchPoint::new(id, x, y)
}

// =============================================================
// classify_touch
// =============================================================

#[test]
fn classify_short_still_touch_is_tap() {
    let kind = classify_touch(Point::new(10.0, 10.0), Point::new(11.0, 11.0), 120.0, SLOP, TAP_MS);
    assert_eq!(kind, TouchKind::Tap);
}

#[test]
fn classify_movement_at_slop_is_drag() {
    let kind = classify_touch(Point::new(0.0, 0.0), Point::new(3.0, 0.0), 50.0, SLOP, TAP_MS);
    assert_eq!(kind, TouchKind::Drag);
}

#[test]
fn classify_long_still_touch_is_press() {
    let kind = classify_touch(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 500.0, SLOP, TAP_MS);
    assert_eq!(kind, TouchKind::Press);
}

// =============================================================
// Single finger
// =============================================================

#[test]
fn quick_still_touch_ends_as_tap() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 50.0, 50.0)], 0.0);
    assert!(t.tap.is_some());
    let tap = t.end(&[], &[touch(1, 51.0, 50.0)], 200.0, SLOP, TAP_MS);
    assert_eq!(tap, Some(Point::new(51.0, 50.0)));
    assert_eq!(t.touches.len(), 0);
}

#[test]
fn slow_touch_is_not_a_tap() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 50.0, 50.0)], 0.0);
    assert_eq!(t.end(&[], &[touch(1, 50.0, 50.0)], 800.0, SLOP, TAP_MS), None);
}

#[test]
fn move_within_slop_does_not_pan() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 50.0, 50.0)], 0.0);
    let update = t.update(&[touch(1, 52.0, 50.0)], SLOP);
    assert_eq!(update, TouchUpdate::None);
    assert!(!t.moved);
    assert!(t.tap.is_some());
}

#[test]
fn move_past_slop_pans_by_delta_and_cancels_tap() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 50.0, 50.0)], 0.0);
    assert_eq!(t.update(&[touch(1, 52.0, 50.0)], SLOP), TouchUpdate::None);
    let update = t.update(&[touch(1, 60.0, 54.0)], SLOP);
    assert_eq!(update, TouchUpdate::Pan { dx: 8.0, dy: 4.0 });
    assert!(t.moved);
    assert!(!t.tap.is_some());

    let next = t.update(&[touch(1, 61.0, 54.0)], SLOP);
    assert_eq!(next, TouchUpdate::Pan { dx: 1.0, dy: 0.0 });
    assert_eq!(t.end(&[], &[touch(1, 61.0, 54.0)], 100.0, SLOP, TAP_MS), None);
}

#[test]
fn drag_back_to_origin_is_still_not_a_tap() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0)], 0.0);
    t.update(&[touch(1, 10.0, 0.0)], SLOP);
    t.update(&[touch(1, 0.0, 0.0)], SLOP);
    assert_eq!(t.end(&[], &[touch(1, 0.0, 0.0)], 100.0, SLOP, TAP_MS), None);
}

// =============================================================
// Pinch
// =============================================================

#[test]
fn second_finger_starts_pinch() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0)], 0.0);
    t.begin(&[touch(1, 0.0, 0.0), touch(2, 100.0, 0.0)], 10.0);
    assert!(t.is_pinching());
    assert!(!t.tap.is_some());
}

#[test]
fn pinch_update_reports_previous_and_current_pairs() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0), touch(2, 100.0, 0.0)], 0.0);
    let update = t.update(&[touch(1, -10.0, 0.0), touch(2, 110.0, 0.0)], SLOP);
    assert_eq!(
        update,
        TouchUpdate::Pinch {
            prev: (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
            cur: (Point::new(-10.0, 0.0), Point::new(110.0, 0.0)),
        }
    );
}

#[test]
fn pinch_with_unknown_finger_is_skipped() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0), touch(2, 100.0, 0.0)], 0.0);
    let update = t.update(&[touch(1, 0.0, 0.0), touch(3, 50.0, 0.0)], SLOP);
    assert_eq!(update, TouchUpdate::None);
    // The next move uses the re-synced pair.
    let next = t.update(&[touch(1, 0.0, 0.0), touch(3, 60.0, 0.0)], SLOP);
    assert!(matches!(next, TouchUpdate::Pinch { .. }));
}

#[test]
fn lifting_one_pinch_finger_falls_back_to_remaining() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0), touch(2, 100.0, 0.0)], 0.0);
    let tap = t.end(&[touch(1, 0.0, 0.0)], &[touch(2, 100.0, 0.0)], 50.0, SLOP, TAP_MS);
    assert_eq!(tap, None);
    assert_eq!(t.touches.len(), 1);
    assert!(t.is_pinching());
    // The leftover finger neither pans nor taps.
    assert_eq!(t.update(&[touch(1, 40.0, 0.0)], SLOP), TouchUpdate::None);
    assert_eq!(t.end(&[], &[touch(1, 40.0, 0.0)], 100.0, SLOP, TAP_MS), None);
    assert!(!t.is_pinching());
}

#[test]
fn quick_two_finger_tap_is_not_a_tap() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0), touch(2, 10.0, 0.0)], 0.0);
    let tap = t.end(&[], &[touch(1, 0.0, 0.0), touch(2, 10.0, 0.0)], 50.0, SLOP, TAP_MS);
    assert_eq!(tap, None);
}

#[test]
fn reset_clears_everything() {
    let mut t = TouchTracker::new();
    t.begin(&[touch(1, 0.0, 0.0), touch(2, 10.0, 0.0)], 0.0);
    t.reset();
    assert_eq!(t.touches.len(), 0);
    assert!(!t.is_pinching());
    assert!(!t.tap.is_some());
}
