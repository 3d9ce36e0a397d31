#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::CoordinateSpace;
use crate::geometry::{Point, point_in_polygon};
use crate::zone::{Zone, ZoneSet};

/// A zone's vertices in screen space.
#[must_use]
pub fn zone_screen_polygon(zone: &Zone, space: &CoordinateSpace) -> Vec<Point> {
    zone.points.iter().map(|p| space.normalized_to_screen(*p)).collect()
}

/// The topmost renderable zone containing `screen_pt`, if any.
///
/// Zones later in the set are drawn on top, so they are tested first.
#[must_use]
pub fn hit_test<'a>(screen_pt: Point, zones: &'a ZoneSet, space: &CoordinateSpace) -> Option<&'a Zone> {
    zones
        .topmost_first()
        .find(|zone| point_in_polygon(screen_pt, &zone_screen_polygon(zone, space)))
}
