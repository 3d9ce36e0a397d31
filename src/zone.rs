//! Zone model: labeled polygons, their open status vocabulary, and the ordered set.
//!
//! Zones are owned and persisted by the host. The engine receives them as a
//! whole list (`ZoneSet::load`), reads them for rendering and hit-testing, and
//! only ever *proposes* additions and removals back to the host through
//! [`crate::engine::Action`]s. Array order is z-order: later zones draw on top
//! and win hit tests.

#[cfg(test)]
#[path = "zone_test.rs"]
mod zone_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::ZonePoint;

/// Unique identifier for a zone. Host-assigned ids are kept as-is.
pub type ZoneId = String;

/// Minimum number of vertices for a zone to be drawn or hit.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Sale/availability state of a zone.
///
/// Hosts at different hierarchy levels use different subsets of this
/// vocabulary, so the set is open: any unknown string is kept in
/// [`ZoneStatus::Other`] and styled with the palette fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneStatus {
    #[default]
    Available,
    ComingSoon,
    SoldOut,
    Reserved,
    Sold,
    Other(String),
}

impl ZoneStatus {
    /// The wire/palette key for this status.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::ComingSoon => "coming_soon",
            Self::SoldOut => "sold_out",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ZoneStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "available" => Self::Available,
            "coming_soon" => Self::ComingSoon,
            "sold_out" => Self::SoldOut,
            "reserved" => Self::Reserved,
            "sold" => Self::Sold,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for ZoneStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<ZoneStatus> for String {
    fn from(status: ZoneStatus) -> Self {
        match status {
            ZoneStatus::Other(s) => s,
            known => known.key().to_owned(),
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A clickable polygonal hotspot in normalized coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Host-assigned identifier.
    pub id: ZoneId,
    /// Text drawn at the polygon centroid.
    #[serde(default)]
    pub label: String,
    /// Ordered vertices in `[0, 1]` space.
    pub points: Vec<ZonePoint>,
    /// Colour/legend key.
    #[serde(default)]
    pub status: ZoneStatus,
    /// Open host metadata, carried through untouched.
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl Zone {
    #[must_use]
    pub fn new(id: impl Into<ZoneId>, label: impl Into<String>, points: Vec<ZonePoint>, status: ZoneStatus) -> Self {
        Self { id: id.into(), label: label.into(), points, status, meta: serde_json::Map::new() }
    }

    /// Whether the zone has enough vertices to form a polygon.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }
}

/// Generate a fresh id for a newly authored zone.
#[must_use]
pub fn generate_zone_id() -> ZoneId {
    Uuid::new_v4().to_string()
}

/// Host-supplied zones in z-order.
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all zones with the host's current list.
    pub fn load(&mut self, zones: Vec<Zone>) {
        self.zones = zones;
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Zones in draw order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Renderable zones, bottom first.
    pub fn renderable(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|z| z.is_renderable())
    }

    /// Renderable zones, topmost first. This is hit-test order.
    pub fn topmost_first(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().rev().filter(|z| z.is_renderable())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
