//! Value types and pure functions for points and polygons.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in any of the canvas coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A point in normalized `[0, 1]` zone space.
pub type ZonePoint = Point;

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Linear interpolation toward `other` at parameter `t`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            (other.x - self.x).mul_add(t, self.x),
            (other.y - self.y).mul_add(t, self.y),
        )
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of `points`, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        for p in &points[1..] {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width, or `1.0` when the box has no horizontal extent.
    ///
    /// Used wherever the width becomes a scale denominator.
    #[must_use]
    pub fn safe_width(&self) -> f64 {
        let w = self.width();
        if w > 0.0 { w } else { 1.0 }
    }

    /// Height, or `1.0` when the box has no vertical extent.
    #[must_use]
    pub fn safe_height(&self) -> f64 {
        let h = self.height();
        if h > 0.0 { h } else { 1.0 }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }
}

/// Ray-casting point-in-polygon test.
///
/// Casts a horizontal ray to +x and counts edge crossings. Edges are treated as
/// half-open in y, so a point on a shared horizontal edge belongs to at most one
/// of two adjacent polygons. Polygons with fewer than three points never contain
/// anything.
#[must_use]
pub fn point_in_polygon(pt: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > pt.y) != (b.y > pt.y) {
            let cross_x = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Average of the polygon's vertices; the label anchor.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn vertex_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}
