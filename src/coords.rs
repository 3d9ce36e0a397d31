//! Coordinate spaces and the conversions between them.
//!
//! Four spaces are in play:
//!
//! | Space | Meaning |
//! |-------|---------|
//! | normalized | `[0, 1]` relative to the image (image mode) or container (transparent mode) |
//! | content | image pixels (image mode) or untransformed surface pixels (transparent mode) |
//! | screen | CSS pixels relative to the host container's top-left; pointer input arrives here |
//! | host container | transparent mode only: where the host applies `translate(t) scale(s)` |
//!
//! In image mode the engine applies zoom/pan itself, so screen = canvas pixels.
//! In transparent mode the host scales the whole composited layer, so zones are
//! laid out directly against the container size and the host transform maps
//! them to the screen.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use crate::geometry::{Point, ZonePoint};
use crate::viewport::ViewTransform;

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// What sits behind the zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A raster image the engine draws and pans/zooms itself. Carries the image's
    /// natural size in pixels.
    Image(Size),
    /// The host renders its own background (e.g. a video) and scales it in sync.
    External,
}

impl Background {
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External)
    }
}

/// A snapshot of everything needed to move points between spaces.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateSpace {
    pub background: Background,
    pub container: Size,
    pub transform: ViewTransform,
}

impl CoordinateSpace {
    #[must_use]
    pub fn new(background: Background, container: Size, transform: ViewTransform) -> Self {
        Self { background, container, transform }
    }

    /// Size of content space: the image's natural size, or the container.
    #[must_use]
    pub fn content_size(&self) -> Size {
        match self.background {
            Background::Image(size) => size,
            Background::External => self.container,
        }
    }

    // --- Named conversions ---

    /// Normalized → image pixels. `None` outside image mode.
    #[must_use]
    pub fn normalized_to_image_pixel(&self, p: ZonePoint) -> Option<Point> {
        match self.background {
            Background::Image(size) => Some(Point::new(p.x * size.width, p.y * size.height)),
            Background::External => None,
        }
    }

    /// Image pixels → canvas pixels under the current zoom/pan.
    #[must_use]
    pub fn image_pixel_to_canvas_pixel(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    /// Canvas pixels → image pixels under the current zoom/pan.
    #[must_use]
    pub fn canvas_pixel_to_image_pixel(&self, p: Point) -> Point {
        self.transform.invert(p)
    }

    /// Normalized → surface pixels in transparent mode (container-relative, host applies zoom).
    #[must_use]
    pub fn normalized_to_screen_pixel(&self, p: ZonePoint) -> Point {
        Point::new(p.x * self.container.width, p.y * self.container.height)
    }

    // --- Generic conversions used by the engine ---

    #[must_use]
    pub fn normalized_to_content(&self, p: ZonePoint) -> Point {
        let size = self.content_size();
        Point::new(p.x * size.width, p.y * size.height)
    }

    /// Content → normalized. Zero-sized content maps everything to the origin.
    #[must_use]
    pub fn content_to_normalized(&self, p: Point) -> ZonePoint {
        let size = self.content_size();
        if !size.is_positive() {
            return Point::default();
        }
        Point::new(p.x / size.width, p.y / size.height)
    }

    #[must_use]
    pub fn content_to_screen(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    #[must_use]
    pub fn screen_to_content(&self, p: Point) -> Point {
        self.transform.invert(p)
    }

    #[must_use]
    pub fn normalized_to_screen(&self, p: ZonePoint) -> Point {
        self.content_to_screen(self.normalized_to_content(p))
    }

    #[must_use]
    pub fn screen_to_normalized(&self, p: Point) -> ZonePoint {
        self.content_to_normalized(self.screen_to_content(p))
    }
}
