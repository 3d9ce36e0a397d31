//! Pan/zoom state for both background modes.
//!
//! Image mode owns its zoom and pan and may pan past the image edges.
//! Transparent mode mirrors a CSS transform the host applies to its own
//! background, so it is clamped to never reveal anything outside the container.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::coords::{Background, Size};
use crate::geometry::Point;

/// Current view transform. Both variants map content → screen as `p * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewTransform {
    /// `pan` is in canvas pixels.
    Image { zoom: f64, pan: Point },
    /// `translate` is in host-container pixels. `scale <= 1` implies `translate == (0, 0)`.
    Transparent { scale: f64, translate: Point },
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::Image { zoom: 1.0, pan: Point::default() }
    }
}

impl ViewTransform {
    /// The identity transform for a background mode.
    #[must_use]
    pub fn identity_for(background: &Background) -> Self {
        match background {
            Background::Image(_) => Self::Image { zoom: 1.0, pan: Point::default() },
            Background::External => Self::Transparent { scale: 1.0, translate: Point::default() },
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        match self {
            Self::Image { zoom, .. } => *zoom,
            Self::Transparent { scale, .. } => *scale,
        }
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        match self {
            Self::Image { pan, .. } => *pan,
            Self::Transparent { translate, .. } => *translate,
        }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent { .. })
    }

    /// Same variant with new scale and offset.
    #[must_use]
    pub fn with_parts(&self, scale: f64, offset: Point) -> Self {
        match self {
            Self::Image { .. } => Self::Image { zoom: scale, pan: offset },
            Self::Transparent { .. } => Self::Transparent { scale, translate: offset },
        }
    }

    /// Content → screen.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let s = self.scale();
        let o = self.offset();
        Point::new(p.x.mul_add(s, o.x), p.y.mul_add(s, o.y))
    }

    /// Screen → content.
    #[must_use]
    pub fn invert(&self, p: Point) -> Point {
        let s = self.scale();
        let o = self.offset();
        Point::new((p.x - o.x) / s, (p.y - o.y) / s)
    }

    /// Interpolate toward `to`. The result takes `to`'s variant.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let scale = (to.scale() - self.scale()).mul_add(t, self.scale());
        let offset = self.offset().lerp(to.offset(), t);
        to.with_parts(scale, offset)
    }
}

/// Inclusive scale bounds for user-driven zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Owns the transform and keeps it within the mode's rules.
#[derive(Debug, Clone)]
pub struct Viewport {
    transform: ViewTransform,
    container: Size,
    limits: ZoomLimits,
    fit_margin: f64,
    /// Scale of the last fit. Zoom limits always admit it.
    fit_scale: Option<f64>,
}

impl Viewport {
    #[must_use]
    pub fn new(transform: ViewTransform, container: Size, limits: ZoomLimits, fit_margin: f64) -> Self {
        let mut vp = Self { transform, container, limits, fit_margin, fit_scale: None };
        vp.clamp();
        vp
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Configured limits widened to include the fitted scale.
    ///
    /// A large image fits below the configured minimum and a tiny one above the
    /// maximum; zooming must never jump away from that fit.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        match self.fit_scale {
            Some(fit) => ZoomLimits { min: self.limits.min.min(fit), max: self.limits.max.max(fit) },
            None => self.limits,
        }
    }

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
        self.clamp();
    }

    /// Replace the transform, then clamp. Returns whether anything changed.
    pub fn set_transform(&mut self, transform: ViewTransform) -> bool {
        let before = self.transform;
        self.transform = self.clamped(transform);
        self.transform != before
    }

    /// Shift by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        let o = self.transform.offset();
        let next = self.transform.with_parts(self.transform.scale(), Point::new(o.x + dx, o.y + dy));
        self.set_transform(next)
    }

    /// Zoom to `new_scale` (clamped to the limits) keeping `screen` stationary.
    pub fn zoom_at(&mut self, screen: Point, new_scale: f64) -> bool {
        let old = self.transform.scale();
        if old <= 0.0 {
            return false;
        }
        let new_scale = self.limits().clamp(new_scale);
        let anchor = self.transform.invert(screen);
        let offset = Point::new(
            anchor.x.mul_add(-new_scale, screen.x),
            anchor.y.mul_add(-new_scale, screen.y),
        );
        self.set_transform(self.transform.with_parts(new_scale, offset))
    }

    /// Two-finger update from the previous touch pair to the current pair.
    ///
    /// Scales by the finger-distance ratio and keeps the content point that was
    /// under the previous midpoint under the current midpoint, so pinching and
    /// two-finger dragging combine in one step.
    pub fn pinch(&mut self, prev: (Point, Point), cur: (Point, Point)) -> bool {
        let prev_dist = prev.0.distance_to(prev.1);
        let cur_dist = cur.0.distance_to(cur.1);
        if prev_dist <= f64::EPSILON || cur_dist <= f64::EPSILON {
            return false;
        }
        let old = self.transform.scale();
        let new_scale = self.limits().clamp(old * (cur_dist / prev_dist));
        let anchor = self.transform.invert(prev.0.midpoint(prev.1));
        let mid = cur.0.midpoint(cur.1);
        let offset = Point::new(anchor.x.mul_add(-new_scale, mid.x), anchor.y.mul_add(-new_scale, mid.y));
        self.set_transform(self.transform.with_parts(new_scale, offset))
    }

    /// The transform that frames `background` in the container.
    ///
    /// Image mode scales the image to `fit_margin` of the tighter container axis and
    /// centres it. Transparent mode is the identity. The fit is not clamped to the
    /// zoom limits so very large images still fit entirely; see [`Self::limits`].
    #[must_use]
    pub fn fit_transform(&self, background: &Background) -> ViewTransform {
        match background {
            Background::Image(image) if image.is_positive() && self.container.is_positive() => {
                let scale = (self.container.width / image.width).min(self.container.height / image.height)
                    * self.fit_margin;
                let pan = Point::new(
                    (self.container.width - image.width * scale) * 0.5,
                    (self.container.height - image.height * scale) * 0.5,
                );
                ViewTransform::Image { zoom: scale, pan }
            }
            other => ViewTransform::identity_for(other),
        }
    }

    pub fn fit_to_container(&mut self, background: &Background) -> bool {
        let fit = self.fit_transform(background);
        self.fit_scale = Some(fit.scale());
        self.set_transform(fit)
    }

    /// Re-apply the clamp rule to the current transform.
    pub fn clamp(&mut self) -> bool {
        self.set_transform(self.transform)
    }

    /// Apply the transparent-mode clamp rule. Image transforms pass through.
    #[must_use]
    pub fn clamped(&self, transform: ViewTransform) -> ViewTransform {
        match transform {
            ViewTransform::Image { .. } => transform,
            ViewTransform::Transparent { scale, translate } => {
                if scale <= 1.0 {
                    return ViewTransform::Transparent { scale: 1.0, translate: Point::default() };
                }
                let min_x = self.container.width * (1.0 - scale);
                let min_y = self.container.height * (1.0 - scale);
                ViewTransform::Transparent {
                    scale,
                    translate: Point::new(translate.x.max(min_x).min(0.0), translate.y.max(min_y).min(0.0)),
                }
            }
        }
    }
}
