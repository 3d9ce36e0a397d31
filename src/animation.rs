//! Eased transform animation for reset-view and zoom-to-zone.
//!
//! Every start bumps a generation counter. Frames are requested with the
//! generation they belong to, and a frame whose generation is no longer current
//! is dropped, so a newer request cleanly supersedes an older one.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::viewport::ViewTransform;

/// Cubic ease-out on `[0, 1]`. Inputs outside the range are clamped.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: ViewTransform,
    to: ViewTransform,
    started_ms: f64,
}

/// One interpolated step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSample {
    pub transform: ViewTransform,
    /// The animation reached its target; no further frames are needed.
    pub done: bool,
}

/// Drives at most one transform tween at a time.
#[derive(Debug, Clone)]
pub struct ZoomAnimator {
    duration_ms: f64,
    generation: u64,
    active: Option<Tween>,
}

impl ZoomAnimator {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms, generation: 0, active: None }
    }

    /// Begin animating `from` → `to`, superseding any running tween.
    /// Returns the generation frames must carry.
    pub fn start(&mut self, from: ViewTransform, to: ViewTransform, now_ms: f64) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if self.active.is_some() {
            log::debug!("zoom animation superseded by generation {}", self.generation);
        }
        self.active = Some(Tween { from, to, started_ms: now_ms });
        self.generation
    }

    /// Advance the tween for a frame of `generation`.
    ///
    /// Returns `None` for stale generations or when nothing is running. The
    /// final sample carries the target transform exactly.
    pub fn sample(&mut self, generation: u64, now_ms: f64) -> Option<AnimationSample> {
        if generation != self.generation {
            return None;
        }
        let tween = self.active?;
        let t = if self.duration_ms > 0.0 { (now_ms - tween.started_ms) / self.duration_ms } else { 1.0 };
        if t >= 1.0 {
            self.active = None;
            return Some(AnimationSample { transform: tween.to, done: true });
        }
        let transform = tween.from.lerp(&tween.to, ease_out_cubic(t));
        Some(AnimationSample { transform, done: false })
    }

    /// Stop the running tween. Outstanding frames become stale.
    pub fn cancel(&mut self) -> bool {
        if self.active.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
            return true;
        }
        false
    }
}
