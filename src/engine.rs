//! Engine: the zone canvas state machine.
//!
//! [`EngineCore`] holds every piece of interactive state and all of the logic,
//! with no browser dependency, so it is driven directly by tests. Handlers take
//! screen-space input (CSS pixels relative to the untransformed container) and
//! explicit timestamps, mutate state, and return [`Action`]s for the host.
//! [`Engine`] adds the canvas element, its 2D context, and the loaded image.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::animation::ZoomAnimator;
use crate::config::CanvasConfig;
use crate::controls::{self, ControlKind};
use crate::coords::{Background, CoordinateSpace, Size};
use crate::drawing::DrawPath;
use crate::error::CanvasError;
use crate::events::TransformEvent;
use crate::geometry::{Bounds, Point, ZonePoint};
use crate::gesture::{TouchTracker, TouchUpdate};
use crate::hit;
use crate::input::{Button, EditTool, InputState, Key, Mode, TouchPoint, UiState, WheelDelta};
use crate::render;
use crate::viewport::{ViewTransform, Viewport};
use crate::zone::{Zone, ZoneId, ZoneSet, generate_zone_id};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A zone was clicked or tapped in view mode.
    ZoneClicked(Zone),
    /// A polygon was finished. The host decides whether to persist it.
    ZoneAdded { id: ZoneId, points: Vec<ZonePoint> },
    /// The user asked to delete a zone. The host decides whether to persist it.
    ZoneDeleted { id: ZoneId },
    SelectionChanged(Option<ZoneId>),
    /// Transparent-mode transform changed; the host should restyle its wrapper.
    TransformChanged(TransformEvent),
    /// Schedule an animation frame for this generation.
    AnimateFrame { generation: u64 },
    /// The engine consumed the gesture; the host should `preventDefault`.
    CaptureGesture,
    SetCursor(String),
    RenderNeeded,
}

/// Where the background stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundState {
    /// Image requested, natural size not yet known.
    Loading,
    Loaded(Size),
    /// Image failed to load; drawn as a neutral fill.
    Failed,
    /// Host-rendered background (transparent mode).
    External,
}

impl BackgroundState {
    /// The coordinate background. Until an image reports its size, the
    /// container stands in for it so zones and drawing keep working.
    #[must_use]
    pub fn background(&self, container: Size) -> Background {
        match self {
            Self::Loaded(size) => Background::Image(*size),
            Self::Loading | Self::Failed => Background::Image(container),
            Self::External => Background::External,
        }
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub config: CanvasConfig,
    pub zones: ZoneSet,
    pub ui: UiState,
    pub input: InputState,
    pub touch: TouchTracker,
    pub path: DrawPath,
    pub animator: ZoomAnimator,
    pub viewport: Viewport,
    pub background: BackgroundState,
    pub dpr: f64,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        let viewport =
            Viewport::new(ViewTransform::default(), Size::default(), config.image_limits(), config.fit_margin);
        let animator = ZoomAnimator::new(config.zoom_animation_ms);
        Self {
            config,
            zones: ZoneSet::new(),
            ui: UiState::default(),
            input: InputState::default(),
            touch: TouchTracker::new(),
            path: DrawPath::new(),
            animator,
            viewport,
            background: BackgroundState::Loading,
            dpr: 1.0,
            cursor: "default",
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn background(&self) -> Background {
        self.background.background(self.viewport.container())
    }

    /// Snapshot of the current coordinate mapping.
    #[must_use]
    pub fn space(&self) -> CoordinateSpace {
        CoordinateSpace::new(self.background(), self.viewport.container(), self.viewport.transform())
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected.as_deref()
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.background().is_external()
    }

    // --- Viewport / background ---

    /// Resize the container. Re-fits the transform.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.viewport.set_container(Size::new(width_css, height_css));
        self.animator.cancel();
        let changed = self.viewport.fit_to_container(&self.background());
        let mut actions = Vec::new();
        self.push_transform_change(changed, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// An image background was requested; its size is not known yet.
    pub fn set_image_loading(&mut self) -> Vec<Action> {
        self.switch_background(BackgroundState::Loading)
    }

    /// The requested image finished loading.
    pub fn on_background_loaded(&mut self, natural: Size) -> Vec<Action> {
        if self.is_transparent() {
            return Vec::new();
        }
        if !natural.is_positive() {
            return self.on_background_failed();
        }
        self.animator.cancel();
        self.background = BackgroundState::Loaded(natural);
        let changed = self.viewport.fit_to_container(&self.background());
        let mut actions = Vec::new();
        self.push_transform_change(changed, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The requested image failed to load. The engine stays usable over a neutral fill.
    pub fn on_background_failed(&mut self) -> Vec<Action> {
        if self.is_transparent() {
            return Vec::new();
        }
        log::warn!("zone canvas background image failed to load; using neutral fill");
        self.animator.cancel();
        self.background = BackgroundState::Failed;
        let changed = self.viewport.fit_to_container(&self.background());
        let mut actions = Vec::new();
        self.push_transform_change(changed, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The host renders its own background and follows published transforms.
    pub fn set_external_background(&mut self) -> Vec<Action> {
        self.switch_background(BackgroundState::External)
    }

    fn switch_background(&mut self, state: BackgroundState) -> Vec<Action> {
        let mut actions = self.reset_interaction();
        self.background = state;
        let limits = if self.is_transparent() { self.config.transparent_limits() } else { self.config.image_limits() };
        let background = self.background();
        self.viewport = Viewport::new(
            ViewTransform::identity_for(&background),
            self.viewport.container(),
            limits,
            self.config.fit_margin,
        );
        self.viewport.fit_to_container(&background);
        if self.is_transparent() {
            actions.push(Action::TransformChanged(TransformEvent::from_transform(&self.viewport.transform())));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Data inputs ---

    /// Replace the zone list. Hover and selection on zones that disappeared are dropped.
    pub fn set_zones(&mut self, zones: Vec<Zone>) -> Vec<Action> {
        self.zones.load(zones);
        let mut actions = Vec::new();
        if self.ui.hovered.as_deref().is_some_and(|id| !self.zones.contains(id)) {
            self.ui.hovered = None;
        }
        if self.ui.selected.as_deref().is_some_and(|id| !self.zones.contains(id)) {
            self.ui.selected = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        self.sync_cursor(&mut actions);
        actions
    }

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        if self.ui.mode == mode {
            return Vec::new();
        }
        log::debug!("zone canvas mode {:?} -> {mode:?}", self.ui.mode);
        let mut actions = self.reset_interaction();
        self.ui.mode = mode;
        actions.push(Action::RenderNeeded);
        self.sync_cursor(&mut actions);
        actions
    }

    /// Switch the edit tool. Leaving the draw tool discards the path.
    pub fn set_tool(&mut self, tool: EditTool) -> Vec<Action> {
        if self.ui.tool == tool {
            return Vec::new();
        }
        self.path.clear();
        self.ui.tool = tool;
        let mut actions = vec![Action::RenderNeeded];
        self.sync_cursor(&mut actions);
        actions
    }

    /// Host-driven emphasis, e.g. from a sibling list.
    pub fn set_highlighted(&mut self, id: Option<ZoneId>) -> Vec<Action> {
        if self.ui.highlighted == id {
            return Vec::new();
        }
        self.ui.highlighted = id;
        vec![Action::RenderNeeded]
    }

    /// Clear transient state: path, hover, selection, gestures, animation.
    fn reset_interaction(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.path.clear();
        self.ui.hovered = None;
        self.input = InputState::Idle;
        self.touch.reset();
        self.animator.cancel();
        if self.ui.selected.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        actions
    }

    // --- Mouse ---

    pub fn on_mouse_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.ui.pointer = Some(screen);
        if self.ui.mode == Mode::Edit {
            if let Some(kind) = controls::hit(screen, self.viewport.container()) {
                return self.activate_control(kind);
            }
        }
        if self.ui.is_drawing() {
            return self.commit_draw_point(screen);
        }
        self.input = InputState::Pressing { origin: screen, last: screen, moved: false };
        Vec::new()
    }

    pub fn on_mouse_move(&mut self, screen: Point) -> Vec<Action> {
        self.ui.pointer = Some(screen);
        let mut actions = Vec::new();
        if let InputState::Pressing { origin, last, moved } = self.input {
            let moved = moved || origin.distance_to(screen) >= self.config.click_slop_px;
            self.input = InputState::Pressing { origin, last: screen, moved };
            if moved && self.mouse_pans() {
                self.animator.cancel();
                let changed = self.viewport.pan(screen.x - last.x, screen.y - last.y);
                self.push_transform_change(changed, &mut actions);
            }
        } else if self.ui.is_drawing() {
            let space = self.space();
            let near_changed = self.path.update_near_start(screen, &space, self.config.close_path_radius_px);
            if near_changed || !self.path.is_empty() {
                actions.push(Action::RenderNeeded);
            }
        } else {
            actions.extend(self.update_hover(screen));
        }
        self.sync_cursor(&mut actions);
        actions
    }

    pub fn on_mouse_up(&mut self, screen: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if let InputState::Pressing { origin, moved, .. } = std::mem::take(&mut self.input) {
            if !moved && origin.distance_to(screen) < self.config.click_slop_px {
                actions = self.click(screen);
            }
        }
        self.sync_cursor(&mut actions);
        actions
    }

    /// Pointer left the canvas: drop hover and any press.
    pub fn on_mouse_leave(&mut self) -> Vec<Action> {
        self.ui.pointer = None;
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        let had_hover = self.ui.hovered.take().is_some();
        let had_preview = !self.path.is_empty();
        self.path.clear_near_start();
        if had_hover || had_preview {
            actions.push(Action::RenderNeeded);
        }
        self.sync_cursor(&mut actions);
        actions
    }

    /// Double-click finishes a path with at least three points.
    pub fn on_double_click(&mut self, _screen: Point) -> Vec<Action> {
        if self.ui.is_drawing() && self.path.is_closable() {
            return self.finish_drawing();
        }
        Vec::new()
    }

    /// Zoom at the cursor. Image mode only; transparent mode leaves the wheel to the page.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        if self.is_transparent() {
            return Vec::new();
        }
        let mut actions = vec![Action::CaptureGesture];
        if delta.dy == 0.0 {
            return actions;
        }
        let step = self.config.wheel_zoom_step;
        let factor = if delta.dy < 0.0 { step } else { 1.0 / step };
        self.animator.cancel();
        let changed = self.viewport.zoom_at(screen, self.viewport.transform().scale() * factor);
        self.push_transform_change(changed, &mut actions);
        actions
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => {
                if self.ui.is_drawing() && !self.path.is_empty() {
                    self.cancel_drawing()
                } else {
                    self.clear_selection()
                }
            }
            "Enter" if self.ui.is_drawing() => self.finish_drawing(),
            "Delete" | "Backspace" => self.delete_selected(),
            _ => Vec::new(),
        }
    }

    // --- Touch ---

    /// Fingers went down. `touches` is the full active list.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint], now_ms: f64) -> Vec<Action> {
        self.touch.begin(touches, now_ms);
        if self.touch.is_pinching() || self.single_finger_captured() {
            vec![Action::CaptureGesture]
        } else {
            Vec::new()
        }
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> Vec<Action> {
        let mut actions = Vec::new();
        match self.touch.update(touches, self.config.tap_slop_px) {
            TouchUpdate::Pan { dx, dy } => {
                if !self.single_finger_pans() {
                    return actions;
                }
                self.animator.cancel();
                let changed = self.viewport.pan(dx, dy);
                actions.push(Action::CaptureGesture);
                self.push_transform_change(changed, &mut actions);
            }
            TouchUpdate::Pinch { prev, cur } => {
                self.animator.cancel();
                let changed = self.viewport.pinch(prev, cur);
                actions.push(Action::CaptureGesture);
                self.push_transform_change(changed, &mut actions);
            }
            TouchUpdate::None => {
                if self.touch.is_pinching() || self.single_finger_captured() {
                    actions.push(Action::CaptureGesture);
                }
            }
        }
        actions
    }

    /// Fingers lifted. A qualifying tap runs the same logic as a mouse click.
    pub fn on_touch_end(&mut self, remaining: &[TouchPoint], changed: &[TouchPoint], now_ms: f64) -> Vec<Action> {
        let tap = self.touch.end(remaining, changed, now_ms, self.config.tap_slop_px, self.config.tap_max_ms);
        let Some(point) = tap else {
            return Vec::new();
        };
        // Suppresses the emulated mouse events that would click a second time.
        let mut actions = vec![Action::CaptureGesture];
        actions.extend(self.tap(point));
        actions
    }

    pub fn on_touch_cancel(&mut self) -> Vec<Action> {
        self.touch.reset();
        Vec::new()
    }

    // --- Clicks, taps, and controls ---

    fn tap(&mut self, screen: Point) -> Vec<Action> {
        self.ui.pointer = Some(screen);
        if self.ui.mode == Mode::Edit {
            if let Some(kind) = controls::hit(screen, self.viewport.container()) {
                return self.activate_control(kind);
            }
        }
        if self.ui.is_drawing() {
            return self.commit_draw_point(screen);
        }
        self.click(screen)
    }

    /// Click on the zone layer: report it in view mode, toggle selection in edit mode.
    fn click(&mut self, screen: Point) -> Vec<Action> {
        let space = self.space();
        let hit = hit::hit_test(screen, &self.zones, &space);
        match self.ui.mode {
            Mode::View => hit.map(|zone| vec![Action::ZoneClicked(zone.clone())]).unwrap_or_default(),
            Mode::Edit => {
                let hit_id = hit.map(|zone| zone.id.clone());
                let next = if hit_id.is_some() && hit_id == self.ui.selected { None } else { hit_id };
                self.set_selection(next)
            }
        }
    }

    fn activate_control(&mut self, kind: ControlKind) -> Vec<Action> {
        match kind {
            ControlKind::Select => self.set_tool(EditTool::Select),
            ControlKind::Draw => self.set_tool(EditTool::Draw),
            ControlKind::Delete => self.delete_selected(),
        }
    }

    fn set_selection(&mut self, next: Option<ZoneId>) -> Vec<Action> {
        if self.ui.selected == next {
            return Vec::new();
        }
        self.ui.selected.clone_from(&next);
        vec![Action::SelectionChanged(next), Action::RenderNeeded]
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.set_selection(None)
    }

    /// Propose deleting the selected zone (edit mode only).
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.ui.mode != Mode::Edit {
            return Vec::new();
        }
        let Some(id) = self.ui.selected.take() else {
            return Vec::new();
        };
        log::debug!("zone canvas proposes deleting {id}");
        vec![Action::ZoneDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    fn update_hover(&mut self, screen: Point) -> Vec<Action> {
        let space = self.space();
        let hovered = hit::hit_test(screen, &self.zones, &space).map(|zone| zone.id.clone());
        if hovered == self.ui.hovered {
            return Vec::new();
        }
        self.ui.hovered = hovered;
        vec![Action::RenderNeeded]
    }

    // --- Drawing ---

    /// Add a point at `screen`, or close the path when the point lands on its start.
    pub fn commit_draw_point(&mut self, screen: Point) -> Vec<Action> {
        if !self.ui.is_drawing() {
            return Vec::new();
        }
        let space = self.space();
        if self.path.is_closable() && self.path.is_near_start(screen, &space, self.config.close_path_radius_px) {
            return self.finish_drawing();
        }
        if self.path.is_duplicate(screen, &space, self.config.click_slop_px) {
            return Vec::new();
        }
        self.path.push(space.screen_to_normalized(screen));
        self.path.update_near_start(screen, &space, self.config.close_path_radius_px);
        vec![Action::RenderNeeded]
    }

    /// Emit the path as a new zone. Paths under three points are kept as-is.
    pub fn finish_drawing(&mut self) -> Vec<Action> {
        if !self.path.is_closable() {
            return Vec::new();
        }
        let points = self.path.take();
        let id = generate_zone_id();
        log::debug!("zone canvas finished polygon {id} with {} points", points.len());
        vec![Action::ZoneAdded { id, points }, Action::RenderNeeded]
    }

    /// Discard the path without emitting anything.
    pub fn cancel_drawing(&mut self) -> Vec<Action> {
        if self.path.clear() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- View control ---

    /// Multiply the scale around the container centre. Instant and clamped.
    pub fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        let container = self.viewport.container();
        let center = Point::new(container.width * 0.5, container.height * 0.5);
        self.animator.cancel();
        let changed = self.viewport.zoom_at(center, self.viewport.transform().scale() * factor);
        let mut actions = Vec::new();
        self.push_transform_change(changed, &mut actions);
        actions
    }

    /// Animate back to the fitted (image) or identity (transparent) transform.
    pub fn reset_view(&mut self, now_ms: f64) -> Vec<Action> {
        let target = self.viewport.fit_transform(&self.background());
        self.start_animation(target, now_ms)
    }

    /// Animate so zone `id` fills most of the viewport. Unknown or degenerate zones are a no-op.
    pub fn zoom_to_zone(&mut self, id: &str, now_ms: f64) -> Vec<Action> {
        match self.zoom_target(id) {
            Some(target) => self.start_animation(target, now_ms),
            None => {
                log::debug!("zone canvas zoom_to_zone: no renderable zone {id}");
                Vec::new()
            }
        }
    }

    /// The transform that centres zone `id` at the focus fill.
    #[must_use]
    pub fn zoom_target(&self, id: &str) -> Option<ViewTransform> {
        let zone = self.zones.get(id).filter(|zone| zone.is_renderable())?;
        let space = self.space();
        let content: Vec<Point> = zone.points.iter().map(|p| space.normalized_to_content(*p)).collect();
        let bounds = Bounds::from_points(&content)?;
        let container = self.viewport.container();
        let fill = self.config.zone_focus_fill;
        let raw = (container.width * fill / bounds.safe_width()).min(container.height * fill / bounds.safe_height());
        let scale = self.viewport.limits().clamp(raw);
        let center = bounds.center();
        let offset = Point::new(
            center.x.mul_add(-scale, container.width * 0.5),
            center.y.mul_add(-scale, container.height * 0.5),
        );
        Some(self.viewport.clamped(self.viewport.transform().with_parts(scale, offset)))
    }

    fn start_animation(&mut self, target: ViewTransform, now_ms: f64) -> Vec<Action> {
        let generation = self.animator.start(self.viewport.transform(), target, now_ms);
        log::debug!("zone canvas animation {generation} started");
        vec![Action::AnimateFrame { generation }]
    }

    /// Advance the animation. Frames from superseded generations do nothing.
    pub fn on_animation_frame(&mut self, generation: u64, now_ms: f64) -> Vec<Action> {
        let Some(sample) = self.animator.sample(generation, now_ms) else {
            return Vec::new();
        };
        let changed = self.viewport.set_transform(sample.transform);
        let mut actions = Vec::new();
        self.push_transform_change(changed, &mut actions);
        if !sample.done {
            actions.push(Action::AnimateFrame { generation });
        }
        actions
    }

    // --- Helpers ---

    fn push_transform_change(&self, changed: bool, actions: &mut Vec<Action>) {
        if !changed {
            return;
        }
        if self.is_transparent() {
            actions.push(Action::TransformChanged(TransformEvent::from_transform(&self.viewport.transform())));
        }
        actions.push(Action::RenderNeeded);
    }

    /// Mouse drags pan in image mode, and in transparent mode once zoomed in.
    fn mouse_pans(&self) -> bool {
        match self.viewport.transform() {
            ViewTransform::Image { .. } => true,
            ViewTransform::Transparent { scale, .. } => scale > 1.0,
        }
    }

    /// One finger pans in image mode, and in transparent mode only past the
    /// threshold; below it the page keeps the gesture and scrolls.
    fn single_finger_pans(&self) -> bool {
        match self.viewport.transform() {
            ViewTransform::Image { .. } => true,
            ViewTransform::Transparent { scale, .. } => scale > self.config.transparent_pan_min_scale,
        }
    }

    fn single_finger_captured(&self) -> bool {
        self.single_finger_pans() || self.ui.is_drawing()
    }

    fn cursor_for(&self) -> &'static str {
        match self.input {
            InputState::Pressing { moved: true, .. } if self.mouse_pans() => "grabbing",
            _ if self.ui.is_drawing() => "crosshair",
            _ if self.ui.hovered.is_some() => "pointer",
            _ => "default",
        }
    }

    fn sync_cursor(&mut self, actions: &mut Vec<Action>) {
        let cursor = self.cursor_for();
        if cursor != self.cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextUnavailable`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig) -> Result<Self, CanvasError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(CanvasError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| CanvasError::ContextUnavailable)?;
        Ok(Self { canvas, ctx, image: None, core: EngineCore::new(config) })
    }

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
        self.core.set_viewport(width_css, height_css, dpr)
    }

    /// Start showing `image` once it has loaded.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let natural = Size::new(f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.image = Some(image);
        self.core.on_background_loaded(natural)
    }

    /// A new image was requested; forget the old one.
    pub fn begin_image_load(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.set_image_loading()
    }

    pub fn image_failed(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.on_background_failed()
    }

    pub fn set_external_background(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.set_external_background()
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Js`] if a canvas call fails.
    pub fn render(&self) -> Result<(), CanvasError> {
        render::draw(&self.ctx, self.image.as_ref(), &self.core)?;
        Ok(())
    }
}
