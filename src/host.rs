//! Browser shell: wires an [`Engine`] to DOM events, animation frames, image
//! loading, and container resizes.
//!
//! Everything here is glue. The engine decides; this module only converts DOM
//! events into engine calls and carries out the resulting [`Effects`]. All
//! closures are created once and hold a weak reference back to the shared
//! state, so dropping the [`ZoneCanvas`] tears everything down.
//!
//! Pointer positions are measured against the container's bounding rect, which
//! must be the untransformed element that holds the (possibly host-transformed)
//! canvas.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, DomRect, Event, HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent,
    MouseEvent, ResizeObserver, TouchEvent, TouchList, WheelEvent,
};

use crate::config::CanvasConfig;
use crate::engine::{Action, Engine};
use crate::error::CanvasError;
use crate::events::{CallbackSlot, Effects, SubscriptionId, TransformEvent, TransformHub, ZoneCallbacks};
use crate::geometry::Point;
use crate::input::{Button, EditTool, Key, Mode, TouchPoint, WheelDelta};
use crate::zone::{Zone, ZoneId};

/// Route `log` output and panic messages to the browser console.
///
/// Hosts that install their own logger should skip this.
#[cfg(feature = "console")]
pub fn init_console_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger not installed: {err}");
    }
}

/// Imperative view operations a host can trigger, e.g. from its own buttons.
pub trait ViewControl {
    /// Animate back to the fitted (image) or identity (transparent) view.
    fn reset_view(&self);
    /// Animate so the zone fills most of the viewport. Unknown ids are ignored.
    fn zoom_to_zone(&self, id: &str);
}

type EventClosure = Closure<dyn FnMut(Event)>;

/// Pending frame work. One frame is in flight at most.
#[derive(Default)]
struct FrameSlot {
    handle: Option<i32>,
    render: bool,
    animate: Option<u64>,
    in_frame: bool,
}

struct Inner {
    engine: RefCell<Engine>,
    callbacks: CallbackSlot,
    hub: TransformHub,
    queue: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
    frame: RefCell<FrameSlot>,
    frame_closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    pending_image: RefCell<Option<HtmlImageElement>>,
    image_closures: RefCell<Option<(EventClosure, EventClosure)>>,
    listeners: RefCell<Vec<(&'static str, EventClosure)>>,
    resize: RefCell<Option<(ResizeObserver, Closure<dyn FnMut(js_sys::Array)>)>>,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    cursor: RefCell<String>,
}

/// The embeddable zone canvas.
pub struct ZoneCanvas {
    inner: Rc<Inner>,
}

/// A weak handle for host callbacks that need to drive the view without
/// keeping the canvas alive.
#[derive(Clone)]
pub struct ViewHandle {
    inner: Weak<Inner>,
}

impl ZoneCanvas {
    /// Bind to `canvas`, measuring input and size against `container`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextUnavailable`] without a 2D context, or
    /// [`CanvasError::Js`] if a listener or observer cannot be installed.
    pub fn new(canvas: HtmlCanvasElement, container: HtmlElement, config: CanvasConfig) -> Result<Self, CanvasError> {
        config.validate()?;
        let engine = Engine::new(canvas.clone(), config)?;
        let inner = Rc::new(Inner {
            engine: RefCell::new(engine),
            callbacks: CallbackSlot::new(),
            hub: TransformHub::new(),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            frame: RefCell::new(FrameSlot::default()),
            frame_closure: RefCell::new(None),
            pending_image: RefCell::new(None),
            image_closures: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            resize: RefCell::new(None),
            canvas,
            container,
            cursor: RefCell::new(String::new()),
        });
        // Keyboard input needs focus.
        inner.canvas.set_attribute("tabindex", "0")?;
        install_frame_closure(&inner);
        install_image_closures(&inner);
        install_listeners(&inner)?;
        install_resize_observer(&inner)?;
        resize_to_container(&inner);
        Ok(Self { inner })
    }

    /// Replace the host callbacks. Safe to call from inside a callback.
    pub fn set_callbacks(&self, callbacks: ZoneCallbacks) {
        self.inner.callbacks.set(callbacks);
    }

    /// Listen for transparent-mode transform changes. Safe to call from inside a listener.
    pub fn subscribe_transform(&self, listener: impl FnMut(TransformEvent) + 'static) -> SubscriptionId {
        self.inner.hub.subscribe(listener)
    }

    pub fn unsubscribe_transform(&self, id: SubscriptionId) -> bool {
        self.inner.hub.unsubscribe(id)
    }

    /// Show a raster image. Loads asynchronously; failure degrades to a neutral fill.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Js`] if the image element cannot be created.
    pub fn set_background_image(&self, url: &str) -> Result<(), CanvasError> {
        let image = HtmlImageElement::new()?;
        if let Some((onload, onerror)) = self.inner.image_closures.borrow().as_ref() {
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        }
        if let Some(previous) = self.inner.pending_image.replace(Some(image.clone())) {
            previous.set_onload(None);
            previous.set_onerror(None);
        }
        let actions = self.inner.engine.borrow_mut().begin_image_load();
        apply(&self.inner, actions);
        image.set_src(url);
        Ok(())
    }

    /// Let the host render the background and follow published transforms.
    pub fn set_transparent_background(&self) {
        if let Some(previous) = self.inner.pending_image.take() {
            previous.set_onload(None);
            previous.set_onerror(None);
        }
        let actions = self.inner.engine.borrow_mut().set_external_background();
        apply(&self.inner, actions);
    }

    pub fn set_zones(&self, zones: Vec<Zone>) {
        let actions = self.inner.engine.borrow_mut().core.set_zones(zones);
        apply(&self.inner, actions);
    }

    pub fn set_mode(&self, mode: Mode) {
        let actions = self.inner.engine.borrow_mut().core.set_mode(mode);
        apply(&self.inner, actions);
    }

    pub fn set_tool(&self, tool: EditTool) {
        let actions = self.inner.engine.borrow_mut().core.set_tool(tool);
        apply(&self.inner, actions);
    }

    pub fn set_highlighted(&self, id: Option<ZoneId>) {
        let actions = self.inner.engine.borrow_mut().core.set_highlighted(id);
        apply(&self.inner, actions);
    }

    pub fn finish_drawing(&self) {
        let actions = self.inner.engine.borrow_mut().core.finish_drawing();
        apply(&self.inner, actions);
    }

    pub fn cancel_drawing(&self) {
        let actions = self.inner.engine.borrow_mut().core.cancel_drawing();
        apply(&self.inner, actions);
    }

    /// Instant zoom around the viewport centre, e.g. for +/- buttons.
    pub fn zoom_by(&self, factor: f64) {
        let actions = self.inner.engine.borrow_mut().core.zoom_by(factor);
        apply(&self.inner, actions);
    }

    #[must_use]
    pub fn view_handle(&self) -> ViewHandle {
        ViewHandle { inner: Rc::downgrade(&self.inner) }
    }
}

impl ViewControl for ZoneCanvas {
    fn reset_view(&self) {
        reset_view(&self.inner);
    }

    fn zoom_to_zone(&self, id: &str) {
        zoom_to_zone(&self.inner, id);
    }
}

impl ViewControl for ViewHandle {
    fn reset_view(&self) {
        if let Some(inner) = self.inner.upgrade() {
            reset_view(&inner);
        }
    }

    fn zoom_to_zone(&self, id: &str) {
        if let Some(inner) = self.inner.upgrade() {
            zoom_to_zone(&inner, id);
        }
    }
}

fn reset_view(inner: &Rc<Inner>) {
    let actions = inner.engine.borrow_mut().core.reset_view(now_ms());
    apply(inner, actions);
}

fn zoom_to_zone(inner: &Rc<Inner>, id: &str) {
    let actions = inner.engine.borrow_mut().core.zoom_to_zone(id, now_ms());
    apply(inner, actions);
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(handle) = self.frame.get_mut().handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(handle) {
                    log::debug!("cancel_animation_frame failed: {err:?}");
                }
            }
        }
        for (name, closure) in self.listeners.get_mut().drain(..) {
            if let Err(err) = self.canvas.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
                log::debug!("remove {name} listener failed: {err:?}");
            }
        }
        if let Some((observer, _)) = self.resize.get_mut().take() {
            observer.disconnect();
        }
        if let Some(image) = self.pending_image.get_mut().take() {
            image.set_onload(None);
            image.set_onerror(None);
        }
    }
}

// =============================================================
// Dispatch and frames
// =============================================================

/// Run `actions` through the callbacks and carry out the effects.
///
/// Callbacks may call back into the canvas. Actions produced while a dispatch
/// is running are queued and handled by the outer loop, so the returned effects
/// of a nested call are empty.
fn apply(inner: &Rc<Inner>, actions: Vec<Action>) -> Effects {
    if actions.is_empty() {
        return Effects::default();
    }
    inner.queue.borrow_mut().extend(actions);
    if inner.dispatching.replace(true) {
        return Effects::default();
    }
    let mut total = Effects::default();
    loop {
        let batch: Vec<Action> = inner.queue.borrow_mut().drain(..).collect();
        if batch.is_empty() {
            break;
        }
        let effects = inner.callbacks.dispatch(&batch, &inner.hub);
        total.render |= effects.render;
        total.capture |= effects.capture;
        if effects.cursor.is_some() {
            total.cursor = effects.cursor;
        }
        if effects.animate.is_some() {
            total.animate = effects.animate;
        }
    }
    inner.dispatching.set(false);

    if let Some(cursor) = &total.cursor {
        set_cursor(inner, cursor);
    }
    if total.render || total.animate.is_some() {
        let mut frame = inner.frame.borrow_mut();
        frame.render |= total.render;
        if total.animate.is_some() {
            frame.animate = total.animate;
        }
        let in_frame = frame.in_frame;
        drop(frame);
        if !in_frame {
            request_frame(inner);
        }
    }
    total
}

fn set_cursor(inner: &Inner, cursor: &str) {
    if *inner.cursor.borrow() == cursor {
        return;
    }
    if let Err(err) = inner.canvas.style().set_property("cursor", cursor) {
        log::debug!("set cursor failed: {err:?}");
        return;
    }
    *inner.cursor.borrow_mut() = cursor.to_owned();
}

/// Request an animation frame, cancelling any pending one first.
fn request_frame(inner: &Rc<Inner>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(handle) = inner.frame.borrow_mut().handle.take() {
        if let Err(err) = window.cancel_animation_frame(handle) {
            log::debug!("cancel_animation_frame failed: {err:?}");
        }
    }
    let closure = inner.frame_closure.borrow();
    let Some(callback) = closure.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => inner.frame.borrow_mut().handle = Some(handle),
        Err(err) => log::warn!("request_animation_frame failed: {err:?}"),
    }
}

fn install_frame_closure(inner: &Rc<Inner>) {
    let weak = Rc::downgrade(inner);
    let closure = Closure::wrap(Box::new(move |ts: f64| {
        if let Some(inner) = weak.upgrade() {
            run_frame(&inner, ts);
        }
    }) as Box<dyn FnMut(f64)>);
    *inner.frame_closure.borrow_mut() = Some(closure);
}

/// One animation frame: advance the animation, then render once.
fn run_frame(inner: &Rc<Inner>, now_ms: f64) {
    let animate = {
        let mut frame = inner.frame.borrow_mut();
        frame.handle = None;
        frame.in_frame = true;
        frame.animate.take()
    };
    if let Some(generation) = animate {
        let actions = inner.engine.borrow_mut().core.on_animation_frame(generation, now_ms);
        apply(inner, actions);
    }
    let (render, more) = {
        let mut frame = inner.frame.borrow_mut();
        frame.in_frame = false;
        (std::mem::take(&mut frame.render), frame.animate.is_some())
    };
    if render {
        if let Err(err) = inner.engine.borrow().render() {
            log::warn!("zone canvas render failed: {err}");
        }
    }
    if more {
        request_frame(inner);
    }
}

// =============================================================
// Background image
// =============================================================

fn install_image_closures(inner: &Rc<Inner>) {
    let weak = Rc::downgrade(inner);
    let onload = Closure::wrap(Box::new(move |event: Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Some(image) = current_image(&inner, &event) else {
            return;
        };
        let actions = inner.engine.borrow_mut().set_image(image);
        apply(&inner, actions);
    }) as Box<dyn FnMut(Event)>);

    let weak = Rc::downgrade(inner);
    let onerror = Closure::wrap(Box::new(move |event: Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if current_image(&inner, &event).is_none() {
            return;
        }
        let actions = inner.engine.borrow_mut().image_failed();
        apply(&inner, actions);
    }) as Box<dyn FnMut(Event)>);

    *inner.image_closures.borrow_mut() = Some((onload, onerror));
}

/// The event's image, if it is still the one most recently requested.
fn current_image(inner: &Inner, event: &Event) -> Option<HtmlImageElement> {
    let Ok(image) = event.target()?.dyn_into::<HtmlImageElement>() else {
        return None;
    };
    let current = inner.pending_image.borrow();
    if current.as_ref() == Some(&image) { Some(image) } else { None }
}

// =============================================================
// Resize
// =============================================================

fn install_resize_observer(inner: &Rc<Inner>) -> Result<(), CanvasError> {
    let weak = Rc::downgrade(inner);
    let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        if let Some(inner) = weak.upgrade() {
            resize_to_container(&inner);
        }
    }) as Box<dyn FnMut(js_sys::Array)>);
    let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe(&inner.container);
    *inner.resize.borrow_mut() = Some((observer, closure));
    Ok(())
}

fn resize_to_container(inner: &Rc<Inner>) {
    let width = f64::from(inner.container.client_width());
    let height = f64::from(inner.container.client_height());
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let actions = inner.engine.borrow_mut().set_viewport(width, height, dpr);
    apply(inner, actions);
}

// =============================================================
// DOM input
// =============================================================

fn now_ms() -> f64 {
    web_sys::window().and_then(|w| w.performance()).map_or(0.0, |p| p.now())
}

fn container_point(rect: &DomRect, client_x: i32, client_y: i32) -> Point {
    Point::new(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
}

fn mouse_point(inner: &Inner, ev: &MouseEvent) -> Point {
    container_point(&inner.container.get_bounding_client_rect(), ev.client_x(), ev.client_y())
}

/// Convert a DOM touch list into container-space touch points.
fn touches_from_list(list: &TouchList, rect: &DomRect) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint { id: t.identifier(), point: container_point(rect, t.client_x(), t.client_y()) })
        .collect()
}

fn capture_if(effects: &Effects, event: &Event) {
    if effects.capture {
        event.prevent_default();
    }
}

fn listen<E, F>(inner: &Rc<Inner>, name: &'static str, handler: F) -> Result<(), CanvasError>
where
    E: JsCast + 'static,
    F: Fn(&Rc<Inner>, &E) + 'static,
{
    let weak = Rc::downgrade(inner);
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Some(typed) = event.dyn_ref::<E>() {
            handler(&inner, typed);
        }
    }) as Box<dyn FnMut(Event)>);

    // Non-passive so wheel and touch handlers may call `preventDefault`.
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    inner.canvas.add_event_listener_with_callback_and_add_event_listener_options(
        name,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    inner.listeners.borrow_mut().push((name, closure));
    Ok(())
}

fn install_listeners(inner: &Rc<Inner>) -> Result<(), CanvasError> {
    listen(inner, "mousedown", |inner, ev: &MouseEvent| {
        if let Err(err) = inner.canvas.focus() {
            log::debug!("canvas focus failed: {err:?}");
        }
        let point = mouse_point(inner, ev);
        let actions = inner.engine.borrow_mut().core.on_mouse_down(point, Button::from_dom(ev.button()));
        apply(inner, actions);
    })?;
    listen(inner, "mousemove", |inner, ev: &MouseEvent| {
        let point = mouse_point(inner, ev);
        let actions = inner.engine.borrow_mut().core.on_mouse_move(point);
        apply(inner, actions);
    })?;
    listen(inner, "mouseup", |inner, ev: &MouseEvent| {
        let point = mouse_point(inner, ev);
        let actions = inner.engine.borrow_mut().core.on_mouse_up(point, Button::from_dom(ev.button()));
        apply(inner, actions);
    })?;
    listen(inner, "mouseleave", |inner, _ev: &MouseEvent| {
        let actions = inner.engine.borrow_mut().core.on_mouse_leave();
        apply(inner, actions);
    })?;
    listen(inner, "dblclick", |inner, ev: &MouseEvent| {
        let point = mouse_point(inner, ev);
        let actions = inner.engine.borrow_mut().core.on_double_click(point);
        let effects = apply(inner, actions);
        capture_if(&effects, ev);
    })?;
    listen(inner, "wheel", |inner, ev: &WheelEvent| {
        let point = mouse_point(inner, ev);
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        let actions = inner.engine.borrow_mut().core.on_wheel(point, delta);
        let effects = apply(inner, actions);
        capture_if(&effects, ev);
    })?;
    listen(inner, "touchstart", |inner, ev: &TouchEvent| {
        let rect = inner.container.get_bounding_client_rect();
        let touches = touches_from_list(&ev.touches(), &rect);
        let actions = inner.engine.borrow_mut().core.on_touch_start(&touches, now_ms());
        let effects = apply(inner, actions);
        capture_if(&effects, ev);
    })?;
    listen(inner, "touchmove", |inner, ev: &TouchEvent| {
        let rect = inner.container.get_bounding_client_rect();
        let touches = touches_from_list(&ev.touches(), &rect);
        let actions = inner.engine.borrow_mut().core.on_touch_move(&touches);
        let effects = apply(inner, actions);
        capture_if(&effects, ev);
    })?;
    listen(inner, "touchend", |inner, ev: &TouchEvent| {
        let rect = inner.container.get_bounding_client_rect();
        let remaining = touches_from_list(&ev.touches(), &rect);
        let changed = touches_from_list(&ev.changed_touches(), &rect);
        let actions = inner.engine.borrow_mut().core.on_touch_end(&remaining, &changed, now_ms());
        let effects = apply(inner, actions);
        capture_if(&effects, ev);
    })?;
    listen(inner, "touchcancel", |inner, _ev: &TouchEvent| {
        let actions = inner.engine.borrow_mut().core.on_touch_cancel();
        apply(inner, actions);
    })?;
    listen(inner, "keydown", |inner, ev: &KeyboardEvent| {
        let key = Key(ev.key());
        let actions = inner.engine.borrow_mut().core.on_key_down(&key);
        if !actions.is_empty() && ["Delete", "Backspace", "Escape", "Enter"].iter().any(|name| key.is(name)) {
            ev.prevent_default();
        }
        apply(inner, actions);
    })?;
    Ok(())
}
