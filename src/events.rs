//! Outbound surface: host callbacks and the transform subscription.
//!
//! The engine never calls the host directly. Handlers return [`Action`]s, and
//! [`ZoneCallbacks::dispatch`] turns them into callback invocations, transform
//! notifications, and the side effects the browser shell must perform
//! (render, cursor, capture, animation frame).

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::engine::Action;
use crate::geometry::ZonePoint;
use crate::viewport::ViewTransform;
use crate::zone::Zone;

/// CSS `transform-origin` the host must use with [`TransformEvent::css`].
pub const TRANSFORM_ORIGIN: &str = "0 0";

/// A transparent-mode view transform, published to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEvent {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl TransformEvent {
    #[must_use]
    pub fn from_transform(transform: &ViewTransform) -> Self {
        let offset = transform.offset();
        Self { scale: transform.scale(), translate_x: offset.x, translate_y: offset.y }
    }

    /// CSS `transform` value for the host wrapper, paired with [`TRANSFORM_ORIGIN`].
    #[must_use]
    pub fn css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.translate_x, self.translate_y, self.scale)
    }
}

/// Handle returned by [`TransformHub::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type TransformListener = Rc<RefCell<dyn FnMut(TransformEvent)>>;

/// Fan-out of transform changes to any number of listeners.
///
/// Listeners may subscribe and unsubscribe (themselves or others) while an
/// event is being published. A listener removed mid-publish is not called
/// again; one added mid-publish first hears the next event.
#[derive(Default)]
pub struct TransformHub {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, TransformListener)>>,
}

impl TransformHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(TransformEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        let listener: TransformListener = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn publish(&self, event: TransformEvent) {
        let snapshot: Vec<(SubscriptionId, TransformListener)> =
            self.listeners.borrow().iter().map(|(id, listener)| (*id, Rc::clone(listener))).collect();
        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            // A listener that publishes from inside itself is not re-entered.
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (&mut *listener)(event);
            }
        }
    }

    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow().iter().any(|(existing, _)| *existing == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

/// Side effects left for the browser shell after dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Redraw on the next frame.
    pub render: bool,
    /// New CSS cursor, if it changed.
    pub cursor: Option<String>,
    /// Call `preventDefault` so the page does not scroll or zoom.
    pub capture: bool,
    /// Animation generation that needs another frame.
    pub animate: Option<u64>,
}

type ZoneListener = Box<dyn FnMut(&Zone)>;
type AddListener = Box<dyn FnMut(&[ZonePoint], &str)>;
type DeleteListener = Box<dyn FnMut(&str)>;
type SelectionListener = Box<dyn FnMut(Option<&str>)>;

/// Host callbacks. Every callback is optional.
#[derive(Default)]
pub struct ZoneCallbacks {
    on_zone_click: Option<ZoneListener>,
    on_zone_add: Option<AddListener>,
    on_zone_delete: Option<DeleteListener>,
    on_selection_change: Option<SelectionListener>,
}

impl ZoneCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A zone was clicked or tapped in view mode.
    #[must_use]
    pub fn on_zone_click(mut self, f: impl FnMut(&Zone) + 'static) -> Self {
        self.on_zone_click = Some(Box::new(f));
        self
    }

    /// A polygon was finished; receives the normalized points and a fresh id.
    #[must_use]
    pub fn on_zone_add(mut self, f: impl FnMut(&[ZonePoint], &str) + 'static) -> Self {
        self.on_zone_add = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_zone_delete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_zone_delete = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_selection_change(mut self, f: impl FnMut(Option<&str>) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    /// Route `actions` to the callbacks and the transform hub, collecting the
    /// effects the shell must apply.
    pub fn dispatch(&mut self, actions: &[Action], hub: &TransformHub) -> Effects {
        let mut effects = Effects::default();
        for action in actions {
            match action {
                Action::ZoneClicked(zone) => {
                    if let Some(f) = self.on_zone_click.as_mut() {
                        f(zone);
                    }
                }
                Action::ZoneAdded { id, points } => {
                    if let Some(f) = self.on_zone_add.as_mut() {
                        f(points, id);
                    }
                }
                Action::ZoneDeleted { id } => {
                    if let Some(f) = self.on_zone_delete.as_mut() {
                        f(id);
                    }
                }
                Action::SelectionChanged(selected) => {
                    if let Some(f) = self.on_selection_change.as_mut() {
                        f(selected.as_deref());
                    }
                }
                Action::TransformChanged(event) => hub.publish(*event),
                Action::AnimateFrame { generation } => effects.animate = Some(*generation),
                Action::CaptureGesture => effects.capture = true,
                Action::SetCursor(cursor) => effects.cursor = Some(cursor.clone()),
                Action::RenderNeeded => effects.render = true,
            }
        }
        effects
    }
}

/// Holds the current [`ZoneCallbacks`] so a callback may replace them mid-dispatch.
///
/// The callbacks are taken out for the duration of a dispatch. A replacement
/// stored during that time wins over the set being dispatched.
#[derive(Default)]
pub struct CallbackSlot {
    callbacks: RefCell<ZoneCallbacks>,
    replaced: Cell<bool>,
}

impl CallbackSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, callbacks: ZoneCallbacks) {
        *self.callbacks.borrow_mut() = callbacks;
        self.replaced.set(true);
    }

    pub fn dispatch(&self, actions: &[Action], hub: &TransformHub) -> Effects {
        let mut current = self.callbacks.take();
        self.replaced.set(false);
        let effects = current.dispatch(actions, hub);
        if !self.replaced.get() {
            *self.callbacks.borrow_mut() = current;
        }
        effects
    }
}
