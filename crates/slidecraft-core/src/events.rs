//! Change notification for component attributes.
//!
//! Components own a [`ListenerRegistry`]. Views subscribe to the events they
//! care about when they are created and unsubscribe every handle when they
//! are disposed.

use crate::component::{Attribute, Attributes};
use std::fmt;

/// Something that happened to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentEvent {
    /// An attribute was set to a different value.
    Changed(Attribute),
    /// Views should refresh their transforms.
    Rerender,
    /// Views should detach from the component.
    Unrender,
}

impl ComponentEvent {
    /// The subscription key this event is delivered to.
    pub fn kind(self) -> EventKind {
        match self {
            ComponentEvent::Changed(attr) => EventKind::Change(attr),
            ComponentEvent::Rerender => EventKind::Rerender,
            ComponentEvent::Unrender => EventKind::Unrender,
        }
    }
}

/// Subscription key: a single attribute change or a lifecycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change(Attribute),
    Rerender,
    Unrender,
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with the component's attributes after the event.
pub type Listener = Box<dyn FnMut(&Attributes, ComponentEvent)>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    listener: Listener,
}

/// Ordered set of listeners keyed by [`EventKind`].
#[derive(Default)]
pub struct ListenerRegistry {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners run in registration order.
    pub fn subscribe(&mut self, kind: EventKind, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription { id, kind, listener });
        id
    }

    /// Remove a listener. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver an event to every listener subscribed to its kind.
    pub fn notify(&mut self, attributes: &Attributes, event: ComponentEvent) {
        let kind = event.kind();
        for sub in self.subscriptions.iter_mut().filter(|sub| sub.kind == kind) {
            (sub.listener)(attributes, event);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
