//! Ordered subscriber list used by publishers.

use crate::events::change::ChangeEvent;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

/// Observer contract for registry change events.
///
/// Implementations must not panic; they run inside the publisher's call.
pub trait ChangeListener {
    fn handle_event(&self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent),
{
    fn handle_event(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Opaque handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscriber handles in registration order.
#[derive(Default)]
pub struct Subscribers {
    entries: Vec<(SubscriptionId, Rc<dyn ChangeListener>)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one listener; it receives events after all earlier ones.
    pub fn subscribe(&mut self, listener: Rc<dyn ChangeListener>) -> SubscriptionId {
        let id = SubscriptionId::generate();
        self.entries.push((id, listener));
        id
    }

    /// Drops one listener. Other subscriptions keep their order.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every listener before returning.
    pub fn notify(&self, event: &ChangeEvent) {
        for (id, listener) in &self.entries {
            trace!(
                "event=change_dispatch module=events status=ok subscription={} kind={}",
                id,
                event.kind()
            );
            listener.handle_event(event);
        }
    }
}
