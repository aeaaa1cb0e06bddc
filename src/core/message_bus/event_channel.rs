//=========================================================================
// Event Channel
//=========================================================================
//
// Per-type storage behind the EventDispatcher: the retained event queue
// plus the listeners subscribed to that type. The `EventChannel` trait
// erases the event type so channels of every type can live in a single
// HashMap.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::dispatcher::{Event, SubscriptionId};

//=== Channel =============================================================

/// Boxed listener callback for events of type `E`.
pub(super) type Listener<E> = Box<dyn FnMut(&E) + Send>;

/// Queue and listeners for a single event type.
pub(super) struct Channel<E: Event> {
    pub(super) queue: Vec<E>,
    pub(super) listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E: Event> Channel<E> {
    pub(super) fn new() -> Self {
        Self {
            queue: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Delivers `event` to every listener in subscription order, then
    /// retains it for polling readers.
    pub(super) fn publish(&mut self, event: E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        self.queue.push(event);
    }
}

//=== EventChannel ========================================================

/// Type-erased operations over a `Channel<E>`.
pub(super) trait EventChannel: Send {
    /// Drops retained events while keeping allocated capacity.
    fn clear_queue(&mut self);

    /// Number of retained events.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the listener registered under `id`, if it lives here.
    fn remove_listener(&mut self, id: SubscriptionId) -> bool;

    fn listener_count(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> EventChannel for Channel<E> {
    fn clear_queue(&mut self) {
        self.queue.clear();
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn remove_listener(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================
