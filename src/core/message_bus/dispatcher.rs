//=========================================================================
// Event Dispatcher
//=========================================================================
//
// Typed publish/subscribe hub for stage-level events.
//
// Architecture:
//   publish<E>() ──→ listeners of E (synchronous, subscription order)
//                         ↓
//                 HashMap<TypeId, Channel<E>> (retained queue)
//                         ↓
//   pollers ←──── read<E>() until clear<E>() / clear_all()
//
// Pattern: subscribe once → publish (N times) → read → clear at tick
// boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event_channel::{Channel, EventChannel};

//=== Public API ==========================================================

/// Marker trait for types that can be published through the dispatcher.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Event: Send + 'static {}

impl<T: Send + 'static> Event for T {}

/// Handle returned by [`EventDispatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(super) u64);

//=== EventDispatcher =====================================================

/// Publish/subscribe endpoint keyed by event type.
///
/// Every published event is handed to the current listeners of its type
/// immediately and then retained, so code that prefers polling can
/// `read` it until the owner clears the queue.
pub struct EventDispatcher {
    channels: HashMap<TypeId, Box<dyn EventChannel>>,
    next_subscription: u64,
}

impl EventDispatcher {
    /// Creates a dispatcher with no channels.
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            next_subscription: 0,
        }
    }

    //--- Subscriptions ----------------------------------------------------

    /// Registers `listener` for events of type `E`.
    pub fn subscribe<E, F>(&mut self, listener: F) -> SubscriptionId
    where
        E: Event,
        F: FnMut(&E) + Send + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);

        self.channel_mut::<E>().listeners.push((id, Box::new(listener)));
        trace!(target: "stage::events", "Subscription {:?} added", id);
        id
    }

    /// Removes a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.channels
            .values_mut()
            .any(|channel| channel.remove_listener(id))
    }

    /// Number of listeners currently subscribed to `E`.
    pub fn listener_count<E: Event>(&self) -> usize {
        self.channels
            .get(&TypeId::of::<E>())
            .map(|channel| channel.listener_count())
            .unwrap_or(0)
    }

    //--- Publishing -------------------------------------------------------

    /// Delivers `event` to all listeners of `E`, then retains it.
    pub fn publish<E: Event>(&mut self, event: E) {
        self.channel_mut::<E>().publish(event);
    }

    //--- Query API --------------------------------------------------------

    /// Returns all retained events of type `E`, oldest first.
    pub fn read<E: Event>(&self) -> &[E] {
        self.channel::<E>()
            .map(|channel| channel.queue.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if any events of type `E` are retained.
    pub fn has_events<E: Event>(&self) -> bool {
        self.count::<E>() > 0
    }

    /// Number of retained events of type `E`.
    pub fn count<E: Event>(&self) -> usize {
        self.channels
            .get(&TypeId::of::<E>())
            .map(|channel| channel.len())
            .unwrap_or(0)
    }

    //--- Housekeeping -----------------------------------------------------

    /// Drops retained events of type `E`; listeners stay subscribed.
    pub fn clear<E: Event>(&mut self) {
        if let Some(channel) = self.channels.get_mut(&TypeId::of::<E>()) {
            channel.clear_queue();
        }
    }

    /// Drops retained events of every type, preserving capacity.
    pub fn clear_all(&mut self) {
        for channel in self.channels.values_mut() {
            channel.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn channel<E: Event>(&self) -> Option<&Channel<E>> {
        self.channels
            .get(&TypeId::of::<E>())
            .and_then(|channel| channel.as_any().downcast_ref::<Channel<E>>())
    }

    fn channel_mut<E: Event>(&mut self) -> &mut Channel<E> {
        self.channels
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Channel::<E>::new()))
            .as_any_mut()
            .downcast_mut::<Channel<E>>()
            .expect("Type mismatch in EventDispatcher channel")
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, PartialEq, Clone)]
    struct Opened {
        name: String,
    }

    #[derive(Debug, PartialEq, Clone)]
    struct Tick(u32);

    fn opened(name: &str) -> Opened {
        Opened {
            name: name.to_string(),
        }
    }

    #[test]
    fn new_dispatcher_is_empty() {
        let dispatcher = EventDispatcher::new();
        assert!(!dispatcher.has_events::<Opened>());
        assert_eq!(dispatcher.count::<Opened>(), 0);
        assert!(dispatcher.read::<Opened>().is_empty());
        assert_eq!(dispatcher.listener_count::<Opened>(), 0);
    }

    #[test]
    fn listeners_receive_events_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();

        let first = Arc::clone(&log);
        dispatcher.subscribe(move |e: &Opened| first.lock().unwrap().push(format!("a:{}", e.name)));
        let second = Arc::clone(&log);
        dispatcher.subscribe(move |e: &Opened| second.lock().unwrap().push(format!("b:{}", e.name)));

        dispatcher.publish(opened("title"));

        assert_eq!(*log.lock().unwrap(), vec!["a:title", "b:title"]);
    }

    #[test]
    fn published_events_are_retained_for_polling() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.publish(opened("title"));
        dispatcher.publish(opened("game"));

        let events = dispatcher.read::<Opened>();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "title");
        assert_eq!(events[1].name, "game");

        // Still present until cleared
        assert_eq!(dispatcher.count::<Opened>(), 2);
    }

    #[test]
    fn channels_are_separate_per_type() {
        let ticks = Arc::new(Mutex::new(0));
        let mut dispatcher = EventDispatcher::new();

        let counter = Arc::clone(&ticks);
        dispatcher.subscribe(move |_: &Tick| *counter.lock().unwrap() += 1);

        dispatcher.publish(opened("title"));
        dispatcher.publish(Tick(1));
        dispatcher.publish(Tick(2));

        assert_eq!(*ticks.lock().unwrap(), 2);
        assert_eq!(dispatcher.count::<Opened>(), 1);
        assert_eq!(dispatcher.count::<Tick>(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hits = Arc::new(Mutex::new(0));
        let mut dispatcher = EventDispatcher::new();

        let counter = Arc::clone(&hits);
        let id = dispatcher.subscribe(move |_: &Tick| *counter.lock().unwrap() += 1);

        dispatcher.publish(Tick(1));
        assert!(dispatcher.unsubscribe(id));
        dispatcher.publish(Tick(2));

        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(dispatcher.listener_count::<Tick>(), 0);
        assert!(!dispatcher.unsubscribe(id), "Second unsubscribe is a miss");
    }

    #[test]
    fn clear_keeps_listeners() {
        let hits = Arc::new(Mutex::new(0));
        let mut dispatcher = EventDispatcher::new();

        let counter = Arc::clone(&hits);
        dispatcher.subscribe(move |_: &Tick| *counter.lock().unwrap() += 1);

        dispatcher.publish(Tick(1));
        dispatcher.clear::<Tick>();
        assert!(!dispatcher.has_events::<Tick>());

        dispatcher.publish(Tick(2));
        assert_eq!(*hits.lock().unwrap(), 2);
        assert_eq!(dispatcher.read::<Tick>(), &[Tick(2)]);
    }

    #[test]
    fn clear_all_drops_every_queue() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.publish(opened("title"));
        dispatcher.publish(Tick(9));

        dispatcher.clear_all();

        assert_eq!(dispatcher.count::<Opened>(), 0);
        assert_eq!(dispatcher.count::<Tick>(), 0);
    }

    #[test]
    fn read_clear_read_pattern() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.publish(Tick(1));

        // Frame 1: read and clear
        assert_eq!(dispatcher.read::<Tick>().len(), 1);
        dispatcher.clear_all();

        // Frame 2: nothing new
        assert!(dispatcher.read::<Tick>().is_empty());

        // Frame 3: fresh events
        dispatcher.publish(Tick(3));
        assert_eq!(dispatcher.read::<Tick>(), &[Tick(3)]);
    }
}
