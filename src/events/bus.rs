//! Ordered synchronous publish/subscribe.

use rustc_hash::FxHashSet;

use super::event::GameEvent;

/// Stable handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

type Handler = Box<dyn FnMut(&GameEvent)>;

/// Registered handlers, invoked in subscription order.
///
/// Handlers run synchronously inside `emit`; the engine never returns from a
/// command before its events have been delivered. Unsubscribing during
/// delivery takes effect from the next emission.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Handler)>,
    /// Ids unsubscribed mid-delivery, swept on the next emit.
    retired: FxHashSet<SubscriptionId>,
    next_id: u32,
}

impl EventBus {
    /// An empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every future event.
    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.retired.insert(id);
        self.sweep();
    }

    /// Number of live handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver an event to every handler, in subscription order.
    pub fn emit(&mut self, event: &GameEvent) {
        self.sweep();
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    fn sweep(&mut self) {
        if !self.retired.is_empty() {
            let retired = std::mem::take(&mut self.retired);
            self.handlers.retain(|(id, _)| !retired.contains(id));
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dice_event(a: u8, b: u8) -> GameEvent {
        GameEvent::DiceRolled {
            player: PlayerId::new(0),
            dice: [a, b],
        }
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |_| seen.borrow_mut().push(tag));
        }

        bus.emit(&dice_event(1, 2));
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_handler_receives_event_data() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        bus.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        bus.emit(&dice_event(3, 4));
        assert_eq!(*seen.borrow(), vec![dice_event(3, 4)]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = bus.subscribe(move |_| *sink.borrow_mut() += 1);

        bus.emit(&dice_event(1, 1));
        bus.unsubscribe(id);
        bus.emit(&dice_event(2, 2));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_ignored() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(|_| {});
        bus.unsubscribe(id);
        // Second removal of the same id is a no-op.
        bus.unsubscribe(id);
        assert_eq!(bus.handler_count(), 0);
    }
}
