use std::sync::Arc;

use ahash::AHashMap;

use super::{EventHandler, EventType, Listeners, ObjectId};

struct Entry {
    handler: EventHandler,
    once: bool,
}

/// Listeners and event parents of one object.
///
/// Runtime objects can keep a registry to implement [`Evented`](super::Evented): it stores the
/// handlers, calls them in the order they were added and forgets one-time handlers after the
/// first call.
#[derive(Default)]
pub struct ListenerRegistry {
    handlers: AHashMap<EventType, Vec<Entry>>,
    parents: Vec<ObjectId>,
}

impl ListenerRegistry {
    /// Adds the listeners.
    pub fn add(&mut self, listeners: Listeners, once: bool) {
        for (event_type, handler) in listeners.pairs() {
            self.handlers
                .entry(event_type.clone())
                .or_default()
                .push(Entry {
                    handler: handler.clone(),
                    once,
                });
        }
    }

    /// Removes the listeners, comparing handlers by identity.
    pub fn remove(&mut self, listeners: &Listeners) {
        for (event_type, handler) in listeners.pairs() {
            if let Some(entries) = self.handlers.get_mut(event_type) {
                entries.retain(|e| !Arc::ptr_eq(&e.handler, handler));
                if entries.is_empty() {
                    self.handlers.remove(event_type);
                }
            }
        }
    }

    /// Removes all listeners of the event name.
    pub fn remove_type(&mut self, event_type: &EventType) {
        self.handlers.remove(event_type);
    }

    /// Removes all listeners.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Whether there are listeners for the event name.
    pub fn listens(&self, event_type: &EventType) -> bool {
        self.handlers
            .get(event_type)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Handlers of the event type in the order they were added. One-time handlers are forgotten.
    ///
    /// The registry is not borrowed by the returned handlers: call them after releasing the lock
    /// that guards the registry, so that a handler can add or remove listeners of its own object.
    pub fn take_handlers(&mut self, event_type: &EventType) -> Vec<EventHandler> {
        let Some(entries) = self.handlers.get_mut(event_type) else {
            return vec![];
        };

        let handlers: Vec<EventHandler> = entries.iter().map(|e| e.handler.clone()).collect();
        entries.retain(|e| !e.once);
        if entries.is_empty() {
            self.handlers.remove(event_type);
        }

        log::trace!("Taking {} handlers of {event_type}", handlers.len());
        handlers
    }

    /// Adds an event parent. Adding the same parent twice has no effect.
    pub fn add_parent(&mut self, parent: ObjectId) {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    /// Removes an event parent.
    pub fn remove_parent(&mut self, parent: ObjectId) {
        self.parents.retain(|p| *p != parent);
    }

    /// Objects propagated events go to.
    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::OnceLock;

    use parking_lot::RwLock;

    use super::*;
    use crate::event::{handler, Event};

    fn fire(registry: &RwLock<ListenerRegistry>, event: &Event) -> usize {
        let handlers = registry.write().take_handlers(event.event_type());
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    fn counter() -> (Arc<AtomicUsize>, EventHandler) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (
            count,
            handler(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn once_handlers_are_called_once() {
        let mut registry = ListenerRegistry::default();
        let (permanent, h1) = counter();
        let (one_time, h2) = counter();
        registry.add(Listeners::Single(EventType::Click, h1), false);
        registry.add(Listeners::Single(EventType::Click, h2), true);

        assert_eq!(registry.take_handlers(&EventType::Click).len(), 2);
        assert_eq!(registry.take_handlers(&EventType::Click).len(), 1);

        let registry = RwLock::new(registry);
        let click = Event::base(EventType::Click, ObjectId(1));
        assert_eq!(fire(&registry, &click), 1);
        assert_eq!(permanent.load(Ordering::SeqCst), 1);
        assert_eq!(one_time.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handler_can_unsubscribe_itself() {
        let registry = Arc::new(RwLock::new(ListenerRegistry::default()));
        let (other_calls, other) = counter();
        let calls = Arc::new(AtomicUsize::new(0));
        let this: Arc<OnceLock<EventHandler>> = Arc::default();

        let unsubscribing = {
            let registry = registry.clone();
            let calls = calls.clone();
            let this = this.clone();
            handler(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                assert!(registry.read().listens(&EventType::Click));
                if let Some(this) = this.get() {
                    registry
                        .write()
                        .remove(&Listeners::Single(EventType::Click, this.clone()));
                }
            })
        };
        assert!(this.set(unsubscribing.clone()).is_ok());

        registry
            .write()
            .add(Listeners::Single(EventType::Click, unsubscribing), false);
        registry
            .write()
            .add(Listeners::Single(EventType::Click, other), false);

        let click = Event::base(EventType::Click, ObjectId(1));
        assert_eq!(fire(&registry, &click), 2);
        assert_eq!(fire(&registry, &click), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(other_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn remove_by_identity() {
        let mut registry = ListenerRegistry::default();
        let (_, h1) = counter();
        let (_, h2) = counter();
        registry.add(("zoom", h1.clone()).into(), false);
        registry.add(("zoom", h2).into(), false);

        registry.remove(&("zoom", h1).into());
        assert!(registry.listens(&EventType::Zoom));
        registry.remove_type(&EventType::Zoom);
        assert!(!registry.listens(&EventType::Zoom));
        assert!(registry.take_handlers(&EventType::Zoom).is_empty());
    }

    #[test]
    fn parents_are_unique() {
        let mut registry = ListenerRegistry::default();
        registry.add_parent(ObjectId(5));
        registry.add_parent(ObjectId(5));
        registry.add_parent(ObjectId(6));
        registry.remove_parent(ObjectId(5));
        assert_eq!(registry.parents(), [ObjectId(6)]);
    }
}
