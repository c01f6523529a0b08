use std::collections::HashMap;

use log::warn;

use crate::{
    events::event::{Event, EventPayload, TypedEvent},
    types::EventType,
};

/// Builds an empty event, to be filled by [`Event::deserialize`]
pub type EventConstructor = fn() -> Box<dyn Event>;

/// Registry of event constructors keyed by event type id
pub struct EventKinds {
    constructors: HashMap<EventType, EventConstructor>,
}

impl Default for EventKinds {
    fn default() -> Self {
        Self::new()
    }
}

impl EventKinds {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Returns false, leaving the first registration in place, if the type is already known
    pub fn register(&mut self, event_type: EventType, constructor: EventConstructor) -> bool {
        if self.constructors.contains_key(&event_type) {
            warn!("Event type {} is already registered, ignoring", event_type);
            return false;
        }
        self.constructors.insert(event_type, constructor);
        true
    }

    pub fn register_payload<P: EventPayload>(&mut self) -> bool {
        self.register(P::event_type(), TypedEvent::<P>::construct)
    }

    pub fn contains(&self, event_type: &EventType) -> bool {
        self.constructors.contains_key(event_type)
    }

    pub fn create(&self, event_type: &EventType) -> Option<Box<dyn Event>> {
        self.constructors.get(event_type).map(|constructor| constructor())
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
