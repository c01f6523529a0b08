use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    rc::Rc,
    time::Duration,
};

use log::{debug, error, warn};

use crate::{
    clock::Clock,
    events::{
        builtin::register_builtin_events,
        error::EventError,
        event::{Event, EventEnvelope, EventPayload},
        event_kinds::{EventConstructor, EventKinds},
    },
    types::EventType,
};

pub type EventListener = Rc<dyn Fn(&dyn Event)>;

/// Contains Config properties which will be used by the EventService
#[derive(Clone, Debug)]
pub struct EventServiceConfig {
    /// Number of event buffers cycled through by `update`. Must be at least 2.
    pub queue_count: usize,
}

impl Default for EventServiceConfig {
    fn default() -> Self {
        Self { queue_count: 2 }
    }
}

/// Listener-indexed event queue with N-buffering and time-sliced flushing.
///
/// All methods take `&self`: listeners are free to queue, trigger, or
/// (un)register while being dispatched. Internal borrows never span a
/// listener call.
pub struct EventService {
    queues: RefCell<Vec<VecDeque<Box<dyn Event>>>>,
    active_queue: Cell<usize>,
    listeners: RefCell<HashMap<EventType, Vec<EventListener>>>,
    kinds: RefCell<EventKinds>,
    clock: Rc<dyn Clock>,
}

impl EventService {
    pub fn new(config: EventServiceConfig, clock: Rc<dyn Clock>) -> Self {
        let queue_count = if config.queue_count < 2 {
            warn!(
                "EventService needs at least 2 queues, {} requested. Using 2",
                config.queue_count
            );
            2
        } else {
            config.queue_count
        };

        let mut kinds = EventKinds::new();
        register_builtin_events(&mut kinds);

        Self {
            queues: RefCell::new((0..queue_count).map(|_| VecDeque::new()).collect()),
            active_queue: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
            kinds: RefCell::new(kinds),
            clock,
        }
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    // Listeners

    /// Returns false, without adding, if this exact listener is already
    /// registered for the type
    pub fn add_event_listener(&self, event_type: EventType, listener: EventListener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let list = listeners.entry(event_type).or_default();
        if list.iter().any(|existing| Rc::ptr_eq(existing, &listener)) {
            warn!(
                "Attempting to double-register listener for event type {}",
                event_type
            );
            return false;
        }
        list.push(listener);
        true
    }

    pub fn remove_event_listener(&self, event_type: EventType, listener: &EventListener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(&event_type) else {
            warn!("No listeners registered for event type {}", event_type);
            return false;
        };
        let Some(index) = list.iter().position(|existing| Rc::ptr_eq(existing, listener)) else {
            warn!("Listener not found for event type {}", event_type);
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            listeners.remove(&event_type);
        }
        true
    }

    pub fn has_listeners(&self, event_type: &EventType) -> bool {
        self.listeners
            .borrow()
            .get(event_type)
            .is_some_and(|list| !list.is_empty())
    }

    // Dispatch

    /// Dispatches immediately to the current listeners. Returns whether any
    /// listener existed.
    pub fn trigger_event(&self, event: &dyn Event) -> bool {
        self.dispatch(event)
    }

    /// Appends to the active queue. Events nobody listens for are dropped.
    pub fn queue_event(&self, event: Box<dyn Event>) -> bool {
        if !self.has_listeners(&event.event_type()) {
            debug!(
                "Dropping event '{}': no listeners registered",
                event.name()
            );
            return false;
        }
        let active = self.active_queue.get();
        self.queues.borrow_mut()[active].push_back(event);
        true
    }

    /// Removes the first (or every) pending event of a type from the active
    /// queue. Returns whether anything was removed.
    pub fn abort_event(&self, event_type: EventType, all_of_type: bool) -> bool {
        let active = self.active_queue.get();
        let mut queues = self.queues.borrow_mut();
        let queue = &mut queues[active];

        if all_of_type {
            let before = queue.len();
            queue.retain(|event| event.event_type() != event_type);
            return queue.len() != before;
        }

        match queue
            .iter()
            .position(|event| event.event_type() == event_type)
        {
            Some(index) => {
                queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drains the previously active buffer, one event at a time, until it is
    /// empty or `current_time + max_update_time` has passed. Undispatched events
    /// keep their order and move to the front of the new active buffer.
    ///
    /// `None` means no time limit. Returns whether the buffer was fully drained.
    pub fn update(&self, current_time: Duration, max_update_time: Option<Duration>) -> bool {
        let deadline = max_update_time.map(|max| current_time + max);

        let processing = self.active_queue.get();
        let active = (processing + 1) % self.queue_count();
        self.active_queue.set(active);
        self.queues.borrow_mut()[active].clear();

        loop {
            let Some(event) = self.queues.borrow_mut()[processing].pop_front() else {
                break;
            };

            self.dispatch(event.as_ref());

            if let Some(deadline) = deadline {
                if self.clock.now() >= deadline {
                    break;
                }
            }
        }

        let mut queues = self.queues.borrow_mut();
        let remaining: Vec<Box<dyn Event>> = queues[processing].drain(..).collect();
        if remaining.is_empty() {
            return true;
        }

        debug!(
            "Event update ran out of time, carrying {} events over",
            remaining.len()
        );
        let active_queue = &mut queues[active];
        for event in remaining.into_iter().rev() {
            active_queue.push_front(event);
        }
        false
    }

    fn dispatch(&self, event: &dyn Event) -> bool {
        let listeners = self.listeners.borrow().get(&event.event_type()).cloned();
        let Some(listeners) = listeners else {
            return false;
        };
        if listeners.is_empty() {
            return false;
        }
        for listener in listeners.iter() {
            listener(event);
        }
        true
    }

    // Introspection

    pub fn queue_count(&self) -> usize {
        self.queues.borrow().len()
    }

    /// Events waiting in any buffer
    pub fn pending_len(&self) -> usize {
        self.queues.borrow().iter().map(VecDeque::len).sum()
    }

    /// Events waiting in the active buffer
    pub fn queued_len(&self) -> usize {
        let active = self.active_queue.get();
        self.queues.borrow()[active].len()
    }

    // Codec

    /// Registering a known type again is a no-op with a warning
    pub fn register_event(&self, event_type: EventType, constructor: EventConstructor) -> bool {
        self.kinds.borrow_mut().register(event_type, constructor)
    }

    pub fn register_payload<P: EventPayload>(&self) -> bool {
        self.kinds.borrow_mut().register_payload::<P>()
    }

    pub fn create_event(&self, event_type: EventType) -> Option<Box<dyn Event>> {
        let event = self.kinds.borrow().create(&event_type);
        if event.is_none() {
            error!("Cannot create event: type {} is not registered", event_type);
        }
        event
    }

    pub fn serialize_event(&self, event: &dyn Event) -> Result<EventEnvelope, EventError> {
        if event.is_local_only() {
            error!(
                "Event '{}' is local-only and must not be serialized",
                event.name()
            );
            return Err(EventError::LocalOnly {
                name: event.name().to_string(),
            });
        }
        Ok(EventEnvelope {
            event_type: event.event_type(),
            data: event.serialize()?,
        })
    }

    pub fn deserialize_event(
        &self,
        envelope: &EventEnvelope,
    ) -> Result<Box<dyn Event>, EventError> {
        let mut event = self
            .kinds
            .borrow()
            .create(&envelope.event_type)
            .ok_or(EventError::UnknownType {
                event_type: envelope.event_type,
            })?;
        event.deserialize(&envelope.data)?;
        Ok(event)
    }
}
