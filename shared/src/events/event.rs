use std::any::Any;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{backends::Timestamp, events::error::EventError, hash_name, types::EventType};

/// A typed, timestamped fact dispatched to zero or more listeners.
pub trait Event: Any + 'static {
    fn event_type(&self) -> EventType;

    fn name(&self) -> &'static str;

    /// Creation time, milliseconds since UNIX epoch
    fn timestamp(&self) -> f64;

    /// Produces an independent copy of this event
    fn copy(&self) -> Box<dyn Event>;

    fn serialize(&self) -> Result<Value, EventError>;

    fn deserialize(&mut self, data: &Value) -> Result<(), EventError>;

    /// Local-only events carry render objects and never leave their context
    fn is_local_only(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn Event {
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Serialized form of an event: `{ "type": <u32>, "data": <object> }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub data: Value,
}

/// Data carried by a serializable event. The name doubles as the hashed type.
pub trait EventPayload: Clone + Default + Serialize + DeserializeOwned + 'static {
    const NAME: &'static str;

    fn event_type() -> EventType {
        hash_name(Self::NAME)
    }
}

/// The [`Event`] implementation shared by every serializable payload.
#[derive(Clone, Debug)]
pub struct TypedEvent<P: EventPayload> {
    pub data: P,
    timestamp: f64,
}

impl<P: EventPayload> TypedEvent<P> {
    pub fn new(data: P) -> Self {
        Self {
            data,
            timestamp: Timestamp::now_millis(),
        }
    }

    pub fn boxed(data: P) -> Box<dyn Event> {
        Box::new(Self::new(data))
    }

    /// Empty event, filled in later by [`Event::deserialize`]
    pub fn construct() -> Box<dyn Event> {
        Box::new(Self::new(P::default()))
    }
}

impl<P: EventPayload> Event for TypedEvent<P> {
    fn event_type(&self) -> EventType {
        P::event_type()
    }

    fn name(&self) -> &'static str {
        P::NAME
    }

    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn copy(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }

    fn serialize(&self) -> Result<Value, EventError> {
        serde_json::to_value(&self.data).map_err(|err| EventError::Serialize {
            name: P::NAME.to_string(),
            reason: err.to_string(),
        })
    }

    fn deserialize(&mut self, data: &Value) -> Result<(), EventError> {
        self.data = serde_json::from_value(data.clone()).map_err(|err| EventError::Deserialize {
            name: P::NAME.to_string(),
            reason: err.to_string(),
        })?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
    struct Scored {
        points: u32,
    }

    impl EventPayload for Scored {
        const NAME: &'static str = "ScoredEvent";
    }

    #[test]
    fn copy_is_independent() {
        let event = TypedEvent::new(Scored { points: 3 });
        let copy = event.copy();
        let copied = copy.downcast_ref::<TypedEvent<Scored>>().unwrap();
        assert_eq!(copied.data, Scored { points: 3 });
        assert_eq!(copy.event_type(), hash_name("scoredevent"));
    }

    #[test]
    fn deserialize_fills_payload() {
        let mut event = TypedEvent::<Scored>::construct();
        event.deserialize(&json!({ "points": 12 })).unwrap();
        assert_eq!(event.serialize().unwrap(), json!({ "points": 12 }));
    }

    #[test]
    fn deserialize_rejects_bad_payload() {
        let mut event = TypedEvent::<Scored>::construct();
        let result = event.deserialize(&json!({ "points": "many" }));
        assert!(matches!(result, Err(EventError::Deserialize { .. })));
    }
}
