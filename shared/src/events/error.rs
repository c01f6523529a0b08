use thiserror::Error;

use crate::types::EventType;

/// Errors that can occur while creating, serializing or deserializing events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Event carries render-side objects and must stay in its own context
    #[error("Event '{name}' is local-only and cannot cross a serialization boundary")]
    LocalOnly { name: String },

    /// Event type id has no registered constructor
    #[error("Event type {event_type} is not registered. Register it with EventService::register_event()")]
    UnknownType { event_type: EventType },

    /// Envelope has no numeric `type` field
    #[error("Event envelope is missing a numeric 'type' field")]
    MissingType,

    /// Event payload could not be written
    #[error("Failed to serialize event '{name}': {reason}")]
    Serialize { name: String, reason: String },

    /// Event payload could not be read
    #[error("Failed to deserialize event '{name}': {reason}")]
    Deserialize { name: String, reason: String },
}
