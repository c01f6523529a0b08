use thiserror::Error;

/// Errors that can occur while encoding or decoding message envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Envelope has no numeric `type` field
    #[error("Message envelope is missing a numeric 'type' field")]
    MissingType,

    /// Envelope is not a JSON object
    #[error("Message envelope must be a JSON object")]
    NotAnObject,

    /// A known message kind carried fields that do not match its payload
    #[error("Malformed {kind} message: {reason}")]
    Malformed { kind: String, reason: String },

    /// A payload could not be written into an envelope
    #[error("Failed to encode {kind} message: {reason}")]
    Encode { kind: String, reason: String },
}

/// Errors that can occur while moving envelopes between contexts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The other context has gone away
    #[error("Message channel disconnected. The other execution context has shut down")]
    Disconnected,

    /// Encoding failed before the envelope could be sent
    #[error("Message error: {0}")]
    Message(#[from] MessageError),
}
