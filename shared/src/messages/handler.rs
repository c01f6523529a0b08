use serde_json::Value;

use crate::types::MessageType;

/// Handles message kinds a game layers on top of the base protocol.
pub trait ExtensionHandler {
    /// Returns whether the envelope was processed
    fn handle_envelope(&mut self, type_id: MessageType, envelope: &Value) -> bool;
}

/// Leaves every unknown envelope unprocessed
pub struct NoExtensions;

impl ExtensionHandler for NoExtensions {
    fn handle_envelope(&mut self, _type_id: MessageType, _envelope: &Value) -> bool {
        false
    }
}
