use thiserror::Error;

/// Errors that can occur while loading or running a script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// No script is registered under the name
    #[error("Script '{name}' is not registered. Register it with ScriptRegistry::register before use")]
    NotRegistered { name: String },

    /// The script rejected its initialisation data
    #[error("Script '{name}' failed to initialize: {reason}")]
    Initialization { name: String, reason: String },
}
