use thiserror::Error;

/// Errors that can occur while fetching a named resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// No resource exists under the name
    #[error("Resource '{name}' was not found")]
    NotFound { name: String },

    /// The resource exists but reading it failed
    #[error("Failed to load resource '{name}': {reason}")]
    Load { name: String, reason: String },

    /// The resource was read but is not valid JSON
    #[error("Failed to parse resource '{name}': {reason}")]
    Parse { name: String, reason: String },

    /// The main context answered the request with a failure
    #[error("Resource request for '{name}' failed remotely: {reason}")]
    Remote { name: String, reason: String },

    /// The request can no longer be answered
    #[error("Resource request for '{name}' was dropped before a response arrived")]
    Dropped { name: String },
}

impl ResourceError {
    pub fn name(&self) -> &str {
        match self {
            ResourceError::NotFound { name }
            | ResourceError::Load { name, .. }
            | ResourceError::Parse { name, .. }
            | ResourceError::Remote { name, .. }
            | ResourceError::Dropped { name } => name,
        }
    }
}
