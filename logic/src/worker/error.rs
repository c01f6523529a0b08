use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while booting or talking to a logic worker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    /// The OS refused to start the worker thread
    #[error("Failed to spawn logic worker thread: {reason}")]
    Spawn { reason: String },

    /// No status message arrived within the boot timeout
    #[error("Logic worker did not report its status within {timeout:?}")]
    BootTimeout { timeout: Duration },

    /// The worker reported a failed boot
    #[error("Logic worker failed to boot: {reason}")]
    BootFailed { reason: String },

    /// Something other than a `WorkerStatus` arrived first
    #[error("Logic worker sent an unexpected first message. WorkerStatus must come first")]
    UnexpectedBootMessage,

    /// The worker went away before reporting
    #[error("Logic worker disconnected before reporting its status")]
    Disconnected,

    /// Game-specific setup rejected the logic instance
    #[error("Logic worker setup failed: {reason}")]
    Setup { reason: String },
}
