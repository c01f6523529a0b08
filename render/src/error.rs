use thiserror::Error;

use tandem_shared::{EventError, TransportError, ViewId};

/// Errors that can occur in the render context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The logic worker is unreachable
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// An event could not be forwarded to the logic worker
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// No renderer constructor is registered for the requested view type
    #[error("No view renderer registered for view type '{view_type}'. Register one with ViewRendererRegistry::register()")]
    UnknownViewType { view_type: String },

    /// A renderer already exists for the view
    #[error("View {view_id} already has a renderer")]
    DuplicateView { view_id: ViewId },

    /// No renderer exists for the view
    #[error("View {view_id} has no renderer")]
    UnknownView { view_id: ViewId },
}
