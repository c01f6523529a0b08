use thiserror::Error;

use tandem_shared::{ActorId, ResourceError};

use crate::{actor::component::ExclusiveSlot, script::error::ScriptError};

/// Errors that can occur while creating or initialising a single component.
/// These never abort the owning actor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// The descriptor names a component type nobody registered
    #[error("Unknown component type '{name}'")]
    UnknownType { name: String },

    /// The actor already has a component occupying this slot
    #[error("Actor {actor_id} already has a {slot:?} component, rejecting '{name}'")]
    SlotTaken {
        name: String,
        slot: ExclusiveSlot,
        actor_id: ActorId,
    },

    /// The same component type appears twice in one batch
    #[error("Component '{name}' appears more than once for actor {actor_id}")]
    Duplicate { name: String, actor_id: ActorId },

    /// The descriptor fields do not match what the component expects
    #[error("Invalid data for component '{name}': {reason}")]
    InvalidData { name: String, reason: String },

    /// A resource the component depends on could not be fetched
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// A script component could not load its script
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),
}

/// Errors that can occur while building or modifying a whole actor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    /// The actor resource could not be fetched
    #[error("Failed to fetch actor resource '{resource}': {source}")]
    Resource {
        resource: String,
        #[source]
        source: ResourceError,
    },

    /// The actor resource is not a valid descriptor
    #[error("Actor resource '{resource}' is malformed: {reason}")]
    MalformedDescriptor { resource: String, reason: String },

    /// The descriptor has no `type` field
    #[error("Actor resource '{resource}' has no 'type' field")]
    MissingType { resource: String },

    /// Component construction as a whole failed and the partial actor was
    /// destroyed
    #[error("Construction of actor {actor_id} was aborted")]
    ConstructionAborted { actor_id: ActorId },

    /// Another live actor already uses this id
    #[error("An actor with id {actor_id} already exists")]
    DuplicateId { actor_id: ActorId },

    /// No live actor has this id
    #[error("Actor {actor_id} does not exist")]
    NotFound { actor_id: ActorId },

    /// The task producing the result was dropped before finishing
    #[error("The actor task was dropped before it completed")]
    Dropped,
}
