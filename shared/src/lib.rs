//! # Tandem Shared
//! Identifiers, events, messages and processes shared between the tandem
//! logic worker and the render context.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(all(target_arch = "wasm32", not(feature = "wbindgen")))]
    {
        compile_error!("wasm target for 'tandem_shared' crate requires the 'wbindgen' feature to be enabled.");
    }
}

mod backends;
mod clock;
mod events;
mod identifier;
mod messages;
mod process;
mod resources;
mod types;

pub use backends::{TimeError, Timestamp};
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{
    builtin::{
        register_builtin_events, ActorCreated, ActorCreatedEvent, ActorDestroyed,
        ActorDestroyedEvent, ComponentAdded, ComponentAddedEvent, ComponentChanged,
        ComponentChangedEvent, ComponentSnapshot, DeviceLost, DeviceLostEvent, DeviceRestored,
        DeviceRestoredEvent,
    },
    error::EventError,
    event::{Event, EventEnvelope, EventPayload, TypedEvent},
    event_kinds::{EventConstructor, EventKinds},
    event_service::{EventListener, EventService, EventServiceConfig},
};
pub use identifier::{hash_name, INVALID_ACTOR_ID};
pub use messages::{
    endpoint::{Endpoint, MessageSender},
    error::{MessageError, TransportError},
    handler::{ExtensionHandler, NoExtensions},
    message::{
        Decoded, GameOptionsRequest, GameOptionsResponse, LoadGame, Message, ResourceRequest,
        ResourceResponse, TriggerEvent, ViewRendererRequest, ViewRendererResponse, WorkerStatus,
    },
    message_kind::MessageKind,
};
pub use process::{
    callback_process::CallbackProcess,
    delay_process::DelayProcess,
    process::{Process, ProcessCore, ProcessState},
    process_manager::{ProcessHandle, ProcessManager},
};
pub use resources::error::ResourceError;
pub use types::{ActorId, ComponentId, EventType, MessageType, ViewId};
