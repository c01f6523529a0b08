//! # Tandem Logic
//! The logic context: actors built from declarative descriptors, their
//! components, and the per-tick driver that keeps a render context in sync
//! through message passing.

#![deny(trivial_casts, trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub mod shared {
    pub use tandem_shared::{
        hash_name, ActorId, Clock, ComponentId, ComponentSnapshot, Event, EventService,
        ManualClock, Message, MessageSender, Process, ProcessHandle, ResourceError, SystemClock,
        ViewId,
    };
}

mod actor;
mod components;
mod game;
mod logic_config;
mod resources;
mod script;

cfg_if! {
    if #[cfg(not(target_arch = "wasm32"))] {
        mod worker;
        pub use worker::{spawn_worker, WorkerError, WorkerHandle};
    }
}

pub use actor::{
    actor::Actor,
    actor_factory::{ActorFactory, ModifyReport, PendingOverrides, SettledOverrides},
    component::{
        read_data, snapshot_of, ActorComponent, ComponentBase, ComponentContext, ExclusiveSlot,
    },
    component_factory::{ActorComponentFactory, ComponentConstructor},
    descriptor::{ActorDescriptor, ComponentDescriptor},
    error::{ActorError, ComponentError},
    settle::settle_all,
};
pub use components::{
    camera::{CameraComponent, CameraKind},
    light::{LightComponent, LightKind},
    render::{RenderComponent, RenderKind},
    script::ScriptComponent,
    transform::{Transform, TransformComponent},
};
pub use game::{
    actor_registry::ActorRegistry,
    actor_tasks::{ActorTasks, Broadcaster},
    game_logic::BaseGameLogic,
    game_view::GameView,
    level::{LevelActor, LevelDescriptor},
    task_handle::TaskHandle,
};
pub use logic_config::LogicConfig;
pub use resources::{
    memory_resources::MemoryResources,
    provider::{ResourceFuture, ResourceProvider},
    resource_manager::ResourceManager,
};
pub use script::{
    error::ScriptError,
    registry::{Script, ScriptConstructor, ScriptRegistry},
};
