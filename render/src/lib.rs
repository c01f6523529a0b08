//! # Tandem Render
//! The render context: answers the logic worker's resource and view requests
//! and mirrors its actors into a scene graph.

#![deny(trivial_casts, trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(all(target_arch = "wasm32", not(feature = "wbindgen")))]
    {
        compile_error!("wasm target for 'tandem_render' crate requires the 'wbindgen' feature to be enabled.");
    }
}

pub mod shared {
    pub use tandem_shared::{
        ActorId, Clock, ComponentId, Endpoint, Event, EventService, ManualClock, Message,
        ResourceError, SystemClock, ViewId,
    };
}

mod error;
mod main_context;
mod render_config;
mod resources;
mod scene;
mod views;

pub use error::RenderError;
pub use main_context::MainContext;
pub use render_config::RenderConfig;
pub use resources::{
    directory_loader::DirectoryLoader,
    loader::{LoaderFuture, ResourceLoader},
    memory_loader::MemoryLoader,
    resource_cache::ResourceCache,
};
pub use scene::{
    scene::Scene,
    scene_graph::{NodeId, NodeKind, SceneGraph, SceneNode},
    scene_manager::{SceneManager, SceneNodeCreatedEvent},
};
pub use views::{
    view_renderer::{ViewRenderer, ViewRendererConstructor},
    view_renderer_registry::ViewRendererRegistry,
};
