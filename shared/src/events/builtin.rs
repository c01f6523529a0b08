//! Events every context understands. The structural ones (actor created,
//! component added/changed, actor destroyed) are what the render side mirrors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    events::{
        event::{EventPayload, TypedEvent},
        event_kinds::EventKinds,
    },
    types::{ActorId, ComponentId},
};

/// Render-facing state of one component, as produced by the logic side
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub component_id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorCreated {
    pub actor_id: ActorId,
    pub actor_type: String,
    #[serde(default)]
    pub components: Vec<ComponentSnapshot>,
}

impl EventPayload for ActorCreated {
    const NAME: &'static str = "ActorCreatedEvent";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorDestroyed {
    pub actor_id: ActorId,
}

impl EventPayload for ActorDestroyed {
    const NAME: &'static str = "ActorDestroyedEvent";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentAdded {
    pub actor_id: ActorId,
    pub component: ComponentSnapshot,
}

impl EventPayload for ComponentAdded {
    const NAME: &'static str = "ComponentAddedEvent";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentChanged {
    pub actor_id: ActorId,
    pub component: ComponentSnapshot,
}

impl EventPayload for ComponentChanged {
    const NAME: &'static str = "ComponentChangedEvent";
}

/// The graphics device went away; renderers must drop GPU resources
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceLost {}

impl EventPayload for DeviceLost {
    const NAME: &'static str = "DeviceLostEvent";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRestored {}

impl EventPayload for DeviceRestored {
    const NAME: &'static str = "DeviceRestoredEvent";
}

pub type ActorCreatedEvent = TypedEvent<ActorCreated>;
pub type ActorDestroyedEvent = TypedEvent<ActorDestroyed>;
pub type ComponentAddedEvent = TypedEvent<ComponentAdded>;
pub type ComponentChangedEvent = TypedEvent<ComponentChanged>;
pub type DeviceLostEvent = TypedEvent<DeviceLost>;
pub type DeviceRestoredEvent = TypedEvent<DeviceRestored>;

pub fn register_builtin_events(kinds: &mut EventKinds) {
    kinds.register_payload::<ActorCreated>();
    kinds.register_payload::<ActorDestroyed>();
    kinds.register_payload::<ComponentAdded>();
    kinds.register_payload::<ComponentChanged>();
    kinds.register_payload::<DeviceLost>();
    kinds.register_payload::<DeviceRestored>();
}
