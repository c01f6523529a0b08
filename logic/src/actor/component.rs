use std::{any::Any, rc::Rc, time::Duration};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use tandem_shared::{hash_name, ActorId, ComponentId, ComponentSnapshot};

use crate::{
    actor::error::ComponentError, resources::provider::ResourceProvider,
    script::registry::ScriptRegistry,
};

/// Capabilities an actor may hold at most one of
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExclusiveSlot {
    Camera,
    Light,
}

/// Identity shared by every component: its id, hashed from its name, and
/// the id of the actor it is attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentBase {
    pub id: ComponentId,
    pub owner: Option<ActorId>,
}

impl ComponentBase {
    pub fn new(name: &str) -> Self {
        Self {
            id: hash_name(name),
            owner: None,
        }
    }
}

/// Collaborators handed to a component while it initialises.
#[derive(Clone)]
pub struct ComponentContext {
    pub actor_id: ActorId,
    pub resources: Rc<dyn ResourceProvider>,
    pub scripts: Rc<ScriptRegistry>,
}

/// A unit of actor behavior.
///
/// `initialize` may run again later with new data when the actor is
/// modified, followed by `changed`.
#[async_trait(?Send)]
pub trait ActorComponent: Any + 'static {
    fn name(&self) -> &'static str;

    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    fn id(&self) -> ComponentId {
        self.base().id
    }

    fn owner(&self) -> Option<ActorId> {
        self.base().owner
    }

    fn set_owner(&mut self, owner: Option<ActorId>) {
        self.base_mut().owner = owner;
    }

    fn exclusive_slot(&self) -> Option<ExclusiveSlot> {
        None
    }

    async fn initialize(
        &mut self,
        data: &Value,
        context: &ComponentContext,
    ) -> Result<(), ComponentError>;

    fn post_initialize(&mut self) {}

    fn update(&mut self, _delta: Duration) {}

    fn changed(&mut self) {}

    fn destroy(&mut self) {}

    /// Transport-neutral state mirrored to the render context
    fn snapshot(&self) -> Value;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn ActorComponent {
    pub fn downcast_ref<T: ActorComponent>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: ActorComponent>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

pub fn snapshot_of(component: &dyn ActorComponent) -> ComponentSnapshot {
    ComponentSnapshot {
        component_id: component.id(),
        name: component.name().to_string(),
        data: component.snapshot(),
    }
}

/// Reads a component payload. An absent payload yields the default.
pub fn read_data<T: DeserializeOwned + Default>(
    name: &str,
    data: &Value,
) -> Result<T, ComponentError> {
    if data.is_null() {
        return Ok(T::default());
    }
    T::deserialize(data).map_err(|err| ComponentError::InvalidData {
        name: name.to_string(),
        reason: err.to_string(),
    })
}
