use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    panic::AssertUnwindSafe,
    rc::Rc,
};

use futures::FutureExt;
use log::{debug, error, warn};
use serde_json::Value;

use tandem_shared::{hash_name, ActorId, ComponentId, INVALID_ACTOR_ID};

use crate::{
    actor::{
        actor::Actor,
        component::{ActorComponent, ComponentContext, ExclusiveSlot},
        component_factory::ActorComponentFactory,
        descriptor::{ActorDescriptor, ComponentDescriptor},
        error::{ActorError, ComponentError},
        settle::settle_all,
    },
    components::transform::{Transform, TransformComponent},
    resources::provider::ResourceProvider,
    script::registry::ScriptRegistry,
};

struct OverrideEntry {
    component: Box<dyn ActorComponent>,
    data: Value,
    /// Detached from the actor rather than newly created
    existing: bool,
}

/// Overrides whose components have been detached or created, ready to be
/// initialised without borrowing the actor.
pub struct PendingOverrides {
    actor_id: ActorId,
    entries: Vec<OverrideEntry>,
    rejected: Vec<ComponentError>,
}

impl PendingOverrides {
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Overrides whose initialisers have all settled
pub struct SettledOverrides {
    actor_id: ActorId,
    entries: Vec<(OverrideEntry, Result<(), ComponentError>)>,
    rejected: Vec<ComponentError>,
}

impl SettledOverrides {
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }
}

/// Outcome of applying a batch of overrides to an actor
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifyReport {
    /// Existing components that were re-initialised
    pub changed: Vec<ComponentId>,
    /// Components newly attached
    pub added: Vec<ComponentId>,
    pub failed: Vec<ComponentError>,
}

/// Builds actors from named descriptor resources.
pub struct ActorFactory {
    components: RefCell<ActorComponentFactory>,
    resources: Rc<dyn ResourceProvider>,
    scripts: Rc<ScriptRegistry>,
    last_actor_id: Cell<ActorId>,
}

impl ActorFactory {
    pub fn new(
        components: ActorComponentFactory,
        resources: Rc<dyn ResourceProvider>,
        scripts: Rc<ScriptRegistry>,
    ) -> Self {
        Self {
            components: RefCell::new(components),
            resources,
            scripts,
            last_actor_id: Cell::new(INVALID_ACTOR_ID),
        }
    }

    pub fn register_component<F>(&self, name: &str, constructor: F) -> bool
    where
        F: Fn() -> Box<dyn ActorComponent> + 'static,
    {
        self.components.borrow_mut().register(name, constructor)
    }

    pub fn scripts(&self) -> &Rc<ScriptRegistry> {
        &self.scripts
    }

    pub fn resources(&self) -> &Rc<dyn ResourceProvider> {
        &self.resources
    }

    fn next_actor_id(&self) -> ActorId {
        let mut id = self.last_actor_id.get().wrapping_add(1);
        if id == INVALID_ACTOR_ID {
            id = id.wrapping_add(1);
        }
        self.last_actor_id.set(id);
        id
    }

    fn context(&self, actor_id: ActorId) -> ComponentContext {
        ComponentContext {
            actor_id,
            resources: self.resources.clone(),
            scripts: self.scripts.clone(),
        }
    }

    /// Creates a component for one descriptor entry, enforcing exclusive
    /// slots against the actor and the rest of the batch
    fn instantiate(
        &self,
        actor: &Actor,
        descriptor: &ComponentDescriptor,
        claimed: &mut Vec<ExclusiveSlot>,
    ) -> Result<Box<dyn ActorComponent>, ComponentError> {
        let component = self
            .components
            .borrow()
            .create_by_id(descriptor.component_id())
            .ok_or_else(|| ComponentError::UnknownType {
                name: descriptor.component_type.clone(),
            })?;

        if let Some(slot) = component.exclusive_slot() {
            if actor.occupies(slot) || claimed.contains(&slot) {
                return Err(ComponentError::SlotTaken {
                    name: component.name().to_string(),
                    slot,
                    actor_id: actor.id(),
                });
            }
            claimed.push(slot);
        }
        Ok(component)
    }

    // Creation

    /// Builds an actor from the descriptor stored under `resource`.
    ///
    /// Components initialise concurrently and fail independently: a failed
    /// component is logged and left out. Only a panic during initialisation
    /// aborts the whole actor.
    pub async fn create_actor(
        &self,
        resource: &str,
        overrides: Option<&[ComponentDescriptor]>,
        initial_transform: Option<Transform>,
        server_actor_id: Option<ActorId>,
    ) -> Result<Actor, ActorError> {
        let value = self
            .resources
            .get_resource(resource)
            .await
            .map_err(|source| ActorError::Resource {
                resource: resource.to_string(),
                source,
            })?;
        let descriptor: ActorDescriptor =
            serde_json::from_value(value).map_err(|err| ActorError::MalformedDescriptor {
                resource: resource.to_string(),
                reason: err.to_string(),
            })?;

        let actor_id = match server_actor_id {
            Some(id) if id != INVALID_ACTOR_ID => id,
            _ => self.next_actor_id(),
        };

        let mut actor = Actor::new(actor_id);
        if !actor.initialise(&descriptor) {
            return Err(ActorError::MissingType {
                resource: resource.to_string(),
            });
        }

        let mut claimed = Vec::new();
        let mut seen = HashSet::new();
        let mut batch = Vec::new();
        for entry in &descriptor.components {
            if !seen.insert(entry.component_id()) {
                error!(
                    "{}",
                    ComponentError::Duplicate {
                        name: entry.component_type.clone(),
                        actor_id,
                    }
                );
                continue;
            }
            match self.instantiate(&actor, entry, &mut claimed) {
                Ok(component) => batch.push((component, entry.data())),
                Err(err) => error!("Skipping component on actor {}: {}", actor_id, err),
            }
        }

        let context = self.context(actor_id);
        let initialising = settle_all(
            batch
                .iter_mut()
                .map(|(component, data)| component.initialize(data, &context)),
        );
        let Ok(outcomes) = AssertUnwindSafe(initialising).catch_unwind().await else {
            error!(
                "Component construction for actor {} ('{}') panicked, destroying it",
                actor_id, resource
            );
            for (mut component, _) in batch {
                component.destroy();
            }
            actor.destroy();
            return Err(ActorError::ConstructionAborted { actor_id });
        };

        for ((component, _), outcome) in batch.into_iter().zip(outcomes) {
            match outcome {
                Ok(()) => {
                    if let Some(mut displaced) = actor.add_component(component) {
                        displaced.destroy();
                    }
                }
                Err(err) => error!(
                    "Failed to initialize component '{}' on actor {}: {}",
                    component.name(),
                    actor_id,
                    err
                ),
            }
        }

        if let Some(overrides) = overrides.filter(|overrides| !overrides.is_empty()) {
            self.modify_actor(&mut actor, overrides).await;
        }

        if let Some(transform) = initial_transform {
            let component = actor
                .get_component_mut(hash_name(TransformComponent::NAME))
                .and_then(|component| component.downcast_mut::<TransformComponent>());
            match component {
                Some(component) => component.set_transform(transform),
                None => warn!(
                    "Actor {} has no TransformComponent, ignoring its initial transform",
                    actor_id
                ),
            }
        }

        actor.post_initialise();
        debug!(
            "Created actor {} ('{}') with {} components",
            actor_id,
            actor.actor_type(),
            actor.component_count()
        );
        Ok(actor)
    }

    // Modification

    /// Applies overrides to an actor: existing components are re-initialised
    /// and notified, missing ones are created and attached. Every override
    /// settles; failures are logged and reported, never escalated.
    pub async fn modify_actor(
        &self,
        actor: &mut Actor,
        overrides: &[ComponentDescriptor],
    ) -> ModifyReport {
        let pending = self.prepare_overrides(actor, overrides);
        let settled = self.settle(pending).await;
        self.finish_overrides(actor, settled)
    }

    /// Detaches the components being overridden and creates the new ones.
    /// The actor can be used again while the result settles; the exclusive
    /// slots of the batch stay reserved on it until `finish_overrides`.
    pub fn prepare_overrides(
        &self,
        actor: &mut Actor,
        overrides: &[ComponentDescriptor],
    ) -> PendingOverrides {
        let actor_id = actor.id();
        let mut claimed = Vec::new();
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut rejected = Vec::new();

        for descriptor in overrides {
            let id = descriptor.component_id();
            if !seen.insert(id) {
                rejected.push(ComponentError::Duplicate {
                    name: descriptor.component_type.clone(),
                    actor_id,
                });
                continue;
            }

            if let Some(component) = actor.take_component(id) {
                if let Some(slot) = component.exclusive_slot() {
                    claimed.push(slot);
                }
                entries.push(OverrideEntry {
                    component,
                    data: descriptor.data(),
                    existing: true,
                });
                continue;
            }

            match self.instantiate(actor, descriptor, &mut claimed) {
                Ok(component) => entries.push(OverrideEntry {
                    component,
                    data: descriptor.data(),
                    existing: false,
                }),
                Err(err) => rejected.push(err),
            }
        }

        for err in &rejected {
            error!("Rejected override for actor {}: {}", actor_id, err);
        }
        for slot in entries
            .iter()
            .filter_map(|entry| entry.component.exclusive_slot())
        {
            actor.reserve_slot(slot);
        }

        PendingOverrides {
            actor_id,
            entries,
            rejected,
        }
    }

    /// Runs every override initialiser to completion
    pub async fn settle(&self, pending: PendingOverrides) -> SettledOverrides {
        let PendingOverrides {
            actor_id,
            mut entries,
            rejected,
        } = pending;

        let context = self.context(actor_id);
        let outcomes = settle_all(
            entries
                .iter_mut()
                .map(|entry| entry.component.initialize(&entry.data, &context)),
        )
        .await;

        SettledOverrides {
            actor_id,
            entries: entries.into_iter().zip(outcomes).collect(),
            rejected,
        }
    }

    /// Reattaches overridden components and attaches new ones that
    /// initialised successfully
    pub fn finish_overrides(&self, actor: &mut Actor, settled: SettledOverrides) -> ModifyReport {
        if settled.actor_id != actor.id() {
            warn!(
                "Overrides prepared for actor {} finished on actor {}",
                settled.actor_id,
                actor.id()
            );
        }

        let mut report = ModifyReport {
            failed: settled.rejected,
            ..ModifyReport::default()
        };

        for (entry, outcome) in settled.entries {
            let OverrideEntry {
                mut component,
                existing,
                ..
            } = entry;
            let id = component.id();
            if let Some(slot) = component.exclusive_slot() {
                actor.release_slot(slot);
            }

            match outcome {
                Ok(()) if existing => {
                    component.changed();
                    actor.restore_component(component);
                    report.changed.push(id);
                }
                Ok(()) => {
                    actor.restore_component(component);
                    report.added.push(id);
                }
                Err(err) => {
                    error!(
                        "Failed to apply override '{}' to actor {}: {}",
                        component.name(),
                        actor.id(),
                        err
                    );
                    if existing {
                        actor.restore_component(component);
                    }
                    report.failed.push(err);
                }
            }
        }

        report
    }

    /// Tears down settled overrides whose actor no longer exists
    pub fn discard_overrides(&self, settled: SettledOverrides) {
        for (mut entry, _) in settled.entries {
            entry.component.destroy();
        }
    }
}
