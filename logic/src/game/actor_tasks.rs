use std::{cell::RefCell, rc::Rc};

use log::{error, info, warn};

use tandem_shared::{
    ActorCreated, ActorId, ComponentAdded, ComponentChanged, ComponentId, ComponentSnapshot, Event,
    EventService, Message, MessageSender, TypedEvent,
};

use crate::{
    actor::{
        actor::Actor,
        actor_factory::{ActorFactory, ModifyReport},
        component::snapshot_of,
        descriptor::ComponentDescriptor,
        error::ActorError,
        settle::settle_all,
    },
    components::transform::Transform,
    game::{actor_registry::ActorRegistry, level::LevelDescriptor},
};

/// Triggers structural events locally and forwards them to the render
/// context.
#[derive(Clone)]
pub struct Broadcaster {
    events: Rc<EventService>,
    sender: MessageSender,
}

impl Broadcaster {
    pub fn new(events: Rc<EventService>, sender: MessageSender) -> Self {
        Self { events, sender }
    }

    pub fn broadcast(&self, event: &dyn Event) {
        self.events.trigger_event(event);

        let Ok(envelope) = self.events.serialize_event(event) else {
            return;
        };
        if let Err(err) = self.sender.send(&Message::TriggerEvent(envelope.into())) {
            warn!("Failed to forward event '{}': {}", event.name(), err);
        }
    }
}

/// The asynchronous actor operations of a game logic, cloneable into tasks
/// on the logic executor. Borrows of the registry never span an await.
#[derive(Clone)]
pub struct ActorTasks {
    factory: Rc<ActorFactory>,
    actors: Rc<RefCell<ActorRegistry>>,
    broadcaster: Broadcaster,
}

impl ActorTasks {
    pub fn new(
        factory: Rc<ActorFactory>,
        actors: Rc<RefCell<ActorRegistry>>,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            factory,
            actors,
            broadcaster,
        }
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    pub async fn create(
        &self,
        resource: String,
        overrides: Vec<ComponentDescriptor>,
        initial_transform: Option<Transform>,
        server_actor_id: Option<ActorId>,
    ) -> Result<ActorId, ActorError> {
        let overrides = (!overrides.is_empty()).then_some(overrides.as_slice());
        let actor = self
            .factory
            .create_actor(&resource, overrides, initial_transform, server_actor_id)
            .await
            .inspect_err(|err| error!("Failed to create actor from '{}': {}", resource, err))?;
        self.register(actor)
    }

    fn register(&self, actor: Actor) -> Result<ActorId, ActorError> {
        let actor_id = actor.id();
        let created = ActorCreated {
            actor_id,
            actor_type: actor.actor_type().to_string(),
            components: actor.snapshot(),
        };

        let inserted = self.actors.borrow_mut().insert(actor);
        if let Err(mut actor) = inserted {
            error!("Actor id {} is already in use, destroying the new actor", actor_id);
            actor.destroy();
            return Err(ActorError::DuplicateId { actor_id });
        }

        self.broadcaster.broadcast(&TypedEvent::new(created));
        Ok(actor_id)
    }

    pub async fn modify(
        &self,
        actor_id: ActorId,
        overrides: Vec<ComponentDescriptor>,
    ) -> Result<ModifyReport, ActorError> {
        let pending = {
            let mut actors = self.actors.borrow_mut();
            let actor = actors
                .get_mut(actor_id)
                .ok_or(ActorError::NotFound { actor_id })?;
            self.factory.prepare_overrides(actor, &overrides)
        };

        let settled = self.factory.settle(pending).await;

        let finished = {
            let mut actors = self.actors.borrow_mut();
            match actors.get_mut(actor_id) {
                Some(actor) => {
                    let report = self.factory.finish_overrides(actor, settled);
                    for id in &report.added {
                        if let Some(component) = actor.get_component_mut(*id) {
                            component.post_initialize();
                        }
                    }
                    let changed = snapshots(actor, &report.changed);
                    let added = snapshots(actor, &report.added);
                    Ok((report, changed, added))
                }
                None => Err(settled),
            }
        };

        let (report, changed, added) = match finished {
            Ok(finished) => finished,
            Err(settled) => {
                warn!("Actor {} was destroyed while being modified", actor_id);
                self.factory.discard_overrides(settled);
                return Err(ActorError::NotFound { actor_id });
            }
        };

        for component in changed {
            self.broadcaster
                .broadcast(&TypedEvent::new(ComponentChanged { actor_id, component }));
        }
        for component in added {
            self.broadcaster
                .broadcast(&TypedEvent::new(ComponentAdded { actor_id, component }));
        }
        Ok(report)
    }

    /// Creates every actor listed in a level resource. Actors that fail are
    /// logged and left out.
    pub async fn load_level(&self, resource: String) -> Result<Vec<ActorId>, ActorError> {
        let value = self
            .factory
            .resources()
            .get_resource(&resource)
            .await
            .map_err(|source| ActorError::Resource {
                resource: resource.clone(),
                source,
            })?;
        let level: LevelDescriptor =
            serde_json::from_value(value).map_err(|err| ActorError::MalformedDescriptor {
                resource: resource.clone(),
                reason: err.to_string(),
            })?;

        let outcomes = settle_all(level.actors.into_iter().map(|entry| {
            self.create(entry.resource, entry.overrides, entry.transform, None)
        }))
        .await;

        let actor_ids: Vec<ActorId> = outcomes.into_iter().filter_map(Result::ok).collect();
        info!("Loaded level '{}' with {} actors", resource, actor_ids.len());
        Ok(actor_ids)
    }
}

fn snapshots(actor: &Actor, ids: &[ComponentId]) -> Vec<ComponentSnapshot> {
    ids.iter()
        .filter_map(|id| actor.get_component(*id))
        .map(snapshot_of)
        .collect()
}
