use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

use futures::{
    channel::oneshot,
    executor::{LocalPool, LocalSpawner},
    task::LocalSpawnExt,
};
use log::{debug, error, info, warn};
use serde_json::Value;

use tandem_shared::{
    ActorDestroyed, ActorId, Clock, Decoded, EventEnvelope, EventService, ExtensionHandler,
    GameOptionsRequest, Message, MessageSender, NoExtensions, Process, ProcessHandle,
    ProcessManager, TypedEvent, ViewId, ViewRendererRequest,
};

use crate::{
    actor::{
        actor_factory::{ActorFactory, ModifyReport},
        component_factory::ActorComponentFactory,
        descriptor::ComponentDescriptor,
        error::ActorError,
    },
    components::transform::Transform,
    game::{
        actor_registry::ActorRegistry,
        actor_tasks::{ActorTasks, Broadcaster},
        game_view::GameView,
        task_handle::TaskHandle,
    },
    logic_config::LogicConfig,
    resources::{provider::ResourceProvider, resource_manager::ResourceManager},
    script::registry::ScriptRegistry,
};

/// Owns the live actors of one logic instance and advances them once per
/// tick. Talks to the render context only through its outbound
/// [`MessageSender`] and [`handle_message`](Self::handle_message).
pub struct BaseGameLogic {
    config: LogicConfig,
    events: Rc<EventService>,
    actors: Rc<RefCell<ActorRegistry>>,
    views: Vec<(ViewId, Box<dyn GameView>)>,
    last_view_id: ViewId,
    factory: Rc<ActorFactory>,
    resources: Rc<ResourceManager>,
    tasks: ActorTasks,
    processes: ProcessManager,
    pool: LocalPool,
    spawner: LocalSpawner,
    sender: MessageSender,
    extensions: Box<dyn ExtensionHandler>,
    game_options: Option<Value>,
}

impl BaseGameLogic {
    pub fn new(config: LogicConfig, sender: MessageSender, clock: Rc<dyn Clock>) -> Self {
        let events = Rc::new(EventService::new(config.events.clone(), clock));
        let resources = Rc::new(ResourceManager::new(sender.clone()));
        let provider: Rc<dyn ResourceProvider> = resources.clone();
        let factory = Rc::new(ActorFactory::new(
            ActorComponentFactory::with_default_components(),
            provider,
            Rc::new(ScriptRegistry::new()),
        ));
        let actors = Rc::new(RefCell::new(ActorRegistry::new()));
        let tasks = ActorTasks::new(
            factory.clone(),
            actors.clone(),
            Broadcaster::new(events.clone(), sender.clone()),
        );
        let pool = LocalPool::new();
        let spawner = pool.spawner();

        Self {
            config,
            events,
            actors,
            views: Vec::new(),
            last_view_id: 0,
            factory,
            resources,
            tasks,
            processes: ProcessManager::new(),
            pool,
            spawner,
            sender,
            extensions: Box::new(NoExtensions),
            game_options: None,
        }
    }

    pub fn config(&self) -> &LogicConfig {
        &self.config
    }

    pub fn event_service(&self) -> &Rc<EventService> {
        &self.events
    }

    pub fn factory(&self) -> &Rc<ActorFactory> {
        &self.factory
    }

    pub fn scripts(&self) -> &Rc<ScriptRegistry> {
        self.factory.scripts()
    }

    pub fn resources(&self) -> &Rc<ResourceManager> {
        &self.resources
    }

    /// Shared handle on the live actors. Do not hold a borrow across a tick.
    pub fn actors(&self) -> &Rc<RefCell<ActorRegistry>> {
        &self.actors
    }

    pub fn actor_count(&self) -> usize {
        self.actors.borrow().len()
    }

    /// Options received from the render context, once requested
    pub fn game_options(&self) -> Option<&Value> {
        self.game_options.as_ref()
    }

    /// Handles message kinds layered on top of the base protocol
    pub fn set_extension_handler(&mut self, extensions: Box<dyn ExtensionHandler>) {
        self.extensions = extensions;
    }

    // Actors

    /// Builds an actor and registers it once construction settles
    pub fn create_actor(
        &self,
        resource: &str,
        overrides: Vec<ComponentDescriptor>,
        initial_transform: Option<Transform>,
        server_actor_id: Option<ActorId>,
    ) -> TaskHandle<ActorId> {
        let tasks = self.tasks.clone();
        let resource = resource.to_string();
        self.spawn_task(async move {
            tasks
                .create(resource, overrides, initial_transform, server_actor_id)
                .await
        })
    }

    pub fn modify_actor(
        &self,
        actor_id: ActorId,
        overrides: Vec<ComponentDescriptor>,
    ) -> TaskHandle<ModifyReport> {
        let tasks = self.tasks.clone();
        self.spawn_task(async move { tasks.modify(actor_id, overrides).await })
    }

    /// Announces the destruction to listeners and the render context, then
    /// tears the actor down
    pub fn destroy_actor(&mut self, actor_id: ActorId) -> bool {
        if !self.actors.borrow().contains(actor_id) {
            warn!("Cannot destroy actor {}: no such actor", actor_id);
            return false;
        }

        self.tasks
            .broadcaster()
            .broadcast(&TypedEvent::new(ActorDestroyed { actor_id }));

        let removed = self.actors.borrow_mut().remove(actor_id);
        if let Some(mut actor) = removed {
            actor.destroy();
        }
        true
    }

    /// Creates every actor listed in a level resource
    pub fn load_game(&self, resource: &str) -> TaskHandle<Vec<ActorId>> {
        info!("Loading game '{}'", resource);
        let tasks = self.tasks.clone();
        let resource = resource.to_string();
        self.spawn_task(async move { tasks.load_level(resource).await })
    }

    fn spawn_task<T, F>(&self, task: F) -> TaskHandle<T>
    where
        T: 'static,
        F: Future<Output = Result<T, ActorError>> + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let spawned = self.spawner.spawn_local(async move {
            // nobody waiting is fine
            let _ = sender.send(task.await);
        });
        if let Err(err) = spawned {
            error!("Failed to spawn logic task: {}", err);
        }
        TaskHandle::new(receiver)
    }

    // Views

    pub fn attach_view(&mut self, mut view: Box<dyn GameView>) -> ViewId {
        self.last_view_id = self.last_view_id.wrapping_add(1);
        let view_id = self.last_view_id;
        view.on_attach(view_id);
        let request = ViewRendererRequest {
            view_id,
            view_type: view.view_type().to_string(),
        };
        self.views.push((view_id, view));
        self.send(&Message::CreateViewRendererRequest(request));
        view_id
    }

    pub fn remove_view(&mut self, view_id: ViewId) -> bool {
        let Some(index) = self.views.iter().position(|(id, _)| *id == view_id) else {
            warn!("Cannot remove view {}: no such view", view_id);
            return false;
        };
        let (_, mut view) = self.views.remove(index);
        view.on_detach();
        self.send(&Message::DestroyViewRendererRequest(ViewRendererRequest {
            view_id,
            view_type: view.view_type().to_string(),
        }));
        true
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    // Processes

    pub fn attach_process(&mut self, process: Box<dyn Process>) -> ProcessHandle {
        self.processes.attach(process)
    }

    pub fn processes_mut(&mut self) -> &mut ProcessManager {
        &mut self.processes
    }

    // Messages

    pub fn request_game_options(&self) {
        self.send(&Message::GameOptionsRequest(GameOptionsRequest {}));
    }

    fn send(&self, message: &Message) {
        if let Err(err) = self.sender.send(message) {
            warn!("Failed to send {} message: {}", message.kind().name(), err);
        }
    }

    /// Decodes and handles one envelope from the render context
    pub fn handle_envelope(&mut self, envelope: Value) -> bool {
        match Message::decode(envelope) {
            Ok(decoded) => self.handle_message(decoded),
            Err(err) => {
                warn!("Dropping malformed message: {}", err);
                false
            }
        }
    }

    /// Returns whether the message was processed. Kinds the base protocol
    /// does not know go to the extension handler.
    pub fn handle_message(&mut self, decoded: Decoded) -> bool {
        let message = match decoded {
            Decoded::Known(message) => message,
            Decoded::Unknown { type_id, envelope } => {
                return self.extensions.handle_envelope(type_id, &envelope);
            }
        };

        match message {
            Message::ResourceResponse(response) => {
                self.resources.handle_response(response);
                true
            }
            Message::TriggerEvent(trigger) => {
                let envelope = EventEnvelope::from(trigger);
                match self.events.deserialize_event(&envelope) {
                    Ok(event) => {
                        self.events.queue_event(event);
                    }
                    Err(err) => warn!("Dropping injected event: {}", err),
                }
                true
            }
            Message::CreateViewRendererResponse(response) => {
                if !response.success {
                    warn!(
                        "Render context failed to create a renderer for view {}",
                        response.view_id
                    );
                }
                match self.views.iter_mut().find(|(id, _)| *id == response.view_id) {
                    Some((_, view)) => view.on_renderer_ready(response.success),
                    None => debug!("Renderer response for detached view {}", response.view_id),
                }
                true
            }
            Message::DestroyViewRendererResponse(response) => {
                debug!(
                    "Renderer for view {} destroyed (success: {})",
                    response.view_id, response.success
                );
                true
            }
            Message::GameOptionsResponse(response) => {
                self.game_options = Some(response.options);
                true
            }
            Message::LoadGame(load) => {
                // the outcome is logged by the task itself
                let _ = self.load_game(&load.resource);
                true
            }
            other => {
                warn!(
                    "Logic context does not handle {} messages",
                    other.kind().name()
                );
                false
            }
        }
    }

    // Ticks

    /// Views first, then actors in creation order
    pub fn on_update(&mut self, time: Duration, delta: Duration) {
        for (_, view) in self.views.iter_mut() {
            view.on_update(time, delta);
        }
        self.actors.borrow_mut().update(delta);
    }

    /// One full tick: queued events, processes, views and actors, then any
    /// task continuations that became ready
    pub fn update(&mut self, time: Duration, delta: Duration) {
        self.events.update(time, self.config.max_event_update_time);
        self.processes.update(delta);
        self.on_update(time, delta);
        self.pump();
    }

    /// Runs pending tasks until none can make progress
    pub fn pump(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Aborts processes and destroys every actor without announcing it
    pub fn shutdown(&mut self) {
        self.processes.abort_all(true);
        let actors = self.actors.borrow_mut().drain();
        for mut actor in actors {
            actor.destroy();
        }
        for (_, view) in self.views.iter_mut() {
            view.on_detach();
        }
        self.views.clear();
        info!("Game logic shut down");
    }
}
