use std::{rc::Rc, time::Duration};

use futures::{
    executor::{LocalPool, LocalSpawner},
    task::LocalSpawnExt,
};
use log::{debug, error, info, warn};
use serde_json::Value;

use tandem_shared::{
    Clock, Decoded, Endpoint, Event, EventEnvelope, EventService, ExtensionHandler,
    GameOptionsResponse, LoadGame, Message, MessageSender, NoExtensions, ResourceRequest,
    ResourceResponse, TransportError, TriggerEvent, ViewRendererRequest, ViewRendererResponse,
};

use crate::{
    error::RenderError,
    render_config::RenderConfig,
    resources::{loader::ResourceLoader, resource_cache::ResourceCache},
    scene::{scene_graph::SceneGraph, scene_manager::SceneManager},
    views::view_renderer_registry::ViewRendererRegistry,
};

/// The render side of a running game. Serves the logic worker's requests,
/// replays its events locally and draws every view once per update.
pub struct MainContext {
    config: RenderConfig,
    endpoint: Endpoint,
    events: Rc<EventService>,
    cache: Rc<ResourceCache>,
    scene: SceneManager,
    renderers: ViewRendererRegistry,
    pool: LocalPool,
    spawner: LocalSpawner,
    extensions: Box<dyn ExtensionHandler>,
    worker_ready: bool,
}

impl MainContext {
    pub fn new(
        config: RenderConfig,
        endpoint: Endpoint,
        loader: Rc<dyn ResourceLoader>,
        scene: Box<dyn SceneGraph>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let events = Rc::new(EventService::new(config.events.clone(), clock));
        let scene = SceneManager::new(scene, &events);
        let pool = LocalPool::new();
        let spawner = pool.spawner();

        Self {
            config,
            endpoint,
            events,
            cache: Rc::new(ResourceCache::new(loader)),
            scene,
            renderers: ViewRendererRegistry::new(),
            pool,
            spawner,
            extensions: Box::new(NoExtensions),
            worker_ready: false,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn event_service(&self) -> &Rc<EventService> {
        &self.events
    }

    pub fn scene(&self) -> &SceneManager {
        &self.scene
    }

    pub fn cache(&self) -> &Rc<ResourceCache> {
        &self.cache
    }

    pub fn renderers(&self) -> &ViewRendererRegistry {
        &self.renderers
    }

    pub fn renderers_mut(&mut self) -> &mut ViewRendererRegistry {
        &mut self.renderers
    }

    /// Whether the worker has reported a successful boot on this channel
    pub fn worker_ready(&self) -> bool {
        self.worker_ready
    }

    pub fn set_extension_handler(&mut self, extensions: Box<dyn ExtensionHandler>) {
        self.extensions = extensions;
    }

    // Outbound

    /// Forwards an event to the logic worker, where it is queued
    pub fn send_event(&self, event: &dyn Event) -> Result<(), RenderError> {
        let envelope = self.events.serialize_event(event)?;
        self.endpoint
            .send(&Message::TriggerEvent(TriggerEvent::from(envelope)))?;
        Ok(())
    }

    /// Asks the logic worker to build every actor of a level resource
    pub fn load_game(&self, resource: &str) -> Result<(), RenderError> {
        info!("Requesting game '{}'", resource);
        self.endpoint.send(&Message::LoadGame(LoadGame {
            resource: resource.to_string(),
        }))?;
        Ok(())
    }

    fn reply(&self, message: &Message) {
        if let Err(err) = self.endpoint.send(message) {
            warn!("Failed to reply with {}: {}", message.kind().name(), err);
        }
    }

    // Update

    /// Handles every message waiting from the worker, lets pending resource
    /// loads finish, flushes queued events and renders the views.
    ///
    /// Fails once the worker has gone away.
    pub fn update(&mut self, time: Duration) -> Result<(), RenderError> {
        let mut disconnected = false;
        loop {
            match self.endpoint.try_recv() {
                Ok(Some(envelope)) => {
                    self.handle_envelope(envelope);
                }
                Ok(None) => break,
                Err(err) => {
                    error!("{}", err);
                    disconnected = true;
                    break;
                }
            }
        }

        self.pool.run_until_stalled();
        self.events.update(time, self.config.max_event_update_time);
        let renderers = &mut self.renderers;
        self.scene.with_scene(|scene| renderers.render_all(scene));

        if disconnected {
            return Err(RenderError::Transport(TransportError::Disconnected));
        }
        Ok(())
    }

    pub fn handle_envelope(&mut self, envelope: Value) -> bool {
        match Message::decode(envelope) {
            Ok(decoded) => self.handle_message(decoded),
            Err(err) => {
                warn!("Dropping malformed message: {}", err);
                false
            }
        }
    }

    /// Returns whether the message was processed
    pub fn handle_message(&mut self, decoded: Decoded) -> bool {
        let message = match decoded {
            Decoded::Known(message) => message,
            Decoded::Unknown { type_id, envelope } => {
                return self.extensions.handle_envelope(type_id, &envelope);
            }
        };

        match message {
            Message::ResourceRequest(request) => {
                self.serve_resource(request);
                true
            }
            Message::TriggerEvent(trigger) => {
                let envelope = EventEnvelope::from(trigger);
                match self.events.deserialize_event(&envelope) {
                    Ok(event) => {
                        self.events.trigger_event(event.as_ref());
                    }
                    Err(err) => warn!("Dropping forwarded event: {}", err),
                }
                true
            }
            Message::CreateViewRendererRequest(request) => {
                self.create_view_renderer(request);
                true
            }
            Message::DestroyViewRendererRequest(request) => {
                let success = match self.renderers.destroy(request.view_id) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!("{}", err);
                        false
                    }
                };
                self.reply(&Message::DestroyViewRendererResponse(ViewRendererResponse {
                    view_id: request.view_id,
                    success,
                }));
                true
            }
            Message::GameOptionsRequest(_) => {
                self.reply(&Message::GameOptionsResponse(GameOptionsResponse {
                    options: self.config.game_options.clone(),
                }));
                true
            }
            Message::WorkerStatus(status) => {
                if status.success {
                    info!("Logic worker ready");
                } else {
                    error!(
                        "Logic worker failed: {}",
                        status.reason.as_deref().unwrap_or("no reason given")
                    );
                }
                self.worker_ready = status.success;
                true
            }
            other => {
                warn!(
                    "Render context does not handle {} messages",
                    other.kind().name()
                );
                false
            }
        }
    }

    fn serve_resource(&self, request: ResourceRequest) {
        debug!("Worker requested resource '{}'", request.name);
        let load = self.cache.get(&request.name);
        let sender: MessageSender = self.endpoint.sender();
        let spawned = self.spawner.spawn_local(async move {
            let response = match load.await {
                Ok(data) => ResourceResponse::ok(&request.name, data),
                Err(err) => ResourceResponse::failed(&request.name, err.to_string()),
            };
            if let Err(err) = sender.send(&Message::ResourceResponse(response)) {
                warn!("Failed to answer resource request '{}': {}", request.name, err);
            }
        });
        if let Err(err) = spawned {
            error!("Failed to spawn resource load: {}", err);
        }
    }

    fn create_view_renderer(&mut self, request: ViewRendererRequest) {
        let success = match self.renderers.create(request.view_id, &request.view_type) {
            Ok(()) => true,
            Err(err) => {
                warn!("{}", err);
                false
            }
        };
        self.reply(&Message::CreateViewRendererResponse(ViewRendererResponse {
            view_id: request.view_id,
            success,
        }));
    }

    /// Destroys every view renderer. The worker notices the dropped endpoint.
    pub fn shutdown(mut self) {
        self.renderers.destroy_all();
        info!("Render context shut down");
    }
}
