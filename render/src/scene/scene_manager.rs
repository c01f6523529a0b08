use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use log::{debug, warn};
use serde_json::Value;

use tandem_shared::{
    hash_name, ActorCreated, ActorDestroyed, ActorId, ComponentAdded, ComponentChanged,
    ComponentId, ComponentSnapshot, Event, EventError, EventListener, EventPayload, EventService,
    EventType, Timestamp, TypedEvent,
};

use crate::scene::scene_graph::{NodeId, NodeKind, SceneGraph};

/// A scene node was created for an actor or one of its components. Carries
/// render-side ids and never leaves the render context.
#[derive(Clone, Debug)]
pub struct SceneNodeCreatedEvent {
    pub actor_id: ActorId,
    /// `None` for the actor's root node
    pub component_id: Option<ComponentId>,
    pub node_id: NodeId,
    timestamp: f64,
}

impl SceneNodeCreatedEvent {
    pub const NAME: &'static str = "SceneNodeCreatedEvent";

    pub fn new(actor_id: ActorId, component_id: Option<ComponentId>, node_id: NodeId) -> Self {
        Self {
            actor_id,
            component_id,
            node_id,
            timestamp: Timestamp::now_millis(),
        }
    }

    pub fn event_type() -> EventType {
        hash_name(Self::NAME)
    }
}

impl Event for SceneNodeCreatedEvent {
    fn event_type(&self) -> EventType {
        Self::event_type()
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn copy(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }

    fn serialize(&self) -> Result<Value, EventError> {
        Err(EventError::LocalOnly {
            name: Self::NAME.to_string(),
        })
    }

    fn deserialize(&mut self, _data: &Value) -> Result<(), EventError> {
        Err(EventError::LocalOnly {
            name: Self::NAME.to_string(),
        })
    }

    fn is_local_only(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct ActorNodes {
    root: NodeId,
    components: HashMap<ComponentId, NodeId>,
}

/// Actor id to scene node bookkeeping over a [`SceneGraph`]
struct SceneMirror {
    scene: Box<dyn SceneGraph>,
    actors: HashMap<ActorId, ActorNodes>,
}

impl SceneMirror {
    fn actor_created(&mut self, created: &ActorCreated) -> Vec<SceneNodeCreatedEvent> {
        let actor_id = created.actor_id;
        if self.actors.contains_key(&actor_id) {
            warn!("Actor {} mirrored twice, replacing its scene nodes", actor_id);
            self.actor_destroyed(&ActorDestroyed { actor_id });
        }

        let kind = NodeKind::Actor {
            actor_id,
            actor_type: created.actor_type.clone(),
        };
        let Some(root) = self
            .scene
            .add_node(&created.actor_type, None, kind, Value::Null)
        else {
            warn!("Scene refused the root node for actor {}", actor_id);
            return Vec::new();
        };
        self.actors.insert(
            actor_id,
            ActorNodes {
                root,
                components: HashMap::new(),
            },
        );

        let mut nodes = vec![SceneNodeCreatedEvent::new(actor_id, None, root)];
        for snapshot in &created.components {
            nodes.extend(self.attach(actor_id, snapshot));
        }
        debug!(
            "Mirrored actor {} ('{}') with {} nodes",
            actor_id,
            created.actor_type,
            nodes.len()
        );
        nodes
    }

    fn attach(
        &mut self,
        actor_id: ActorId,
        snapshot: &ComponentSnapshot,
    ) -> Option<SceneNodeCreatedEvent> {
        let Some(nodes) = self.actors.get_mut(&actor_id) else {
            warn!(
                "Component '{}' arrived for unknown actor {}",
                snapshot.name, actor_id
            );
            return None;
        };

        if let Some(node) = nodes.components.get(&snapshot.component_id) {
            self.scene.update_node(*node, snapshot.data.clone());
            return None;
        }

        let kind = NodeKind::Component {
            component_id: snapshot.component_id,
        };
        let node = self
            .scene
            .add_node(&snapshot.name, Some(nodes.root), kind, snapshot.data.clone())?;
        nodes.components.insert(snapshot.component_id, node);
        Some(SceneNodeCreatedEvent::new(
            actor_id,
            Some(snapshot.component_id),
            node,
        ))
    }

    fn component_added(&mut self, added: &ComponentAdded) -> Vec<SceneNodeCreatedEvent> {
        self.attach(added.actor_id, &added.component)
            .into_iter()
            .collect()
    }

    fn component_changed(&mut self, changed: &ComponentChanged) -> Vec<SceneNodeCreatedEvent> {
        // a change for a component never seen is mirrored as an addition
        self.attach(changed.actor_id, &changed.component)
            .into_iter()
            .collect()
    }

    fn actor_destroyed(&mut self, destroyed: &ActorDestroyed) -> Vec<SceneNodeCreatedEvent> {
        match self.actors.remove(&destroyed.actor_id) {
            Some(nodes) => {
                self.scene.remove_node(nodes.root);
            }
            None => warn!(
                "Cannot remove scene nodes of unknown actor {}",
                destroyed.actor_id
            ),
        }
        Vec::new()
    }
}

/// Keeps a [`SceneGraph`] in step with the logic worker's actors by listening
/// for the structural events it forwards.
pub struct SceneManager {
    mirror: Rc<RefCell<SceneMirror>>,
    events: Weak<EventService>,
    listeners: Vec<(EventType, EventListener)>,
}

impl SceneManager {
    pub fn new(scene: Box<dyn SceneGraph>, events: &Rc<EventService>) -> Self {
        let mirror = Rc::new(RefCell::new(SceneMirror {
            scene,
            actors: HashMap::new(),
        }));
        let weak_events = Rc::downgrade(events);

        let listeners = vec![
            (
                ActorCreated::event_type(),
                listener::<ActorCreated, _>(&mirror, &weak_events, SceneMirror::actor_created),
            ),
            (
                ComponentAdded::event_type(),
                listener::<ComponentAdded, _>(&mirror, &weak_events, SceneMirror::component_added),
            ),
            (
                ComponentChanged::event_type(),
                listener::<ComponentChanged, _>(
                    &mirror,
                    &weak_events,
                    SceneMirror::component_changed,
                ),
            ),
            (
                ActorDestroyed::event_type(),
                listener::<ActorDestroyed, _>(&mirror, &weak_events, SceneMirror::actor_destroyed),
            ),
        ];
        for (event_type, listener) in &listeners {
            events.add_event_listener(*event_type, listener.clone());
        }

        Self {
            mirror,
            events: weak_events,
            listeners,
        }
    }

    pub fn actor_count(&self) -> usize {
        self.mirror.borrow().actors.len()
    }

    pub fn actor_node(&self, actor_id: ActorId) -> Option<NodeId> {
        self.mirror
            .borrow()
            .actors
            .get(&actor_id)
            .map(|nodes| nodes.root)
    }

    pub fn component_node(&self, actor_id: ActorId, component_id: ComponentId) -> Option<NodeId> {
        self.mirror
            .borrow()
            .actors
            .get(&actor_id)
            .and_then(|nodes| nodes.components.get(&component_id).copied())
    }

    /// Read access to the scene. Must not be called from inside an event
    /// listener that is mutating it.
    pub fn with_scene<R>(&self, read: impl FnOnce(&dyn SceneGraph) -> R) -> R {
        read(self.mirror.borrow().scene.as_ref())
    }

    pub fn with_scene_mut<R>(&self, write: impl FnOnce(&mut dyn SceneGraph) -> R) -> R {
        write(self.mirror.borrow_mut().scene.as_mut())
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        let Some(events) = self.events.upgrade() else {
            return;
        };
        for (event_type, listener) in &self.listeners {
            events.remove_event_listener(*event_type, listener);
        }
    }
}

fn listener<P, F>(
    mirror: &Rc<RefCell<SceneMirror>>,
    events: &Weak<EventService>,
    apply: F,
) -> EventListener
where
    P: EventPayload,
    F: Fn(&mut SceneMirror, &P) -> Vec<SceneNodeCreatedEvent> + 'static,
{
    let mirror = mirror.clone();
    let events = events.clone();
    Rc::new(move |event: &dyn Event| {
        let Some(event) = event.downcast_ref::<TypedEvent<P>>() else {
            return;
        };
        let created = match mirror.try_borrow_mut() {
            Ok(mut mirror) => apply(&mut mirror, &event.data),
            Err(_) => {
                warn!("Scene is busy, dropping '{}' update", P::NAME);
                return;
            }
        };
        let Some(events) = events.upgrade() else {
            return;
        };
        for node in created {
            events.trigger_event(&node);
        }
    })
}
