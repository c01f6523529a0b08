/// Tests for the render context answering a logic worker over its endpoint
/// Covers resource requests, view renderer requests, game options, forwarded
/// events and disconnection
use std::{rc::Rc, time::Duration};

use serde_json::{json, Value};

use tandem_render::{
    MainContext, MemoryLoader, RenderConfig, RenderError, Scene, SceneGraph, ViewRenderer,
};
use tandem_shared::{
    ActorCreated, Decoded, Endpoint, EventPayload, GameOptionsRequest, ManualClock,
    Message, ResourceRequest, TransportError, TriggerEvent, TypedEvent, ViewId,
    ViewRendererRequest,
};

struct Blank {
    view_id: ViewId,
}

impl ViewRenderer for Blank {
    fn view_id(&self) -> ViewId {
        self.view_id
    }

    fn render(&mut self, _scene: &dyn SceneGraph) {}
}

fn context(loader: MemoryLoader) -> (MainContext, Endpoint, Rc<MemoryLoader>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let (main_side, logic_side) = Endpoint::pair();
    let loader = Rc::new(loader);
    let config = RenderConfig {
        game_options: json!({ "difficulty": "hard" }),
        ..RenderConfig::default()
    };
    let context = MainContext::new(
        config,
        main_side,
        loader.clone(),
        Box::new(Scene::new()),
        Rc::new(ManualClock::new()),
    );
    (context, logic_side, loader)
}

fn received(logic: &Endpoint) -> Vec<Message> {
    let mut messages = Vec::new();
    while let Some(envelope) = logic.try_recv().unwrap() {
        if let Decoded::Known(message) = Message::decode(envelope).unwrap() {
            messages.push(message);
        }
    }
    messages
}

fn request(logic: &Endpoint, name: &str) {
    logic
        .send(&Message::ResourceRequest(ResourceRequest {
            name: name.to_string(),
        }))
        .unwrap();
}

#[test]
fn resource_requests_are_answered_once_loaded() {
    let (mut context, logic, loader) =
        context(MemoryLoader::new().with("ball", json!({ "type": "ball" })));

    request(&logic, "ball");
    request(&logic, "ball");
    request(&logic, "ghost");
    context.update(Duration::ZERO).unwrap();

    let mut responses: Vec<_> = received(&logic)
        .into_iter()
        .filter_map(|message| match message {
            Message::ResourceResponse(response) => Some(response),
            _ => None,
        })
        .collect();
    responses.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].data, Some(json!({ "type": "ball" })));
    assert_eq!(responses[1].data, Some(json!({ "type": "ball" })));
    assert_eq!(responses[2].name, "ghost");
    assert!(responses[2].error.is_some());
    // the ball was loaded once and shared
    assert_eq!(loader.loads(), 2);
}

#[test]
fn view_renderers_follow_worker_requests() {
    let (mut context, logic, _) = context(MemoryLoader::new());
    context
        .renderers_mut()
        .register("player", |view_id| Box::new(Blank { view_id }));

    for (view_id, view_type) in [(1, "player"), (2, "minimap")] {
        logic
            .send(&Message::CreateViewRendererRequest(ViewRendererRequest {
                view_id,
                view_type: view_type.to_string(),
            }))
            .unwrap();
    }
    logic
        .send(&Message::DestroyViewRendererRequest(ViewRendererRequest {
            view_id: 1,
            view_type: "player".to_string(),
        }))
        .unwrap();
    context.update(Duration::ZERO).unwrap();

    let outcomes: Vec<(&str, ViewId, bool)> = received(&logic)
        .iter()
        .filter_map(|message| match message {
            Message::CreateViewRendererResponse(response) => {
                Some(("create", response.view_id, response.success))
            }
            Message::DestroyViewRendererResponse(response) => {
                Some(("destroy", response.view_id, response.success))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![("create", 1, true), ("create", 2, false), ("destroy", 1, true)]
    );
    assert!(context.renderers().is_empty());
}

#[test]
fn game_options_come_from_config() {
    let (mut context, logic, _) = context(MemoryLoader::new());
    logic
        .send(&Message::GameOptionsRequest(GameOptionsRequest {}))
        .unwrap();
    context.update(Duration::ZERO).unwrap();

    match received(&logic).as_slice() {
        [Message::GameOptionsResponse(response)] => {
            assert_eq!(response.options, json!({ "difficulty": "hard" }))
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn forwarded_events_build_the_scene() {
    let (mut context, logic, _) = context(MemoryLoader::new());
    let created = TypedEvent::new(ActorCreated {
        actor_id: 3,
        actor_type: "ball".to_string(),
        components: Vec::new(),
    });
    let envelope = context.event_service().serialize_event(&created).unwrap();
    logic
        .send(&Message::TriggerEvent(TriggerEvent::from(envelope)))
        .unwrap();

    context.update(Duration::ZERO).unwrap();
    assert!(context.scene().actor_node(3).is_some());
}

#[test]
fn events_and_level_loads_go_to_the_worker() {
    let (context, logic, _) = context(MemoryLoader::new());
    context.load_game("level1").unwrap();
    context
        .send_event(&TypedEvent::new(ActorCreated::default()))
        .unwrap();

    let messages = received(&logic);
    assert!(matches!(&messages[0], Message::LoadGame(load) if load.resource == "level1"));
    assert!(matches!(
        &messages[1],
        Message::TriggerEvent(trigger) if trigger.event_type == ActorCreated::event_type()
    ));
}

#[test]
fn unknown_messages_are_not_processed() {
    let (mut context, _logic, _) = context(MemoryLoader::new());
    assert!(!context.handle_envelope(json!({ "type": 4242 })));
    assert!(!context.handle_envelope(Value::Null));
}

#[test]
fn dropped_worker_is_reported() {
    let (mut context, logic, _) = context(MemoryLoader::new());
    drop(logic);
    assert_eq!(
        context.update(Duration::ZERO),
        Err(RenderError::Transport(TransportError::Disconnected))
    );
}
