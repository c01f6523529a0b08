/// Tests for building and modifying actors through the ActorFactory
/// Covers unknown components, exclusive slots, overrides, aborted construction
/// and initial transforms
use std::{any::Any, rc::Rc};

use async_trait::async_trait;
use futures::executor::block_on;
use serde_json::{json, Value};

use tandem_logic::{
    shared::hash_name, ActorComponent, ActorComponentFactory, ActorError, ActorFactory,
    CameraComponent, ComponentBase, ComponentContext, ComponentDescriptor, ComponentError,
    MemoryResources, ResourceProvider, ScriptRegistry, Transform, TransformComponent,
};

fn factory(resources: MemoryResources) -> ActorFactory {
    let resources: Rc<dyn ResourceProvider> = Rc::new(resources);
    ActorFactory::new(
        ActorComponentFactory::with_default_components(),
        resources,
        Rc::new(ScriptRegistry::new()),
    )
}

struct Exploding {
    base: ComponentBase,
}

#[async_trait(?Send)]
impl ActorComponent for Exploding {
    fn name(&self) -> &'static str {
        "ExplodingComponent"
    }

    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    async fn initialize(

        &mut self,

        _data: &Value,

        _context: &ComponentContext,

    ) -> Result<(), ComponentError> {
        panic!("exploding component");
    }

    fn snapshot(&self) -> Value {
        Value::Null
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn ball_has_one_transform_at_origin() {
    let factory = factory(MemoryResources::new().with(
        "ball",
        json!({
            "type": "ball",
            "components": [{
                "type": "TransformComponent",
                "position": [0, 0, 0],
                "rotation": [0, 0, 0],
                "scale": [1, 1, 1]
            }]
        }),
    ));

    let actor = block_on(factory.create_actor("ball", None, None, None)).unwrap();

    assert_eq!(actor.actor_type(), "ball");
    assert_eq!(actor.component_count(), 1);
    let transform = actor
        .component::<TransformComponent>("TransformComponent")
        .unwrap();
    assert_eq!(transform.position(), [0.0, 0.0, 0.0]);
}

#[test]
fn unknown_component_still_builds_actor() {
    let factory = factory(MemoryResources::new().with(
        "crate",
        json!({
            "type": "crate",
            "components": [
                { "type": "TransformComponent" },
                { "type": "FluxCapacitorComponent", "gigawatts": 1.21 },
                { "type": "PlaneRenderComponent", "width": 2.0 }
            ]
        }),
    ));

    let actor = block_on(factory.create_actor("crate", None, None, None)).unwrap();

    assert_eq!(actor.component_count(), 2);
    assert!(actor.has_component(hash_name("TransformComponent")));
    assert!(actor.has_component(hash_name("PlaneRenderComponent")));
    assert!(!actor.has_component(hash_name("FluxCapacitorComponent")));
}

#[test]
fn second_camera_is_rejected() {
    let factory = factory(MemoryResources::new().with(
        "player",
        json!({
            "type": "player",
            "components": [
                { "type": "PerspectiveCameraComponent", "fov": 60.0 },
                { "type": "OrthographicCameraComponent" }
            ]
        }),
    ));

    let mut actor = block_on(factory.create_actor("player", None, None, None)).unwrap();
    assert_eq!(actor.component_count(), 1);
    assert!(actor.has_component(hash_name("PerspectiveCameraComponent")));

    // adding one later is rejected as well, and the existing camera survives
    let report = block_on(factory.modify_actor(
        &mut actor,
        &[ComponentDescriptor::new("OrthographicCameraComponent", json!({}))],
    ));
    assert!(report.added.is_empty());
    assert!(matches!(
        report.failed.as_slice(),
        [ComponentError::SlotTaken { .. }]
    ));
    assert_eq!(actor.component_count(), 1);
    let camera = actor
        .component::<CameraComponent>("PerspectiveCameraComponent")
        .unwrap();
    assert_eq!(camera.snapshot()["fov"], json!(60.0));
}

#[test]
fn descriptor_without_type_is_rejected() {
    let factory = factory(MemoryResources::new().with("blob", json!({ "components": [] })));

    let result = block_on(factory.create_actor("blob", None, None, None));
    assert_eq!(
        result.err(),
        Some(ActorError::MissingType {
            resource: "blob".to_string()
        })
    );
}

#[test]
fn missing_resource_is_reported() {
    let factory = factory(MemoryResources::new());

    let result = block_on(factory.create_actor("nowhere", None, None, None));
    assert!(matches!(result, Err(ActorError::Resource { .. })));
}

#[test]
fn overrides_patch_and_extend_components() {
    let factory = factory(MemoryResources::new().with(
        "lamp",
        json!({
            "type": "lamp",
            "components": [{ "type": "TransformComponent", "position": [1, 2, 3] }]
        }),
    ));
    let overrides = [
        ComponentDescriptor::new("TransformComponent", json!({ "scale": [2, 2, 2] })),
        ComponentDescriptor::new("PointLightComponent", json!({ "intensity": 3.0 })),
    ];

    let actor = block_on(factory.create_actor("lamp", Some(&overrides), None, None)).unwrap();

    let transform = actor
        .component::<TransformComponent>("TransformComponent")
        .unwrap()
        .transform();
    assert_eq!(transform.position, [1.0, 2.0, 3.0]);
    assert_eq!(transform.scale, [2.0, 2.0, 2.0]);
    let light = actor.get_component_by_name("PointLightComponent").unwrap();
    assert_eq!(light.snapshot()["intensity"], json!(3.0));
    // declared components come before overrides
    let order: Vec<&str> = actor.components().map(|component| component.name()).collect();
    assert_eq!(order, vec!["TransformComponent", "PointLightComponent"]);
}

#[test]
fn failed_override_keeps_existing_component() {
    let factory = factory(MemoryResources::new().with(
        "lamp",
        json!({
            "type": "lamp",
            "components": [{ "type": "AmbientLightComponent", "intensity": 0.5 }]
        }),
    ));
    let mut actor = block_on(factory.create_actor("lamp", None, None, None)).unwrap();

    let report = block_on(factory.modify_actor(
        &mut actor,
        &[ComponentDescriptor::new(
            "AmbientLightComponent",
            json!({ "intensity": -1.0 }),
        )],
    ));

    assert!(report.changed.is_empty());
    assert_eq!(report.failed.len(), 1);
    let light = actor.get_component_by_name("AmbientLightComponent").unwrap();
    assert_eq!(light.owner(), Some(actor.id()));
}

#[test]
fn panicking_component_aborts_construction() {
    let factory = factory(MemoryResources::new().with(
        "bomb",
        json!({
            "type": "bomb",
            "components": [
                { "type": "TransformComponent" },
                { "type": "ExplodingComponent" }
            ]
        }),
    ));
    factory.register_component("ExplodingComponent", || {
        Box::new(Exploding {
            base: ComponentBase::new("ExplodingComponent"),
        })
    });

    let result = block_on(factory.create_actor("bomb", None, None, Some(77)));
    assert_eq!(
        result.err(),
        Some(ActorError::ConstructionAborted { actor_id: 77 })
    );
}

#[test]
fn server_id_and_initial_transform_are_applied() {
    let factory = factory(MemoryResources::new().with(
        "ball",
        json!({ "type": "ball", "components": [{ "type": "TransformComponent" }] }),
    ));
    let transform = Transform {
        position: [4.0, 5.0, 6.0],
        ..Transform::default()
    };

    let actor = block_on(factory.create_actor("ball", None, Some(transform), Some(500))).unwrap();

    assert_eq!(actor.id(), 500);
    let component = actor
        .component::<TransformComponent>("TransformComponent")
        .unwrap();
    assert_eq!(component.transform(), &transform);
}

#[test]
fn generated_ids_are_distinct() {
    let factory = factory(
        MemoryResources::new().with("ball", json!({ "type": "ball", "components": [] })),
    );

    let first = block_on(factory.create_actor("ball", None, None, None)).unwrap();
    let second = block_on(factory.create_actor("ball", None, None, None)).unwrap();
    assert_ne!(first.id(), second.id());
}
