/// End-to-end tests for the lifecycle of one actor across both contexts
/// Covers component hooks, modification, destruction and scripts
use std::{cell::Cell, cell::RefCell, rc::Rc};

use serde_json::json;

use tandem_logic::ComponentDescriptor;
use tandem_render::MemoryLoader;
use tandem_shared::hash_name;
use tandem_test::{ball, CountingScript, LocalHarness, ProbeComponent, ProbeLog};

fn probe_harness(log: &ProbeLog) -> LocalHarness {
    let loader = MemoryLoader::new().with(
        "probe",
        json!({
            "type": "probe",
            "components": [{ "type": "ProbeComponent", "label": "a" }]
        }),
    );
    let harness = LocalHarness::new(loader);
    let log = log.clone();
    harness
        .logic
        .factory()
        .register_component(ProbeComponent::NAME, move || {
            Box::new(ProbeComponent::new(log.clone()))
        });
    harness
}

#[test]
fn hooks_run_in_lifecycle_order() {
    let log: ProbeLog = Rc::new(RefCell::new(Vec::new()));
    let mut harness = probe_harness(&log);

    let mut created = harness.logic.create_actor("probe", Vec::new(), None, None);
    harness.steps(3);
    let actor_id = created.try_take().unwrap().unwrap();
    assert_eq!(harness.main.scene().actor_count(), 1);

    let mut modified = harness.logic.modify_actor(
        actor_id,
        vec![ComponentDescriptor::new(
            ProbeComponent::NAME,
            json!({ "label": "b" }),
        )],
    );
    harness.logic.pump();
    let report = modified.try_take().unwrap().unwrap();
    assert_eq!(report.changed, vec![hash_name(ProbeComponent::NAME)]);

    assert!(harness.logic.destroy_actor(actor_id));
    harness.step();

    let log = log.borrow();
    assert_eq!(log[0], "initialize:a");
    assert_eq!(log[1], "post_initialize:a");
    assert!(log.contains(&"update:a".to_string()));
    let changed = log.iter().position(|entry| entry == "changed:b").unwrap();
    assert_eq!(log[changed - 1], "initialize:b");
    assert_eq!(log.last().unwrap(), "destroy:b");
    assert_eq!(log.iter().filter(|entry| entry.starts_with("destroy")).count(), 1);
    assert_eq!(harness.main.scene().actor_count(), 0);
}

#[test]
fn modified_components_are_mirrored() {
    let mut harness = LocalHarness::new(MemoryLoader::new().with("ball", ball()));
    let mut created = harness.logic.create_actor("ball", Vec::new(), None, None);
    harness.steps(2);
    let actor_id = created.try_take().unwrap().unwrap();

    harness.logic.modify_actor(
        actor_id,
        vec![
            ComponentDescriptor::new("TransformComponent", json!({ "position": [0, 3, 0] })),
            ComponentDescriptor::new("PointLightComponent", json!({ "intensity": 2.0 })),
        ],
    );
    harness.steps(2);

    let scene = harness.main.scene();
    let transform = scene
        .component_node(actor_id, hash_name("TransformComponent"))
        .unwrap();
    let light = scene
        .component_node(actor_id, hash_name("PointLightComponent"))
        .unwrap();
    scene.with_scene(|graph| {
        assert_eq!(
            graph.node(transform).unwrap().properties["position"],
            json!([0.0, 3.0, 0.0])
        );
        assert_eq!(
            graph.node(light).unwrap().properties["intensity"],
            json!(2.0)
        );
    });
}

#[test]
fn scripts_tick_with_their_actor() {
    let ticks = Rc::new(Cell::new(0));
    let loader = MemoryLoader::new()
        .with(
            "spinner",
            json!({
                "type": "spinner",
                "components": [{ "type": "ScriptComponent", "script": "counting" }]
            }),
        )
        .with(
            "broken",
            json!({
                "type": "broken",
                "components": [
                    { "type": "TransformComponent" },
                    { "type": "ScriptComponent", "script": "counting", "data": { "fail": true } }
                ]
            }),
        );
    let mut harness = LocalHarness::new(loader);
    let counter = ticks.clone();
    harness
        .logic
        .scripts()
        .register("counting", move || Box::new(CountingScript::new(counter.clone())));

    let mut spinner = harness.logic.create_actor("spinner", Vec::new(), None, None);
    let mut broken = harness.logic.create_actor("broken", Vec::new(), None, None);
    harness.steps(2);
    let spinner = spinner.try_take().unwrap().unwrap();
    let broken = broken.try_take().unwrap().unwrap();

    let before = ticks.get();
    harness.steps(5);
    assert_eq!(ticks.get(), before + 5);

    // the failing script is left out, the rest of its actor survives
    let actors = harness.logic.actors().borrow();
    assert!(actors.get(spinner).unwrap().has_component(hash_name("ScriptComponent")));
    let broken = actors.get(broken).unwrap();
    assert!(!broken.has_component(hash_name("ScriptComponent")));
    assert!(broken.has_component(hash_name("TransformComponent")));
}
