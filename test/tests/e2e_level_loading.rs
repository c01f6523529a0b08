/// End-to-end tests for loading a level across both contexts
/// Covers resource round trips, scene mirroring and exclusive slots surviving
/// the trip
use tandem_logic::{CameraComponent, TransformComponent};
use tandem_render::NodeKind;
use tandem_shared::hash_name;
use tandem_test::{sample_loader, LocalHarness};

#[test]
fn level_actors_are_mirrored_into_the_scene() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut harness = LocalHarness::new(sample_loader());

    harness.main.load_game("levels/level1.json").unwrap();
    harness.steps(4);

    assert_eq!(harness.logic.actor_count(), 3);
    assert_eq!(harness.main.scene().actor_count(), 3);

    let actors = harness.logic.actors().borrow();
    for &actor_id in actors.ids() {
        let actor = actors.get(actor_id).unwrap();
        let root = harness.main.scene().actor_node(actor_id).unwrap();
        harness.main.scene().with_scene(|scene| {
            let node = scene.node(root).unwrap();
            assert_eq!(
                node.kind,
                NodeKind::Actor {
                    actor_id,
                    actor_type: actor.actor_type().to_string()
                }
            );
            assert_eq!(node.children.len(), actor.component_count());
        });
    }
}

#[test]
fn level_transforms_reach_the_scene() {
    let mut harness = LocalHarness::new(sample_loader());
    harness.main.load_game("levels/level1.json").unwrap();
    harness.steps(4);

    let actors = harness.logic.actors().borrow();
    let mut positions: Vec<f32> = actors
        .ids()
        .iter()
        .filter_map(|id| actors.get(*id))
        .filter(|actor| actor.actor_type() == "ball")
        .map(|actor| {
            actor
                .component::<TransformComponent>(TransformComponent::NAME)
                .unwrap()
                .position()[0]
        })
        .collect();
    positions.sort_by(f32::total_cmp);
    assert_eq!(positions, vec![-1.0, 1.0]);

    // the rig's camera and light both made it
    let rig = actors
        .ids()
        .iter()
        .filter_map(|id| actors.get(*id))
        .find(|actor| actor.actor_type() == "rig")
        .unwrap();
    assert!(rig
        .component::<CameraComponent>("PerspectiveCameraComponent")
        .is_some());
    assert!(rig.has_component(hash_name("DirectionalLightComponent")));
}

#[test]
fn each_resource_is_loaded_once() {
    let mut harness = LocalHarness::new(sample_loader());
    harness.main.load_game("levels/level1.json").unwrap();
    harness.steps(4);

    assert!(harness.main.cache().is_cached("actors/ball.json"));
    assert!(harness.logic.resources().is_cached("actors/ball.json"));
    assert_eq!(harness.logic.resources().pending_len(), 0);
    assert_eq!(harness.main.cache().pending_len(), 0);
}

#[test]
fn missing_level_builds_nothing() {
    let mut harness = LocalHarness::new(sample_loader());
    harness.main.load_game("levels/missing.json").unwrap();
    harness.steps(3);

    assert_eq!(harness.logic.actor_count(), 0);
    assert_eq!(harness.main.scene().actor_count(), 0);
}
