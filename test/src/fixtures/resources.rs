use serde_json::{json, Value};

use tandem_render::MemoryLoader;

/// A ball with a transform and a sphere
pub fn ball() -> Value {
    json!({
        "type": "ball",
        "components": [
            { "type": "TransformComponent", "position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] },
            { "type": "SphereRenderComponent", "radius": 0.5 }
        ]
    })
}

/// A level with two balls and a lit camera rig
pub fn level() -> Value {
    json!({
        "actors": [
            { "resource": "actors/ball.json", "transform": { "position": [-1, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] } },
            { "resource": "actors/ball.json", "transform": { "position": [1, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] } },
            { "resource": "actors/rig.json" }
        ]
    })
}

fn rig() -> Value {
    json!({
        "type": "rig",
        "components": [
            { "type": "TransformComponent", "position": [0, 2, 5] },
            { "type": "PerspectiveCameraComponent", "fov": 60.0 },
            { "type": "DirectionalLightComponent", "intensity": 1.5 }
        ]
    })
}

/// Loader serving `levels/level1.json` and the actors it lists
pub fn sample_loader() -> MemoryLoader {
    MemoryLoader::new()
        .with("levels/level1.json", level())
        .with("actors/ball.json", ball())
        .with("actors/rig.json", rig())
}
