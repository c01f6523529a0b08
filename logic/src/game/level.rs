use serde::{Deserialize, Serialize};

use crate::{actor::descriptor::ComponentDescriptor, components::transform::Transform};

/// Level resource: `{ "actors": [{ "resource", "overrides"?, "transform"? }] }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default)]
    pub actors: Vec<LevelActor>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelActor {
    pub resource: String,
    #[serde(default)]
    pub overrides: Vec<ComponentDescriptor>,
    #[serde(default)]
    pub transform: Option<Transform>,
}
