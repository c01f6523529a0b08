use std::any::Any;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::actor::{
    component::{read_data, ActorComponent, ComponentBase, ComponentContext},
    error::ComponentError,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// Fields present in the payload replace the current ones
#[derive(Default, Deserialize)]
struct TransformData {
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 3]>,
    scale: Option<[f32; 3]>,
}

/// Position, rotation (Euler, radians) and scale of an actor
pub struct TransformComponent {
    base: ComponentBase,
    transform: Transform,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformComponent {
    pub const NAME: &'static str = "TransformComponent";

    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            transform: Transform::default(),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn position(&self) -> [f32; 3] {
        self.transform.position
    }

    pub fn set_position(&mut self, position: [f32; 3]) {
        self.transform.position = position;
    }
}

#[async_trait(?Send)]
impl ActorComponent for TransformComponent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    async fn initialize(
        &mut self,
        data: &Value,
        _context: &ComponentContext,
    ) -> Result<(), ComponentError> {
        let data: TransformData = read_data(Self::NAME, data)?;
        if let Some(position) = data.position {
            self.transform.position = position;
        }
        if let Some(rotation) = data.rotation {
            self.transform.rotation = rotation;
        }
        if let Some(scale) = data.scale {
            self.transform.scale = scale;
        }
        Ok(())
    }

    fn snapshot(&self) -> Value {
        json!({
            "position": self.transform.position,
            "rotation": self.transform.rotation,
            "scale": self.transform.scale,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
