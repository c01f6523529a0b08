use std::any::Any;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::actor::{
    component::{read_data, ActorComponent, ComponentBase, ComponentContext, ExclusiveSlot},
    error::ComponentError,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional { target: [f32; 3] },
    Point { distance: f32, decay: f32 },
    Hemisphere { ground_color: [f32; 3] },
    Area { width: f32, height: f32 },
}

impl LightKind {
    pub fn component_name(&self) -> &'static str {
        match self {
            LightKind::Ambient => "AmbientLightComponent",
            LightKind::Directional { .. } => "DirectionalLightComponent",
            LightKind::Point { .. } => "PointLightComponent",
            LightKind::Hemisphere { .. } => "HemisphereLightComponent",
            LightKind::Area { .. } => "AreaLightComponent",
        }
    }
}

#[derive(Default, Deserialize)]
struct LightData {
    color: Option<[f32; 3]>,
    intensity: Option<f32>,
    target: Option<[f32; 3]>,
    distance: Option<f32>,
    decay: Option<f32>,
    ground_color: Option<[f32; 3]>,
    width: Option<f32>,
    height: Option<f32>,
}

/// A light source. An actor holds at most one light.
pub struct LightComponent {
    base: ComponentBase,
    kind: LightKind,
    color: [f32; 3],
    intensity: f32,
}

impl LightComponent {
    fn with_kind(kind: LightKind) -> Self {
        Self {
            base: ComponentBase::new(kind.component_name()),
            kind,
            color: [1.0; 3],
            intensity: 1.0,
        }
    }

    pub fn ambient() -> Self {
        Self::with_kind(LightKind::Ambient)
    }

    pub fn directional() -> Self {
        Self::with_kind(LightKind::Directional { target: [0.0; 3] })
    }

    pub fn point() -> Self {
        Self::with_kind(LightKind::Point {
            distance: 0.0,
            decay: 2.0,
        })
    }

    pub fn hemisphere() -> Self {
        Self::with_kind(LightKind::Hemisphere {
            ground_color: [0.0; 3],
        })
    }

    pub fn area() -> Self {
        Self::with_kind(LightKind::Area {
            width: 10.0,
            height: 10.0,
        })
    }

    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

#[async_trait(?Send)]
impl ActorComponent for LightComponent {
    fn name(&self) -> &'static str {
        self.kind.component_name()
    }

    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn exclusive_slot(&self) -> Option<ExclusiveSlot> {
        Some(ExclusiveSlot::Light)
    }

    async fn initialize(
        &mut self,
        data: &Value,
        _context: &ComponentContext,
    ) -> Result<(), ComponentError> {
        let data: LightData = read_data(self.name(), data)?;
        if let Some(color) = data.color {
            self.color = color;
        }
        if let Some(intensity) = data.intensity {
            if intensity < 0.0 {
                return Err(ComponentError::InvalidData {
                    name: self.name().to_string(),
                    reason: format!("intensity must not be negative, got {}", intensity),
                });
            }
            self.intensity = intensity;
        }

        match &mut self.kind {
            LightKind::Ambient => {}
            LightKind::Directional { target } => {
                *target = data.target.unwrap_or(*target);
            }
            LightKind::Point { distance, decay } => {
                *distance = data.distance.unwrap_or(*distance);
                *decay = data.decay.unwrap_or(*decay);
            }
            LightKind::Hemisphere { ground_color } => {
                *ground_color = data.ground_color.unwrap_or(*ground_color);
            }
            LightKind::Area { width, height } => {
                *width = data.width.unwrap_or(*width);
                *height = data.height.unwrap_or(*height);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("color".to_string(), json!(self.color));
        fields.insert("intensity".to_string(), json!(self.intensity));
        match self.kind {
            LightKind::Ambient => {}
            LightKind::Directional { target } => {
                fields.insert("target".to_string(), json!(target));
            }
            LightKind::Point { distance, decay } => {
                fields.insert("distance".to_string(), json!(distance));
                fields.insert("decay".to_string(), json!(decay));
            }
            LightKind::Hemisphere { ground_color } => {
                fields.insert("ground_color".to_string(), json!(ground_color));
            }
            LightKind::Area { width, height } => {
                fields.insert("width".to_string(), json!(width));
                fields.insert("height".to_string(), json!(height));
            }
        }
        Value::Object(fields)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
