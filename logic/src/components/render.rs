use std::any::Any;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actor::{
    component::{read_data, ActorComponent, ComponentBase, ComponentContext},
    error::ComponentError,
};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderKind {
    /// Geometry loaded from a named resource
    Mesh {
        resource: String,
        mesh: Option<Value>,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Sphere {
        radius: f32,
        segments: u32,
    },
    Sprite {
        texture: Option<String>,
        size: [f32; 2],
    },
}

impl RenderKind {
    pub fn component_name(&self) -> &'static str {
        match self {
            RenderKind::Mesh { .. } => "MeshRenderComponent",
            RenderKind::Plane { .. } => "PlaneRenderComponent",
            RenderKind::Sphere { .. } => "SphereRenderComponent",
            RenderKind::Sprite { .. } => "SpriteRenderComponent",
        }
    }
}

#[derive(Default, Deserialize)]
struct RenderData {
    color: Option<[f32; 3]>,
    visible: Option<bool>,
    resource: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    radius: Option<f32>,
    segments: Option<u32>,
    texture: Option<String>,
    size: Option<[f32; 2]>,
}

/// Something the render context draws for the actor
pub struct RenderComponent {
    base: ComponentBase,
    kind: RenderKind,
    color: [f32; 3],
    visible: bool,
}

impl RenderComponent {
    fn with_kind(kind: RenderKind) -> Self {
        Self {
            base: ComponentBase::new(kind.component_name()),
            kind,
            color: [1.0; 3],
            visible: true,
        }
    }

    pub fn mesh() -> Self {
        Self::with_kind(RenderKind::Mesh {
            resource: String::new(),
            mesh: None,
        })
    }

    pub fn plane() -> Self {
        Self::with_kind(RenderKind::Plane {
            width: 1.0,
            height: 1.0,
        })
    }

    pub fn sphere() -> Self {
        Self::with_kind(RenderKind::Sphere {
            radius: 1.0,
            segments: 16,
        })
    }

    pub fn sprite() -> Self {
        Self::with_kind(RenderKind::Sprite {
            texture: None,
            size: [1.0, 1.0],
        })
    }

    pub fn kind(&self) -> &RenderKind {
        &self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[async_trait(?Send)]
impl ActorComponent for RenderComponent {
    fn name(&self) -> &'static str {
        self.kind.component_name()
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
        context: &ComponentContext,
    ) -> Result<(), ComponentError> {
        let name = self.name();
        let data: RenderData = read_data(name, data)?;
        if let Some(color) = data.color {
            self.color = color;
        }
        if let Some(visible) = data.visible {
            self.visible = visible;
        }

        match &mut self.kind {
            RenderKind::Mesh { resource, mesh } => {
                if let Some(requested) = data.resource {
                    *resource = requested;
                }
                if resource.is_empty() {
                    return Err(ComponentError::InvalidData {
                        name: name.to_string(),
                        reason: "a mesh needs a 'resource' to load".to_string(),
                    });
                }
                debug!("Actor {} loading mesh '{}'", context.actor_id, resource);
                *mesh = Some(context.resources.get_resource(resource).await?);
            }
            RenderKind::Plane { width, height } => {
                *width = data.width.unwrap_or(*width);
                *height = data.height.unwrap_or(*height);
            }
            RenderKind::Sphere { radius, segments } => {
                *radius = data.radius.unwrap_or(*radius);
                *segments = data.segments.unwrap_or(*segments);
            }
            RenderKind::Sprite { texture, size } => {
                if data.texture.is_some() {
                    *texture = data.texture;
                }
                *size = data.size.unwrap_or(*size);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Value {
        let geometry = match &self.kind {
            RenderKind::Mesh { resource, mesh } => {
                json!({ "resource": resource, "mesh": mesh })
            }
            RenderKind::Plane { width, height } => json!({ "width": width, "height": height }),
            RenderKind::Sphere { radius, segments } => {
                json!({ "radius": radius, "segments": segments })
            }
            RenderKind::Sprite { texture, size } => json!({ "texture": texture, "size": size }),
        };
        json!({
            "color": self.color,
            "visible": self.visible,
            "geometry": geometry,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
