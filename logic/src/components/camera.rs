use std::any::Any;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actor::{
    component::{read_data, ActorComponent, ComponentBase, ComponentContext, ExclusiveSlot},
    error::ComponentError,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraKind {
    Perspective {
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
}

impl CameraKind {
    pub fn component_name(&self) -> &'static str {
        match self {
            CameraKind::Perspective { .. } => "PerspectiveCameraComponent",
            CameraKind::Orthographic { .. } => "OrthographicCameraComponent",
        }
    }
}

#[derive(Default, Deserialize)]
struct CameraData {
    fov: Option<f32>,
    aspect: Option<f32>,
    left: Option<f32>,
    right: Option<f32>,
    top: Option<f32>,
    bottom: Option<f32>,
    near: Option<f32>,
    far: Option<f32>,
}

fn apply(field: &mut f32, value: Option<f32>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// The actor's viewpoint. An actor holds at most one camera.
pub struct CameraComponent {
    base: ComponentBase,
    kind: CameraKind,
}

impl CameraComponent {
    fn with_kind(kind: CameraKind) -> Self {
        Self {
            base: ComponentBase::new(kind.component_name()),
            kind,
        }
    }

    pub fn perspective() -> Self {
        Self::with_kind(CameraKind::Perspective {
            fov: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        })
    }

    pub fn orthographic() -> Self {
        Self::with_kind(CameraKind::Orthographic {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: 0.1,
            far: 1000.0,
        })
    }

    pub fn kind(&self) -> &CameraKind {
        &self.kind
    }
}

#[async_trait(?Send)]
impl ActorComponent for CameraComponent {
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
        Some(ExclusiveSlot::Camera)
    }

    async fn initialize(
        &mut self,
        data: &Value,
        _context: &ComponentContext,
    ) -> Result<(), ComponentError> {
        let data: CameraData = read_data(self.name(), data)?;
        match &mut self.kind {
            CameraKind::Perspective {
                fov,
                aspect,
                near,
                far,
            } => {
                apply(fov, data.fov);
                apply(aspect, data.aspect);
                apply(near, data.near);
                apply(far, data.far);
            }
            CameraKind::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
            } => {
                apply(left, data.left);
                apply(right, data.right);
                apply(top, data.top);
                apply(bottom, data.bottom);
                apply(near, data.near);
                apply(far, data.far);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Value {
        match self.kind {
            CameraKind::Perspective {
                fov,
                aspect,
                near,
                far,
            } => json!({ "fov": fov, "aspect": aspect, "near": near, "far": far }),
            CameraKind::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
            } => json!({
                "left": left,
                "right": right,
                "top": top,
                "bottom": bottom,
                "near": near,
                "far": far,
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
