use std::collections::HashMap;

use log::{error, warn};

use tandem_shared::{hash_name, ComponentId};

use crate::{
    actor::component::ActorComponent,
    components::{
        camera::CameraComponent, light::LightComponent, render::RenderComponent,
        script::ScriptComponent, transform::TransformComponent,
    },
};

pub type ComponentConstructor = Box<dyn Fn() -> Box<dyn ActorComponent>>;

/// Creates components by hashed type name.
#[derive(Default)]
pub struct ActorComponentFactory {
    constructors: HashMap<ComponentId, (String, ComponentConstructor)>,
}

impl ActorComponentFactory {
    /// An empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory seeded with every built-in component
    pub fn with_default_components() -> Self {
        let mut factory = Self::new();
        factory.register("TransformComponent", || Box::new(TransformComponent::new()));
        factory.register("PerspectiveCameraComponent", || {
            Box::new(CameraComponent::perspective())
        });
        factory.register("OrthographicCameraComponent", || {
            Box::new(CameraComponent::orthographic())
        });
        factory.register("AmbientLightComponent", || Box::new(LightComponent::ambient()));
        factory.register("DirectionalLightComponent", || {
            Box::new(LightComponent::directional())
        });
        factory.register("PointLightComponent", || Box::new(LightComponent::point()));
        factory.register("HemisphereLightComponent", || {
            Box::new(LightComponent::hemisphere())
        });
        factory.register("AreaLightComponent", || Box::new(LightComponent::area()));
        factory.register("MeshRenderComponent", || Box::new(RenderComponent::mesh()));
        factory.register("PlaneRenderComponent", || Box::new(RenderComponent::plane()));
        factory.register("SphereRenderComponent", || Box::new(RenderComponent::sphere()));
        factory.register("SpriteRenderComponent", || Box::new(RenderComponent::sprite()));
        factory.register("ScriptComponent", || Box::new(ScriptComponent::new()));
        factory
    }

    /// Returns false, keeping the existing constructor, if the name is taken
    pub fn register<F>(&mut self, name: &str, constructor: F) -> bool
    where
        F: Fn() -> Box<dyn ActorComponent> + 'static,
    {
        let id = hash_name(name);
        if let Some((existing, _)) = self.constructors.get(&id) {
            warn!(
                "Component '{}' is already registered (as '{}'), ignoring",
                name, existing
            );
            return false;
        }
        self.constructors
            .insert(id, (name.to_string(), Box::new(constructor)));
        true
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.constructors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    pub fn create_by_id(&self, id: ComponentId) -> Option<Box<dyn ActorComponent>> {
        let Some((_, constructor)) = self.constructors.get(&id) else {
            error!("Cannot create component: id {} is not registered", id);
            return None;
        };
        Some(constructor())
    }

    pub fn create(&self, name: &str) -> Option<Box<dyn ActorComponent>> {
        self.create_by_id(hash_name(name))
    }
}
