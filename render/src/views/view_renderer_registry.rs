use std::collections::{BTreeMap, HashMap};

use log::{info, warn};

use tandem_shared::ViewId;

use crate::{
    error::RenderError,
    scene::scene_graph::SceneGraph,
    views::view_renderer::{ViewRenderer, ViewRendererConstructor},
};

/// Creates view renderers by type on request of the logic worker and keeps
/// them by view id.
#[derive(Default)]
pub struct ViewRendererRegistry {
    constructors: HashMap<String, ViewRendererConstructor>,
    renderers: BTreeMap<ViewId, Box<dyn ViewRenderer>>,
}

impl ViewRendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, keeping the first constructor, if the type is taken
    pub fn register<F>(&mut self, view_type: &str, constructor: F) -> bool
    where
        F: Fn(ViewId) -> Box<dyn ViewRenderer> + 'static,
    {
        if self.constructors.contains_key(view_type) {
            warn!("View renderer type '{}' is already registered", view_type);
            return false;
        }
        self.constructors
            .insert(view_type.to_string(), Box::new(constructor));
        true
    }

    pub fn create(&mut self, view_id: ViewId, view_type: &str) -> Result<(), RenderError> {
        if self.renderers.contains_key(&view_id) {
            return Err(RenderError::DuplicateView { view_id });
        }
        let constructor =
            self.constructors
                .get(view_type)
                .ok_or_else(|| RenderError::UnknownViewType {
                    view_type: view_type.to_string(),
                })?;
        self.renderers.insert(view_id, constructor(view_id));
        info!("Created '{}' renderer for view {}", view_type, view_id);
        Ok(())
    }

    pub fn destroy(&mut self, view_id: ViewId) -> Result<(), RenderError> {
        let mut renderer = self
            .renderers
            .remove(&view_id)
            .ok_or(RenderError::UnknownView { view_id })?;
        renderer.destroy();
        Ok(())
    }

    pub fn contains(&self, view_id: ViewId) -> bool {
        self.renderers.contains_key(&view_id)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Renders every view in id order
    pub fn render_all(&mut self, scene: &dyn SceneGraph) {
        for renderer in self.renderers.values_mut() {
            renderer.render(scene);
        }
    }

    pub fn destroy_all(&mut self) {
        for (_, mut renderer) in std::mem::take(&mut self.renderers) {
            renderer.destroy();
        }
    }
}
