use tandem_shared::ViewId;

use crate::scene::scene_graph::SceneGraph;

/// Draws the scene for one logic-side view
pub trait ViewRenderer {
    fn view_id(&self) -> ViewId;

    fn render(&mut self, scene: &dyn SceneGraph);

    /// Releases GPU-side resources before the renderer is dropped
    fn destroy(&mut self) {}
}

pub type ViewRendererConstructor = Box<dyn Fn(ViewId) -> Box<dyn ViewRenderer>>;
