#[allow(clippy::module_inception)]
pub mod scene;
pub mod scene_graph;
pub mod scene_manager;
