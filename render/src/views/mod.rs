pub mod view_renderer;
pub mod view_renderer_registry;
