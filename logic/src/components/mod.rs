pub mod camera;
pub mod light;
pub mod render;
pub mod script;
pub mod transform;
