#[allow(clippy::module_inception)]
pub mod actor;
pub mod actor_factory;
pub mod component;
pub mod component_factory;
pub mod descriptor;
pub mod error;
pub mod settle;
