pub mod memory_resources;
pub mod provider;
pub mod resource_manager;
