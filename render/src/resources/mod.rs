pub mod directory_loader;
pub mod loader;
pub mod memory_loader;
pub mod resource_cache;
