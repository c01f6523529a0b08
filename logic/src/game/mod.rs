pub mod actor_registry;
pub mod actor_tasks;
pub mod game_logic;
pub mod game_view;
pub mod level;
pub mod task_handle;
