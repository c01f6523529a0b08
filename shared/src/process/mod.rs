pub mod callback_process;
pub mod delay_process;
#[allow(clippy::module_inception)]
pub mod process;
pub mod process_manager;
