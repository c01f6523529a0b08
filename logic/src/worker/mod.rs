mod error;
#[allow(clippy::module_inception)]
mod worker;

pub use error::WorkerError;
pub use worker::{spawn_worker, WorkerHandle};
