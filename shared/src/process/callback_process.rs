use std::time::Duration;

use crate::process::process::{Process, ProcessCore};

/// Runs a closure on its first update, then succeeds.
pub struct CallbackProcess {
    core: ProcessCore,
    callback: Option<Box<dyn FnOnce()>>,
}

impl CallbackProcess {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            core: ProcessCore::new(),
            callback: Some(Box::new(callback)),
        }
    }
}

impl Process for CallbackProcess {
    fn core(&self) -> &ProcessCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProcessCore {
        &mut self.core
    }

    fn on_update(&mut self, _delta: Duration) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
        self.succeed();
    }
}
