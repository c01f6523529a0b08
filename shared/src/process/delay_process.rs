use std::time::Duration;

use crate::process::process::{Process, ProcessCore};

/// Succeeds once the given amount of game time has passed.
pub struct DelayProcess {
    core: ProcessCore,
    remaining: Duration,
}

impl DelayProcess {
    pub fn new(delay: Duration) -> Self {
        Self {
            core: ProcessCore::new(),
            remaining: delay,
        }
    }

    /// A delay that runs `child` when it elapses
    pub fn then(delay: Duration, child: Box<dyn Process>) -> Self {
        let mut process = Self::new(delay);
        process.attach_child(child);
        process
    }
}

impl Process for DelayProcess {
    fn core(&self) -> &ProcessCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProcessCore {
        &mut self.core
    }

    fn on_update(&mut self, delta: Duration) {
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.succeed();
        }
    }
}
