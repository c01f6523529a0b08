use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessState {
    /// Created, not yet initialised by the manager
    Uninitialized,
    /// Attached and updated every tick
    Running,
    /// Attached but skipped by the manager
    Paused,
    Succeeded,
    Failed,
    Aborted,
    /// Taken off the run queue without completing
    Removed,
}

/// State every process carries: its lifecycle state and an optional child to
/// run once this one succeeds.
pub struct ProcessCore {
    state: ProcessState,
    child: Option<Box<dyn Process>>,
}

impl Default for ProcessCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessCore {
    pub fn new() -> Self {
        Self {
            state: ProcessState::Uninitialized,
            child: None,
        }
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }
}

/// A resumable unit of work that lives across ticks.
pub trait Process {
    fn core(&self) -> &ProcessCore;

    fn core_mut(&mut self) -> &mut ProcessCore;

    fn on_update(&mut self, delta: Duration);

    fn on_init(&mut self) {
        self.core_mut().set_state(ProcessState::Running);
    }

    fn on_success(&mut self) {}

    fn on_fail(&mut self) {}

    fn on_abort(&mut self) {}

    fn state(&self) -> ProcessState {
        self.core().state()
    }

    fn succeed(&mut self) {
        self.core_mut().set_state(ProcessState::Succeeded);
    }

    fn fail(&mut self) {
        self.core_mut().set_state(ProcessState::Failed);
    }

    fn abort(&mut self) {
        self.core_mut().set_state(ProcessState::Aborted);
    }

    fn pause(&mut self) {
        if self.state() == ProcessState::Running {
            self.core_mut().set_state(ProcessState::Paused);
        }
    }

    fn unpause(&mut self) {
        if self.state() == ProcessState::Paused {
            self.core_mut().set_state(ProcessState::Running);
        }
    }

    fn is_alive(&self) -> bool {
        matches!(self.state(), ProcessState::Running | ProcessState::Paused)
    }

    fn is_dead(&self) -> bool {
        matches!(
            self.state(),
            ProcessState::Succeeded | ProcessState::Failed | ProcessState::Aborted
        )
    }

    fn is_removed(&self) -> bool {
        self.state() == ProcessState::Removed
    }

    /// Replaces any existing child
    fn attach_child(&mut self, child: Box<dyn Process>) {
        self.core_mut().child = Some(child);
    }

    fn remove_child(&mut self) -> Option<Box<dyn Process>> {
        self.core_mut().child.take()
    }

    fn peek_child(&self) -> Option<&dyn Process> {
        self.core().child.as_deref()
    }
}
