use std::time::Duration;

use log::{debug, warn};

use crate::process::process::{Process, ProcessState};

/// Identifies a process attached to a [`ProcessManager`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessHandle(u64);

/// Runs attached processes once per tick and chains children on success.
pub struct ProcessManager {
    processes: Vec<(ProcessHandle, Box<dyn Process>)>,
    next_handle: u64,
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessManager {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn attach(&mut self, process: Box<dyn Process>) -> ProcessHandle {
        let handle = ProcessHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.processes.push((handle, process));
        handle
    }

    /// Marks one process Aborted. Its abort hook runs on the next `update`.
    pub fn abort(&mut self, handle: ProcessHandle) -> bool {
        match self.processes.iter_mut().find(|(id, _)| *id == handle) {
            Some((_, process))
                if process.is_alive() || process.state() == ProcessState::Uninitialized =>
            {
                process.abort();
                true
            }
            Some(_) => false,
            None => {
                warn!("No process attached with handle {:?}", handle);
                false
            }
        }
    }

    pub fn state(&self, handle: ProcessHandle) -> Option<ProcessState> {
        self.processes
            .iter()
            .find(|(id, _)| *id == handle)
            .map(|(_, process)| process.state())
    }

    /// Advances every process by `delta`. Returns `(succeeded, failed)`, where
    /// aborted processes count as failed.
    pub fn update(&mut self, delta: Duration) -> (u32, u32) {
        let mut succeeded = 0;
        let mut failed = 0;
        let mut children = Vec::new();

        for (_, process) in self.processes.iter_mut() {
            if process.state() == ProcessState::Uninitialized {
                process.on_init();
            }

            if process.state() == ProcessState::Running {
                process.on_update(delta);
            }

            match process.state() {
                ProcessState::Succeeded => {
                    process.on_success();
                    if let Some(child) = process.remove_child() {
                        children.push(child);
                    }
                    succeeded += 1;
                }
                ProcessState::Failed => {
                    process.on_fail();
                    failed += 1;
                }
                ProcessState::Aborted => {
                    process.on_abort();
                    failed += 1;
                }
                _ => {}
            }
        }

        self.processes
            .retain(|(_, process)| !process.is_dead() && !process.is_removed());

        for child in children {
            self.attach(child);
        }

        (succeeded, failed)
    }

    /// Aborts every live process. With `immediate`, abort hooks run now and
    /// the processes are dropped; otherwise that happens on the next `update`.
    pub fn abort_all(&mut self, immediate: bool) {
        debug!("Aborting {} processes", self.processes.len());
        for (_, process) in self.processes.iter_mut() {
            if process.is_alive() || process.state() == ProcessState::Uninitialized {
                process.abort();
                if immediate {
                    process.on_abort();
                }
            }
        }
        if immediate {
            self.processes
                .retain(|(_, process)| process.state() != ProcessState::Aborted);
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::process::{callback_process::CallbackProcess, delay_process::DelayProcess};

    #[test]
    fn delay_then_callback_chain() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();

        let mut manager = ProcessManager::new();
        manager.attach(Box::new(DelayProcess::then(
            Duration::from_millis(30),
            Box::new(CallbackProcess::new(move || flag.set(true))),
        )));

        assert_eq!(manager.update(Duration::from_millis(16)), (0, 0));
        assert_eq!(manager.update(Duration::from_millis(16)), (1, 0));
        assert!(!fired.get());
        // the child joins the run queue after its parent succeeds
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.update(Duration::from_millis(16)), (1, 0));
        assert!(fired.get());
        assert!(manager.is_empty());
    }

    #[test]
    fn paused_process_is_skipped() {
        let mut manager = ProcessManager::new();
        let handle = manager.attach(Box::new(DelayProcess::new(Duration::from_millis(10))));
        manager.update(Duration::ZERO);
        assert_eq!(manager.state(handle), Some(ProcessState::Running));

        if let Some((_, process)) = manager.processes.iter_mut().next() {
            process.pause();
        }
        manager.update(Duration::from_secs(1));
        assert_eq!(manager.state(handle), Some(ProcessState::Paused));
    }

    #[test]
    fn abort_removes_on_next_update() {
        let mut manager = ProcessManager::new();
        let handle = manager.attach(Box::new(DelayProcess::new(Duration::from_secs(1))));
        manager.update(Duration::ZERO);

        assert!(manager.abort(handle));
        assert_eq!(manager.state(handle), Some(ProcessState::Aborted));
        assert_eq!(manager.update(Duration::ZERO), (0, 1));
        assert_eq!(manager.state(handle), None);
    }
}
