/// Tests for process scheduling
/// Covers child chaining, failure hooks and aborting

use std::{cell::RefCell, rc::Rc, time::Duration};

use tandem_shared::{
    CallbackProcess, DelayProcess, Process, ProcessCore, ProcessManager, ProcessState,
};

/// Logs each lifecycle hook and fails after a fixed number of updates
struct Countdown {
    core: ProcessCore,
    ticks: u32,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Countdown {
    fn new(ticks: u32, log: Rc<RefCell<Vec<&'static str>>>) -> Self {
        Self {
            core: ProcessCore::new(),
            ticks,
            log,
        }
    }
}

impl Process for Countdown {
    fn core(&self) -> &ProcessCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProcessCore {
        &mut self.core
    }

    fn on_init(&mut self) {
        self.log.borrow_mut().push("init");
        self.core.set_state(ProcessState::Running);
    }

    fn on_update(&mut self, _delta: Duration) {
        self.log.borrow_mut().push("update");
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            self.fail();
        }
    }

    fn on_fail(&mut self) {
        self.log.borrow_mut().push("fail");
    }

    fn on_abort(&mut self) {
        self.log.borrow_mut().push("abort");
    }
}

#[test]
fn failed_process_does_not_start_child() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut countdown = Countdown::new(1, log.clone());
    let child_log = log.clone();
    countdown.attach_child(Box::new(CallbackProcess::new(move || {
        child_log.borrow_mut().push("child")
    })));

    let mut manager = ProcessManager::new();
    manager.attach(Box::new(countdown));

    assert_eq!(manager.update(Duration::from_millis(16)), (0, 1));
    assert!(manager.is_empty());
    assert_eq!(*log.borrow(), vec!["init", "update", "fail"]);
}

#[test]
fn abort_all_immediate_runs_hooks_now() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut manager = ProcessManager::new();
    manager.attach(Box::new(Countdown::new(10, log.clone())));
    manager.update(Duration::ZERO);

    manager.abort_all(true);
    assert!(manager.is_empty());
    assert_eq!(*log.borrow(), vec!["init", "update", "abort"]);
}

#[test]
fn abort_all_deferred_runs_hooks_on_update() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut manager = ProcessManager::new();
    let handle = manager.attach(Box::new(Countdown::new(10, log.clone())));
    manager.update(Duration::ZERO);

    manager.abort_all(false);
    assert_eq!(manager.state(handle), Some(ProcessState::Aborted));
    assert_eq!(manager.update(Duration::ZERO), (0, 1));
    assert_eq!(*log.borrow(), vec!["init", "update", "abort"]);
    assert!(manager.is_empty());
}

#[test]
fn three_step_chain_runs_in_sequence() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();

    let mut head = CallbackProcess::new(move || first.borrow_mut().push(1));
    let mut delay = DelayProcess::new(Duration::from_millis(20));
    delay.attach_child(Box::new(CallbackProcess::new(move || {
        second.borrow_mut().push(2)
    })));
    head.attach_child(Box::new(delay));

    let mut manager = ProcessManager::new();
    manager.attach(Box::new(head));

    let mut ticks = 0;
    while !manager.is_empty() && ticks < 10 {
        manager.update(Duration::from_millis(10));
        ticks += 1;
    }
    assert_eq!(*order.borrow(), vec![1, 2]);
    assert_eq!(ticks, 4);
}
