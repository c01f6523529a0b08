use std::{
    rc::Rc,
    thread::{self, JoinHandle},
};

use log::{error, info, warn};

use tandem_shared::{
    Clock, Decoded, Endpoint, Message, SystemClock, TransportError, WorkerStatus,
};

use crate::{game::game_logic::BaseGameLogic, logic_config::LogicConfig, worker::error::WorkerError};

const WORKER_THREAD_NAME: &str = "tandem-logic";

/// Main-side handle on a running logic worker. Dropping the handle (or its
/// endpoint) disconnects the worker, which then shuts down.
pub struct WorkerHandle {
    endpoint: Endpoint,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Channel to the worker's [`BaseGameLogic`]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Hands the endpoint to a render context. The worker stops once the
    /// endpoint is dropped.
    pub fn into_parts(self) -> (Endpoint, JoinHandle<()>) {
        (self.endpoint, self.thread)
    }

    /// Disconnects and waits for the worker to finish its shutdown
    pub fn join(self) {
        let (endpoint, thread) = self.into_parts();
        drop(endpoint);
        if thread.join().is_err() {
            error!("Logic worker panicked");
        }
    }
}

/// Starts a logic worker on its own thread and blocks until it reports its
/// status. `setup` runs on the worker before the status is sent, and is where
/// a game registers its components, scripts and views.
pub fn spawn_worker<F>(config: LogicConfig, setup: F) -> Result<WorkerHandle, WorkerError>
where
    F: FnOnce(&mut BaseGameLogic) -> Result<(), WorkerError> + Send + 'static,
{
    let boot_timeout = config.boot_timeout;
    let (main_side, worker_side) = Endpoint::pair();

    let thread = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || run_worker(config, worker_side, setup))
        .map_err(|err| WorkerError::Spawn {
            reason: err.to_string(),
        })?;

    let status = match main_side.recv_timeout(boot_timeout) {
        Ok(Some(envelope)) => match Message::decode(envelope) {
            Ok(Decoded::Known(Message::WorkerStatus(status))) => status,
            _ => return Err(WorkerError::UnexpectedBootMessage),
        },
        Ok(None) => return Err(WorkerError::BootTimeout { timeout: boot_timeout }),
        Err(_) => {
            // the thread has already exited, join only to surface a panic
            if thread.join().is_err() {
                error!("Logic worker panicked during boot");
            }
            return Err(WorkerError::Disconnected);
        }
    };

    if !status.success {
        if thread.join().is_err() {
            error!("Logic worker panicked after a failed boot");
        }
        return Err(WorkerError::BootFailed {
            reason: status.reason.unwrap_or_default(),
        });
    }

    info!("Logic worker booted");
    Ok(WorkerHandle {
        endpoint: main_side,
        thread,
    })
}

fn run_worker<F>(config: LogicConfig, endpoint: Endpoint, setup: F)
where
    F: FnOnce(&mut BaseGameLogic) -> Result<(), WorkerError>,
{
    let clock = Rc::new(SystemClock::new());
    let tick_interval = config.tick_interval;
    let mut logic = BaseGameLogic::new(config, endpoint.sender(), clock.clone());

    if let Err(err) = setup(&mut logic) {
        error!("{}", err);
        let status = WorkerStatus {
            success: false,
            reason: Some(err.to_string()),
        };
        if endpoint.send(&Message::WorkerStatus(status)).is_err() {
            warn!("Main context left before the failed boot was reported");
        }
        return;
    }

    let status = WorkerStatus {
        success: true,
        reason: None,
    };
    if endpoint.send(&Message::WorkerStatus(status)).is_err() {
        warn!("Main context left before the worker booted");
        return;
    }
    logic.request_game_options();

    let mut last_tick = clock.now();
    'run: loop {
        let wait = (last_tick + tick_interval).saturating_sub(clock.now());

        // Messages
        let mut next = endpoint.recv_timeout(wait);
        loop {
            match next {
                Ok(Some(envelope)) => {
                    logic.handle_envelope(envelope);
                }
                Ok(None) => break,
                Err(TransportError::Disconnected) => break 'run,
                Err(err) => {
                    warn!("Logic worker receive failed: {}", err);
                    break;
                }
            }
            next = endpoint.try_recv();
        }
        logic.pump();

        // Tick
        let now = clock.now();
        if now >= last_tick + tick_interval {
            logic.update(now, now - last_tick);
            last_tick = now;
        }
    }

    info!("Main context disconnected, shutting down logic worker");
    logic.shutdown();
}
