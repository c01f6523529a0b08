use std::{default::Default, time::Duration};

use tandem_shared::EventServiceConfig;

/// Contains Config properties which will be used by the logic context
#[derive(Clone, Debug)]
pub struct LogicConfig {
    /// Used to configure the logic context's EventService
    pub events: EventServiceConfig,
    /// Time budget for draining queued events each tick. `None` drains
    /// everything.
    pub max_event_update_time: Option<Duration>,
    /// How often the worker advances game time
    pub tick_interval: Duration,
    /// How long the spawning context waits for the worker's status message
    pub boot_timeout: Duration,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            events: EventServiceConfig::default(),
            max_event_update_time: Some(Duration::from_millis(10)),
            tick_interval: Duration::from_millis(16),
            boot_timeout: Duration::from_secs(5),
        }
    }
}
