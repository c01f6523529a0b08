use std::{default::Default, time::Duration};

use serde_json::Value;

use tandem_shared::EventServiceConfig;

/// Contains Config properties which will be used by the MainContext
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Used to configure the render-side EventService
    pub events: EventServiceConfig,
    /// Time budget for flushing queued events each update. `None` flushes
    /// everything.
    pub max_event_update_time: Option<Duration>,
    /// Sent to the logic worker when it asks for game options
    pub game_options: Value,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            events: EventServiceConfig::default(),
            max_event_update_time: Some(Duration::from_millis(10)),
            game_options: Value::Object(Default::default()),
        }
    }
}
