use std::{cell::Cell, rc::Rc, time::Duration};

use serde_json::Value;

use tandem_logic::{shared::ActorId, Script, ScriptError};

pub type ScriptTicks = Rc<Cell<usize>>;

/// Counts its updates. Refuses to start when its data says `"fail": true`.
pub struct CountingScript {
    ticks: ScriptTicks,
}

impl CountingScript {
    pub fn new(ticks: ScriptTicks) -> Self {
        Self { ticks }
    }
}

impl Script for CountingScript {
    fn initialize(&mut self, _actor_id: ActorId, data: &Value) -> Result<(), ScriptError> {
        if data.get("fail").and_then(Value::as_bool) == Some(true) {
            return Err(ScriptError::Initialization {
                name: "counting".to_string(),
                reason: "asked to fail".to_string(),
            });
        }
        Ok(())
    }

    fn update(&mut self, _delta: Duration) {
        self.ticks.set(self.ticks.get() + 1);
    }
}
