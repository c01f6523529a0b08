use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use log::{debug, warn};
use serde_json::Value;

use tandem_shared::ActorId;

use crate::script::error::ScriptError;

/// Game behavior attached to an actor through a
/// [`ScriptComponent`](crate::ScriptComponent).
pub trait Script {
    fn initialize(&mut self, _actor_id: ActorId, _data: &Value) -> Result<(), ScriptError> {
        Ok(())
    }

    fn update(&mut self, delta: Duration);

    fn destroy(&mut self) {}
}

pub type ScriptConstructor = Rc<dyn Fn() -> Box<dyn Script>>;

/// Named script constructors available to script components.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: RefCell<HashMap<String, ScriptConstructor>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, keeping the existing constructor, if the name is taken
    pub fn register<F>(&self, name: &str, constructor: F) -> bool
    where
        F: Fn() -> Box<dyn Script> + 'static,
    {
        let mut scripts = self.scripts.borrow_mut();
        if scripts.contains_key(name) {
            warn!("Script '{}' is already registered", name);
            return false;
        }
        debug!("Registered script '{}'", name);
        scripts.insert(name.to_string(), Rc::new(constructor));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scripts.borrow().contains_key(name)
    }

    /// Instantiates a fresh script. The constructor runs without the
    /// registry borrowed, so it may register further scripts.
    pub fn load(&self, name: &str) -> Result<Box<dyn Script>, ScriptError> {
        let constructor = self
            .scripts
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| ScriptError::NotRegistered {
                name: name.to_string(),
            })?;
        Ok(constructor())
    }
}
