use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use futures::{future, FutureExt};
use serde_json::Value;

use tandem_shared::ResourceError;

use crate::resources::loader::{LoaderFuture, ResourceLoader};

/// Serves resources from memory and counts how often each was loaded
#[derive(Default)]
pub struct MemoryLoader {
    resources: RefCell<HashMap<String, Value>>,
    loads: Cell<usize>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, value: Value) {
        self.resources.borrow_mut().insert(name.to_string(), value);
    }

    pub fn with(self, name: &str, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Number of `load` calls so far
    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> LoaderFuture {
        self.loads.set(self.loads.get() + 1);
        let result = self
            .resources
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            });
        future::ready(result).boxed_local()
    }
}
