use std::{cell::RefCell, collections::HashMap};

use futures::{future, FutureExt};
use serde_json::Value;

use tandem_shared::ResourceError;

use crate::resources::provider::{ResourceFuture, ResourceProvider};

/// Resources served from memory, for headless runs and tools that build
/// actors without a render context.
#[derive(Default)]
pub struct MemoryResources {
    resources: RefCell<HashMap<String, Value>>,
}

impl MemoryResources {
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
}

impl ResourceProvider for MemoryResources {
    fn get_resource(&self, name: &str) -> ResourceFuture {
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
