use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use futures::{
    future::{self, Shared},
    FutureExt,
};
use log::{debug, warn};
use serde_json::Value;

use crate::resources::loader::{LoaderFuture, ResourceLoader};

#[derive(Default)]
struct CacheState {
    loaded: RefCell<HashMap<String, Value>>,
    pending: RefCell<HashMap<String, Shared<LoaderFuture>>>,
}

/// Memoizing front for a [`ResourceLoader`]. Concurrent requests for one
/// name share a single load; only successes are remembered.
pub struct ResourceCache {
    loader: Rc<dyn ResourceLoader>,
    state: Rc<CacheState>,
}

impl ResourceCache {
    pub fn new(loader: Rc<dyn ResourceLoader>) -> Self {
        Self {
            loader,
            state: Rc::new(CacheState::default()),
        }
    }

    pub fn get(&self, name: &str) -> LoaderFuture {
        if let Some(value) = self.state.loaded.borrow().get(name) {
            return future::ready(Ok(value.clone())).boxed_local();
        }
        if let Some(pending) = self.state.pending.borrow().get(name) {
            debug!("Joining pending load of '{}'", name);
            return pending.clone().boxed_local();
        }

        let state: Weak<CacheState> = Rc::downgrade(&self.state);
        let owned = name.to_string();
        let load = self.loader.load(name);
        let shared = async move {
            let result = load.await;
            if let Some(state) = state.upgrade() {
                state.pending.borrow_mut().remove(&owned);
                match &result {
                    Ok(value) => {
                        state.loaded.borrow_mut().insert(owned, value.clone());
                    }
                    Err(err) => warn!("{}", err),
                }
            }
            result
        }
        .boxed_local()
        .shared();

        self.state
            .pending
            .borrow_mut()
            .insert(name.to_string(), shared.clone());
        shared.boxed_local()
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.state.loaded.borrow().contains_key(name)
    }

    pub fn pending_len(&self) -> usize {
        self.state.pending.borrow().len()
    }

    /// Forgets a loaded resource so the next request loads it again
    pub fn invalidate(&self, name: &str) -> bool {
        self.state.loaded.borrow_mut().remove(name).is_some()
    }
}
