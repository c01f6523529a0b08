use std::{cell::RefCell, collections::HashMap};

use futures::{channel::oneshot, future, FutureExt};
use log::{debug, error, warn};
use serde_json::Value;

use tandem_shared::{Message, MessageSender, ResourceError, ResourceRequest, ResourceResponse};

use crate::resources::provider::{ResourceFuture, ResourceProvider};

type Waiter = oneshot::Sender<Result<Value, ResourceError>>;

/// Worker-side resource access. Requests are forwarded to the main context
/// and correlated with responses by name.
///
/// Concurrent requests for the same name share one outgoing
/// [`ResourceRequest`] and resolve together. Successful results are memoised.
/// There is no timeout: an unanswered request stays pending.
pub struct ResourceManager {
    sender: MessageSender,
    cache: RefCell<HashMap<String, Value>>,
    pending: RefCell<HashMap<String, Vec<Waiter>>>,
}

impl ResourceManager {
    pub fn new(sender: MessageSender) -> Self {
        Self {
            sender,
            cache: RefCell::new(HashMap::new()),
            pending: RefCell::new(HashMap::new()),
        }
    }

    /// Resolves every caller waiting on `response.name`
    pub fn handle_response(&self, response: ResourceResponse) {
        let ResourceResponse { name, data, error } = response;
        let result = match error {
            Some(reason) => Err(ResourceError::Remote {
                name: name.clone(),
                reason,
            }),
            None => Ok(data.unwrap_or(Value::Null)),
        };

        if let Ok(value) = &result {
            self.cache.borrow_mut().insert(name.clone(), value.clone());
        }

        let waiters = self.pending.borrow_mut().remove(&name);
        let Some(waiters) = waiters else {
            warn!("Received response for resource '{}' with no pending request", name);
            return;
        };
        debug!("Resolving {} waiters for resource '{}'", waiters.len(), name);
        for waiter in waiters {
            // a dropped receiver means the caller stopped waiting
            let _ = waiter.send(result.clone());
        }
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.borrow().contains_key(name)
    }

    /// Names with at least one caller still waiting
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    fn fail_waiters(&self, name: &str) {
        let waiters = self.pending.borrow_mut().remove(name).unwrap_or_default();
        for waiter in waiters {
            let _ = waiter.send(Err(ResourceError::Dropped {
                name: name.to_string(),
            }));
        }
    }
}

impl ResourceProvider for ResourceManager {
    fn get_resource(&self, name: &str) -> ResourceFuture {
        if let Some(value) = self.cache.borrow().get(name) {
            return future::ready(Ok(value.clone())).boxed_local();
        }

        let (waiter, receiver) = oneshot::channel();
        let first = {
            let mut pending = self.pending.borrow_mut();
            let waiters = pending.entry(name.to_string()).or_default();
            waiters.push(waiter);
            waiters.len() == 1
        };

        if first {
            let request = Message::ResourceRequest(ResourceRequest {
                name: name.to_string(),
            });
            if let Err(err) = self.sender.send(&request) {
                error!("Failed to request resource '{}': {}", name, err);
                self.fail_waiters(name);
            }
        }

        let name = name.to_string();
        async move {
            receiver
                .await
                .unwrap_or(Err(ResourceError::Dropped { name }))
        }
        .boxed_local()
    }
}
