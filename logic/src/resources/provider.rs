use futures::future::LocalBoxFuture;
use serde_json::Value;

use tandem_shared::ResourceError;

/// Deferred result of a resource fetch. Owns everything it needs, so holding
/// one never borrows the provider.
pub type ResourceFuture = LocalBoxFuture<'static, Result<Value, ResourceError>>;

/// Source of named resources for component initialisation.
///
/// Implementations must memoise successful results.
pub trait ResourceProvider {
    fn get_resource(&self, name: &str) -> ResourceFuture;
}
