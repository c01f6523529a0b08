use futures::future::LocalBoxFuture;
use serde_json::Value;

use tandem_shared::ResourceError;

pub type LoaderFuture = LocalBoxFuture<'static, Result<Value, ResourceError>>;

/// Fetches named resources for the render context. The returned future must
/// not borrow the loader.
pub trait ResourceLoader {
    fn load(&self, name: &str) -> LoaderFuture;
}
