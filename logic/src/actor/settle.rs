use std::future::Future;

use futures::future::join_all;

/// Drives every future to completion and returns every outcome in input
/// order. Never short-circuits on failure.
pub async fn settle_all<I, F, T, E>(futures: I) -> Vec<Result<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(futures).await
}
