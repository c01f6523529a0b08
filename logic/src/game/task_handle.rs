use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{channel::oneshot, FutureExt};

use crate::actor::error::ActorError;

/// Deferred outcome of an actor task running on the logic executor.
///
/// Dropping the handle does not cancel the task.
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<Result<T, ActorError>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<T, ActorError>>) -> Self {
        Self { receiver }
    }

    /// Takes the outcome if the task has finished. Yields it only once.
    pub fn try_take(&mut self) -> Option<Result<T, ActorError>> {
        match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => Some(Err(ActorError::Dropped)),
        }
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, ActorError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver
            .poll_unpin(cx)
            .map(|outcome| outcome.unwrap_or(Err(ActorError::Dropped)))
    }
}
