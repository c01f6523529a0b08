use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde_json::Value;

use crate::messages::{error::TransportError, message::Message};

/// Cloneable sending half of an [`Endpoint`].
#[derive(Clone)]
pub struct MessageSender {
    sender: Sender<Value>,
}

impl MessageSender {
    pub fn send(&self, message: &Message) -> Result<(), TransportError> {
        let envelope = message.encode()?;
        self.send_envelope(envelope)
    }

    /// Sends a raw envelope, for message kinds layered on top of the base protocol
    pub fn send_envelope(&self, envelope: Value) -> Result<(), TransportError> {
        self.sender
            .send(envelope)
            .map_err(|_| TransportError::Disconnected)
    }
}

/// One side of a bidirectional, ordered message channel between two
/// execution contexts. Envelopes are moved across, never shared.
pub struct Endpoint {
    sender: MessageSender,
    receiver: Receiver<Value>,
}

impl Endpoint {
    /// Two endpoints wired to each other
    pub fn pair() -> (Endpoint, Endpoint) {
        let (a_to_b, b_from_a) = unbounded();
        let (b_to_a, a_from_b) = unbounded();
        (
            Endpoint {
                sender: MessageSender { sender: a_to_b },
                receiver: a_from_b,
            },
            Endpoint {
                sender: MessageSender { sender: b_to_a },
                receiver: b_from_a,
            },
        )
    }

    pub fn sender(&self) -> MessageSender {
        self.sender.clone()
    }

    pub fn send(&self, message: &Message) -> Result<(), TransportError> {
        self.sender.send(message)
    }

    pub fn send_envelope(&self, envelope: Value) -> Result<(), TransportError> {
        self.sender.send_envelope(envelope)
    }

    /// Non-blocking receive
    pub fn try_recv(&self) -> Result<Option<Value>, TransportError> {
        match self.receiver.try_recv() {
            Ok(envelope) => Ok(Some(envelope)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::Disconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Value>, TransportError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(envelope) => Ok(Some(envelope)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(TransportError::Disconnected),
        }
    }
}
