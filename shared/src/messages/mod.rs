pub mod endpoint;
pub mod error;
pub mod handler;
pub mod message;
pub mod message_kind;
