pub mod builtin;
pub mod error;
pub mod event;
pub mod event_kinds;
pub mod event_service;
