use thiserror::Error;

/// Errors that can occur while reading the wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// System time is before UNIX epoch
    #[error("System time is before UNIX epoch")]
    SystemTimeBeforeEpoch,
}

pub struct Timestamp;

impl Timestamp {
    /// Returns `Date.now()` from the hosting page or worker.
    pub fn try_now_millis() -> Result<f64, TimeError> {
        let now = js_sys::Date::now();
        if now < 0.0 {
            return Err(TimeError::SystemTimeBeforeEpoch);
        }
        Ok(now)
    }

    pub fn now_millis() -> f64 {
        Self::try_now_millis().unwrap_or(0.0)
    }
}
