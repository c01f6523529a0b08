use std::time::SystemTime;

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
    /// Returns the current wall-clock time in milliseconds since UNIX epoch.
    ///
    /// # Errors
    /// Returns `TimeError::SystemTimeBeforeEpoch` if system time is before UNIX epoch.
    pub fn try_now_millis() -> Result<f64, TimeError> {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .map_err(|_| TimeError::SystemTimeBeforeEpoch)
    }

    /// Milliseconds since UNIX epoch, or 0.0 if the system clock is unusable.
    pub fn now_millis() -> f64 {
        Self::try_now_millis().unwrap_or(0.0)
    }
}
