use std::fmt;

use chrono::{DateTime, Utc};

/// `YYYYMMDDHHMMSS`, the timestamp layout the gateway expects.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Source of the request timestamp.
///
/// The client holds one of these instead of reading a global "now", so tests
/// can pin the time without affecting other calls.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current time formatted as [`TIMESTAMP_FORMAT`].
    fn timestamp(&self) -> String;
}

/// Wall clock in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        format_timestamp(Utc::now())
    }
}

/// Always reports the same instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(format_timestamp(instant))
    }

    /// Uses `timestamp` verbatim; it should already be in [`TIMESTAMP_FORMAT`].
    pub fn from_formatted<S: Into<String>>(timestamp: S) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}
