use thiserror::Error;
use time::{error::IndeterminateOffset, OffsetDateTime, PrimitiveDateTime};

/// A source for the current local date & time
pub(crate) trait Clock {
    fn now(&self) -> Result<PrimitiveDateTime, ClockError>;
}

/// Reads the system clock in the local timezone
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> Result<PrimitiveDateTime, ClockError> {
        let now = OffsetDateTime::now_local()?;
        Ok(PrimitiveDateTime::new(now.date(), now.time()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("failed to determine local time")]
pub(crate) struct ClockError(#[from] IndeterminateOffset);

/// A clock that is always at the same instant
#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) PrimitiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> Result<PrimitiveDateTime, ClockError> {
        Ok(self.0)
    }
}
