mod clock;
mod gregorian;
mod interval;
mod range;
#[cfg(test)]
pub(crate) use self::clock::FixedClock;
pub(crate) use self::clock::{Clock, LocalClock};
pub(crate) use self::gregorian::Gregorian;
pub(crate) use self::interval::DateInterval;
pub(crate) use self::range::{week_dates, DAYS_IN_WEEK};
use time::{Month, PrimitiveDateTime};

/// Units of calendar arithmetic understood by a [`CalendarSystem`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum CalendarUnit {
    Day,
    WeekOfMonth,
}

/// The broken-down fields of a date-time, as reported by a
/// [`CalendarSystem`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DateComponents {
    pub(crate) year: i32,
    pub(crate) month: Month,
    pub(crate) day: u8,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
}

/// A time-of-day to match against when stepping through a calendar
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct TimeMatch {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
}

impl From<DateComponents> for TimeMatch {
    fn from(c: DateComponents) -> TimeMatch {
        TimeMatch {
            hour: c.hour,
            minute: c.minute,
            second: c.second,
        }
    }
}

/// Week-start aware date arithmetic.
///
/// Every fallible operation returns `None` instead of failing loudly; callers
/// are expected to degrade to an empty range or leave their state as-is.
pub(crate) trait CalendarSystem {
    /// Returns the half-open interval of the week containing `at`, or `None`
    /// if the week cannot be represented
    fn week_interval(&self, at: PrimitiveDateTime) -> Option<DateInterval>;

    /// Returns midnight on the first day of the month containing `at`
    fn start_of_month(&self, at: PrimitiveDateTime) -> Option<PrimitiveDateTime>;

    /// Adds `value` multiples of `unit` to `to`, keeping its time-of-day
    fn add(
        &self,
        unit: CalendarUnit,
        value: i64,
        to: PrimitiveDateTime,
    ) -> Option<PrimitiveDateTime>;

    /// Returns the first date-time strictly after `after` whose hour, minute,
    /// and second equal those in `matching`
    fn next_matching(
        &self,
        after: PrimitiveDateTime,
        matching: TimeMatch,
    ) -> Option<PrimitiveDateTime>;

    fn components(&self, at: PrimitiveDateTime) -> DateComponents;

    fn is_same_day(&self, a: PrimitiveDateTime, b: PrimitiveDateTime) -> bool {
        let (ca, cb) = (self.components(a), self.components(b));
        (ca.year, ca.month, ca.day) == (cb.year, cb.month, cb.day)
    }
}
