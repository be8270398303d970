use super::{CalendarSystem, CalendarUnit, DateComponents, DateInterval, TimeMatch};
use time::{Date, Duration, PrimitiveDateTime, Time, Weekday};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

const DAYS_PER_WEEK: i64 = 7;

/// The proleptic Gregorian calendar with a configurable first day of the
/// week
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Gregorian {
    first_weekday: Weekday,
}

impl Gregorian {
    pub(crate) fn new(first_weekday: Weekday) -> Gregorian {
        Gregorian { first_weekday }
    }

    // Number of days from the start of the week to `date`, in 0..7
    fn days_into_week(&self, date: Date) -> u8 {
        (date.weekday().number_days_from_monday() + 7
            - self.first_weekday.number_days_from_monday())
            % 7
    }
}

impl Default for Gregorian {
    fn default() -> Gregorian {
        Gregorian::new(Weekday::Sunday)
    }
}

impl CalendarSystem for Gregorian {
    fn week_interval(&self, at: PrimitiveDateTime) -> Option<DateInterval> {
        let offset = i64::from(self.days_into_week(at.date()));
        let start = at.date().checked_sub(Duration::days(offset))?;
        let end = start.checked_add(Duration::WEEK)?;
        DateInterval::new(start.midnight(), end.midnight())
    }

    fn start_of_month(&self, at: PrimitiveDateTime) -> Option<PrimitiveDateTime> {
        at.date().replace_day(1).ok().map(Date::midnight)
    }

    fn add(
        &self,
        unit: CalendarUnit,
        value: i64,
        to: PrimitiveDateTime,
    ) -> Option<PrimitiveDateTime> {
        let days = match unit {
            CalendarUnit::Day => value,
            CalendarUnit::WeekOfMonth => value.checked_mul(DAYS_PER_WEEK)?,
        };
        let seconds = days.checked_mul(SECONDS_PER_DAY)?;
        to.checked_add(Duration::seconds(seconds))
    }

    fn next_matching(
        &self,
        after: PrimitiveDateTime,
        matching: TimeMatch,
    ) -> Option<PrimitiveDateTime> {
        let time = Time::from_hms(matching.hour, matching.minute, matching.second).ok()?;
        let candidate = after.date().with_time(time);
        if candidate > after {
            Some(candidate)
        } else {
            after.date().next_day().map(|d| d.with_time(time))
        }
    }

    fn components(&self, at: PrimitiveDateTime) -> DateComponents {
        DateComponents {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
            minute: at.minute(),
            second: at.second(),
        }
    }
}
