use super::{CalendarSystem, DateInterval, TimeMatch};
use std::iter::successors;
use time::PrimitiveDateTime;

/// Number of weekday labels shown above the strip.  Only used for slicing
/// the header row; the length of a week is up to the calendar.
pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Returns the dates of the week containing `anchor`, in order.
///
/// An empty `Vec` is returned if the calendar cannot resolve the week.
pub(crate) fn week_dates<C>(calendar: &C, anchor: PrimitiveDateTime) -> Vec<PrimitiveDateTime>
where
    C: CalendarSystem + ?Sized,
{
    resolve_week(calendar, anchor)
        .map(|week| generate_days(calendar, week))
        .unwrap_or_default()
}

fn resolve_week<C>(calendar: &C, anchor: PrimitiveDateTime) -> Option<DateInterval>
where
    C: CalendarSystem + ?Sized,
{
    let first_week = calendar.week_interval(anchor)?;
    // The week holding the final instant of `first_week` must also resolve,
    // or else the week runs off the edge of the calendar.
    calendar.week_interval(first_week.last_instant()?)?;
    DateInterval::new(first_week.start(), first_week.end())
}

/// Steps from the start of `interval` to each following date-time with the
/// same hour, minute, and second, stopping at the end of the interval
fn generate_days<C>(calendar: &C, interval: DateInterval) -> Vec<PrimitiveDateTime>
where
    C: CalendarSystem + ?Sized,
{
    let matching = TimeMatch::from(calendar.components(interval.start()));
    successors(Some(interval.start()), |&d| {
        calendar.next_matching(d, matching)
    })
    .take_while(|&d| interval.contains(d))
    .collect()
}
