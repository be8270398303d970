use time::{Duration, PrimitiveDateTime};

/// A half-open span of time, `[start, end)`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DateInterval {
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
}

impl DateInterval {
    /// Returns `None` if `end` precedes `start`
    pub(crate) fn new(start: PrimitiveDateTime, end: PrimitiveDateTime) -> Option<DateInterval> {
        (start <= end).then_some(DateInterval { start, end })
    }

    pub(crate) fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    pub(crate) fn end(&self) -> PrimitiveDateTime {
        self.end
    }

    pub(crate) fn contains(&self, at: PrimitiveDateTime) -> bool {
        self.start <= at && at < self.end
    }

    /// The last representable instant inside the interval, one nanosecond
    /// before its end.  `None` for an empty interval.
    pub(crate) fn last_instant(&self) -> Option<PrimitiveDateTime> {
        self.end
            .checked_sub(Duration::NANOSECOND)
            .filter(|&t| t >= self.start)
    }
}
