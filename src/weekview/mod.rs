mod widget;
pub(crate) use self::widget::{TermRenderer, WeekStrip};
use crate::calendar::{week_dates, CalendarSystem, CalendarUnit, DAYS_IN_WEEK};
use thiserror::Error;
use time::PrimitiveDateTime;

/// The selected date of a week strip, plus what's needed to derive the week
/// shown around it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekView<C> {
    calendar: C,
    today: PrimitiveDateTime,
    selected: PrimitiveDateTime,
}

impl<C: CalendarSystem> WeekView<C> {
    pub(crate) fn new(calendar: C, today: PrimitiveDateTime) -> Self {
        WeekView {
            calendar,
            today,
            selected: today,
        }
    }

    pub(crate) fn start_date(mut self, date: PrimitiveDateTime) -> Self {
        self.selected = date;
        self
    }

    pub(crate) fn calendar(&self) -> &C {
        &self.calendar
    }

    pub(crate) fn selected(&self) -> PrimitiveDateTime {
        self.selected
    }

    pub(crate) fn is_selected(&self, date: PrimitiveDateTime) -> bool {
        self.calendar.is_same_day(date, self.selected)
    }

    pub(crate) fn is_today(&self, date: PrimitiveDateTime) -> bool {
        self.calendar.is_same_day(date, self.today)
    }

    pub(crate) fn select_day(&mut self, date: PrimitiveDateTime) {
        tracing::debug!(%date, "selecting day");
        self.selected = date;
    }

    pub(crate) fn jump_to_today(&mut self, today: PrimitiveDateTime) {
        self.today = today;
        self.select_day(today);
    }

    pub(crate) fn shift_week(&mut self, direction: Direction) -> Result<(), OutOfTimeError> {
        self.shift(CalendarUnit::WeekOfMonth, direction)
    }

    pub(crate) fn shift_day(&mut self, direction: Direction) -> Result<(), OutOfTimeError> {
        self.shift(CalendarUnit::Day, direction)
    }

    fn shift(&mut self, unit: CalendarUnit, direction: Direction) -> Result<(), OutOfTimeError> {
        match self.calendar.add(unit, direction.sign(), self.selected) {
            Some(date) => {
                tracing::debug!(from = %self.selected, to = %date, ?unit, "shifting selection");
                self.selected = date;
                Ok(())
            }
            None => {
                tracing::warn!(from = %self.selected, ?unit, ?direction, "cannot shift selection");
                Err(OutOfTimeError)
            }
        }
    }

    /// The dates of the week containing the selected date
    pub(crate) fn days(&self) -> Vec<PrimitiveDateTime> {
        week_dates(&self.calendar, self.selected)
    }

    /// The start of the selected date's month
    pub(crate) fn month(&self) -> PrimitiveDateTime {
        self.calendar
            .start_of_month(self.selected)
            .unwrap_or(self.selected)
    }

    pub(crate) fn layout<R: WeekRenderer<C>>(
        &self,
        renderer: &R,
    ) -> WeekLayout<R::Day, R::Header, R::Title, R::Switcher> {
        let month = self.month();
        let days = self.days();
        WeekLayout {
            title: renderer.title(month, self),
            switcher: renderer.switcher(month, self),
            headers: days
                .iter()
                .take(DAYS_IN_WEEK)
                .map(|&d| renderer.header(d, self))
                .collect(),
            days: days.iter().map(|&d| renderer.day(d, self)).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn sign(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// Produces the pieces of a week strip.  Each method receives the date it is
/// drawing along with the view, so that selection and "today" can be
/// consulted.
pub(crate) trait WeekRenderer<C> {
    type Day;
    type Header;
    type Title;
    type Switcher;

    /// One cell per day of the displayed week
    fn day(&self, date: PrimitiveDateTime, view: &WeekView<C>) -> Self::Day;

    /// One weekday label per column
    fn header(&self, date: PrimitiveDateTime, view: &WeekView<C>) -> Self::Header;

    /// `month` is the start of the selected date's month
    fn title(&self, month: PrimitiveDateTime, view: &WeekView<C>) -> Self::Title;

    fn switcher(&self, month: PrimitiveDateTime, view: &WeekView<C>) -> Self::Switcher;
}

/// The rendered pieces of a week strip, ready to be laid out
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekLayout<D, H, T, S> {
    pub(crate) title: T,
    pub(crate) switcher: S,
    pub(crate) headers: Vec<H>,
    pub(crate) days: Vec<D>,
}
