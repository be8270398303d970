use super::{WeekRenderer, WeekView};
use crate::calendar::CalendarSystem;
use crate::theme::{
    OTHER_DAY_STYLE, SELECTED_DAY_STYLE, SWITCHER_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;
use time::{PrimitiveDateTime, Weekday};

/// Number of columns per day of the week
const DAY_WIDTH: u16 = 5;

/// Width of the strip in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Within a day's columns, the offset of the weekday letter, chosen to line
/// up with the ones digit of the day number
const HEADER_OFFSET: u16 = 2;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 2;

const RULE_LINE: u16 = 3;

const DAYS_LINE: u16 = 4;

/// Total number of lines taken up by the strip
const STRIP_HEIGHT: u16 = DAYS_LINE + 1;

const SWITCHER_TEXT: &str = "< >";

const ACS_HLINE: char = '─';

/// Draws the week around a [`WeekView`]'s selected date, centered in the
/// given area
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekStrip<R, C> {
    renderer: R,
    _data: PhantomData<C>,
}

impl<R, C> WeekStrip<R, C> {
    pub(crate) fn new(renderer: R) -> WeekStrip<R, C> {
        WeekStrip {
            renderer,
            _data: PhantomData,
        }
    }
}

impl<R, C> StatefulWidget for WeekStrip<R, C>
where
    C: CalendarSystem,
    R: WeekRenderer<
        C,
        Day = Span<'static>,
        Header = Span<'static>,
        Title = Span<'static>,
        Switcher = Span<'static>,
    >,
{
    type State = WeekView<C>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(layout::Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([STRIP_HEIGHT])
            .flex(layout::Flex::Center)
            .areas(area);
        let layout = state.layout(&self.renderer);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(layout.title, layout.switcher);
        for (i, header) in std::iter::zip(0u16.., layout.headers) {
            canvas.draw_header(i, header);
        }
        canvas.hline(RULE_LINE, 0, ACS_HLINE, MAIN_WIDTH);
        for (i, day) in std::iter::zip(0u16.., layout.days) {
            canvas.draw_day(i, day);
        }
    }
}

/// The default [`WeekRenderer`] for terminals: a `MM/dd` title for the
/// selected date, single-letter weekday labels, and day numbers highlighted
/// by selection and by whether they're today
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TermRenderer;

impl<C: CalendarSystem> WeekRenderer<C> for TermRenderer {
    type Day = Span<'static>;
    type Header = Span<'static>;
    type Title = Span<'static>;
    type Switcher = Span<'static>;

    fn day(&self, date: PrimitiveDateTime, view: &WeekView<C>) -> Span<'static> {
        let day = view.calendar().components(date).day;
        if view.is_selected(date) {
            Span::styled(format!("[{day:2}]"), SELECTED_DAY_STYLE)
        } else if view.is_today(date) {
            Span::styled(format!(" {day:2} "), TODAY_STYLE)
        } else {
            Span::styled(format!(" {day:2} "), OTHER_DAY_STYLE)
        }
    }

    fn header(&self, date: PrimitiveDateTime, _view: &WeekView<C>) -> Span<'static> {
        Span::styled(narrow_weekday(date.weekday()), WEEKDAY_STYLE)
    }

    // Like the day cells, the title follows the selected date rather than the
    // month
    fn title(&self, _month: PrimitiveDateTime, view: &WeekView<C>) -> Span<'static> {
        let c = view.calendar().components(view.selected());
        Span::styled(
            format!("{:02}/{:02}", u8::from(c.month), c.day),
            TITLE_STYLE,
        )
    }

    fn switcher(&self, _month: PrimitiveDateTime, _view: &WeekView<C>) -> Span<'static> {
        Span::styled(SWITCHER_TEXT, SWITCHER_STYLE)
    }
}

fn narrow_weekday(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Sunday | Weekday::Saturday => "S",
        Weekday::Monday => "M",
        Weekday::Tuesday | Weekday::Thursday => "T",
        Weekday::Wednesday => "W",
        Weekday::Friday => "F",
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: Span<'_>, switcher: Span<'_>) {
        self.mvprint(TITLE_LINE, 0, title.content, Some(title.style));
        let width = u16::try_from(switcher.width()).unwrap_or(u16::MAX);
        self.mvprint(
            TITLE_LINE,
            MAIN_WIDTH.saturating_sub(width),
            switcher.content,
            Some(switcher.style),
        );
    }

    fn draw_header(&mut self, column: u16, s: Span<'_>) {
        if let Some(x) = column_offset(column) {
            self.mvprint(HEADER_LINE, x + HEADER_OFFSET, s.content, Some(s.style));
        }
    }

    fn draw_day(&mut self, column: u16, s: Span<'_>) {
        if let Some(x) = column_offset(column) {
            self.mvprint(DAYS_LINE, x, s.content, Some(s.style));
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // strip's area, though we need to be sure that the Rect passed to
            // the Paragraph is entirely within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

fn column_offset(column: u16) -> Option<u16> {
    column.checked_mul(DAY_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Gregorian;
    use time::macros::datetime;
    use time::Weekday::*;

    fn render(view: &mut WeekView<Gregorian>, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        WeekStrip::new(TermRenderer).render(area, &mut buffer, view);
        buffer
    }

    fn style_week(expected: &mut Buffer, day_styles: [Style; 7]) {
        for (i, style) in std::iter::zip(0u16.., day_styles) {
            expected.set_style(Rect::new(i * DAY_WIDTH + HEADER_OFFSET, 2, 1, 1), WEEKDAY_STYLE);
            expected.set_style(Rect::new(i * DAY_WIDTH, 4, 4, 1), style);
        }
    }

    #[test]
    fn test_selected_is_today() {
        let mut view = WeekView::new(Gregorian::new(Sunday), datetime!(2022-03-09 10:15));
        let buffer = render(&mut view, Rect::new(0, 0, 35, 5));
        let mut expected = Buffer::with_lines([
            "03/09                           < >",
            "                                   ",
            "  S    M    T    W    T    F    S  ",
            "───────────────────────────────────",
            "  6    7    8  [ 9]  10   11   12  ",
        ]);
        expected.set_style(Rect::new(0, 0, 5, 1), TITLE_STYLE);
        expected.set_style(Rect::new(32, 0, 3, 1), SWITCHER_STYLE);
        style_week(
            &mut expected,
            [
                OTHER_DAY_STYLE,
                OTHER_DAY_STYLE,
                OTHER_DAY_STYLE,
                SELECTED_DAY_STYLE,
                OTHER_DAY_STYLE,
                OTHER_DAY_STYLE,
                OTHER_DAY_STYLE,
            ],
        );
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_across_months_monday_start() {
        let mut view = WeekView::new(Gregorian::new(Monday), datetime!(2022-03-30 10:15))
            .start_date(datetime!(2022-04-02 0:00));
        let buffer = render(&mut view, Rect::new(0, 0, 35, 5));
        let mut expected = Buffer::with_lines([
            "04/02                           < >",
            "                                   ",
            "  M    T    W    T    F    S    S  ",
            "───────────────────────────────────",
            " 28   29   30   31    1  [ 2]   3  ",
        ]);
        expected.set_style(Rect::new(0, 0, 5, 1), TITLE_STYLE);
        expected.set_style(Rect::new(32, 0, 3, 1), SWITCHER_STYLE);
        style_week(
            &mut expected,
            [
                OTHER_DAY_STYLE,
                OTHER_DAY_STYLE,
                TODAY_STYLE,
                OTHER_DAY_STYLE,
                OTHER_DAY_STYLE,
                SELECTED_DAY_STYLE,
                OTHER_DAY_STYLE,
            ],
        );
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_centered_in_larger_area() {
        let mut view = WeekView::new(Gregorian::new(Sunday), datetime!(2022-03-09 10:15));
        let buffer = render(&mut view, Rect::new(0, 0, 41, 7));
        let mut expected = Buffer::with_lines([
            "                                         ",
            "   03/09                           < >   ",
            "                                         ",
            "     S    M    T    W    T    F    S     ",
            "   ───────────────────────────────────   ",
            "     6    7    8  [ 9]  10   11   12     ",
            "                                         ",
        ]);
        expected.set_style(Rect::new(3, 1, 5, 1), TITLE_STYLE);
        expected.set_style(Rect::new(35, 1, 3, 1), SWITCHER_STYLE);
        for i in 0..7u16 {
            expected.set_style(Rect::new(3 + i * DAY_WIDTH + HEADER_OFFSET, 3, 1, 1), WEEKDAY_STYLE);
            let style = if i == 3 {
                SELECTED_DAY_STYLE
            } else {
                OTHER_DAY_STYLE
            };
            expected.set_style(Rect::new(3 + i * DAY_WIDTH, 5, 4, 1), style);
        }
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_unresolvable_week() {
        let mut view = WeekView::new(Gregorian::new(Sunday), datetime!(9999-12-31 10:15));
        let buffer = render(&mut view, Rect::new(0, 0, 35, 5));
        let mut expected = Buffer::with_lines([
            "12/31                           < >",
            "                                   ",
            "                                   ",
            "───────────────────────────────────",
            "                                   ",
        ]);
        expected.set_style(Rect::new(0, 0, 5, 1), TITLE_STYLE);
        expected.set_style(Rect::new(32, 0, 3, 1), SWITCHER_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_narrow_area_truncates() {
        let mut view = WeekView::new(Gregorian::new(Sunday), datetime!(2022-03-09 10:15));
        let buffer = render(&mut view, Rect::new(0, 0, 12, 5));
        let mut expected = Buffer::with_lines([
            "03/09       ",
            "            ",
            "  S    M    ",
            "────────────",
            "  6    7    ",
        ]);
        expected.set_style(Rect::new(0, 0, 5, 1), TITLE_STYLE);
        expected.set_style(Rect::new(2, 2, 1, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(7, 2, 1, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(0, 4, 4, 1), OTHER_DAY_STYLE);
        expected.set_style(Rect::new(5, 4, 4, 1), OTHER_DAY_STYLE);
        expected.set_style(Rect::new(10, 4, 2, 1), OTHER_DAY_STYLE);
        assert_eq!(buffer, expected);
    }
}
