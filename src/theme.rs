use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SWITCHER_STYLE: Style = BASE_STYLE;

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_DAY_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::White)
    .add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = Style::new().fg(Color::LightGreen).bg(Color::Black);

pub(crate) const OTHER_DAY_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Black);

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
