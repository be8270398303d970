use crate::calendar::{CalendarSystem, Clock};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crate::weekview::{Direction, TermRenderer, WeekStrip, WeekView};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C, K> {
    view: WeekView<C>,
    clock: K,
    state: AppState,
}

impl<C: CalendarSystem, K: Clock> App<C, K> {
    pub(crate) fn new(view: WeekView<C>, clock: K) -> App<C, K> {
        App {
            view,
            clock,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            tracing::trace!(?code, ?modifiers, "key pressed");
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the key's action
    // could not be carried out
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => {
                    self.view.shift_day(Direction::Previous).is_ok()
                }
                KeyCode::Char('l') | KeyCode::Right => self.view.shift_day(Direction::Next).is_ok(),
                KeyCode::Char('k' | '[') | KeyCode::Up | KeyCode::PageUp => {
                    self.view.shift_week(Direction::Previous).is_ok()
                }
                KeyCode::Char('j' | ']') | KeyCode::Down | KeyCode::PageDown => {
                    self.view.shift_week(Direction::Next).is_ok()
                }
                KeyCode::Char(c @ '1'..='7') => c
                    .to_digit(10)
                    .and_then(|n| usize::try_from(n).ok())
                    .is_some_and(|n| self.select_nth(n - 1)),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c @ '0'..='9') => match c
                            .to_digit(10)
                            .and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.jump_to(date);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    // Selects the `i`-th (zero-based) day of the displayed week
    fn select_nth(&mut self, i: usize) -> bool {
        let Some(&date) = self.view.days().get(i) else {
            return false;
        };
        self.view.select_day(date);
        true
    }

    fn reset(&mut self) -> bool {
        match self.clock.now() {
            Ok(now) => {
                self.view.jump_to_today(now);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot jump to today");
                false
            }
        }
    }

    // Keeps the time of day of the current selection
    fn jump_to(&mut self, date: Date) {
        self.view.select_day(date.with_time(self.view.selected().time()));
    }
}

impl<C: CalendarSystem, K: Clock> Widget for &mut App<C, K> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        WeekStrip::new(TermRenderer).render(area, buf, &mut self.view);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
