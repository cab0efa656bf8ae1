use crate::calendar::{DateExt, DayPickerContext, Table, TableState};
use crate::help::Help;
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use time::Date;

/// How long to wait for input between frames while rows are animating
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub(crate) struct App {
    ctx: DayPickerContext,
    /// First day of the month being shown
    display_month: Date,
    table: TableState,
    state: AppState,
}

impl App {
    pub(crate) fn new(mut ctx: DayPickerContext, start: Date, now: Instant) -> App {
        ctx.focused = Some(start);
        App {
            ctx,
            display_month: start.first_of_month(),
            table: TableState::new(now),
            state: AppState::Picking,
        }
    }

    /// Run until the user quits, returning the date they picked, if any
    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.table.tick(Instant::now());
            self.draw(terminal)?;
            let animating = self.ctx.animate && self.table.is_animating();
            // While rows are moving, redraw on a timer instead of blocking
            if !animating || poll(FRAME_INTERVAL)? {
                self.handle_input()?;
            }
        }
        Ok(self.ctx.selected)
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

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_focus(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_focus(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_focus(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_focus(7),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('t') | KeyCode::Home => {
                    self.set_focus(self.ctx.today);
                    true
                }
                KeyCode::Char(' ') => self.toggle_selection(),
                KeyCode::Enter => {
                    if self.ctx.selected.is_none() {
                        self.toggle_selection();
                    }
                    log::info!("picked {:?}", self.ctx.selected);
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.ctx.selected = None;
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
                self.state = AppState::Picking;
                true
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

    fn move_focus(&mut self, days: i64) -> bool {
        let Some(focus) = self.ctx.focused else {
            return false;
        };
        match focus.add_days(days) {
            Ok(date) => {
                self.set_focus(date);
                true
            }
            Err(_) => false,
        }
    }

    fn previous_month(&mut self) -> bool {
        match self.display_month.previous_day() {
            Some(date) => self.focus_in_month(date.first_of_month()),
            None => false,
        }
    }

    fn next_month(&mut self) -> bool {
        match self.display_month.last_of_month().next_day() {
            Some(date) => self.focus_in_month(date),
            None => false,
        }
    }

    /// Move the focus to the same day of the month beginning on `first`,
    /// or to its last day if it is shorter
    fn focus_in_month(&mut self, first: Date) -> bool {
        let day = self
            .ctx
            .focused
            .map_or(1, Date::day)
            .min(first.last_of_month().day());
        match first.replace_day(day) {
            Ok(date) => {
                self.set_focus(date);
                true
            }
            Err(_) => false,
        }
    }

    fn set_focus(&mut self, date: Date) {
        self.ctx.focused = Some(date);
        let month = date.first_of_month();
        if month != self.display_month {
            log::debug!("showing {} {}", month.month(), month.year());
            self.display_month = month;
        }
    }

    fn toggle_selection(&mut self) -> bool {
        let Some(focus) = self.ctx.focused else {
            return false;
        };
        if self.ctx.selected == Some(focus) {
            self.ctx.selected = None;
        } else {
            self.ctx.selected = Some(focus);
        }
        true
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.ctx.styles.table);
        let table = Table::new(&self.ctx, self.display_month).with_caption();
        let (width, height) = table.required_size();
        let [table_area] = Layout::horizontal([width])
            .flex(Flex::Center)
            .areas(area);
        let [table_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(table_area);
        table.render(table_area, buf, &mut self.table);
        if self.state == AppState::Helping {
            Help(self.ctx.styles.table).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
