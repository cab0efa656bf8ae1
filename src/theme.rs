use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const CAPTION_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightBlue);

pub(crate) const FOCUSED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const OUTSIDE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const FOOTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::ITALIC);

/// Per-element styles for the calendar table
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Styles {
    pub(crate) table: Style,
    pub(crate) caption: Style,
    pub(crate) head: Style,
    pub(crate) head_cell: Style,
    pub(crate) week_number: Style,
    pub(crate) row: Style,
    pub(crate) day: Style,
    pub(crate) day_today: Style,
    pub(crate) day_selected: Style,
    pub(crate) day_focused: Style,
    pub(crate) day_outside: Style,
    pub(crate) footer: Style,
}

impl Default for Styles {
    fn default() -> Styles {
        Styles {
            table: BASE_STYLE,
            caption: CAPTION_STYLE,
            head: BASE_STYLE,
            head_cell: WEEKDAY_STYLE,
            week_number: WEEK_NUMBER_STYLE,
            row: BASE_STYLE,
            day: Style::new(),
            day_today: TODAY_STYLE,
            day_selected: SELECTED_STYLE,
            day_focused: FOCUSED_STYLE,
            day_outside: OUTSIDE_STYLE,
            footer: FOOTER_STYLE,
        }
    }
}

impl Styles {
    /// Styles that leave the terminal's colors alone, marking days only with
    /// text attributes
    pub(crate) fn monochrome() -> Styles {
        Styles {
            table: Style::new(),
            caption: Style::new().add_modifier(Modifier::BOLD),
            head: Style::new(),
            head_cell: Style::new(),
            week_number: Style::new(),
            row: Style::new(),
            day: Style::new(),
            day_today: Style::new().add_modifier(Modifier::BOLD),
            day_selected: Style::new().add_modifier(Modifier::UNDERLINED),
            day_focused: Style::new().add_modifier(Modifier::REVERSED),
            day_outside: Style::new(),
            footer: Style::new(),
        }
    }
}
