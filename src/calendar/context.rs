use super::components::{Components, FooterComponent, HeadComponent, RowComponent};
use super::weeks::WeekOptions;
use crate::locale::Locale;
use crate::theme::Styles;
use std::num::ParseIntError;
use thiserror::Error;
use time::{Date, Weekday};

/// Everything the table and its components read when rendering
#[derive(Debug)]
pub(crate) struct DayPickerContext {
    pub(crate) locale: Locale,
    pub(crate) week_starts_on: Option<Weekday>,
    pub(crate) first_week_contains_date: Option<u8>,
    pub(crate) iso_week: bool,
    pub(crate) fixed_weeks: bool,
    pub(crate) hide_head: bool,
    pub(crate) show_week_number: bool,
    pub(crate) show_outside_days: bool,
    /// Play the enter animation when the displayed month changes
    pub(crate) animate: bool,
    pub(crate) today: Date,
    pub(crate) selected: Option<Date>,
    pub(crate) focused: Option<Date>,
    pub(crate) footer: Option<String>,
    pub(crate) styles: Styles,
    pub(crate) components: Components,
}

impl DayPickerContext {
    pub(crate) fn new(today: Date) -> Self {
        DayPickerContext {
            locale: Locale::default(),
            week_starts_on: None,
            first_week_contains_date: None,
            iso_week: false,
            fixed_weeks: false,
            hide_head: false,
            show_week_number: false,
            show_outside_days: false,
            animate: true,
            today,
            selected: None,
            focused: None,
            footer: None,
            styles: Styles::default(),
            components: Components::default(),
        }
    }

    pub(crate) fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub(crate) fn week_starts_on(mut self, wd: Weekday) -> Self {
        self.week_starts_on = Some(wd);
        self
    }

    pub(crate) fn first_week_contains_date(mut self, day: u8) -> Self {
        self.first_week_contains_date = Some(day);
        self
    }

    pub(crate) fn iso_week(mut self, yes: bool) -> Self {
        self.iso_week = yes;
        self
    }

    pub(crate) fn fixed_weeks(mut self, yes: bool) -> Self {
        self.fixed_weeks = yes;
        self
    }

    pub(crate) fn hide_head(mut self, yes: bool) -> Self {
        self.hide_head = yes;
        self
    }

    pub(crate) fn show_week_number(mut self, yes: bool) -> Self {
        self.show_week_number = yes;
        self
    }

    pub(crate) fn show_outside_days(mut self, yes: bool) -> Self {
        self.show_outside_days = yes;
        self
    }

    pub(crate) fn animate(mut self, yes: bool) -> Self {
        self.animate = yes;
        self
    }

    pub(crate) fn footer<S: Into<String>>(mut self, text: S) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub(crate) fn styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub(crate) fn head_component<C: HeadComponent + 'static>(mut self, head: C) -> Self {
        self.components.head = Some(Box::new(head));
        self
    }

    pub(crate) fn row_component<C: RowComponent + 'static>(mut self, row: C) -> Self {
        self.components.row = Some(Box::new(row));
        self
    }

    pub(crate) fn footer_component<C: FooterComponent + 'static>(mut self, footer: C) -> Self {
        self.components.footer = Some(Box::new(footer));
        self
    }

    pub(crate) fn week_options(&self) -> WeekOptions {
        WeekOptions {
            week_starts_on: self.week_starts_on,
            first_week_contains_date: self.first_week_contains_date,
            iso_week: self.iso_week,
            fixed_weeks: self.fixed_weeks,
            ..WeekOptions::new(self.locale)
        }
    }

    pub(crate) fn week_start(&self) -> Weekday {
        self.week_options().week_start()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("expected a day number")]
    Number(#[from] ParseIntError),
    #[error("week start must be a day number from 0 (Sunday) to 6 (Saturday), got {0}")]
    WeekStart(u8),
    #[error("first week must contain a day from 1 to 7 of January, got {0}")]
    FirstWeekContainsDate(u8),
}

/// Interpret a day number counted from Sunday = 0
pub(crate) fn weekday_from_number(n: u8) -> Result<Weekday, ConfigError> {
    match n {
        0 => Ok(Weekday::Sunday),
        1 => Ok(Weekday::Monday),
        2 => Ok(Weekday::Tuesday),
        3 => Ok(Weekday::Wednesday),
        4 => Ok(Weekday::Thursday),
        5 => Ok(Weekday::Friday),
        6 => Ok(Weekday::Saturday),
        n => Err(ConfigError::WeekStart(n)),
    }
}

pub(crate) fn validate_first_week_contains_date(day: u8) -> Result<u8, ConfigError> {
    if (1..=7).contains(&day) {
        Ok(day)
    } else {
        Err(ConfigError::FirstWeekContainsDate(day))
    }
}

/// Parse a `--week-starts-on` value
pub(crate) fn parse_week_start(s: &str) -> Result<Weekday, ConfigError> {
    weekday_from_number(s.parse::<u8>()?)
}

/// Parse a `--first-week-contains-date` value
pub(crate) fn parse_first_week_contains_date(s: &str) -> Result<u8, ConfigError> {
    validate_first_week_contains_date(s.parse::<u8>()?)
}
