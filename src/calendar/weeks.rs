use super::util::{iter_days_after, DateExt, DAYS_IN_WEEK};
use crate::locale::Locale;
use thiserror::Error;
use time::{Date, Month, Weekday};

/// Number of rows shown when the grid is asked to keep a constant height
pub(crate) const FIXED_WEEK_COUNT: usize = 6;

/// Rules for laying out and numbering the weeks of a month
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekOptions {
    pub(crate) locale: Locale,
    /// Overrides the locale's first day of the week
    pub(crate) week_starts_on: Option<Weekday>,
    /// Overrides the locale's first-week rule
    pub(crate) first_week_contains_date: Option<u8>,
    /// Use ISO 8601 weeks (starting Monday) and week numbers
    pub(crate) iso_week: bool,
    /// Pad the month to [`FIXED_WEEK_COUNT`] weeks
    pub(crate) fixed_weeks: bool,
}

impl WeekOptions {
    pub(crate) fn new(locale: Locale) -> WeekOptions {
        WeekOptions {
            locale,
            week_starts_on: None,
            first_week_contains_date: None,
            iso_week: false,
            fixed_weeks: false,
        }
    }

    /// The day the displayed weeks begin on
    pub(crate) fn week_start(&self) -> Weekday {
        if self.iso_week {
            Weekday::Monday
        } else {
            self.week_starts_on.unwrap_or(self.locale.week_starts_on)
        }
    }

    fn first_week_contains_date(&self) -> u8 {
        self.first_week_contains_date
            .unwrap_or(self.locale.first_week_contains_date)
            .clamp(1, 7)
    }

    pub(crate) fn week_number(&self, date: Date) -> Result<u8, OutOfTimeError> {
        if self.iso_week {
            Ok(date.iso_week())
        } else {
            locale_week_number(date, self.week_start(), self.first_week_contains_date())
        }
    }
}

/// A run of consecutive dates sharing a week number
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthWeek {
    pub(crate) week_number: u8,
    pub(crate) dates: Vec<Date>,
}

impl MonthWeek {
    pub(crate) fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }
}

/// Returns the weeks to display for the month containing `display_month`.
///
/// The first week contains the first of the month and the last one (before
/// any fixed-weeks padding) contains the last of the month; weeks are always
/// whole, so days from the adjacent months fill out the ends.
pub(crate) fn month_weeks(
    display_month: Date,
    opts: &WeekOptions,
) -> Result<Vec<MonthWeek>, OutOfTimeError> {
    let mut weeks = days_to_weeks(
        display_month.first_of_month(),
        display_month.last_of_month(),
        opts,
    )?;
    if opts.fixed_weeks && weeks.len() < FIXED_WEEK_COUNT {
        let missing = FIXED_WEEK_COUNT - weeks.len();
        let last_date = weeks
            .last()
            .and_then(MonthWeek::last_date)
            .ok_or(OutOfTimeError)?;
        let from = last_date.add_days(1)?;
        let to = last_date.add_days(7 * i64::try_from(missing).map_err(|_| OutOfTimeError)?)?;
        let mut extra = days_to_weeks(from, to, opts)?;
        log::trace!(
            "padding {} {} with {} extra week(s)",
            display_month.month(),
            display_month.year(),
            extra.len()
        );
        weeks.append(&mut extra);
    }
    Ok(weeks)
}

/// Group every day from the start of the week containing `from` to the end of
/// the week containing `to` by week number
fn days_to_weeks(
    from: Date,
    to: Date,
    opts: &WeekOptions,
) -> Result<Vec<MonthWeek>, OutOfTimeError> {
    let week_start = opts.week_start();
    let start = from.start_of_week(week_start)?;
    let end = to.end_of_week(week_start)?;
    let days = std::iter::once(start).chain(iter_days_after(start).take_while(|&d| d <= end));
    let mut weeks: Vec<MonthWeek> = Vec::with_capacity(FIXED_WEEK_COUNT);
    for date in days {
        let week_number = opts.week_number(date)?;
        if let Some(existing) = weeks.iter_mut().find(|w| w.week_number == week_number) {
            existing.dates.push(date);
        } else {
            let mut dates = Vec::with_capacity(DAYS_IN_WEEK);
            dates.push(date);
            weeks.push(MonthWeek { week_number, dates });
        }
    }
    Ok(weeks)
}

/// Returns the week-numbering year of `date`: the year whose first week (the
/// week containing January `first_week_contains_date`) most recently began on
/// or before `date`
pub(crate) fn week_number_year(
    date: Date,
    week_start: Weekday,
    first_week_contains_date: u8,
) -> Result<i32, OutOfTimeError> {
    let year = date.year();
    if let Ok(next_start) = first_week_start(year + 1, week_start, first_week_contains_date) {
        if date >= next_start {
            return Ok(year + 1);
        }
    }
    if date >= first_week_start(year, week_start, first_week_contains_date)? {
        Ok(year)
    } else {
        Ok(year - 1)
    }
}

/// Returns the week number of `date` where weeks begin on `week_start` and
/// week 1 is the week containing January `first_week_contains_date`
pub(crate) fn locale_week_number(
    date: Date,
    week_start: Weekday,
    first_week_contains_date: u8,
) -> Result<u8, OutOfTimeError> {
    let year = week_number_year(date, week_start, first_week_contains_date)?;
    let year_start = first_week_start(year, week_start, first_week_contains_date)?;
    let days = (date.start_of_week(week_start)? - year_start).whole_days();
    u8::try_from(days / 7 + 1).map_err(|_| OutOfTimeError)
}

fn first_week_start(
    year: i32,
    week_start: Weekday,
    first_week_contains_date: u8,
) -> Result<Date, OutOfTimeError> {
    Date::from_calendar_date(year, Month::January, first_week_contains_date)
        .map_err(|_| OutOfTimeError)?
        .start_of_week(week_start)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
