mod components;
mod context;
mod motion;
mod util;
mod weeks;
mod widget;
pub(crate) use self::context::{parse_first_week_contains_date, parse_week_start, DayPickerContext};
pub(crate) use self::util::DateExt;
pub(crate) use self::widget::{Table, TableState};
