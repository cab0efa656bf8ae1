use thiserror::Error;
use time::{Month, Weekday};

/// Calendar conventions and names for a language/region
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Locale {
    pub(crate) code: &'static str,
    pub(crate) week_starts_on: Weekday,
    /// Day of January that the first week of a week-numbering year must
    /// contain
    pub(crate) first_week_contains_date: u8,
    /// Abbreviated weekday names, starting from Sunday
    weekday_names: [&'static str; 7],
    month_names: [&'static str; 12],
}

impl Locale {
    pub(crate) fn lookup(code: &str) -> Result<&'static Locale, UnknownLocaleError> {
        let wanted = code.replace('_', "-");
        LOCALES
            .iter()
            .find(|loc| loc.code.eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownLocaleError(code.to_owned()))
    }

    pub(crate) fn weekday_short(&self, wd: Weekday) -> &'static str {
        self.weekday_names[usize::from(wd.number_days_from_sunday())]
    }

    pub(crate) fn month_name(&self, month: Month) -> &'static str {
        self.month_names[usize::from(u8::from(month) - 1)]
    }
}

impl Default for Locale {
    fn default() -> Locale {
        EN_US
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown locale {0:?}")]
pub(crate) struct UnknownLocaleError(pub(crate) String);

const ENGLISH_WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) const EN_US: Locale = Locale {
    code: "en-US",
    week_starts_on: Weekday::Sunday,
    first_week_contains_date: 1,
    weekday_names: ENGLISH_WEEKDAYS,
    month_names: ENGLISH_MONTHS,
};

pub(crate) const EN_GB: Locale = Locale {
    code: "en-GB",
    week_starts_on: Weekday::Monday,
    first_week_contains_date: 4,
    weekday_names: ENGLISH_WEEKDAYS,
    month_names: ENGLISH_MONTHS,
};

pub(crate) const DE: Locale = Locale {
    code: "de",
    week_starts_on: Weekday::Monday,
    first_week_contains_date: 4,
    weekday_names: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    month_names: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
};

pub(crate) const FR: Locale = Locale {
    code: "fr",
    week_starts_on: Weekday::Monday,
    first_week_contains_date: 4,
    weekday_names: ["di", "lu", "ma", "me", "je", "ve", "sa"],
    month_names: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
};

pub(crate) const ES: Locale = Locale {
    code: "es",
    week_starts_on: Weekday::Monday,
    first_week_contains_date: 1,
    weekday_names: ["do", "lu", "ma", "mi", "ju", "vi", "sá"],
    month_names: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
};

pub(crate) const JA: Locale = Locale {
    code: "ja",
    week_starts_on: Weekday::Sunday,
    first_week_contains_date: 1,
    weekday_names: ["日", "月", "火", "水", "木", "金", "土"],
    month_names: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
};

static LOCALES: &[Locale] = &[EN_US, EN_GB, DE, FR, ES, JA];
