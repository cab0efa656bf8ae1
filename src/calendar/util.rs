use super::weeks::OutOfTimeError;
use std::iter::successors;
use time::{Date, Duration, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Position of the weekday in a week that begins on `week_start`
    fn index_from(&self, week_start: Weekday) -> u8;

    /// The seven weekdays in display order for a week beginning on `self`
    fn week_order(self) -> [Weekday; DAYS_IN_WEEK];
}

impl WeekdayExt for Weekday {
    fn index_from(&self, week_start: Weekday) -> u8 {
        (self.number_days_from_sunday() + 7 - week_start.number_days_from_sunday()) % 7
    }

    fn week_order(self) -> [Weekday; DAYS_IN_WEEK] {
        let mut wd = self;
        std::array::from_fn(|_| {
            let r = wd;
            wd = wd.next();
            r
        })
    }
}

pub(crate) trait DateExt: Sized {
    fn first_of_month(self) -> Self;
    fn last_of_month(self) -> Self;
    fn start_of_week(self, week_start: Weekday) -> Result<Self, OutOfTimeError>;
    fn end_of_week(self, week_start: Weekday) -> Result<Self, OutOfTimeError>;
    fn add_days(self, n: i64) -> Result<Self, OutOfTimeError>;
}

impl DateExt for Date {
    fn first_of_month(self) -> Date {
        iter_days_before(self)
            .take(usize::from(self.day() - 1))
            .last()
            .unwrap_or(self)
    }

    fn last_of_month(self) -> Date {
        iter_days_after(self)
            .take_while(|d| d.month() == self.month())
            .last()
            .unwrap_or(self)
    }

    fn start_of_week(self, week_start: Weekday) -> Result<Date, OutOfTimeError> {
        self.add_days(-i64::from(self.weekday().index_from(week_start)))
    }

    fn end_of_week(self, week_start: Weekday) -> Result<Date, OutOfTimeError> {
        self.add_days(6 - i64::from(self.weekday().index_from(week_start)))
    }

    fn add_days(self, n: i64) -> Result<Date, OutOfTimeError> {
        self.checked_add(Duration::days(n)).ok_or(OutOfTimeError)
    }
}

pub(crate) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(crate) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_index_from() {
        assert_eq!(Sunday.index_from(Sunday), 0);
        assert_eq!(Saturday.index_from(Sunday), 6);
        assert_eq!(Sunday.index_from(Monday), 6);
        assert_eq!(Monday.index_from(Monday), 0);
        assert_eq!(Tuesday.index_from(Saturday), 3);
    }

    #[test]
    fn test_week_order() {
        assert_eq!(
            Monday.week_order(),
            [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
        );
        assert_eq!(
            Saturday.week_order(),
            [Saturday, Sunday, Monday, Tuesday, Wednesday, Thursday, Friday]
        );
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(date!(2024 - 02 - 17).first_of_month(), date!(2024 - 02 - 01));
        assert_eq!(date!(2024 - 02 - 17).last_of_month(), date!(2024 - 02 - 29));
        assert_eq!(date!(2023 - 02 - 01).last_of_month(), date!(2023 - 02 - 28));
        assert_eq!(date!(2023 - 12 - 31).last_of_month(), date!(2023 - 12 - 31));
    }

    #[test]
    fn test_week_bounds() {
        // A Thursday
        let d = date!(2023 - 11 - 16);
        assert_eq!(d.start_of_week(Sunday), Ok(date!(2023 - 11 - 12)));
        assert_eq!(d.end_of_week(Sunday), Ok(date!(2023 - 11 - 18)));
        assert_eq!(d.start_of_week(Monday), Ok(date!(2023 - 11 - 13)));
        assert_eq!(d.end_of_week(Monday), Ok(date!(2023 - 11 - 19)));
        assert_eq!(d.start_of_week(Thursday), Ok(d));
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(Date::MAX.end_of_week(Monday), Err(OutOfTimeError));
    }
}
