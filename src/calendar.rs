//! Pure calendar helpers backing the day resolver.

use jiff::civil::Date;

/// Number of days in a month. `month` must be 1-12.
pub fn days_in_month(year: i16, month: i8) -> i8 {
    first_of_month(year, month).days_in_month()
}

/// ISO weekday number: Monday=1 .. Sunday=7.
pub fn iso_weekday(date: Date) -> i8 {
    date.weekday().to_monday_one_offset()
}

/// 1-based count of how many times the date's weekday has occurred within
/// its month, up to and including the date. Day 1-7 is the 1st occurrence,
/// day 8-14 the 2nd, and so on.
pub fn nth_weekday_occurrence(date: Date) -> i8 {
    (date.day() + 6) / 7
}

/// Number of Sunday-started calendar weeks the month spans, counting partial
/// first and last weeks.
pub fn weeks_in_month(year: i16, month: i8) -> i8 {
    let lead = iso_weekday(first_of_month(year, month)) % 7;
    (days_in_month(year, month) + lead + 6) / 7
}

fn first_of_month(year: i16, month: i8) -> Date {
    // Callers validate month against 1-12 before resolving days.
    Date::new(year, month, 1).expect("month within 1-12")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i16, month: i8, day: i8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(2022, 2), 28);
        assert_eq!(days_in_month(2022, 7), 31);
        assert_eq!(days_in_month(2022, 8), 31);
        assert_eq!(days_in_month(2022, 9), 30);
        assert_eq!(days_in_month(2022, 12), 31);
    }

    #[test]
    fn iso_weekday_is_monday_one() {
        // 2022-08-01 was a Monday, 2022-08-07 a Sunday.
        assert_eq!(iso_weekday(date(2022, 8, 1)), 1);
        assert_eq!(iso_weekday(date(2022, 8, 7)), 7);
        assert_eq!(iso_weekday(date(2022, 8, 9)), 2);
    }

    #[test]
    fn nth_weekday_occurrence_counts_weeks_of_seven_days() {
        for day in 1..=7 {
            assert_eq!(nth_weekday_occurrence(date(2022, 8, day)), 1);
        }
        assert_eq!(nth_weekday_occurrence(date(2022, 8, 8)), 2);
        assert_eq!(nth_weekday_occurrence(date(2022, 8, 9)), 2);
        assert_eq!(nth_weekday_occurrence(date(2022, 8, 31)), 5);
    }

    #[test]
    fn weeks_in_month_counts_partial_weeks() {
        let expected = [6, 5, 5, 5, 5, 5, 6, 5, 5, 6, 5, 5];
        for (month, weeks) in (1..=12).zip(expected) {
            assert_eq!(weeks_in_month(2022, month), weeks, "month {month}");
        }
    }
}
