use jiff::civil::Date;

use crate::calendar;
use crate::error::CronError;
use crate::expr::CronExpr;
use crate::field::{parse_values, FieldKind, FieldSet};

/// Resolve the effective set of valid days for one specific month.
///
/// Day-of-month and nth-week are re-resolved against the month's actual
/// ceilings, then each candidate day is kept only if its ISO weekday and its
/// nth-occurrence-in-month both satisfy their option sets.
///
/// Unlike field parsing, an empty result here is legitimate: asking for the
/// 5th Friday of a month that has four is not an error, the search engine
/// skips such months.
pub(crate) fn resolve_days(expr: &CronExpr, year: i16, month: i8) -> Result<FieldSet, CronError> {
    let max_days = i16::from(calendar::days_in_month(year, month));
    let max_weeks = i16::from(calendar::weeks_in_month(year, month));

    let dom = parse_values(FieldKind::DayOfMonth, &expr.day_of_month, 1..=max_days)?;
    let nth = FieldSet::from_values(parse_values(
        FieldKind::NthWeek,
        &expr.nth_week,
        1..=max_weeks,
    )?);

    let mut days = Vec::with_capacity(dom.len());
    for day in dom {
        let date = Date::new(year, month, day as i8).expect("day within month");
        let weekday = i16::from(calendar::iso_weekday(date));
        let occurrence = i16::from(calendar::nth_weekday_occurrence(date));
        if expr.day_of_week.contains(weekday) && nth.contains(occurrence) {
            days.push(day);
        }
    }
    Ok(FieldSet::from_values(days))
}
