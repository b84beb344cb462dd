use std::fmt;

use crate::error::CronError;
use crate::field::{FieldKind, FieldSet};

/// Widest number of calendar weeks any month spans; the per-month ceiling
/// comes from [`crate::calendar::weeks_in_month`].
pub(crate) const MAX_WEEKS: i16 = 6;

/// A parsed five-field cron expression: minute, hour, day-of-month, month,
/// day-of-week with optional `#nth` suffix.
///
/// Parsed once at construction and immutable thereafter. Minute, hour, month
/// and day-of-week option sets have static natural ranges and are resolved
/// here; day-of-month and nth-week depend on the calendar and keep their raw
/// text for per-month resolution by the day resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    raw: String,
    pub(crate) minute: FieldSet,
    pub(crate) hour: FieldSet,
    pub(crate) month: FieldSet,
    pub(crate) day_of_month: String,
    pub(crate) day_of_week: FieldSet,
    pub(crate) nth_week: String,
    pub(crate) fixed_day: Option<i16>,
}

impl CronExpr {
    /// Parse an expression like `"0 3 * * 2#1"`.
    pub fn parse(input: &str) -> Result<Self, CronError> {
        let raw = input.trim();
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(CronError::parse("expression", raw));
        }

        let minute = FieldSet::parse(FieldKind::Minute, fields[0], 0..=59)?;
        let hour = FieldSet::parse(FieldKind::Hour, fields[1], 0..=23)?;
        let month = FieldSet::parse(FieldKind::Month, fields[3], 1..=12)?;
        let (dow_text, nth_text) = split_day_of_week(fields[4])?;

        // Calendar-dependent fields are validated against their widest
        // possible ranges now so malformed input fails at construction, then
        // re-resolved against the actual month by the day resolver.
        let widest_dom = FieldSet::parse(FieldKind::DayOfMonth, fields[2], 1..=31)?;
        let day_of_week = FieldSet::parse(FieldKind::DayOfWeek, dow_text, 1..=7)?;
        FieldSet::parse(FieldKind::NthWeek, nth_text, 1..=MAX_WEEKS)?;

        // The day is jointly fixed only when day-of-month pins a single value
        // and neither weekday constraint can thin it further.
        let fixed_day = if dow_text == "*" && nth_text == "*" {
            widest_dom.fixed()
        } else {
            None
        };

        Ok(Self {
            raw: raw.to_string(),
            minute,
            hour,
            month,
            day_of_month: fields[2].to_string(),
            day_of_week,
            nth_week: nth_text.to_string(),
            fixed_day,
        })
    }

    /// The expression text as given (whitespace-trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The minute option set.
    pub fn minute(&self) -> &FieldSet {
        &self.minute
    }

    /// The hour option set.
    pub fn hour(&self) -> &FieldSet {
        &self.hour
    }

    /// The month option set.
    pub fn month(&self) -> &FieldSet {
        &self.month
    }

    /// The weekday option set (ISO numbering, Monday is 1).
    pub fn day_of_week(&self) -> &FieldSet {
        &self.day_of_week
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split the day-of-week field into weekday and nth-week sub-expressions.
/// `2#1` means "1st Tuesday"; a bare weekday or `*` implies any week.
fn split_day_of_week(text: &str) -> Result<(&str, &str), CronError> {
    if text == "*" || text.parse::<i16>().is_ok() {
        return Ok((text, "*"));
    }
    if let Some((dow, nth)) = text.split_once('#') {
        return Ok((dow, nth));
    }
    Err(CronError::unsupported("day-of-week", text))
}
