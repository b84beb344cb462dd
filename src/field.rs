use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::error::CronError;

/// One unit of a recurrence expression, used for error reporting and to
/// carry each field's natural range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    DayOfWeek,
    NthWeek,
    Month,
    Year,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::DayOfWeek => "day-of-week",
            Self::NthWeek => "nth-week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// The sorted set of values one field may take, with an explicit marker for
/// degenerate (single-value) fields.
///
/// Step syntax is literal-range: `*/n` selects every value in the natural
/// range divisible by `n`, so `*/7` over days 1-31 yields {7, 14, 21, 28},
/// not "every 7th day from the anchor".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    values: Vec<i16>,
    fixed: Option<i16>,
}

impl FieldSet {
    /// Parse a sub-expression against the field's natural range.
    ///
    /// An empty result is a parse error here, never a runtime condition.
    pub fn parse(
        kind: FieldKind,
        text: &str,
        range: RangeInclusive<i16>,
    ) -> Result<Self, CronError> {
        let values = parse_values(kind, text, range)?;
        if values.is_empty() {
            return Err(CronError::parse(kind.name(), text));
        }
        Ok(Self::from_values(values))
    }

    /// Build a set from already-resolved values (the day resolver's output,
    /// which may legitimately be empty for a given month).
    pub(crate) fn from_values(values: Vec<i16>) -> Self {
        let fixed = match values.as_slice() {
            [only] => Some(*only),
            _ => None,
        };
        Self { values, fixed }
    }

    pub fn values(&self) -> &[i16] {
        &self.values
    }

    pub fn contains(&self, value: i16) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// The single valid value, iff the set is degenerate. Fixed fields never
    /// self-advance; they always delegate an increment to their parent unit.
    pub fn fixed(&self) -> Option<i16> {
        self.fixed
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Nearest value strictly ahead of `current` in direction `sign`.
    pub fn step_from(&self, current: i16, sign: i8) -> Option<i16> {
        if sign > 0 {
            self.values.iter().copied().find(|&v| v > current)
        } else {
            self.values.iter().rev().copied().find(|&v| v < current)
        }
    }

    /// Wrap target when the set is exhausted in direction `sign`: the first
    /// element going forward, the last going backward.
    pub fn boundary(&self, sign: i8) -> Option<i16> {
        if sign > 0 {
            self.values.first().copied()
        } else {
            self.values.last().copied()
        }
    }
}

/// Resolve a sub-expression to raw values within `range`. Supported forms:
/// integer literal, `*`, `a,b,c`, `a-b`, `*/n`.
pub(crate) fn parse_values(
    kind: FieldKind,
    text: &str,
    range: RangeInclusive<i16>,
) -> Result<Vec<i16>, CronError> {
    let err = || CronError::parse(kind.name(), text);

    let raw: Vec<i16> = if let Ok(value) = text.parse::<i16>() {
        vec![value]
    } else if text == "*" {
        range.clone().collect()
    } else if let Some(step) = text.strip_prefix("*/") {
        let step: i16 = step.parse().map_err(|_| err())?;
        if step <= 0 {
            return Err(err());
        }
        range.clone().filter(|v| v % step == 0).collect()
    } else if text.contains(',') {
        text.split(',')
            .map(|part| part.parse::<i16>().map_err(|_| err()))
            .collect::<Result<_, _>>()?
    } else if let Some((start, end)) = text.split_once('-') {
        let start: i16 = start.parse().map_err(|_| err())?;
        let end: i16 = end.parse().map_err(|_| err())?;
        (start..=end).collect()
    } else {
        return Err(err());
    };

    // Values outside the natural range are dropped, not errors; the caller
    // decides whether an empty set is acceptable. The modulo reduction pins
    // every stored value below the field's carry point.
    let carry_point = *range.end() + 1;
    let normalized: BTreeSet<i16> = raw
        .into_iter()
        .filter(|v| range.contains(v))
        .map(|v| v % carry_point)
        .collect();
    Ok(normalized.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minute(text: &str) -> Result<FieldSet, CronError> {
        FieldSet::parse(FieldKind::Minute, text, 0..=59)
    }

    fn dom(text: &str) -> Result<FieldSet, CronError> {
        FieldSet::parse(FieldKind::DayOfMonth, text, 1..=31)
    }

    #[test]
    fn literal_is_fixed() {
        let set = minute("30").unwrap();
        assert_eq!(set.values(), &[30]);
        assert_eq!(set.fixed(), Some(30));
    }

    #[test]
    fn star_spans_natural_range() {
        let set = minute("*").unwrap();
        assert_eq!(set.values().len(), 60);
        assert_eq!(set.values().first(), Some(&0));
        assert_eq!(set.values().last(), Some(&59));
        assert!(!set.is_fixed());
    }

    #[test]
    fn step_selects_range_multiples() {
        assert_eq!(minute("*/15").unwrap().values(), &[0, 15, 30, 45]);
        // Day ranges start at 1, so 0 is never produced.
        assert_eq!(dom("*/7").unwrap().values(), &[7, 14, 21, 28]);
        assert_eq!(dom("*/2").unwrap().values().len(), 15);
    }

    #[test]
    fn list_is_sorted_and_deduplicated() {
        let set = dom("20,11,13,11").unwrap();
        assert_eq!(set.values(), &[11, 13, 20]);
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(dom("20-22").unwrap().values(), &[20, 21, 22]);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(minute("61").is_err());
        assert!(dom("0").is_err());
        assert!(dom("32").is_err());
    }

    #[test]
    fn list_values_outside_range_are_dropped() {
        // 40 falls outside 1-31; the rest survive.
        let set = dom("10,40,20").unwrap();
        assert_eq!(set.values(), &[10, 20]);
    }

    #[test]
    fn normalized_values_stay_in_natural_range() {
        for text in ["*", "*/7", "20-22", "10,40,20", "31"] {
            let set = dom(text).unwrap();
            assert!(
                set.values().iter().all(|v| (1..=31).contains(v)),
                "{text} produced {:?}",
                set.values()
            );
        }
    }

    #[test]
    fn malformed_syntax_is_rejected() {
        assert!(minute("x").is_err());
        assert!(minute("*/0").is_err());
        assert!(minute("*/x").is_err());
        assert!(dom("5-2").is_err()); // empty range
        assert!(dom("1,two").is_err());
    }

    #[test]
    fn parse_error_names_field_and_text() {
        let err = minute("bogus").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("minute"));
        assert!(message.contains("bogus"));
    }

    #[test]
    fn step_from_finds_nearest_in_direction() {
        let set = dom("11,13,20").unwrap();
        assert_eq!(set.step_from(10, 1), Some(11));
        assert_eq!(set.step_from(11, 1), Some(13));
        assert_eq!(set.step_from(20, 1), None);
        assert_eq!(set.step_from(12, -1), Some(11));
        assert_eq!(set.step_from(11, -1), None);
    }

    #[test]
    fn boundary_wraps_by_direction() {
        let set = dom("11,13,20").unwrap();
        assert_eq!(set.boundary(1), Some(11));
        assert_eq!(set.boundary(-1), Some(20));
    }
}
