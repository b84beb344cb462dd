//! The occurrence search engine: a single mutable candidate timestamp
//! advanced by cascading increments under a direction sign.

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::Zoned;

use crate::days::resolve_days;
use crate::error::CronError;
use crate::expr::CronExpr;
use crate::field::FieldSet;

/// Year horizon bounding every search. Walking a candidate outside this
/// range is the global not-found condition, which keeps the match loop
/// finite for calendar-impossible expressions.
pub const YEAR_MIN: i16 = 2000;
pub const YEAR_MAX: i16 = 2099;

/// A candidate timestamp at minute precision. Plain integers rather than a
/// jiff datetime so intermediate states (day 30 while sitting in February)
/// stay representable during the cascade; field order gives chronological
/// `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    year: i16,
    month: i16,
    day: i16,
    hour: i16,
    minute: i16,
}

impl Candidate {
    fn from_datetime(dt: DateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month().into(),
            day: dt.day().into(),
            hour: dt.hour().into(),
            minute: dt.minute().into(),
        }
    }

    /// Only called on candidates that passed the membership check, whose
    /// day therefore exists in the month.
    fn to_datetime(self) -> DateTime {
        Date::new(self.year, self.month as i8, self.day as i8)
            .expect("matched candidate is a valid date")
            .at(self.hour as i8, self.minute as i8, 0, 0)
    }

    fn start_of_day(self) -> Self {
        Self {
            hour: 0,
            minute: 0,
            ..self
        }
    }
}

/// Bidirectional occurrence search over a parsed expression.
///
/// Owns the anchor, the last-returned occurrence and the per-month day set;
/// `next()` yields strictly increasing timestamps across calls, `prev()`
/// strictly decreasing ones. A failed call leaves the search state where it
/// was.
#[derive(Debug, Clone)]
pub struct Scheduler {
    expr: CronExpr,
    anchor: Candidate,
    last: Option<Candidate>,
    sign: i8,
    days: FieldSet,
    days_for: (i16, i16),
}

impl Scheduler {
    /// Search occurrences of `expr` relative to `anchor`. Sub-minute anchor
    /// precision is discarded.
    pub fn new(expr: CronExpr, anchor: DateTime) -> Self {
        Self {
            expr,
            anchor: Candidate::from_datetime(anchor),
            last: None,
            sign: 1,
            days: FieldSet::from_values(Vec::new()),
            days_for: (0, 0),
        }
    }

    /// Anchor at the current UTC time.
    pub fn from_now(expr: CronExpr) -> Self {
        let now = Zoned::now().with_time_zone(TimeZone::UTC).datetime();
        Self::new(expr, now)
    }

    pub fn expr(&self) -> &CronExpr {
        &self.expr
    }

    pub fn anchor(&self) -> DateTime {
        self.anchor.to_datetime()
    }

    /// The next matching timestamp: at-or-after the anchor on the first
    /// call, strictly after the previous result on every later one.
    pub fn next(&mut self) -> Result<DateTime, CronError> {
        self.sign = 1;
        self.find()
    }

    /// The previous matching timestamp: before the anchor's day on the first
    /// call, strictly before the previous result on every later one.
    pub fn prev(&mut self) -> Result<DateTime, CronError> {
        self.sign = -1;
        self.find()
    }

    /// Re-anchor at `date` (midnight) and return the nth next occurrence,
    /// discarding the intermediate ones. `n` counts from 1.
    pub fn nth_after(&mut self, date: Date, n: usize) -> Result<DateTime, CronError> {
        self.anchor = Candidate::from_datetime(date.to_datetime(Time::midnight()));
        self.last = None;
        let mut found = self.next()?;
        for _ in 1..n.max(1) {
            found = self.next()?;
        }
        Ok(found)
    }

    /// Consume the scheduler into a forward iterator over successive
    /// occurrences, ending when the year horizon is exhausted.
    pub fn occurrences(self) -> Occurrences {
        Occurrences { scheduler: self }
    }

    /// The match loop: build a candidate, test it, cascade an increment at
    /// the finest non-fixed field until a match or the horizon exit.
    fn find(&mut self) -> Result<DateTime, CronError> {
        let mut cand = self.build_candidate();
        self.ensure_days(cand.year, cand.month)?;
        while (YEAR_MIN..=YEAR_MAX).contains(&cand.year) {
            if self.in_order(cand) && self.matches(cand) {
                self.last = Some(cand);
                return Ok(cand.to_datetime());
            }
            cand = if !self.expr.minute.is_fixed() {
                self.step_minute(cand)?
            } else if !self.expr.hour.is_fixed() {
                self.step_hour(cand)?
            } else {
                self.step_day(cand)?
            };
        }
        Err(CronError::not_found(self.expr.as_str()))
    }

    /// Initial candidate: fixed-field values where defined, else the
    /// reference point's units (last occurrence if any, else the anchor).
    fn build_candidate(&self) -> Candidate {
        let reference = self.last.unwrap_or(self.anchor);
        Candidate {
            year: reference.year,
            month: self.expr.month.fixed().unwrap_or(reference.month),
            day: self.expr.fixed_day.unwrap_or(reference.day),
            hour: self.expr.hour.fixed().unwrap_or(reference.hour),
            minute: self.expr.minute.fixed().unwrap_or(reference.minute),
        }
    }

    /// Ordering threshold: the last occurrence once one exists, else the
    /// anchor (forward) or the start of the anchor's day (backward).
    fn bound(&self) -> Candidate {
        match self.last {
            Some(last) => last,
            None if self.sign > 0 => self.anchor,
            None => self.anchor.start_of_day(),
        }
    }

    fn in_order(&self, cand: Candidate) -> bool {
        let bound = self.bound();
        if self.sign > 0 {
            if self.last.is_some() {
                cand > bound
            } else {
                cand >= bound
            }
        } else {
            cand < bound
        }
    }

    /// True while a forward search's candidate still trails the boundary;
    /// cycling sub-day fields cannot reach it, so minute/hour delegate
    /// upward instead. Backward searches take no such shortcut: minute and
    /// hour must exhaust and wrap to their last option before the day
    /// carries, or the latest match of the prior day would be skipped.
    fn behind_bound(&self, cand: Candidate) -> bool {
        self.sign > 0 && cand < self.bound()
    }

    /// Membership check against the current option sets. The year horizon is
    /// enforced by the match loop itself; the day set always reflects the
    /// candidate's own month.
    fn matches(&self, cand: Candidate) -> bool {
        self.expr.month.contains(cand.month)
            && self.days.contains(cand.day)
            && self.expr.hour.contains(cand.hour)
            && self.expr.minute.contains(cand.minute)
    }

    fn step_minute(&mut self, mut cand: Candidate) -> Result<Candidate, CronError> {
        if self.expr.minute.is_fixed() || self.behind_bound(cand) {
            return self.step_hour(cand);
        }
        match self.expr.minute.step_from(cand.minute, self.sign) {
            Some(minute) => {
                cand.minute = minute;
                Ok(cand)
            }
            None => {
                if let Some(minute) = self.expr.minute.boundary(self.sign) {
                    cand.minute = minute;
                }
                self.step_hour(cand)
            }
        }
    }

    fn step_hour(&mut self, mut cand: Candidate) -> Result<Candidate, CronError> {
        if self.expr.hour.is_fixed() || self.behind_bound(cand) {
            return self.step_day(cand);
        }
        match self.expr.hour.step_from(cand.hour, self.sign) {
            Some(hour) => {
                cand.hour = hour;
                Ok(cand)
            }
            None => {
                if let Some(hour) = self.expr.hour.boundary(self.sign) {
                    cand.hour = hour;
                }
                self.step_day(cand)
            }
        }
    }

    fn step_day(&mut self, mut cand: Candidate) -> Result<Candidate, CronError> {
        // A jointly fixed day cannot self-advance; it always carries into
        // the month.
        if self.expr.fixed_day.is_some() {
            return self.step_month(cand);
        }
        match self.days.step_from(cand.day, self.sign) {
            Some(day) => {
                cand.day = day;
                Ok(cand)
            }
            None => self.step_month(cand),
        }
    }

    /// Advance the month (carrying into the year when its set wraps or is
    /// fixed), recompute the day set for the new month, and land on its
    /// boundary day. Months whose day set is empty are skipped until the
    /// horizon exits.
    fn step_month(&mut self, mut cand: Candidate) -> Result<Candidate, CronError> {
        loop {
            if self.expr.month.is_fixed() {
                cand.year += i16::from(self.sign);
            } else {
                match self.expr.month.step_from(cand.month, self.sign) {
                    Some(month) => cand.month = month,
                    None => {
                        if let Some(month) = self.expr.month.boundary(self.sign) {
                            cand.month = month;
                        }
                        cand.year += i16::from(self.sign);
                    }
                }
            }
            if !(YEAR_MIN..=YEAR_MAX).contains(&cand.year) {
                // The match loop turns this into the not-found failure.
                return Ok(cand);
            }
            self.ensure_days(cand.year, cand.month)?;
            if let Some(day) = self.days.boundary(self.sign) {
                cand.day = day;
                return Ok(cand);
            }
        }
    }

    /// Day validity is calendar-dependent: recompute the day set whenever
    /// the candidate's month or year changes.
    fn ensure_days(&mut self, year: i16, month: i16) -> Result<(), CronError> {
        if self.days_for != (year, month) {
            self.days = resolve_days(&self.expr, year, month as i8)?;
            self.days_for = (year, month);
        }
        Ok(())
    }
}

/// Forward iterator over successive occurrences of a schedule.
#[derive(Debug)]
pub struct Occurrences {
    scheduler: Scheduler,
}

impl Iterator for Occurrences {
    type Item = DateTime;

    fn next(&mut self) -> Option<DateTime> {
        self.scheduler.next().ok()
    }
}
