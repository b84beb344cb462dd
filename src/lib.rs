//! Bidirectional cron occurrence search.
//!
//! Parses five-field cron expressions (minute, hour, day-of-month, month,
//! day-of-week with optional `#nth`) into explicit option sets and walks the
//! calendar forward or backward to matching timestamps at minute precision.
//!
//! # Examples
//!
//! ```
//! use cronseek::{CronExpr, Scheduler};
//! use jiff::civil::datetime;
//!
//! let expr: CronExpr = "0 3 * * 2#1".parse().unwrap(); // 3 AM, first Tuesday
//! let mut search = Scheduler::new(expr, datetime(2022, 8, 10, 5, 0, 0, 0));
//! assert_eq!(search.next().unwrap(), datetime(2022, 9, 6, 3, 0, 0, 0));
//! ```

pub mod calendar;
mod days;
pub mod error;
pub mod eval;
pub mod expr;
pub mod field;

pub use error::CronError;
pub use eval::{Occurrences, Scheduler, YEAR_MAX, YEAR_MIN};
pub use expr::CronExpr;
pub use field::{FieldKind, FieldSet};

use jiff::civil::DateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// --- CronExpr convenience methods ---

impl CronExpr {
    /// The next occurrence at-or-after `anchor`, if any exists within the
    /// year horizon.
    pub fn next_after(&self, anchor: DateTime) -> Option<DateTime> {
        Scheduler::new(self.clone(), anchor).next().ok()
    }

    /// The latest occurrence before `anchor`'s day, if any exists within the
    /// year horizon.
    pub fn prev_before(&self, anchor: DateTime) -> Option<DateTime> {
        Scheduler::new(self.clone(), anchor).prev().ok()
    }
}

impl FromStr for CronExpr {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CronExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CronExpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CronExpr::parse(&s).map_err(serde::de::Error::custom)
    }
}
