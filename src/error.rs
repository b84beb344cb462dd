use std::fmt;

/// All errors produced by cronseek.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CronError {
    /// Malformed field syntax, out-of-range value, or an empty option set.
    /// Raised at construction time, never deferred.
    Parse {
        field: &'static str,
        text: String,
    },

    /// A day-of-week sub-expression using neither an integer, `*`, nor `#nth`.
    Unsupported {
        field: &'static str,
        text: String,
    },

    /// The search walked the year horizon without finding a match.
    NotFound {
        expr: String,
    },
}

impl fmt::Display for CronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { field, text } => {
                write!(f, "cannot parse {field} field from \"{text}\"")
            }
            Self::Unsupported { field, text } => {
                write!(f, "unsupported {field} syntax: \"{text}\"")
            }
            Self::NotFound { expr } => {
                write!(
                    f,
                    "no occurrence of \"{expr}\" within years {}-{}",
                    crate::eval::YEAR_MIN,
                    crate::eval::YEAR_MAX
                )
            }
        }
    }
}

impl std::error::Error for CronError {}

impl CronError {
    pub fn parse(field: &'static str, text: impl Into<String>) -> Self {
        Self::Parse {
            field,
            text: text.into(),
        }
    }

    pub fn unsupported(field: &'static str, text: impl Into<String>) -> Self {
        Self::Unsupported {
            field,
            text: text.into(),
        }
    }

    pub fn not_found(expr: impl Into<String>) -> Self {
        Self::NotFound { expr: expr.into() }
    }
}
