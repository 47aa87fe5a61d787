use serde::{Deserialize, Serialize};

use crate::error::ComposeError;
use crate::Result;

/// Integer range filter on one field; zero leaves that side unbounded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub end: i64,
}

impl NumberRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// `>= start`
    pub fn at_least(start: i64) -> Self {
        Self { start, end: 0 }
    }

    /// `<= end`
    pub fn at_most(end: i64) -> Self {
        Self { start: 0, end }
    }

    /// Both bounds unset, or an inverted closed range
    pub fn is_invalid(&self) -> bool {
        (self.start == 0 && self.end == 0) || (self.end != 0 && self.start > self.end)
    }

    /// Whether this range contributes a range clause
    pub fn is_bounded(&self) -> bool {
        self.start > 0 || self.end > 0
    }
}

/// Reject the first invalid range across all fields
pub fn validate_ranges<'a, I>(fields: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a [NumberRange])>,
{
    for (field, ranges) in fields {
        if let Some(bad) = ranges.iter().find(|r| r.is_invalid()) {
            return Err(ComposeError::InvalidRange {
                field: field.to_string(),
                start: bad.start,
                end: bad.end,
            });
        }
    }
    Ok(())
}
