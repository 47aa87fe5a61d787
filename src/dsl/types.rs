//! Shared DSL vocabulary

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clause slot of a bool query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    /// All clauses must match, scoring
    Must,
    /// Alternatives, at least `minimum_should_match` of them must match
    Should,
    /// No clause may match
    MustNot,
    /// All clauses must match, non-scoring
    Filter,
}

impl ClauseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Must => "must",
            ClauseType::Should => "should",
            ClauseType::MustNot => "must_not",
            ClauseType::Filter => "filter",
        }
    }
}

/// Minimum should match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// Exact count
    Count(usize),
    /// Percentage (e.g., "75%") or any other engine-understood expression
    Expression(String),
}

impl MinimumShouldMatch {
    /// Parse the textual form used in configuration ("1", "75%")
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(count) => MinimumShouldMatch::Count(count),
            Err(_) => MinimumShouldMatch::Expression(raw.trim().to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            MinimumShouldMatch::Count(n) => Value::from(*n),
            MinimumShouldMatch::Expression(s) => Value::from(s.as_str()),
        }
    }
}

impl Default for MinimumShouldMatch {
    fn default() -> Self {
        MinimumShouldMatch::Count(1)
    }
}
