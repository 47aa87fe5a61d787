//! Field definitions
//!
//! Defines what the composer needs to know about a single field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field data kind
///
/// Determines which bucket aggregation a field groups by and which values it accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Exact match field, grouped with a terms aggregation
    #[default]
    Keyword,
    /// Full-text field
    Text,
    /// 64-bit signed integer
    Long,
    /// 64-bit floating point
    Double,
    Boolean,
    /// Date/time field, grouped with a date histogram
    Date,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Long | FieldKind::Double)
    }

    pub fn is_date(&self) -> bool {
        matches!(self, FieldKind::Date)
    }
}

/// Bucket interval for histogram style grouping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Interval {
    /// Numeric histogram step
    Number(f64),
    /// Date histogram step (e.g. "1d", "month")
    Duration(String),
}

/// How a statistic field is summarized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Sum,
    /// Approximate distinct count (cardinality)
    Distinct,
    /// Number of values (value_count)
    Count,
}

/// Field metadata record
///
/// Immutable once loaded; the composer never mutates it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field identifier used by callers
    pub name: String,

    /// Engine-qualified path, when it differs from the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub kind: FieldKind,

    /// Nested scope the field lives in (empty for the root document)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nested_parent: String,

    /// Value substituted for documents without the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_doc_count: Option<u64>,

    /// Terms aggregation size hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    /// Statistic computed when the field is requested as a stat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<StatKind>,
}

impl Field {
    /// Create a root-level field of the given kind
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Keyword)
    }

    pub fn long(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Long)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Double)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Place the field inside a nested scope
    pub fn nested_in(mut self, parent: impl Into<String>) -> Self {
        self.nested_parent = parent.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_missing(mut self, missing: impl Into<Value>) -> Self {
        self.missing = Some(missing.into());
        self
    }

    pub fn with_min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    pub fn with_term_size(mut self, size: usize) -> Self {
        self.term_size = Some(size);
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_stat(mut self, stat: StatKind) -> Self {
        self.stat = Some(stat);
        self
    }

    /// Name of the nested scope, or `None` for root fields
    pub fn nested_scope(&self) -> Option<&str> {
        if self.nested_parent.is_empty() {
            None
        } else {
            Some(&self.nested_parent)
        }
    }

    pub fn is_nested(&self) -> bool {
        !self.nested_parent.is_empty()
    }

    /// Engine path: explicit path, else `<parent>.<name>` for nested fields
    pub fn query_field(&self) -> String {
        match (&self.path, self.nested_scope()) {
            (Some(path), _) => path.clone(),
            (None, Some(parent)) if !self.name.starts_with(&format!("{}.", parent)) => {
                format!("{}.{}", parent, self.name)
            }
            _ => self.name.clone(),
        }
    }

    pub fn numeric_interval(&self) -> Option<f64> {
        match self.interval {
            Some(Interval::Number(step)) => Some(step),
            _ => None,
        }
    }

    pub fn date_interval(&self) -> Option<&str> {
        match &self.interval {
            Some(Interval::Duration(step)) => Some(step),
            _ => None,
        }
    }
}
