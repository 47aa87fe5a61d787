use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::range::NumberRange;

/// Per-field filter intent supplied by callers
///
/// # Example
///
/// ```json
/// [
///   { "type": "range", "field": "amount", "ranges": [{ "start": 10, "end": 50 }] },
///   { "type": "terms", "field": "sku", "values": ["a", "b"], "null": true },
///   { "type": "exists", "fields": ["carrier"] }
/// ]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldFilter {
    /// OR of integer ranges
    Range {
        field: String,
        ranges: Vec<NumberRange>,
    },

    /// Any of the values, optionally also matching documents without the field
    Terms {
        field: String,
        #[serde(default)]
        values: Vec<Value>,
        #[serde(default)]
        null: bool,
    },

    /// Every listed field must exist
    Exists { fields: Vec<String> },

    /// Exact value
    Term { field: String, value: Value },
}

impl FieldFilter {
    pub fn range(field: impl Into<String>, ranges: Vec<NumberRange>) -> Self {
        FieldFilter::Range {
            field: field.into(),
            ranges,
        }
    }

    pub fn terms(field: impl Into<String>, values: Vec<Value>, null: bool) -> Self {
        FieldFilter::Terms {
            field: field.into(),
            values,
            null,
        }
    }

    pub fn exists(fields: Vec<String>) -> Self {
        FieldFilter::Exists { fields }
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldFilter::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Field identifiers this filter reads
    pub fn fields(&self) -> Vec<&str> {
        match self {
            FieldFilter::Range { field, .. }
            | FieldFilter::Terms { field, .. }
            | FieldFilter::Term { field, .. } => vec![field.as_str()],
            FieldFilter::Exists { fields } => fields.iter().map(String::as_str).collect(),
        }
    }
}
