//! Aggregation fragment builders
//!
//! Bucket builders take the child aggregations as a [`Fragment`] keyed by
//! aggregation name and attach it under `"aggs"` only when it is non-empty.

use super::{single, Fragment};
use serde_json::{json, Map, Value};

/// Attach child aggregations to a bucket aggregation body
fn bucket(kind: &str, body: Value, child: Fragment) -> Fragment {
    let mut agg = single(kind, body);
    if !child.is_empty() {
        agg.insert("aggs".to_string(), Value::Object(child));
    }
    agg
}

/// Options for a terms aggregation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermsOptions {
    pub size: Option<usize>,
    pub missing: Option<Value>,
    /// Only emitted when greater than zero
    pub min_doc_count: Option<u64>,
}

pub fn terms_agg(field: &str, options: TermsOptions, child: Fragment) -> Fragment {
    let mut body = Map::new();
    body.insert("field".to_string(), Value::from(field));
    if let Some(size) = options.size {
        body.insert("size".to_string(), Value::from(size));
    }
    if let Some(missing) = options.missing {
        body.insert("missing".to_string(), missing);
    }
    if let Some(count) = options.min_doc_count.filter(|c| *c > 0) {
        body.insert("min_doc_count".to_string(), Value::from(count));
    }
    bucket("terms", Value::Object(body), child)
}

/// Options for a date histogram
#[derive(Clone, Debug, PartialEq)]
pub struct DateHistogramOptions {
    pub interval: String,
    /// `fixed_interval` when set, `calendar_interval` otherwise
    pub fixed: bool,
    pub offset: Option<String>,
    pub missing: Option<Value>,
}

pub fn date_histogram_agg(field: &str, options: DateHistogramOptions, child: Fragment) -> Fragment {
    let mut body = Map::new();
    body.insert("field".to_string(), Value::from(field));
    let interval_key = if options.fixed {
        "fixed_interval"
    } else {
        "calendar_interval"
    };
    body.insert(interval_key.to_string(), Value::from(options.interval));
    if let Some(offset) = options.offset {
        body.insert("offset".to_string(), Value::from(offset));
    }
    if let Some(missing) = options.missing {
        body.insert("missing".to_string(), missing);
    }
    bucket("date_histogram", Value::Object(body), child)
}

pub fn histogram_agg(field: &str, interval: f64, child: Fragment) -> Fragment {
    bucket(
        "histogram",
        json!({ "field": field, "interval": interval }),
        child,
    )
}

/// One bucket of a range aggregation; bounds are `[from, to)`
#[derive(Clone, Debug, PartialEq)]
pub struct RangeBucket {
    pub key: String,
    pub from: Option<Value>,
    pub to: Option<Value>,
}

impl RangeBucket {
    pub fn new(key: impl Into<String>, from: Option<Value>, to: Option<Value>) -> Self {
        Self {
            key: key.into(),
            from,
            to,
        }
    }
}

pub fn range_agg(field: &str, buckets: &[RangeBucket], child: Fragment) -> Fragment {
    let ranges: Vec<Value> = buckets
        .iter()
        .map(|b| {
            let mut range = single("key", Value::from(b.key.as_str()));
            if let Some(from) = &b.from {
                range.insert("from".to_string(), from.clone());
            }
            if let Some(to) = &b.to {
                range.insert("to".to_string(), to.clone());
            }
            Value::Object(range)
        })
        .collect();
    bucket("range", json!({ "field": field, "ranges": ranges }), child)
}

/// Single bucket of documents matching a query
pub fn filter_agg(query: Fragment, child: Fragment) -> Fragment {
    bucket("filter", Value::Object(query), child)
}

/// Named filter buckets
///
/// Returns `None` when no filter is given.
pub fn filters_agg(
    filters: Vec<(String, Fragment)>,
    other_bucket_key: Option<&str>,
    child: Fragment,
) -> Option<Fragment> {
    if filters.is_empty() {
        return None;
    }
    let named: Map<String, Value> = filters
        .into_iter()
        .map(|(name, query)| (name, Value::Object(query)))
        .collect();
    let mut body = single("filters", Value::Object(named));
    if let Some(key) = other_bucket_key.filter(|k| !k.is_empty()) {
        body.insert("other_bucket_key".to_string(), Value::from(key));
    }
    Some(bucket("filters", Value::Object(body), child))
}

/// Enter a nested sub-document scope
pub fn nested_agg(path: &str, child: Fragment) -> Fragment {
    bucket("nested", json!({ "path": path }), child)
}

/// Leave nested scope; `None` (or an empty path) returns to the root document
pub fn reverse_nested_agg(path: Option<&str>, child: Fragment) -> Fragment {
    let body = match path.filter(|p| !p.is_empty()) {
        Some(path) => json!({ "path": path }),
        None => json!({}),
    };
    bucket("reverse_nested", body, child)
}

fn metric(kind: &str, field: &str, missing: Option<Value>) -> Fragment {
    let mut body = single("field", Value::from(field));
    if let Some(missing) = missing {
        body.insert("missing".to_string(), missing);
    }
    single(kind, Value::Object(body))
}

pub fn sum_agg(field: &str, missing: Option<Value>) -> Fragment {
    metric("sum", field, missing)
}

/// Approximate distinct count
pub fn cardinality_agg(field: &str, missing: Option<Value>) -> Fragment {
    metric("cardinality", field, missing)
}

pub fn value_count_agg(field: &str) -> Fragment {
    metric("value_count", field, None)
}

/// Sum a metric across the buckets of a sibling aggregation
pub fn sum_bucket_agg(buckets_path: &str) -> Fragment {
    single("sum_bucket", json!({ "buckets_path": buckets_path }))
}

/// Drop buckets for which the script evaluates to false
pub fn bucket_selector_agg(buckets_path: Map<String, Value>, script: Value) -> Fragment {
    single(
        "bucket_selector",
        json!({ "buckets_path": Value::Object(buckets_path), "script": script }),
    )
}
