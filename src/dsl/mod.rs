//! Leaf DSL builders
//!
//! Pure functions producing one Elasticsearch-compatible fragment each:
//! - Query fragments (bool, term, terms, range, exists, nested, script)
//! - Aggregation fragments (terms, histograms, range, filters, nested,
//!   reverse nested, metrics and pipeline aggregations)
//!
//! Fragments are opaque `key -> value` maps. Builders take engine-qualified
//! field paths; resolving a field identifier to its path is the caller's job.
//!
//! # Example
//!
//! ```json
//! {
//!   "nested": {
//!     "path": "orders",
//!     "query": { "exists": { "field": "orders.sku" } }
//!   }
//! }
//! ```

pub mod aggs;
pub mod query;
pub mod types;

pub use types::{ClauseType, MinimumShouldMatch};

use serde_json::{Map, Value};

/// One DSL fragment
pub type Fragment = Map<String, Value>;

/// Wrap a fragment under a single key
pub fn named(name: impl Into<String>, fragment: Fragment) -> Fragment {
    single(name, Value::Object(fragment))
}

/// Build a map holding exactly one entry
pub(crate) fn single(key: impl Into<String>, value: Value) -> Fragment {
    let mut map = Map::with_capacity(1);
    map.insert(key.into(), value);
    map
}

pub(crate) fn fragments_to_value(fragments: Vec<Fragment>) -> Value {
    Value::Array(fragments.into_iter().map(Value::Object).collect())
}
