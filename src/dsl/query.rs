//! Query fragment builders

use super::types::{ClauseType, MinimumShouldMatch};
use super::{fragments_to_value, single, Fragment};
use serde_json::{json, Map, Value};

/// Boolean query builder
///
/// Supports the four clause slots:
/// - `must`: all clauses must match (AND), scoring
/// - `should`: at least `minimum_should_match` clauses must match (OR)
/// - `must_not`: no clause may match (NOT)
/// - `filter`: all clauses must match (AND), non-scoring
///
/// Empty slots are omitted from the rendered fragment.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "filter": [{ "term": { "status": "paid" } }],
///     "must_not": [{ "exists": { "field": "deleted_at" } }]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Fragment>,
    pub should: Vec<Fragment>,
    pub must_not: Vec<Fragment>,
    pub filter: Vec<Fragment>,
    pub minimum_should_match: Option<MinimumShouldMatch>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append clauses to a slot
    pub fn clause(mut self, clause: ClauseType, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let slot = match clause {
            ClauseType::Must => &mut self.must,
            ClauseType::Should => &mut self.should,
            ClauseType::MustNot => &mut self.must_not,
            ClauseType::Filter => &mut self.filter,
        };
        slot.extend(fragments);
        self
    }

    pub fn with_minimum_should_match(mut self, msm: MinimumShouldMatch) -> Self {
        self.minimum_should_match = Some(msm);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
    }

    pub fn clause_count(&self) -> usize {
        self.must.len() + self.should.len() + self.must_not.len() + self.filter.len()
    }

    /// Render as `{"bool": {...}}`
    pub fn build(self) -> Fragment {
        let mut body = Map::new();
        for (clause, fragments) in [
            (ClauseType::Must, self.must),
            (ClauseType::Filter, self.filter),
            (ClauseType::Should, self.should),
            (ClauseType::MustNot, self.must_not),
        ] {
            if !fragments.is_empty() {
                body.insert(clause.as_str().to_string(), fragments_to_value(fragments));
            }
        }
        if let Some(msm) = self.minimum_should_match {
            body.insert("minimum_should_match".to_string(), msm.to_value());
        }
        single("bool", Value::Object(body))
    }
}

/// OR the alternatives: `bool.should` with the given minimum match
pub fn any_of(alternatives: Vec<Fragment>, msm: MinimumShouldMatch) -> Fragment {
    BoolQuery::new()
        .clause(ClauseType::Should, alternatives)
        .with_minimum_should_match(msm)
        .build()
}

/// Negate a query: `bool.must_not`
pub fn not(query: Fragment) -> Fragment {
    BoolQuery::new().clause(ClauseType::MustNot, [query]).build()
}

/// Exact value match
pub fn term_query(field: &str, value: impl Into<Value>) -> Fragment {
    single("term", Value::Object(single(field, value.into())))
}

/// Match any of the given values
pub fn terms_query(field: &str, values: &[Value]) -> Fragment {
    single("terms", Value::Object(single(field, Value::Array(values.to_vec()))))
}

/// Integer range; a bound of zero or less leaves that side open
pub fn range_query(field: &str, start: i64, end: i64) -> Fragment {
    let mut bounds = Map::new();
    if start > 0 {
        bounds.insert("gte".to_string(), Value::from(start));
    }
    if end > 0 {
        bounds.insert("lte".to_string(), Value::from(end));
    }
    single("range", Value::Object(single(field, Value::Object(bounds))))
}

pub fn exists_query(field: &str) -> Fragment {
    single("exists", json!({ "field": field }))
}

/// Evaluate a query inside a nested sub-document scope
pub fn nested_query(path: &str, query: Fragment) -> Fragment {
    single("nested", json!({ "path": path, "query": Value::Object(query) }))
}

/// Run a stored script as a filter
pub fn stored_script_query(id: &str, params: Map<String, Value>) -> Fragment {
    single(
        "script",
        json!({ "script": { "id": id, "params": Value::Object(params) } }),
    )
}
