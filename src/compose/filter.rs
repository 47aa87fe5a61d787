//! Filter composition
//!
//! Turns per-field filter intents into bool clauses. Clauses land in one of two
//! lists: `parent` clauses, which mix nested and root conditions and must be
//! evaluated at the scope that subsumes both, and ordinary `filter` clauses.
//! When rendered, parent clauses come first.

use crate::dsl::query::{
    any_of, exists_query, nested_query, not, range_query, term_query, terms_query,
};
use crate::dsl::query::BoolQuery;
use crate::dsl::{ClauseType, Fragment, MinimumShouldMatch};
use crate::models::{FieldFilter, NumberRange};
use crate::schema::FieldProvider;
use serde_json::Value;

/// Clause lists produced for one bool slot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterClauses {
    pub parent: Vec<Fragment>,
    pub filter: Vec<Fragment>,
}

impl FilterClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty() && self.filter.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parent.len() + self.filter.len()
    }

    /// Parent clauses followed by ordinary clauses
    pub fn into_clauses(self) -> Vec<Fragment> {
        let mut clauses = self.parent;
        clauses.extend(self.filter);
        clauses
    }
}

/// Builds filter clauses against one index
pub struct FilterComposer<'a, P: FieldProvider + ?Sized> {
    provider: &'a P,
    min_should_match: MinimumShouldMatch,
}

impl<'a, P: FieldProvider + ?Sized> FilterComposer<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            min_should_match: MinimumShouldMatch::default(),
        }
    }

    pub fn with_min_should_match(mut self, msm: MinimumShouldMatch) -> Self {
        self.min_should_match = msm;
        self
    }

    /// Wrap in a nested query when the field lives in a nested scope
    fn scoped(&self, field: &str, query: Fragment) -> Fragment {
        match self.provider.nested_scope(field) {
            Some(scope) => nested_query(scope, query),
            None => query,
        }
    }

    /// One range clause for a single range, an OR of range clauses otherwise
    ///
    /// Ranges are expected to be validated already; unbounded ones are skipped.
    pub fn number_range(&self, clauses: &mut FilterClauses, field: &str, ranges: &[NumberRange]) {
        let path = self.provider.query_field(field);
        match ranges {
            [] => {}
            [range] => {
                if range.is_bounded() {
                    clauses.filter.push(range_query(&path, range.start, range.end));
                }
            }
            _ => {
                let alternatives: Vec<Fragment> = ranges
                    .iter()
                    .filter(|r| r.is_bounded())
                    .map(|r| range_query(&path, r.start, r.end))
                    .collect();
                clauses
                    .filter
                    .push(any_of(alternatives, self.min_should_match.clone()));
            }
        }
    }

    /// Terms match with optional "field is missing" alternative
    ///
    /// - values only: a terms clause in the ordinary list
    /// - null only: a not-exists clause in the parent list
    /// - both: `not-exists OR terms` in the parent list, with the terms clause
    ///   nested the same way as the existence check
    pub fn terms(&self, clauses: &mut FilterClauses, field: &str, values: &[Value], null: bool) {
        let path = self.provider.query_field(field);
        let nested = self.provider.nested_scope(field);

        let null_query = null.then(|| not(self.scoped(field, exists_query(&path))));
        let terms = (!values.is_empty()).then(|| {
            let query = terms_query(&path, values);
            match (nested, &null_query) {
                (Some(scope), Some(_)) => nested_query(scope, query),
                _ => query,
            }
        });

        match (null_query, terms) {
            (Some(null_query), Some(terms)) => clauses.parent.push(any_of(
                vec![null_query, terms],
                self.min_should_match.clone(),
            )),
            (Some(null_query), None) => clauses.parent.push(null_query),
            (None, Some(terms)) => clauses.filter.push(terms),
            (None, None) => {}
        }
    }

    /// Existence check per field
    pub fn exists(&self, clauses: &mut FilterClauses, fields: &[String]) {
        for field in fields {
            let path = self.provider.query_field(field);
            clauses.filter.push(self.scoped(field, exists_query(&path)));
        }
    }

    /// Dispatch one caller filter intent
    pub fn apply(&self, clauses: &mut FilterClauses, filter: &FieldFilter) {
        match filter {
            FieldFilter::Range { field, ranges } => self.number_range(clauses, field, ranges),
            FieldFilter::Terms {
                field,
                values,
                null,
            } => self.terms(clauses, field, values, *null),
            FieldFilter::Exists { fields } => self.exists(clauses, fields),
            FieldFilter::Term { field, value } => self.term(clauses, field, value),
        }
    }

    /// Compose a whole clause group
    pub fn compose(&self, filters: &[FieldFilter]) -> FilterClauses {
        let mut clauses = FilterClauses::new();
        for filter in filters {
            self.apply(&mut clauses, filter);
        }
        clauses
    }

    /// Exact value match, nested-wrapped when needed
    pub fn term(&self, clauses: &mut FilterClauses, field: &str, value: &Value) {
        let path = self.provider.query_field(field);
        clauses
            .filter
            .push(self.scoped(field, term_query(&path, value.clone())));
    }
}

/// Top-level bool query from positive and negative clause groups
///
/// Returns `None` when both groups are empty rather than an empty bool wrapper.
pub fn assemble_query(filter: FilterClauses, must_not: FilterClauses) -> Option<Fragment> {
    let query = BoolQuery::new()
        .clause(ClauseType::Filter, filter.into_clauses())
        .clause(ClauseType::MustNot, must_not.into_clauses());
    if query.is_empty() {
        return None;
    }
    tracing::trace!(clauses = query.clause_count(), "assembled bool query");
    Some(query.build())
}
