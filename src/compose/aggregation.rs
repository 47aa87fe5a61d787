//! Aggregation composition
//!
//! Builds one aggregation tree from a set of statistic fields and an ordered
//! list of group fields, entering and leaving nested scopes as needed.
//!
//! Composition runs inside-out:
//!
//! 1. Statistics are placed at the root of the tree. Nested statistics are
//!    collected per scope and wrapped in one `nested` aggregation per scope.
//! 2. Group fields are bucketed scope by scope, innermost scope first. Within
//!    a scope, fields stack in group order (first field outermost).
//! 3. Between scopes the tree switches context: a nested scope is entered with
//!    `nested`, and the root document is reached again with `reverse_nested`.
//!    Two nested scopes never contain each other directly; the walk always
//!    passes through the root.
//!
//! For `group = [region, orders.sku]` and `stats = [orders.amount]`:
//!
//! ```json
//! {
//!   "region": {
//!     "terms": { "field": "region" },
//!     "aggs": {
//!       "orders": {
//!         "nested": { "path": "orders" },
//!         "aggs": {
//!           "sku": {
//!             "terms": { "field": "orders.sku" },
//!             "aggs": {
//!               "item": {
//!                 "reverse_nested": {},
//!                 "aggs": {
//!                   "orders": {
//!                     "nested": { "path": "orders" },
//!                     "aggs": { "amount": { "sum": { "field": "orders.amount" } } }
//!                   }
//!                 }
//!               }
//!             }
//!           }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```

use super::order::ScopeOrder;
use super::policy::AggregationPolicy;
use crate::dsl::aggs::{nested_agg, reverse_nested_agg};
use crate::dsl::{named, Fragment};
use crate::schema::Field;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Scope name of the root document
const ROOT_SCOPE: &str = "";

/// Result of aggregation composition
///
/// `aggs` is `None` when there is nothing to aggregate, which is distinct from
/// an aggregation tree without buckets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposedAggregation {
    pub aggs: Option<Fragment>,
    /// Group field of the outermost bucketing scope
    pub primary_field: Option<String>,
}

impl ComposedAggregation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.aggs.is_none()
    }
}

/// Composes aggregation trees using one index's policy
pub struct AggregationComposer<'a, A: AggregationPolicy + ?Sized> {
    policy: &'a A,
    root_scope_name: String,
}

impl<'a, A: AggregationPolicy + ?Sized> AggregationComposer<'a, A> {
    pub fn new(policy: &'a A) -> Self {
        Self {
            policy,
            root_scope_name: "item".to_string(),
        }
    }

    /// Key used for back-to-root aggregations
    pub fn with_root_scope_name(mut self, name: impl Into<String>) -> Self {
        self.root_scope_name = name.into();
        self
    }

    /// Compose statistics and group fields into one tree
    ///
    /// Without statistics there is nothing to aggregate and the result is
    /// [`ComposedAggregation::none`], even when group fields are given. This
    /// includes statistic fields the policy summarizes to nothing.
    pub fn compose(&self, group: &[&Field], stats: &[&Field]) -> ComposedAggregation {
        if stats.is_empty() {
            return ComposedAggregation::none();
        }

        let mut result = self.statistics(stats);
        if result.is_empty() {
            debug!("no statistic produced an aggregation");
            return ComposedAggregation::none();
        }
        if group.is_empty() {
            return ComposedAggregation {
                aggs: Some(result),
                primary_field: None,
            };
        }

        // Reverse scan so each scope keeps the position of its first field,
        // and each scope's list holds its fields last-to-first.
        let mut order = ScopeOrder::new();
        let mut by_scope: HashMap<&str, Vec<&Field>> = HashMap::new();
        for (position, &field) in group.iter().enumerate().rev() {
            let scope = self.policy.nested_scope(field).unwrap_or(ROOT_SCOPE);
            by_scope.entry(scope).or_default().push(field);
            order.record(scope, position);
        }
        debug!(scopes = ?order.names(), "aggregation scope order");

        // Statistics sit at the root; reach them from inside the innermost scope
        if order.innermost().is_some_and(|rank| rank.name != ROOT_SCOPE) {
            result = self.back_to_root(result);
        }

        for (i, rank) in order.iter().enumerate() {
            let scope = rank.name.as_str();
            let is_root = scope == ROOT_SCOPE;

            for &field in by_scope.get(scope).map(Vec::as_slice).unwrap_or_default() {
                result = named(field.name.clone(), self.policy.group(field, result));
            }

            let next = order.get(i + 1);
            if is_root {
                if next.is_some() {
                    result = self.back_to_root(result);
                }
            } else {
                result = named(scope, nested_agg(scope, result));
                if next.is_some_and(|n| n.name != ROOT_SCOPE) {
                    result = self.back_to_root(result);
                }
            }
        }

        let primary_field = order
            .outermost()
            .and_then(|rank| by_scope.get(rank.name.as_str()))
            .and_then(|fields| fields.last())
            .map(|field| field.name.clone());
        debug!(primary = ?primary_field, "composed aggregation");

        ComposedAggregation {
            aggs: Some(result),
            primary_field,
        }
    }

    /// Root-level statistics, nested ones grouped under one `nested` per scope
    fn statistics(&self, stats: &[&Field]) -> Fragment {
        let mut result = Fragment::new();
        let mut nested: IndexMap<&str, Fragment> = IndexMap::new();

        for &field in stats {
            let Some(agg) = self.policy.statistic(field) else {
                continue;
            };
            match self.policy.nested_scope(field) {
                Some(scope) => {
                    nested
                        .entry(scope)
                        .or_default()
                        .insert(field.name.clone(), Value::Object(agg));
                }
                None => {
                    result.insert(field.name.clone(), Value::Object(agg));
                }
            }
        }

        for (scope, subs) in nested {
            result.insert(scope.to_string(), Value::Object(nested_agg(scope, subs)));
        }
        result
    }

    fn back_to_root(&self, child: Fragment) -> Fragment {
        named(self.root_scope_name.clone(), reverse_nested_agg(None, child))
    }
}
