//! Query and aggregation composition
//!
//! The composer turns flat, declarative field lists into the nested DSL the
//! engine requires:
//! - [`FilterComposer`]: range, terms (with null handling), exists and term
//!   filters, wrapped in nested scopes where a field requires it
//! - [`assemble_query`]: one bool query from filter and must-not groups
//! - [`AggregationComposer`]: one aggregation tree from group and statistic
//!   fields, with nested / reverse nested transitions between scopes
//! - [`AggregationPolicy`]: the per-index capability the aggregation composer
//!   consults for each field
//!
//! Composition is pure: no I/O, no state kept between calls.

pub mod aggregation;
pub mod filter;
pub mod order;
pub mod policy;

pub use aggregation::{AggregationComposer, ComposedAggregation};
pub use filter::{assemble_query, FilterClauses, FilterComposer};
pub use order::{ScopeOrder, ScopeRank};
pub use policy::{AggregationPolicy, DefaultPolicy};
