//! Field metadata
//!
//! This module describes the fields of a document index as the composer sees them:
//! - Field kinds (Keyword, Text, Long, Double, Boolean, Date)
//! - Nesting scope of each field (root or a named nested sub-document)
//! - Per-field aggregation hints (missing value, interval, term size, statistic)
//!
//! The composer only ever reads this metadata through [`FieldProvider`].

mod field;
mod index;

pub use field::{Field, FieldKind, Interval, StatKind};
pub use index::{FieldProvider, IndexSchema};
