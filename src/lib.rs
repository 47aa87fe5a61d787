pub mod compose;
pub mod config;
pub mod dsl;
pub mod error;
pub mod models;
pub mod schema;
pub mod search;

pub use compose::{AggregationComposer, AggregationPolicy, DefaultPolicy, FilterComposer};
pub use config::ComposeConfig;
pub use dsl::Fragment;
pub use error::{ComposeError, Result, StoreErrorKind};
pub use models::*;
pub use schema::{Field, FieldKind, FieldProvider, IndexSchema, StatKind};
pub use search::IndexQuery;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
