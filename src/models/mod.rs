pub mod filter;
pub mod range;
pub mod search;

pub use filter::FieldFilter;
pub use range::{validate_ranges, NumberRange};
pub use search::{Page, SearchRequest};
