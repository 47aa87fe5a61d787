//! Query assembly
//!
//! Binds a [`SearchRequest`](crate::models::SearchRequest) to an index and
//! produces the final search body: the bool query, the aggregation tree and
//! the source / paging options.

mod index_query;

pub use index_query::IndexQuery;
