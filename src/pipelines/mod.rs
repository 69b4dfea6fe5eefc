//! Pipelines.
//!
//! The [query_data::QueryData] pipeline queries, exports and formats lexicographical data.
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod query_data;

pub use pipeline::Pipeline;
pub use query_data::{QueryData, RunReport};
