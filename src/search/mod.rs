//! Aggregation pipeline: query building, page merging, deduplication,
//! ranking and result-window capping.

pub mod aggregate;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod window;
