//! Query model: immutable filter, sort and limit descriptor.
//! Consumed by the execution service; never mutated in place.

pub mod model;
pub mod sort;

pub use model::{QueryModel, QueryModelBuilder, DEFAULT_LIMIT, TERM_KEY};
pub use sort::{SortDirection, SortSpec};
