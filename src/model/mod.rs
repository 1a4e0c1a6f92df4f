//! Immutable value objects for queries and semantic-layer definitions.
//!
//! Everything here is constructed once per compilation call from
//! caller-supplied JSON documents and never mutated afterwards.

pub mod definition;
pub mod query;

pub use definition::{Definition, Dimension, JoinEdge, Metric};
pub use query::{Filter, FilterValue, OrderBy, Query, Scalar, SortDir};
