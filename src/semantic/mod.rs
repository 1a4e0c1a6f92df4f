//! The query compiler: resolution, grain expansion, join pathfinding,
//! filter classification and clause assembly.
//!
//! Each phase borrows the immutable value objects of [`crate::model`];
//! nothing here holds state across compilation calls.

pub mod assemble;
pub mod error;
pub mod filters;
pub mod grain;
pub mod join_graph;
pub mod resolver;

pub use error::{CompileError, CompileResult};
