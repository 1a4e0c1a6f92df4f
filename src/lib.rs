//! # Strata
//!
//! A semantic layer that compiles declarative analytics queries to SQL.
//!
//! A query names metrics, dimensions (optionally grain-suffixed), filters,
//! ordering and a limit; a definition names metric/dimension expressions,
//! their owning tables and the join edges between tables. Compilation
//! resolves every reference, discovers a minimal join path, routes each
//! filter to WHERE or HAVING, and assembles the clauses in canonical
//! order — or fails with a typed [`CompileError`].
//!
//! ```
//! use strata::prelude::*;
//!
//! let definition = Definition {
//!     metrics: vec![Metric {
//!         name: "order_count".into(),
//!         sql: "COUNT(*)".into(),
//!         table: "orders".into(),
//!     }],
//!     ..Default::default()
//! };
//! let query = Query {
//!     metrics: vec!["order_count".into()],
//!     ..Default::default()
//! };
//!
//! let sql = compile(&query, &definition).unwrap();
//! assert_eq!(sql, "SELECT COUNT(*) AS order_count\nFROM orders");
//! ```
//!
//! Execution against a warehouse, configuration and fixture handling
//! belong to the caller; this crate consumes two value objects and
//! returns SQL text.

pub mod compile;
pub mod model;
pub mod semantic;

pub use compile::{compile, compile_json};
pub use semantic::error::{CompileError, CompileResult};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{compile, compile_json};
    pub use crate::model::definition::{Definition, Dimension, JoinEdge, Metric};
    pub use crate::model::query::{Filter, FilterValue, OrderBy, Query, Scalar, SortDir};
    pub use crate::semantic::error::{CompileError, CompileResult};
}
