//! Unified error type for query compilation.
//!
//! Every error is raised synchronously at the point of detection and
//! aborts compilation entirely; no partial SQL is ever returned.

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors raised while compiling a query against a definition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// A metric, dimension, or filter field name absent from the definition.
    #[error("unknown field '{0}': not a metric or dimension in the definition")]
    UnknownField(String),

    /// Required tables cannot all be connected through the declared join edges.
    #[error("no join path from '{anchor}' to: {}", unreachable.join(", "))]
    JoinResolution {
        anchor: String,
        unreachable: Vec<String>,
    },

    /// A filter operator outside the recognized set.
    #[error("unsupported filter operator '{0}'")]
    UnsupportedOperator(String),

    /// A dimension suffix that is not a recognized time grain.
    #[error("invalid time grain '{grain}' in dimension reference '{reference}'")]
    InvalidGrain { reference: String, grain: String },

    /// Structurally invalid query or definition input.
    #[error("{0}")]
    Validation(String),
}
