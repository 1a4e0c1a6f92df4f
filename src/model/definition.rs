// src/model/definition.rs
use std::collections::HashMap;

use serde::Deserialize;

use crate::semantic::error::{CompileError, CompileResult};

/// A metric: a named aggregate expression owned by one table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metric {
    pub name: String,
    /// Aggregate SQL expression, e.g. `SUM(order_items.sale_price)`.
    pub sql: String,
    /// Owning table.
    pub table: String,
}

/// A dimension: a named non-aggregated expression owned by one table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dimension {
    pub name: String,
    /// Column or expression text.
    pub sql: String,
    /// Owning table.
    pub table: String,
}

/// A declared relationship between two tables.
///
/// Edges are undirected for connectivity purposes; the ON-predicate text
/// is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinEdge {
    /// Table on the unique side.
    pub one: String,
    /// Table on the repeated side.
    pub many: String,
    /// Raw ON-predicate text.
    #[serde(rename = "join")]
    pub on: String,
}

/// A semantic layer definition: the metrics, dimensions and join edges a
/// query may reference.
///
/// `dimensions` and `joins` may be absent from the source document and
/// default to empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub joins: Vec<JoinEdge>,
}

impl Definition {
    /// Parse a definition document from JSON and validate it.
    pub fn from_json(json: &str) -> CompileResult<Self> {
        let definition: Definition = serde_json::from_str(json).map_err(|e| {
            CompileError::Validation(format!("malformed definition document: {e}"))
        })?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check name uniqueness: metric names and dimension names are each
    /// unique, and no name appears in both lists.
    pub fn validate(&self) -> CompileResult<()> {
        let mut seen: HashMap<&str, &'static str> = HashMap::new();
        for metric in &self.metrics {
            if seen.insert(metric.name.as_str(), "metric").is_some() {
                return Err(CompileError::Validation(format!(
                    "duplicate metric name '{}'",
                    metric.name
                )));
            }
        }
        for dimension in &self.dimensions {
            if let Some(kind) = seen.insert(dimension.name.as_str(), "dimension") {
                return Err(CompileError::Validation(format!(
                    "dimension '{}' collides with a {} of the same name",
                    dimension.name, kind
                )));
            }
        }
        Ok(())
    }
}
