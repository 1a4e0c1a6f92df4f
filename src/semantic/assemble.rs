//! Final clause assembly.
//!
//! Clauses are joined with newlines in canonical order: SELECT, FROM,
//! JOIN, WHERE, GROUP BY, HAVING, ORDER BY, LIMIT. No trailing
//! terminator is emitted.

use crate::model::query::SortDir;
use crate::semantic::filters::ClassifiedFilters;
use crate::semantic::grain::SelectItem;
use crate::semantic::join_graph::JoinStep;

/// Fully resolved inputs for one SQL statement.
#[derive(Debug, Clone)]
pub struct QueryParts {
    /// Aliased metric expressions, in requested order.
    pub metric_items: Vec<SelectItem>,
    /// Aliased dimension expressions, in requested order.
    pub dimension_items: Vec<SelectItem>,
    /// The FROM target.
    pub anchor: String,
    /// JOIN clauses in traversal discovery order.
    pub joins: Vec<JoinStep>,
    pub filters: ClassifiedFilters,
    pub order_by: Option<(String, SortDir)>,
    pub limit: Option<i64>,
}

/// Assemble the final SQL text.
pub fn assemble(parts: &QueryParts) -> String {
    let mut clauses: Vec<String> = Vec::new();

    let select_items: Vec<String> = parts
        .metric_items
        .iter()
        .chain(&parts.dimension_items)
        .map(|item| format!("{} AS {}", item.expr, item.alias))
        .collect();
    clauses.push(format!("SELECT {}", select_items.join(", ")));
    clauses.push(format!("FROM {}", parts.anchor));

    for step in &parts.joins {
        clauses.push(format!("JOIN {} ON {}", step.table, step.on));
    }

    if !parts.filters.where_predicates.is_empty() {
        clauses.push(format!(
            "WHERE {}",
            parts.filters.where_predicates.join(" AND ")
        ));
    }

    // A metrics-only query has nothing to group; a dimensions-only query
    // has nothing to aggregate.
    if !parts.metric_items.is_empty() && !parts.dimension_items.is_empty() {
        let aliases: Vec<&str> = parts
            .dimension_items
            .iter()
            .map(|item| item.alias.as_str())
            .collect();
        clauses.push(format!("GROUP BY {}", aliases.join(", ")));
    }

    if !parts.filters.having_predicates.is_empty() {
        clauses.push(format!(
            "HAVING {}",
            parts.filters.having_predicates.join(" AND ")
        ));
    }

    if let Some((field, direction)) = &parts.order_by {
        clauses.push(format!("ORDER BY {} {}", field, direction.as_sql()));
    }

    if let Some(limit) = parts.limit {
        clauses.push(format!("LIMIT {}", limit));
    }

    clauses.join("\n")
}
