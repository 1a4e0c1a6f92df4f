//! End-to-end compilation from a declarative query to SQL text.
//!
//! ```text
//! Query + Definition
//!        │
//!        ▼ [resolver]    name → metric / dimension
//!        ▼ [grain]       ordered_date__week → DATE_TRUNC(created_at, WEEK)
//!        ▼ [join_graph]  required tables → minimal JOIN sequence
//!        ▼ [filters]     dimension predicates → WHERE, metric → HAVING
//!        ▼ [assemble]    canonical clause order
//!        ▼
//!    SQL SELECT text
//! ```
//!
//! Compilation is a pure function of its arguments: each call builds its
//! own indices and discards them on return, so concurrent calls are safe
//! without locking. The first error encountered aborts the call; no
//! partial SQL is ever returned.

use std::collections::HashSet;

use crate::model::definition::Definition;
use crate::model::query::Query;
use crate::semantic::assemble::{assemble, QueryParts};
use crate::semantic::error::{CompileError, CompileResult};
use crate::semantic::filters::FilterClassifier;
use crate::semantic::grain::{DimensionExpander, SelectItem};
use crate::semantic::join_graph::JoinGraphResolver;
use crate::semantic::resolver::{DefinitionResolver, FieldKind};

/// Compile a query against a definition into one SQL SELECT statement.
pub fn compile(query: &Query, definition: &Definition) -> CompileResult<String> {
    definition.validate()?;
    if query.metrics.is_empty() && query.dimensions.is_empty() {
        return Err(CompileError::Validation(
            "query must request at least one metric or dimension".to_string(),
        ));
    }

    let resolver = DefinitionResolver::new(definition);
    let expander = DimensionExpander::new(&resolver);

    let mut metric_items = Vec::with_capacity(query.metrics.len());
    for name in &query.metrics {
        let metric = resolver.resolve_metric(name)?;
        metric_items.push(SelectItem {
            expr: metric.sql.clone(),
            alias: name.clone(),
        });
    }
    let mut dimension_items = Vec::with_capacity(query.dimensions.len());
    for reference in &query.dimensions {
        dimension_items.push(expander.expand(reference)?);
    }

    // Required tables: owners of every metric, dimension and filter field.
    let mut required: HashSet<String> = HashSet::new();
    for name in &query.metrics {
        required.insert(resolver.resolve_metric(name)?.table.clone());
    }
    for reference in &query.dimensions {
        let (dimension, _) = resolver.resolve_dimension(reference)?;
        required.insert(dimension.table.clone());
    }
    for filter in &query.filters {
        match resolver.classify(&filter.field) {
            FieldKind::Metric => {
                required.insert(resolver.resolve_metric(&filter.field)?.table.clone());
            }
            FieldKind::Dimension => {
                let (dimension, _) = resolver.resolve_dimension(&filter.field)?;
                required.insert(dimension.table.clone());
            }
            FieldKind::Unknown => {
                return Err(CompileError::UnknownField(filter.field.clone()))
            }
        }
    }

    // Anchor: the first metric's table, or the first dimension's when no
    // metric is requested.
    let anchor = match query.metrics.first() {
        Some(name) => resolver.resolve_metric(name)?.table.clone(),
        None => {
            let (dimension, _) = resolver.resolve_dimension(&query.dimensions[0])?;
            dimension.table.clone()
        }
    };

    let joins = JoinGraphResolver::new(definition).resolve(&anchor, &required)?;
    let filters = FilterClassifier::new(&resolver).classify(&query.filters)?;

    let order_by = match &query.order_by {
        Some(order) => {
            let selected = query
                .metrics
                .iter()
                .chain(query.dimensions.iter())
                .any(|name| name == &order.field);
            if !selected {
                return Err(CompileError::Validation(format!(
                    "order_by field '{}' is not among the selected metrics or dimensions",
                    order.field
                )));
            }
            Some((order.field.clone(), order.direction))
        }
        None => None,
    };

    if let Some(limit) = query.limit {
        if limit < 1 {
            return Err(CompileError::Validation(format!(
                "limit must be a positive integer, got {limit}"
            )));
        }
    }

    Ok(assemble(&QueryParts {
        metric_items,
        dimension_items,
        anchor,
        joins,
        filters,
        order_by,
        limit: query.limit,
    }))
}

/// Compile from JSON documents, as exchanged with the external runner.
pub fn compile_json(query_json: &str, definition_json: &str) -> CompileResult<String> {
    let definition = Definition::from_json(definition_json)?;
    let query = Query::from_json(query_json)?;
    compile(&query, &definition)
}
