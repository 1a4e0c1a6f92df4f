//! Filter classification and predicate rendering.
//!
//! Dimension filters apply before aggregation and land in WHERE; metric
//! filters apply after aggregation and land in HAVING. Metric predicates
//! are rendered over the metric's raw aggregate expression, never its
//! alias, since HAVING cannot rely on alias visibility.

use crate::model::query::{Filter, FilterValue, Scalar};
use crate::semantic::error::{CompileError, CompileResult};
use crate::semantic::resolver::{DefinitionResolver, FieldKind};

/// A recognized comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl FilterOp {
    /// Parse a filter's operator token.
    pub fn parse(token: &str) -> CompileResult<Self> {
        match token {
            "=" => Ok(FilterOp::Eq),
            "!=" => Ok(FilterOp::Ne),
            ">" => Ok(FilterOp::Gt),
            ">=" => Ok(FilterOp::Gte),
            "<" => Ok(FilterOp::Lt),
            "<=" => Ok(FilterOp::Lte),
            "IN" | "in" => Ok(FilterOp::In),
            other => Err(CompileError::UnsupportedOperator(other.to_string())),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::In => "IN",
        }
    }
}

/// Predicates routed to their clauses.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassifiedFilters {
    /// Dimension predicates, pre-aggregation.
    pub where_predicates: Vec<String>,
    /// Metric predicates, post-aggregation.
    pub having_predicates: Vec<String>,
}

/// Splits filters into WHERE and HAVING groups and renders each
/// predicate's SQL text.
pub struct FilterClassifier<'a> {
    resolver: &'a DefinitionResolver<'a>,
}

impl<'a> FilterClassifier<'a> {
    pub fn new(resolver: &'a DefinitionResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn classify(&self, filters: &[Filter]) -> CompileResult<ClassifiedFilters> {
        let mut classified = ClassifiedFilters::default();
        for filter in filters {
            let op = FilterOp::parse(&filter.operator)?;
            match self.resolver.classify(&filter.field) {
                FieldKind::Dimension => {
                    let (dimension, _) = self.resolver.resolve_dimension(&filter.field)?;
                    classified
                        .where_predicates
                        .push(render_predicate(&dimension.sql, op, &filter.value)?);
                }
                FieldKind::Metric => {
                    let metric = self.resolver.resolve_metric(&filter.field)?;
                    classified
                        .having_predicates
                        .push(render_predicate(&metric.sql, op, &filter.value)?);
                }
                FieldKind::Unknown => {
                    return Err(CompileError::UnknownField(filter.field.clone()))
                }
            }
        }
        Ok(classified)
    }
}

/// Render one predicate over an already-resolved expression.
fn render_predicate(expr: &str, op: FilterOp, value: &FilterValue) -> CompileResult<String> {
    match (op, value) {
        (FilterOp::In, FilterValue::List(items)) => {
            let literals: Vec<String> = items.iter().map(render_scalar).collect();
            Ok(format!("{} IN ({})", expr, literals.join(", ")))
        }
        (FilterOp::In, FilterValue::Scalar(_)) => Err(CompileError::Validation(
            "IN filter requires a list value".to_string(),
        )),
        (_, FilterValue::List(_)) => Err(CompileError::Validation(format!(
            "operator '{}' requires a scalar value",
            op.as_sql()
        ))),
        (_, FilterValue::Scalar(scalar)) => {
            Ok(format!("{} {} {}", expr, op.as_sql(), render_scalar(scalar)))
        }
    }
}

/// Numbers render bare; strings single-quoted with embedded quotes doubled.
fn render_scalar(value: &Scalar) -> String {
    match value {
        Scalar::Number(n) => n.to_string(),
        Scalar::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}
