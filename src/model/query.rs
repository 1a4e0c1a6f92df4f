// src/model/query.rs
use serde::Deserialize;

use crate::semantic::error::{CompileError, CompileResult};

/// A declarative analytics query against a [`Definition`].
///
/// All fields are optional in the source document, except that at least
/// one metric or dimension must be requested.
///
/// [`Definition`]: crate::model::definition::Definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Query {
    /// Requested metric names, in SELECT order.
    #[serde(default)]
    pub metrics: Vec<String>,
    /// Requested dimension references, each optionally suffixed `__<grain>`.
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Query {
    /// Parse a query document from JSON.
    pub fn from_json(json: &str) -> CompileResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CompileError::Validation(format!("malformed query document: {e}")))
    }
}

/// A filter predicate on a metric or dimension name.
///
/// The operator is kept as raw text here; [`FilterOp`] parses and
/// validates it during classification.
///
/// [`FilterOp`]: crate::semantic::filters::FilterOp
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub value: FilterValue,
}

/// A scalar filter value.
///
/// Only numbers and strings are admitted at the parse boundary; numbers
/// render bare, strings render single-quoted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    String(String),
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

/// A filter value: one scalar, or a list of scalars for `IN`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl FilterValue {
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Scalar(value.into())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(value.into())
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortDir {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Ordering on a field already present in the query's selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDir,
}
