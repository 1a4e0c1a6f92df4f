//! Time-grain expansion for dimension references.
//!
//! A dimension reference may carry a `__<grain>` suffix. The expander
//! rewrites such a reference as a `DATE_TRUNC` over the base dimension's
//! expression, keeping the full reference (suffix included) as the alias
//! so SELECT, GROUP BY and ORDER BY all agree on one identifier.

use crate::semantic::error::CompileResult;
use crate::semantic::resolver::DefinitionResolver;

/// Separator between a dimension name and its grain suffix.
pub const GRAIN_SEPARATOR: &str = "__";

/// A time-truncation unit encoded as a dimension-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGrain {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeGrain {
    /// Parse a suffix token. Returns `None` for tokens outside the set.
    pub fn from_suffix(token: &str) -> Option<Self> {
        match token {
            "day" => Some(TimeGrain::Day),
            "week" => Some(TimeGrain::Week),
            "month" => Some(TimeGrain::Month),
            "quarter" => Some(TimeGrain::Quarter),
            "year" => Some(TimeGrain::Year),
            _ => None,
        }
    }

    /// The grain keyword as it appears inside `DATE_TRUNC`.
    pub fn as_sql(&self) -> &'static str {
        match self {
            TimeGrain::Day => "DAY",
            TimeGrain::Week => "WEEK",
            TimeGrain::Month => "MONTH",
            TimeGrain::Quarter => "QUARTER",
            TimeGrain::Year => "YEAR",
        }
    }
}

/// A resolved SELECT item: an expression and the alias it is exposed under.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: String,
    pub alias: String,
}

/// Expands dimension references, applying time-grain truncation.
pub struct DimensionExpander<'a> {
    resolver: &'a DefinitionResolver<'a>,
}

impl<'a> DimensionExpander<'a> {
    pub fn new(resolver: &'a DefinitionResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Expand one dimension reference into an aliased SELECT expression.
    ///
    /// `ordered_date__week` over a dimension declared as `created_at`
    /// becomes `DATE_TRUNC(created_at, WEEK)` aliased to
    /// `ordered_date__week`; a reference without a grain suffix passes the
    /// dimension's SQL text through unchanged.
    pub fn expand(&self, reference: &str) -> CompileResult<SelectItem> {
        let (dimension, grain) = self.resolver.resolve_dimension(reference)?;
        let expr = match grain {
            Some(grain) => format!("DATE_TRUNC({}, {})", dimension.sql, grain.as_sql()),
            None => dimension.sql.clone(),
        };
        Ok(SelectItem {
            expr,
            alias: reference.to_string(),
        })
    }
}
