//! Name resolution over a semantic-layer definition.
//!
//! The resolver is a name-indexed borrow of a [`Definition`], built once
//! per compilation call and discarded on return.

use std::collections::HashMap;

use crate::model::definition::{Definition, Dimension, Metric};
use crate::semantic::error::{CompileError, CompileResult};
use crate::semantic::grain::{TimeGrain, GRAIN_SEPARATOR};

/// How a name classifies against the definition's declared names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Metric,
    Dimension,
    Unknown,
}

/// Name-indexed view of a definition.
pub struct DefinitionResolver<'a> {
    metrics: HashMap<&'a str, &'a Metric>,
    dimensions: HashMap<&'a str, &'a Dimension>,
}

impl<'a> DefinitionResolver<'a> {
    pub fn new(definition: &'a Definition) -> Self {
        Self {
            metrics: definition
                .metrics
                .iter()
                .map(|m| (m.name.as_str(), m))
                .collect(),
            dimensions: definition
                .dimensions
                .iter()
                .map(|d| (d.name.as_str(), d))
                .collect(),
        }
    }

    /// Classify a name by exact declared-name match.
    ///
    /// Grain suffixes are not considered here; a grain-suffixed reference
    /// classifies as `Unknown`.
    pub fn classify(&self, name: &str) -> FieldKind {
        if self.metrics.contains_key(name) {
            FieldKind::Metric
        } else if self.dimensions.contains_key(name) {
            FieldKind::Dimension
        } else {
            FieldKind::Unknown
        }
    }

    pub fn resolve_metric(&self, name: &str) -> CompileResult<&'a Metric> {
        self.metrics
            .get(name)
            .copied()
            .ok_or_else(|| CompileError::UnknownField(name.to_string()))
    }

    /// Resolve a dimension reference, stripping a recognized grain suffix.
    ///
    /// A literal declared-name match wins over grain-splitting, so a
    /// dimension whose declared name contains the separator still
    /// resolves. When the prefix names a dimension but the suffix is not
    /// a recognized grain, the reference fails with
    /// [`CompileError::InvalidGrain`]; otherwise an unmatched reference
    /// fails with [`CompileError::UnknownField`].
    pub fn resolve_dimension(
        &self,
        reference: &str,
    ) -> CompileResult<(&'a Dimension, Option<TimeGrain>)> {
        if let Some(dimension) = self.dimensions.get(reference) {
            return Ok((dimension, None));
        }
        if let Some((base, suffix)) = reference.rsplit_once(GRAIN_SEPARATOR) {
            match (self.dimensions.get(base), TimeGrain::from_suffix(suffix)) {
                (Some(dimension), Some(grain)) => return Ok((dimension, Some(grain))),
                (Some(_), None) => {
                    return Err(CompileError::InvalidGrain {
                        reference: reference.to_string(),
                        grain: suffix.to_string(),
                    })
                }
                _ => {}
            }
        }
        Err(CompileError::UnknownField(reference.to_string()))
    }
}
