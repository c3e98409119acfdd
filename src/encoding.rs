//! Dimension and measure descriptors projected from resolved field roles.

use crate::fields::FieldRoles;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A field playing the identifier role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
  /// Field name in the dataset.
  pub id: String,
  /// Display alias.
  pub alias: String,
}

/// A field playing the measure role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
  /// Field name in the dataset.
  pub id: String,
  /// Display alias.
  pub alias: String,
}

/// One dimension per identifier field: source and target for flat data,
/// `name` for trees.
#[must_use]
pub fn build_dimensions(roles: &FieldRoles) -> Vec<Dimension> {
  let dimensions: Vec<Dimension> = roles
    .identifier_fields()
    .into_iter()
    .map(|field| Dimension {
      id: field.to_string(),
      alias: field.to_string(),
    })
    .collect();
  debug!(?dimensions, "built sankey dimensions");
  dimensions
}

/// The single measure for the resolved value field.
#[must_use]
pub fn build_measures(roles: &FieldRoles) -> Vec<Measure> {
  let field = roles.value_field();
  vec![Measure {
    id: field.to_string(),
    alias: field.to_string(),
  }]
}
