//! # Field Resolution
//!
//! Infers which dataset fields play the identifier and measure roles.
//!
//! The contract is "infer if unspecified, else validate the user's choice":
//!
//! - **Measure**: a named field must exist in the sample and hold a number.
//!   Otherwise the first numeric field, in the sample's own key order, is used.
//! - **Identifiers** (flat only): named source and target fields must both
//!   exist. Otherwise the first two non-numeric fields other than the measure
//!   are used.
//! - **Tree shape** (hierarchical only): the first root entry is sampled and
//!   must be an object exposing `name` and `value`. The roles are then fixed to
//!   those two keys.
//!
//! An empty field name in the seed is treated as if it were not given.
//!
//! Nothing is ever invented: if a role cannot be filled the resolution fails
//! with [`BuildError::UnresolvableField`] or [`BuildError::StructuralMismatch`].

use crate::error::{BuildError, Result};
use crate::seed::Seed;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Key holding a tree node's display name.
pub const TREE_NAME_FIELD: &str = "name";
/// Key holding a tree node's flow value.
pub const TREE_VALUE_FIELD: &str = "value";
/// Key holding a tree node's children.
pub const TREE_CHILDREN_FIELD: &str = "children";

/// Field roles resolved for a flat dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFields {
  /// Field naming the source node of each row.
  pub source: String,
  /// Field naming the target node of each row.
  pub target: String,
  /// Field holding the flow measure.
  pub value: String,
}

/// Typed field-role descriptor produced by schema inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldRoles {
  /// Roles of an edge-list dataset.
  Flat {
    /// Source identifier field.
    source_field: String,
    /// Target identifier field.
    target_field: String,
    /// Measure field.
    value_field: String,
  },
  /// Roles of a tree dataset.
  Hierarchical {
    /// Identifier field, always `name`.
    name_field: String,
    /// Measure field, always `value`.
    value_field: String,
  },
}

impl FieldRoles {
  /// The measure field.
  #[must_use]
  pub fn value_field(&self) -> &str {
    match self {
      FieldRoles::Flat { value_field, .. } | FieldRoles::Hierarchical { value_field, .. } => {
        value_field
      }
    }
  }

  /// The identifier fields, in declaration order.
  #[must_use]
  pub fn identifier_fields(&self) -> Vec<&str> {
    match self {
      FieldRoles::Flat {
        source_field,
        target_field,
        ..
      } => vec![source_field.as_str(), target_field.as_str()],
      FieldRoles::Hierarchical { name_field, .. } => vec![name_field.as_str()],
    }
  }
}

impl From<FlatFields> for FieldRoles {
  fn from(fields: FlatFields) -> Self {
    FieldRoles::Flat {
      source_field: fields.source,
      target_field: fields.target,
      value_field: fields.value,
    }
  }
}

/// Names of every numeric field of `sample`, in the sample's key order.
#[must_use]
pub fn numeric_fields(sample: &Map<String, Value>) -> Vec<String> {
  sample
    .iter()
    .filter(|(_, v)| v.is_number())
    .map(|(k, _)| k.clone())
    .collect()
}

/// Resolves the source, target and value fields of a flat dataset from its
/// first record.
pub fn resolve_flat_fields(sample: &Value, seed: &Seed) -> Result<FlatFields> {
  let record = sample
    .as_object()
    .ok_or_else(|| BuildError::structural("flat dataset rows must be objects"))?;
  let numeric = numeric_fields(record);

  let value = resolve_measure(record, &numeric, named(&seed.value_field))?;
  let (source, target) = resolve_identifiers(
    record,
    &value,
    named(&seed.source_field),
    named(&seed.target_field),
  )?;

  info!(
    fields = ?record.keys().collect::<Vec<_>>(),
    numeric = ?numeric,
    value = %value,
    source = %source,
    target = %target,
    "resolved flat sankey fields"
  );

  Ok(FlatFields {
    source,
    target,
    value,
  })
}

/// A field name from the seed; an empty name counts as unset.
fn named(field: &Option<String>) -> Option<&str> {
  field.as_deref().filter(|name| !name.is_empty())
}

fn resolve_measure(
  record: &Map<String, Value>,
  numeric: &[String],
  requested: Option<&str>,
) -> Result<String> {
  match requested {
    Some(name) => match record.get(name) {
      None => Err(BuildError::unresolvable(format!(
        "specified value field `{name}` does not exist in dataset"
      ))),
      Some(v) if !v.is_number() => Err(BuildError::unresolvable(format!(
        "specified value field `{name}` is not a numeric field"
      ))),
      Some(_) => Ok(name.to_string()),
    },
    None => numeric.first().cloned().ok_or_else(|| {
      BuildError::unresolvable("dataset must have at least one numeric field")
    }),
  }
}

fn resolve_identifiers(
  record: &Map<String, Value>,
  value_field: &str,
  source: Option<&str>,
  target: Option<&str>,
) -> Result<(String, String)> {
  match (source, target) {
    (Some(source), Some(target)) => {
      for (role, name) in [("source", source), ("target", target)] {
        if !record.contains_key(name) {
          return Err(BuildError::unresolvable(format!(
            "specified {role} field `{name}` does not exist in dataset"
          )));
        }
      }
      Ok((source.to_string(), target.to_string()))
    }
    (source, target) => {
      if source.is_some() || target.is_some() {
        warn!("only one of source/target was named; inferring both");
      }
      let mut candidates = record
        .iter()
        .filter(|(k, v)| k.as_str() != value_field && !v.is_number())
        .map(|(k, _)| k.clone());
      match (candidates.next(), candidates.next()) {
        (Some(source), Some(target)) => Ok((source, target)),
        _ => Err(BuildError::unresolvable(
          "dataset must have at least two non-numeric fields for source and target",
        )),
      }
    }
  }
}

/// Verifies that `dataset` is a forest of `{name, value, children?}` nodes,
/// sampling its first root entry, and returns the fixed hierarchical roles.
pub fn check_tree_shape(dataset: &[Value]) -> Result<FieldRoles> {
  let sample = dataset.first().ok_or_else(|| {
    BuildError::structural("hierarchical sankey needs a non-empty forest of tree nodes")
  })?;
  let node = sample
    .as_object()
    .ok_or_else(|| BuildError::structural("root entry 0 is not an object"))?;
  for key in [TREE_NAME_FIELD, TREE_VALUE_FIELD] {
    if !node.contains_key(key) {
      return Err(BuildError::structural(format!(
        "root entry 0 lacks `{key}`; tree nodes need name and value"
      )));
    }
  }

  info!(
    roots = dataset.len(),
    "resolved hierarchical sankey fields: tree data keyed by name/value"
  );

  Ok(FieldRoles::Hierarchical {
    name_field: TREE_NAME_FIELD.to_string(),
    value_field: TREE_VALUE_FIELD.to_string(),
  })
}
