//! The normalized description ("advanced seed") produced by the first pipeline.
//!
//! Every field is owned by exactly one normalization stage. A stage returns a
//! new value with its own fields set and the rest carried over unchanged:
//!
//! ```rust,ignore
//! Ok(AdvancedSeed { measures: Some(measures), ..prev })
//! ```

use crate::encoding::{Dimension, Measure};
use crate::error::{BuildError, Result};
use crate::fields::FieldRoles;
use crate::seed::ChartVariant;
use crate::style::{ColorScheme, LabelSpec};
use serde::Serialize;
use serde_json::Value;

/// Seed after field resolution and style defaulting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSeed {
  /// Chart type (init stage).
  pub chart_type: Option<ChartVariant>,
  /// Dataset (init stage).
  pub dataset: Option<Vec<Value>>,
  /// Resolved field roles (field stage).
  pub fields: Option<FieldRoles>,
  /// Every numeric field of the sample (field stage, flat only).
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub numeric_fields: Vec<String>,
  /// Measure descriptors (measure stage).
  pub measures: Option<Vec<Measure>>,
  /// Dimension descriptors (dimension stage).
  pub dimensions: Option<Vec<Dimension>>,
  /// Palette (color stage).
  pub color_scheme: Option<ColorScheme>,
  /// Labels (label stage).
  pub label: Option<LabelSpec>,
}

impl AdvancedSeed {
  /// The dataset, or an error naming the stage that needed it.
  pub fn require_dataset(&self, stage: &'static str) -> Result<&[Value]> {
    self
      .dataset
      .as_deref()
      .ok_or(BuildError::IncompleteDescription {
        stage,
        field: "dataset",
      })
  }

  /// The field roles, or an error naming the stage that needed them.
  pub fn require_fields(&self, stage: &'static str) -> Result<&FieldRoles> {
    self
      .fields
      .as_ref()
      .ok_or(BuildError::IncompleteDescription {
        stage,
        field: "fields",
      })
  }

  /// The palette, or an error naming the stage that needed it.
  pub fn require_color_scheme(&self, stage: &'static str) -> Result<&ColorScheme> {
    self
      .color_scheme
      .as_ref()
      .ok_or(BuildError::IncompleteDescription {
        stage,
        field: "color_scheme",
      })
  }

  /// The labels, or an error naming the stage that needed them.
  pub fn require_label(&self, stage: &'static str) -> Result<&LabelSpec> {
    self
      .label
      .as_ref()
      .ok_or(BuildError::IncompleteDescription {
        stage,
        field: "label",
      })
  }
}
