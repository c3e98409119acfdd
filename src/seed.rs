//! # Seeds
//!
//! A seed is the loosely-typed description a caller hands to the builder: the
//! chart type, the raw dataset, and optional field names and style overrides.
//! Seeds are immutable once received; every build reads them through a shared
//! reference.
//!
//! Seeds are usually loaded from JSON. Object key order inside the dataset is
//! preserved, since field inference walks the sample record in its own order.
//!
//! ```rust
//! use sankeyweave::seed::{ChartVariant, Seed};
//!
//! let seed = Seed::from_json_str(
//!   r#"{"chartType": "sankey", "dataset": [{"s": "X", "t": "Y", "v": 10}]}"#,
//! )?;
//! assert_eq!(seed.chart_type, Some(ChartVariant::Flat));
//! # Ok::<(), sankeyweave::error::SeedError>(())
//! ```

use crate::error::SeedError;
use crate::style::{ColorScheme, LabelConfig};
use crate::tooltip::TooltipConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// The diagram variant a seed asks for.
///
/// Parsed from the `chartType` string. Names that are not built in are kept
/// as [`ChartVariant::Other`] so the dispatcher can report them as
/// unregistered instead of failing at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartVariant {
  /// Edge-list diagram built from source/target/value rows.
  Flat,
  /// Tree diagram built from nested name/value nodes.
  Hierarchical,
  /// Any other chart type name.
  Other(String),
}

impl ChartVariant {
  /// Canonical chart type name.
  #[must_use]
  pub fn as_str(&self) -> &str {
    match self {
      ChartVariant::Flat => "sankey",
      ChartVariant::Hierarchical => "sankeyHierarchical",
      ChartVariant::Other(name) => name,
    }
  }
}

impl From<String> for ChartVariant {
  fn from(name: String) -> Self {
    match name.as_str() {
      "sankey" | "flat" => ChartVariant::Flat,
      "sankeyHierarchical" | "hierarchical" => ChartVariant::Hierarchical,
      _ => ChartVariant::Other(name),
    }
  }
}

impl From<ChartVariant> for String {
  fn from(variant: ChartVariant) -> Self {
    variant.as_str().to_string()
  }
}

impl fmt::Display for ChartVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// User-supplied diagram description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
  /// Requested diagram variant.
  #[serde(alias = "variant", default, skip_serializing_if = "Option::is_none")]
  pub chart_type: Option<ChartVariant>,
  /// Flat records or a forest of tree nodes.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dataset: Option<Vec<Value>>,
  /// Explicit source identifier field.
  #[serde(alias = "source", default, skip_serializing_if = "Option::is_none")]
  pub source_field: Option<String>,
  /// Explicit target identifier field.
  #[serde(alias = "target", default, skip_serializing_if = "Option::is_none")]
  pub target_field: Option<String>,
  /// Explicit measure field.
  #[serde(alias = "value", default, skip_serializing_if = "Option::is_none")]
  pub value_field: Option<String>,
  /// Palette override.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color_scheme: Option<ColorScheme>,
  /// Label override.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<LabelConfig>,
  /// Tooltip override.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tooltip: Option<TooltipConfig>,
  /// Title block, passed through to the document untouched.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<Value>,
}

impl Seed {
  /// Creates a flat seed over the given rows.
  #[must_use]
  pub fn flat(dataset: Vec<Value>) -> Self {
    Self {
      chart_type: Some(ChartVariant::Flat),
      dataset: Some(dataset),
      ..Self::default()
    }
  }

  /// Creates a hierarchical seed over the given forest.
  #[must_use]
  pub fn hierarchical(dataset: Vec<Value>) -> Self {
    Self {
      chart_type: Some(ChartVariant::Hierarchical),
      dataset: Some(dataset),
      ..Self::default()
    }
  }

  /// Names the source, target and value fields explicitly.
  #[must_use]
  pub fn with_fields(
    mut self,
    source: impl Into<String>,
    target: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.source_field = Some(source.into());
    self.target_field = Some(target.into());
    self.value_field = Some(value.into());
    self
  }

  /// Names only the measure field.
  #[must_use]
  pub fn with_value_field(mut self, value: impl Into<String>) -> Self {
    self.value_field = Some(value.into());
    self
  }

  /// Sets the palette override.
  #[must_use]
  pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
    self.color_scheme = Some(scheme);
    self
  }

  /// Sets the label override.
  #[must_use]
  pub fn with_label(mut self, label: LabelConfig) -> Self {
    self.label = Some(label);
    self
  }

  /// Sets the tooltip override.
  #[must_use]
  pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
    self.tooltip = Some(tooltip);
    self
  }

  /// Sets the title block.
  #[must_use]
  pub fn with_title(mut self, title: Value) -> Self {
    self.title = Some(title);
    self
  }

  /// Parses a seed from JSON text.
  pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Parses a seed from a JSON reader.
  pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeedError> {
    Ok(serde_json::from_reader(reader)?)
  }

  /// Loads a seed from a JSON file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&text)
  }
}
