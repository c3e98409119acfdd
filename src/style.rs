//! # Style Composition
//!
//! Colors and labels are pure configuration: a user override wins, otherwise a
//! built-in default applies. This module also defines the declarative mark
//! styles (per interaction state) that the assembler attaches to nodes, links
//! and labels.

use crate::seed::Seed;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Default ordinal palette.
pub const DEFAULT_PALETTE: [&str; 10] = [
  "#8D72F6", "#5766EC", "#66A3FE", "#51D5E6", "#4EC0B3", "#F9DF90", "#F9AD71", "#ED8888",
  "#E9A0C3", "#D77DD3",
];

/// Default label font size.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Fill used for a link whose source node has no color.
pub const FALLBACK_LINK_FILL: &str = "#cccccc";

fn default_true() -> bool {
  true
}

fn default_scheme_kind() -> String {
  "ordinal".to_string()
}

/// Palette mapping node positions to colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
  /// Scale type; only `ordinal` is produced by default.
  #[serde(rename = "type", default = "default_scheme_kind")]
  pub kind: String,
  /// Colors, cycled by position.
  #[serde(default)]
  pub range: Vec<String>,
}

impl ColorScheme {
  /// An ordinal scheme over `range`.
  #[must_use]
  pub fn ordinal<I, S>(range: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      kind: default_scheme_kind(),
      range: range.into_iter().map(Into::into).collect(),
    }
  }

  /// Color for position `index`, cycling through the range.
  #[must_use]
  pub fn color_at(&self, index: usize) -> Option<&str> {
    if self.range.is_empty() {
      return None;
    }
    Some(self.range[index % self.range.len()].as_str())
  }
}

impl Default for ColorScheme {
  fn default() -> Self {
    Self::ordinal(DEFAULT_PALETTE)
  }
}

/// Label override as written in a seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
  /// Whether labels are drawn.
  #[serde(default = "default_true")]
  pub visible: bool,
  /// Text style keys, merged over the default font size.
  #[serde(default)]
  pub style: Map<String, Value>,
}

impl Default for LabelConfig {
  fn default() -> Self {
    Self {
      visible: true,
      style: Map::new(),
    }
  }
}

/// Resolved label text style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
  /// Font size in pixels.
  #[serde(rename = "fontSize")]
  pub font_size: f64,
  /// Any other style keys from the override, passed through.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Resolved label section of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSpec {
  /// Whether labels are drawn.
  pub visible: bool,
  /// Text style.
  pub style: LabelStyle,
  /// Per-state overrides.
  #[serde(skip_serializing_if = "StateStyles::is_empty")]
  pub state: StateStyles,
}

/// Declarative fill rule evaluated against the graph payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FillRule {
  /// Palette color at the node's position in the node sequence.
  NodeIndex,
  /// Color of the link's source node.
  SourceNode,
}

/// A fill: a literal color or a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fill {
  /// Literal CSS color.
  Color(String),
  /// Color computed per datum.
  Rule(FillRule),
}

/// Visual attributes of a mark in one interaction state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkStyle {
  /// Fill color or rule.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fill: Option<Fill>,
  /// Fill opacity in `[0, 1]`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fill_opacity: Option<f64>,
  /// Stroke color.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stroke: Option<String>,
  /// Stroke width.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub line_width: Option<f64>,
  /// Brightness boost.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub brighter: Option<f64>,
}

impl MarkStyle {
  /// An empty style.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets a literal fill color.
  #[must_use]
  pub fn fill(mut self, color: impl Into<String>) -> Self {
    self.fill = Some(Fill::Color(color.into()));
    self
  }

  /// Sets a fill rule.
  #[must_use]
  pub fn fill_rule(mut self, rule: FillRule) -> Self {
    self.fill = Some(Fill::Rule(rule));
    self
  }

  /// Sets the fill opacity.
  #[must_use]
  pub fn fill_opacity(mut self, opacity: f64) -> Self {
    self.fill_opacity = Some(opacity);
    self
  }

  /// Sets the stroke color.
  #[must_use]
  pub fn stroke(mut self, color: impl Into<String>) -> Self {
    self.stroke = Some(color.into());
    self
  }

  /// Sets the stroke width.
  #[must_use]
  pub fn line_width(mut self, width: f64) -> Self {
    self.line_width = Some(width);
    self
  }

  /// Sets the brightness boost.
  #[must_use]
  pub fn brighter(mut self, amount: f64) -> Self {
    self.brighter = Some(amount);
    self
  }
}

/// Style overrides per interaction state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateStyles {
  /// Pointer over the mark.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hover: Option<MarkStyle>,
  /// Mark selected.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selected: Option<MarkStyle>,
  /// Another mark is emphasized.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub blur: Option<MarkStyle>,
}

impl StateStyles {
  /// True when no state carries an override.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.hover.is_none() && self.selected.is_none() && self.blur.is_none()
  }
}

/// The seed's palette, or the default one.
#[must_use]
pub fn resolve_color_scheme(seed: &Seed) -> ColorScheme {
  seed.color_scheme.clone().unwrap_or_default()
}

/// The seed's label settings merged over the defaults.
#[must_use]
pub fn resolve_label(seed: &Seed) -> LabelSpec {
  let config = seed.label.clone().unwrap_or_default();
  let mut extra = config.style;
  let font_size = match extra.remove("fontSize") {
    None => DEFAULT_FONT_SIZE,
    Some(v) => v.as_f64().unwrap_or_else(|| {
      warn!(font_size = %v, "ignoring non-numeric label fontSize");
      DEFAULT_FONT_SIZE
    }),
  };
  LabelSpec {
    visible: config.visible,
    style: LabelStyle { font_size, extra },
    state: StateStyles::default(),
  }
}
