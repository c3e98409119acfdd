//! # Tooltip Resolution
//!
//! Produces hover text for a link: a `"<source> → <target>"` title and three
//! rows (start node, end node, formatted flow value).
//!
//! The resolver holds no reference to the document it was assembled into. It
//! takes the finished payload as an explicit argument, so it can be handed to
//! event-driven code and called any number of times after assembly.
//!
//! - **Flat payloads**: endpoints are looked up by index in the node sequence.
//! - **Tree payloads**: link `i` is the `i`-th parent/child pair in
//!   depth-first pre-order; endpoints are rendered as their ancestor path
//!   (`"A > B"`). See [`crate::tree`].

use crate::graph::{FlatGraph, Payload, TreePayload};
use crate::seed::Seed;
use crate::tree::{self, NodePath};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Separator between the endpoints in a tooltip title.
pub const TITLE_ARROW: &str = " → ";

fn default_true() -> bool {
  true
}

/// Row keys and fallback text of the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipLabels {
  /// Key of the start node row.
  pub start: String,
  /// Key of the end node row.
  pub end: String,
  /// Key of the flow value row.
  pub value: String,
  /// Prefix of the label shown for an endpoint that does not resolve.
  pub node_prefix: String,
}

impl Default for TooltipLabels {
  fn default() -> Self {
    Self {
      start: "起点".to_string(),
      end: "终点".to_string(),
      value: "流量值".to_string(),
      node_prefix: "节点".to_string(),
    }
  }
}

/// Tooltip override as written in a seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
  /// Whether tooltips are shown.
  #[serde(default = "default_true")]
  pub visible: bool,
  /// Panel/title/content styling, passed through to the renderer.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub style: Option<Value>,
  /// Row keys and fallback text.
  #[serde(default)]
  pub labels: TooltipLabels,
}

impl Default for TooltipConfig {
  fn default() -> Self {
    Self {
      visible: true,
      style: None,
      labels: TooltipLabels::default(),
    }
  }
}

/// One labeled tooltip row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipRow {
  /// Row label.
  pub key: String,
  /// Row text.
  pub value: String,
}

/// Resolved hover text for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipContent {
  /// `"<source> → <target>"`.
  pub title: String,
  /// Start node, end node and flow value rows.
  pub content: Vec<TooltipRow>,
}

/// Maps a hovered link back to readable endpoint names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipResolver {
  labels: TooltipLabels,
}

impl TooltipResolver {
  /// Creates a resolver using `labels` for row keys and fallbacks.
  #[must_use]
  pub fn new(labels: TooltipLabels) -> Self {
    Self { labels }
  }

  /// The row keys and fallback text.
  #[must_use]
  pub fn labels(&self) -> &TooltipLabels {
    &self.labels
  }

  /// Hover text for the link at `link_index`, or `None` when the payload has
  /// no such link.
  #[must_use]
  pub fn resolve(&self, payload: &Payload, link_index: usize) -> Option<TooltipContent> {
    let (source, target, value) = match payload {
      Payload::Flat(graph) => self.flat_endpoints(graph, link_index)?,
      Payload::Tree(tree) => self.tree_endpoints(tree, link_index)?,
    };
    Some(TooltipContent {
      title: format!("{source}{TITLE_ARROW}{target}"),
      content: vec![
        TooltipRow {
          key: self.labels.start.clone(),
          value: source,
        },
        TooltipRow {
          key: self.labels.end.clone(),
          value: target,
        },
        TooltipRow {
          key: self.labels.value.clone(),
          value: format_flow_value(&value),
        },
      ],
    })
  }

  fn flat_endpoints(
    &self,
    graph: &FlatGraph,
    link_index: usize,
  ) -> Option<(String, String, Value)> {
    let link = graph.links.get(link_index)?;
    let name = |index: usize| {
      graph
        .node_name(index)
        .map_or_else(|| self.unresolved(index), str::to_string)
    };
    Some((name(link.source), name(link.target), link.value.clone()))
  }

  fn tree_endpoints(
    &self,
    tree: &TreePayload,
    link_index: usize,
  ) -> Option<(String, String, Value)> {
    let link = tree::implicit_links(&tree.nodes).into_iter().nth(link_index)?;
    let name = |path: &NodePath| {
      tree::node_label(&tree.nodes, path).unwrap_or_else(|| self.unresolved(path))
    };
    let source = name(&link.source);
    let target = name(&link.target);
    Some((source, target, link.value))
  }

  fn unresolved(&self, address: impl Display) -> String {
    format!("{} {}", self.labels.node_prefix, address)
  }
}

impl Default for TooltipResolver {
  fn default() -> Self {
    Self::new(TooltipLabels::default())
  }
}

/// Tooltip section of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipSpec {
  /// Whether tooltips are shown.
  pub visible: bool,
  /// Renderer styling, passed through.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<Value>,
  /// Link resolver; absent when tooltips are hidden.
  #[serde(rename = "mark", skip_serializing_if = "Option::is_none")]
  pub resolver: Option<TooltipResolver>,
}

/// The seed's tooltip settings over the defaults.
#[must_use]
pub fn resolve_tooltip(seed: &Seed) -> TooltipSpec {
  let config = seed.tooltip.clone().unwrap_or_default();
  TooltipSpec {
    visible: config.visible,
    style: config.style,
    resolver: config.visible.then(|| TooltipResolver::new(config.labels)),
  }
}

/// Formats a flow value: integers with thousands separators, other numbers
/// fixed to two decimals.
#[must_use]
pub fn format_flow_value(value: &Value) -> String {
  match value {
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        group_thousands(&i.to_string())
      } else if let Some(u) = n.as_u64() {
        group_thousands(&u.to_string())
      } else {
        let f = n.as_f64().unwrap_or_default();
        if f.is_finite() && f.fract() == 0.0 {
          group_thousands(&format!("{f:.0}"))
        } else {
          format!("{f:.2}")
        }
      }
    }
    Value::Null => String::new(),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn group_thousands(digits: &str) -> String {
  let (sign, digits) = match digits.strip_prefix('-') {
    Some(rest) => ("-", rest),
    None => ("", digits),
  };
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  grouped.push_str(sign);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  grouped
}
