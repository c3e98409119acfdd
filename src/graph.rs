//! # Graph Construction
//!
//! Turns denormalized rows into a normalized sankey graph.
//!
//! ## Flat datasets
//!
//! One scan over the rows stringifies each source/target value, records it in
//! an order-preserving unique set and keeps the row as a name-addressed link.
//! A second pass rewrites every link to index pairs into the finished node
//! sequence. Consequences:
//!
//! - node order is first-occurrence order across the whole scan, not sorted
//! - links keep dataset row order, one link per row
//! - values are copied verbatim; parallel rows are never summed
//!
//! ## Tree datasets
//!
//! The forest is passed through as the node payload. Links are implicit
//! parent/child relations (see [`crate::tree`]).

use crate::error::{BuildError, Result};
use crate::fields::FlatFields;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// A node of a flat sankey graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SankeyNode {
  /// Unique node name.
  #[serde(rename = "nodeName")]
  pub name: String,
}

/// An index-addressed link of a flat sankey graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
  /// Position of the source node.
  pub source: usize,
  /// Position of the target node.
  pub target: usize,
  /// The row's measure, copied unchanged.
  pub value: Value,
}

/// Deduplicated node sequence plus index-addressed links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatGraph {
  /// Nodes in first-occurrence order.
  pub nodes: Vec<SankeyNode>,
  /// Links in dataset row order.
  pub links: Vec<SankeyLink>,
}

impl FlatGraph {
  /// Position of the node called `name`.
  #[must_use]
  pub fn node_index(&self, name: &str) -> Option<usize> {
    self.nodes.iter().position(|n| n.name == name)
  }

  /// Name of the node at `index`.
  #[must_use]
  pub fn node_name(&self, index: usize) -> Option<&str> {
    self.nodes.get(index).map(|n| n.name.as_str())
  }
}

/// A forest of `{name, value, children?}` nodes, unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreePayload {
  /// Root entries.
  pub nodes: Vec<Value>,
}

/// Graph payload carried by a specification document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
  /// `{nodes, links}` for flat diagrams.
  Flat(FlatGraph),
  /// `{nodes}` holding the tree for hierarchical diagrams.
  Tree(TreePayload),
}

/// Stringifies an identifier cell. Strings are kept verbatim; numbers use their
/// shortest decimal form, so `1`, `1.0` and `1e0` all name the same node.
#[must_use]
pub fn node_key(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        i.to_string()
      } else if let Some(u) = n.as_u64() {
        u.to_string()
      } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
      }
    }
    other => other.to_string(),
  }
}

/// Builds the node sequence and index-addressed links of a flat dataset.
pub fn build_flat_graph(dataset: &[Value], fields: &FlatFields) -> Result<FlatGraph> {
  let mut names: IndexSet<String> = IndexSet::new();
  let mut named_links = Vec::with_capacity(dataset.len());

  for (row_index, row) in dataset.iter().enumerate() {
    let record = row
      .as_object()
      .ok_or_else(|| BuildError::structural(format!("row {row_index} is not an object")))?;
    let endpoint = |field: &str| {
      record.get(field).map(node_key).ok_or_else(|| {
        BuildError::unresolvable(format!("row {row_index} lacks identifier field `{field}`"))
      })
    };
    let source = endpoint(fields.source.as_str())?;
    let target = endpoint(fields.target.as_str())?;
    let value = record.get(&fields.value).cloned().unwrap_or(Value::Null);

    names.insert(source.clone());
    names.insert(target.clone());
    named_links.push((source, target, value));
  }

  let mut links = Vec::with_capacity(named_links.len());
  for (source, target, value) in named_links {
    // Both names were inserted during the scan.
    let (Some(source), Some(target)) = (names.get_index_of(&source), names.get_index_of(&target))
    else {
      continue;
    };
    links.push(SankeyLink {
      source,
      target,
      value,
    });
  }

  let nodes: Vec<SankeyNode> = names.into_iter().map(|name| SankeyNode { name }).collect();

  info!(
    nodes = nodes.len(),
    links = links.len(),
    "built flat sankey graph"
  );

  Ok(FlatGraph { nodes, links })
}

/// Wraps a verified forest as the document payload.
#[must_use]
pub fn build_tree_payload(dataset: &[Value]) -> TreePayload {
  info!(roots = dataset.len(), "passing tree dataset through as sankey nodes");
  TreePayload {
    nodes: dataset.to_vec(),
  }
}
