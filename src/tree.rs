//! # Tree Addressing
//!
//! Hierarchical sankey data has no node indices. Nodes are addressed by
//! [`NodePath`]: the child positions walked from the forest root, so `[0]` is
//! the first root and `[0, 1]` its second child. Paths are assigned purely by
//! structure, which keeps them stable and unambiguous even when names repeat
//! across branches (as `top`/`middle`/`bottom` typically do).
//!
//! The renderer draws one link per parent/child pair. [`implicit_links`]
//! enumerates those links in depth-first pre-order, which is the order link
//! indices refer to.

use crate::fields::{TREE_CHILDREN_FIELD, TREE_NAME_FIELD, TREE_VALUE_FIELD};
use crate::graph;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Separator used between ancestor names in a node label.
pub const PATH_SEPARATOR: &str = " > ";

/// Structural address of a tree node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
  /// Creates a path from child positions.
  #[must_use]
  pub fn new(positions: Vec<usize>) -> Self {
    Self(positions)
  }

  /// The child positions.
  #[must_use]
  pub fn positions(&self) -> &[usize] {
    &self.0
  }

  /// The path of this node's `position`-th child.
  #[must_use]
  pub fn child(&self, position: usize) -> Self {
    let mut positions = self.0.clone();
    positions.push(position);
    Self(positions)
  }
}

impl From<Vec<usize>> for NodePath {
  fn from(positions: Vec<usize>) -> Self {
    Self(positions)
  }
}

impl fmt::Display for NodePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, position) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(".")?;
      }
      write!(f, "{position}")?;
    }
    Ok(())
  }
}

impl FromStr for NodePath {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Ok(Self::default());
    }
    s.split('.')
      .map(str::parse)
      .collect::<Result<Vec<usize>, _>>()
      .map(Self)
  }
}

impl Serialize for NodePath {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// A parent/child link of a tree payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLink {
  /// The parent node.
  pub source: NodePath,
  /// The child node.
  pub target: NodePath,
  /// The child's value.
  pub value: Value,
}

fn children(node: &Value) -> &[Value] {
  node
    .get(TREE_CHILDREN_FIELD)
    .and_then(Value::as_array)
    .map_or(&[][..], Vec::as_slice)
}

/// Display name of a tree node.
#[must_use]
pub fn node_name(node: &Value) -> String {
  node
    .get(TREE_NAME_FIELD)
    .map(graph::node_key)
    .unwrap_or_default()
}

/// Walks `path` from the forest root.
#[must_use]
pub fn find_node<'a>(forest: &'a [Value], path: &NodePath) -> Option<&'a Value> {
  let (first, rest) = path.positions().split_first()?;
  let mut node = forest.get(*first)?;
  for position in rest {
    node = children(node).get(*position)?;
  }
  Some(node)
}

/// Ancestor names from the root down to the node at `path`, joined with
/// [`PATH_SEPARATOR`].
#[must_use]
pub fn node_label(forest: &[Value], path: &NodePath) -> Option<String> {
  let (first, rest) = path.positions().split_first()?;
  let mut node = forest.get(*first)?;
  let mut names = vec![node_name(node)];
  for position in rest {
    node = children(node).get(*position)?;
    names.push(node_name(node));
  }
  Some(names.join(PATH_SEPARATOR))
}

/// Every parent/child link of the forest in depth-first pre-order.
#[must_use]
pub fn implicit_links(forest: &[Value]) -> Vec<TreeLink> {
  let mut links = Vec::new();
  for (position, root) in forest.iter().enumerate() {
    collect_links(root, NodePath::new(vec![position]), &mut links);
  }
  links
}

fn collect_links(node: &Value, path: NodePath, links: &mut Vec<TreeLink>) {
  for (position, child) in children(node).iter().enumerate() {
    let child_path = path.child(position);
    links.push(TreeLink {
      source: path.clone(),
      target: child_path.clone(),
      value: child.get(TREE_VALUE_FIELD).cloned().unwrap_or(Value::Null),
    });
    collect_links(child, child_path, links);
  }
}
