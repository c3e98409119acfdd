//! # Graph Construction Test Suite
//!
//! Covers node deduplication, first-occurrence ordering, index-addressed links
//! and tree passthrough.

use crate::error::BuildError;
use crate::fields::FlatFields;
use crate::graph::{
  FlatGraph, Payload, SankeyLink, SankeyNode, build_flat_graph, build_tree_payload, node_key,
};
use serde_json::{Value, json};

fn fields(source: &str, target: &str, value: &str) -> FlatFields {
  FlatFields {
    source: source.to_string(),
    target: target.to_string(),
    value: value.to_string(),
  }
}

fn names(graph: &FlatGraph) -> Vec<&str> {
  graph.nodes.iter().map(|n| n.name.as_str()).collect()
}

fn pairs(graph: &FlatGraph) -> Vec<(usize, usize)> {
  graph.links.iter().map(|l| (l.source, l.target)).collect()
}

// ============================================================================
// Flat Graphs
// ============================================================================

#[test]
fn test_two_rows_sharing_a_source() {
  let rows = vec![
    json!({"s": "X", "t": "Y", "v": 10}),
    json!({"s": "X", "t": "Z", "v": 5}),
  ];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(names(&graph), vec!["X", "Y", "Z"]);
  assert_eq!(
    graph.links,
    vec![
      SankeyLink {
        source: 0,
        target: 1,
        value: json!(10),
      },
      SankeyLink {
        source: 0,
        target: 2,
        value: json!(5),
      },
    ]
  );
}

#[test]
fn test_chain_of_budget_rows() {
  let rows = vec![
    json!({"from": "Budget", "to": "Ops", "amt": 60}),
    json!({"from": "Budget", "to": "R&D", "amt": 40}),
    json!({"from": "Ops", "to": "Salaries", "amt": 45}),
  ];
  let graph = build_flat_graph(&rows, &fields("from", "to", "amt")).unwrap();
  assert_eq!(names(&graph), vec!["Budget", "Ops", "R&D", "Salaries"]);
  assert_eq!(pairs(&graph), vec![(0, 1), (0, 2), (1, 3)]);
}

#[test]
fn test_node_order_is_first_occurrence_not_sorted() {
  let rows = vec![
    json!({"s": "zeta", "t": "alpha", "v": 1}),
    json!({"s": "mid", "t": "zeta", "v": 2}),
  ];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(names(&graph), vec!["zeta", "alpha", "mid"]);
  assert_eq!(pairs(&graph), vec![(0, 1), (2, 0)]);
}

#[test]
fn test_parallel_rows_are_not_aggregated() {
  let rows = vec![
    json!({"s": "A", "t": "B", "v": 3}),
    json!({"s": "A", "t": "B", "v": 4}),
  ];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(graph.nodes.len(), 2);
  assert_eq!(graph.links.len(), 2);
  assert_eq!(graph.links[0].value, json!(3));
  assert_eq!(graph.links[1].value, json!(4));
}

#[test]
fn test_self_loop_is_kept() {
  let rows = vec![json!({"s": "A", "t": "A", "v": 1})];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(names(&graph), vec!["A"]);
  assert_eq!(pairs(&graph), vec![(0, 0)]);
}

#[test]
fn test_non_string_identifiers_are_stringified() {
  let rows = vec![json!({"s": 2024, "t": true, "v": 1.5})];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(names(&graph), vec!["2024", "true"]);
  assert_eq!(graph.links[0].value, json!(1.5));
}

#[test]
fn test_equal_numbers_name_one_node() {
  let rows: Vec<Value> = serde_json::from_str(
    r#"[
      {"s": 1, "t": "Y", "v": 1},
      {"s": 1.0, "t": "Y", "v": 2},
      {"s": 1e3, "t": "Y", "v": 3},
      {"s": 2.5, "t": "Y", "v": 4}
    ]"#,
  )
  .unwrap();
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(names(&graph), vec!["1", "Y", "1000", "2.5"]);
  assert_eq!(pairs(&graph), vec![(0, 1), (0, 1), (2, 1), (3, 1)]);
}

#[test]
fn test_node_key_forms() {
  assert_eq!(node_key(&json!("a b")), "a b");
  assert_eq!(node_key(&json!(-7)), "-7");
  assert_eq!(node_key(&json!(u64::MAX)), u64::MAX.to_string());
  assert_eq!(node_key(&json!(3.0)), "3");
  assert_eq!(node_key(&json!(null)), "null");
}

#[test]
fn test_missing_value_is_null() {
  let rows = vec![json!({"s": "A", "t": "B"})];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(graph.links[0].value, Value::Null);
}

#[test]
fn test_missing_identifier_fails() {
  let rows = vec![
    json!({"s": "A", "t": "B", "v": 1}),
    json!({"s": "A", "v": 2}),
  ];
  let err = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap_err();
  assert!(matches!(err, BuildError::UnresolvableField(ref m) if m.contains("row 1")));
}

#[test]
fn test_non_object_row_fails() {
  let rows = vec![json!({"s": "A", "t": "B", "v": 1}), json!(["A", "B", 2])];
  let err = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap_err();
  assert!(matches!(err, BuildError::StructuralMismatch(_)));
}

#[test]
fn test_lookup_helpers() {
  let rows = vec![json!({"s": "X", "t": "Y", "v": 10})];
  let graph = build_flat_graph(&rows, &fields("s", "t", "v")).unwrap();
  assert_eq!(graph.node_index("Y"), Some(1));
  assert_eq!(graph.node_index("Q"), None);
  assert_eq!(graph.node_name(0), Some("X"));
  assert_eq!(graph.node_name(2), None);
}

#[test]
fn test_flat_payload_serializes_node_names() {
  let graph = FlatGraph {
    nodes: vec![
      SankeyNode {
        name: "X".to_string(),
      },
      SankeyNode {
        name: "Y".to_string(),
      },
    ],
    links: vec![SankeyLink {
      source: 0,
      target: 1,
      value: json!(10),
    }],
  };
  assert_eq!(
    serde_json::to_value(Payload::Flat(graph)).unwrap(),
    json!({
      "nodes": [{"nodeName": "X"}, {"nodeName": "Y"}],
      "links": [{"source": 0, "target": 1, "value": 10}]
    })
  );
}

// ============================================================================
// Tree Payloads
// ============================================================================

#[test]
fn test_tree_is_passed_through_unchanged() {
  let forest = vec![json!({
    "name": "A",
    "value": 10,
    "children": [{"name": "B", "value": 4}, {"name": "C", "value": 6}]
  })];
  let payload = build_tree_payload(&forest);
  assert_eq!(payload.nodes, forest);
  assert_eq!(
    serde_json::to_value(Payload::Tree(payload)).unwrap(),
    json!({"nodes": forest})
  );
}
