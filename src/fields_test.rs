//! # Field Resolution Test Suite
//!
//! Covers measure and identifier inference, validation of user-named fields,
//! and the tree shape check.

use crate::error::BuildError;
use crate::fields::{FieldRoles, check_tree_shape, numeric_fields, resolve_flat_fields};
use crate::seed::Seed;
use serde_json::{Value, json};

fn seed() -> Seed {
  Seed::flat(Vec::new())
}

// ============================================================================
// Measure Selection
// ============================================================================

#[test]
fn test_infers_first_numeric_field_in_key_order() {
  let sample = json!({"a": "P", "n": 7, "b": "Q", "m": 3});
  let fields = resolve_flat_fields(&sample, &seed()).unwrap();
  assert_eq!(fields.value, "n");
}

#[test]
fn test_named_measure_must_exist() {
  let sample = json!({"a": "P", "b": "Q", "n": 7});
  let err = resolve_flat_fields(&sample, &seed().with_value_field("amount")).unwrap_err();
  assert!(matches!(err, BuildError::UnresolvableField(ref m) if m.contains("amount")));
}

#[test]
fn test_named_measure_must_be_numeric() {
  let sample = json!({"a": "P", "b": "Q", "n": 7});
  let err = resolve_flat_fields(&sample, &seed().with_value_field("a")).unwrap_err();
  assert!(matches!(err, BuildError::UnresolvableField(ref m) if m.contains("not a numeric")));
}

#[test]
fn test_named_measure_may_be_any_numeric_field() {
  let sample = json!({"a": "P", "b": "Q", "n": 7, "m": 2.5});
  let fields = resolve_flat_fields(&sample, &seed().with_value_field("m")).unwrap();
  assert_eq!(fields.value, "m");
  assert_eq!((fields.source.as_str(), fields.target.as_str()), ("a", "b"));
}

#[test]
fn test_no_numeric_field_fails() {
  let sample = json!({"a": "P", "b": "Q", "n": "7"});
  let err = resolve_flat_fields(&sample, &seed()).unwrap_err();
  assert!(matches!(err, BuildError::UnresolvableField(_)));
}

// ============================================================================
// Identifier Selection
// ============================================================================

#[test]
fn test_infers_first_two_non_numeric_fields() {
  let sample = json!({"n": 7, "a": "P", "flag": true, "b": "Q"});
  let fields = resolve_flat_fields(&sample, &seed()).unwrap();
  assert_eq!(fields.source, "a");
  assert_eq!(fields.target, "flag");
}

#[test]
fn test_too_few_identifier_fields_fails() {
  let sample = json!({"a": "P", "n": 7, "m": 8});
  let err = resolve_flat_fields(&sample, &seed()).unwrap_err();
  assert!(matches!(err, BuildError::UnresolvableField(ref m) if m.contains("two non-numeric")));
}

#[test]
fn test_named_identifiers_are_used_verbatim() {
  let sample = json!({"x": "P", "y": "Q", "from": "R", "to": "S", "v": 1});
  let fields = resolve_flat_fields(&sample, &seed().with_fields("from", "to", "v")).unwrap();
  assert_eq!((fields.source.as_str(), fields.target.as_str()), ("from", "to"));
}

#[test]
fn test_named_identifier_must_exist() {
  let sample = json!({"from": "R", "v": 1});
  let err = resolve_flat_fields(&sample, &seed().with_fields("from", "to", "v")).unwrap_err();
  assert!(matches!(err, BuildError::UnresolvableField(ref m) if m.contains("target field `to`")));
}

#[test]
fn test_single_named_identifier_falls_back_to_inference() {
  let mut seed = seed();
  seed.source_field = Some("b".to_string());
  let sample = json!({"a": "P", "b": "Q", "n": 1});
  let fields = resolve_flat_fields(&sample, &seed).unwrap();
  assert_eq!((fields.source.as_str(), fields.target.as_str()), ("a", "b"));
}

#[test]
fn test_empty_field_names_are_inferred() {
  let seed = seed().with_fields("", "", "");
  let sample = json!({"a": "P", "b": "Q", "n": 7});
  let fields = resolve_flat_fields(&sample, &seed).unwrap();
  assert_eq!(fields.value, "n");
  assert_eq!((fields.source.as_str(), fields.target.as_str()), ("a", "b"));

  let mut only_source_empty = Seed::flat(Vec::new()).with_fields("", "b", "n");
  only_source_empty.value_field = Some(String::new());
  let fields = resolve_flat_fields(&sample, &only_source_empty).unwrap();
  assert_eq!((fields.source.as_str(), fields.target.as_str()), ("a", "b"));
}

#[test]
fn test_non_object_sample_is_structural() {
  let err = resolve_flat_fields(&json!([1, 2]), &seed()).unwrap_err();
  assert!(matches!(err, BuildError::StructuralMismatch(_)));
}

#[test]
fn test_resolution_is_deterministic() {
  let sample = json!({"a": "P", "b": "Q", "n": 7});
  let first = resolve_flat_fields(&sample, &seed()).unwrap();
  for _ in 0..5 {
    assert_eq!(resolve_flat_fields(&sample, &seed()).unwrap(), first);
  }
}

#[test]
fn test_numeric_fields_lists_in_key_order() {
  let sample = json!({"z": 1, "a": "x", "m": 2.5, "b": null});
  let Value::Object(map) = sample else {
    unreachable!()
  };
  assert_eq!(numeric_fields(&map), vec!["z", "m"]);
}

// ============================================================================
// Tree Shape
// ============================================================================

#[test]
fn test_tree_shape_fixes_name_and_value() {
  let roles = check_tree_shape(&[json!({"name": "A", "value": 10})]).unwrap();
  assert_eq!(
    roles,
    FieldRoles::Hierarchical {
      name_field: "name".to_string(),
      value_field: "value".to_string(),
    }
  );
  assert_eq!(roles.value_field(), "value");
  assert_eq!(roles.identifier_fields(), vec!["name"]);
}

#[test]
fn test_tree_shape_requires_value() {
  let err = check_tree_shape(&[json!({"name": "A", "children": []})]).unwrap_err();
  assert!(matches!(err, BuildError::StructuralMismatch(ref m) if m.contains("`value`")));
}

#[test]
fn test_tree_shape_samples_first_root() {
  let roles = check_tree_shape(&[json!({"name": "A", "value": 1}), json!({"value": 2})]);
  assert!(roles.is_ok());
  let err = check_tree_shape(&[json!({"value": 2}), json!({"name": "A", "value": 1})])
    .unwrap_err();
  assert!(matches!(err, BuildError::StructuralMismatch(ref m) if m.contains("root entry 0")));
}

#[test]
fn test_tree_shape_rejects_flat_rows() {
  let err = check_tree_shape(&[json!({"source": "A", "target": "B", "value": 1})]).unwrap_err();
  assert!(matches!(err, BuildError::StructuralMismatch(_)));
}

#[test]
fn test_tree_shape_rejects_empty_and_scalar_forests() {
  assert!(matches!(
    check_tree_shape(&[]),
    Err(BuildError::StructuralMismatch(_))
  ));
  assert!(matches!(
    check_tree_shape(&[json!("A")]),
    Err(BuildError::StructuralMismatch(_))
  ));
}
