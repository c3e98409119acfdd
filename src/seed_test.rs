//! # Seed Test Suite
//!
//! Covers seed JSON parsing, key aliases, chart type names and file loading.

use crate::error::SeedError;
use crate::seed::{ChartVariant, Seed};
use crate::style::ColorScheme;
use serde_json::json;
use std::io::Write;

// ============================================================================
// Chart Types
// ============================================================================

#[test]
fn test_chart_type_names() {
  assert_eq!(ChartVariant::from("sankey".to_string()), ChartVariant::Flat);
  assert_eq!(ChartVariant::from("flat".to_string()), ChartVariant::Flat);
  assert_eq!(
    ChartVariant::from("sankeyHierarchical".to_string()),
    ChartVariant::Hierarchical
  );
  assert_eq!(
    ChartVariant::from("hierarchical".to_string()),
    ChartVariant::Hierarchical
  );
  assert_eq!(
    ChartVariant::from("pie".to_string()),
    ChartVariant::Other("pie".to_string())
  );
}

#[test]
fn test_chart_type_display_is_canonical() {
  assert_eq!(ChartVariant::Flat.to_string(), "sankey");
  assert_eq!(ChartVariant::Hierarchical.to_string(), "sankeyHierarchical");
  assert_eq!(ChartVariant::Other("pie".to_string()).as_str(), "pie");
}

// ============================================================================
// JSON Parsing
// ============================================================================

#[test]
fn test_parses_full_seed() {
  let seed = Seed::from_json_str(
    r##"{
      "chartType": "sankey",
      "dataset": [{"from": "A", "to": "B", "amt": 3}],
      "sourceField": "from",
      "targetField": "to",
      "valueField": "amt",
      "colorScheme": {"type": "ordinal", "range": ["#111", "#222"]},
      "label": {"visible": false, "style": {"fontSize": 14, "fill": "#333"}},
      "tooltip": {"visible": true},
      "title": {"text": "Flows"}
    }"##,
  )
  .unwrap();
  assert_eq!(seed.chart_type, Some(ChartVariant::Flat));
  assert_eq!(seed.dataset.as_ref().map(Vec::len), Some(1));
  assert_eq!(seed.source_field.as_deref(), Some("from"));
  assert_eq!(seed.target_field.as_deref(), Some("to"));
  assert_eq!(seed.value_field.as_deref(), Some("amt"));
  assert_eq!(seed.color_scheme, Some(ColorScheme::ordinal(["#111", "#222"])));
  let label = seed.label.unwrap();
  assert!(!label.visible);
  assert_eq!(label.style.get("fill"), Some(&json!("#333")));
  assert_eq!(seed.title, Some(json!({"text": "Flows"})));
}

#[test]
fn test_short_aliases() {
  let seed = Seed::from_json_str(
    r#"{"variant": "hierarchical", "source": "s", "target": "t", "value": "v"}"#,
  )
  .unwrap();
  assert_eq!(seed.chart_type, Some(ChartVariant::Hierarchical));
  assert_eq!(seed.source_field.as_deref(), Some("s"));
  assert_eq!(seed.target_field.as_deref(), Some("t"));
  assert_eq!(seed.value_field.as_deref(), Some("v"));
}

#[test]
fn test_everything_is_optional() {
  let seed = Seed::from_json_str("{}").unwrap();
  assert_eq!(seed, Seed::default());
}

#[test]
fn test_unknown_chart_type_parses() {
  let seed = Seed::from_json_str(r#"{"chartType": "funnel"}"#).unwrap();
  assert_eq!(seed.chart_type, Some(ChartVariant::Other("funnel".to_string())));
}

#[test]
fn test_dataset_key_order_is_preserved() {
  let seed =
    Seed::from_json_str(r#"{"dataset": [{"zeta": "A", "alpha": "B", "n": 1}]}"#).unwrap();
  let row = seed.dataset.unwrap().remove(0);
  let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
  assert_eq!(keys, vec!["zeta", "alpha", "n"]);
}

#[test]
fn test_invalid_json_fails() {
  let err = Seed::from_json_str(r#"{"chartType": 3}"#).unwrap_err();
  assert!(matches!(err, SeedError::Json(_)));
}

#[test]
fn test_seed_round_trips_through_serde() {
  let seed = Seed::flat(vec![json!({"s": "X", "t": "Y", "v": 1})]).with_fields("s", "t", "v");
  let text = serde_json::to_string(&seed).unwrap();
  assert!(text.contains(r#""chartType":"sankey""#));
  assert_eq!(Seed::from_json_str(&text).unwrap(), seed);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_from_path_reads_file() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  write!(
    file,
    r#"{{"chartType": "sankey", "dataset": [{{"s": "X", "t": "Y", "v": 10}}]}}"#
  )
  .unwrap();
  let seed = Seed::from_path(file.path()).unwrap();
  assert_eq!(seed.chart_type, Some(ChartVariant::Flat));
}

#[test]
fn test_from_path_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("absent.json");
  let err = Seed::from_path(&path).unwrap_err();
  assert!(matches!(err, SeedError::Io { path: ref p, .. } if p == &path));
}

#[test]
fn test_from_reader() {
  let text = br#"{"chartType": "sankeyHierarchical", "dataset": [{"name": "A", "value": 1}]}"#;
  let seed = Seed::from_reader(&text[..]).unwrap();
  assert_eq!(seed.chart_type, Some(ChartVariant::Hierarchical));
}
