//! Assembly stages: [`AdvancedSeed`](crate::advanced::AdvancedSeed) →
//! [`SpecDocument`](crate::spec::SpecDocument).
//!
//! Data, color, label and tooltip stages each produce one part of the draft;
//! the frame stage adds the chart type, field roles, layout constants and the
//! per-state mark styles the renderer needs.

use super::{SpecContext, SpecStage, Stage};
use crate::error::{BuildError, Result};
use crate::fields::{FieldRoles, FlatFields, TREE_NAME_FIELD, TREE_VALUE_FIELD};
use crate::graph::{self, Payload};
use crate::spec::{Emphasis, LayoutConfig, LinkSpec, NodeSpec, SpecDraft, SpecFrame};
use crate::style::{FillRule, MarkStyle, StateStyles};
use crate::seed::Seed;
use crate::tooltip;
use serde_json::Value;
use tracing::debug;

/// Chart type name the renderer expects for both variants.
pub const RENDERER_CHART_TYPE: &str = "sankey";

const BLUR_FILL: &str = "#e8e8e8";
const BLUR_OPACITY: f64 = 0.15;

/// Assembly stages of an edge-list chart.
#[must_use]
pub fn flat_pipeline() -> Vec<SpecStage> {
  vec![
    Stage::spec("build_flat_data", build_flat_data),
    Stage::spec("apply_color_scheme", apply_color_scheme),
    Stage::spec("apply_labels", apply_labels),
    Stage::spec("apply_tooltip", apply_tooltip),
    Stage::spec("build_flat_frame", build_flat_frame),
  ]
}

/// Assembly stages of a tree chart.
#[must_use]
pub fn tree_pipeline() -> Vec<SpecStage> {
  vec![
    Stage::spec("build_tree_data", build_tree_data),
    Stage::spec("apply_color_scheme", apply_color_scheme),
    Stage::spec("apply_tree_labels", apply_tree_labels),
    Stage::spec("apply_tooltip", apply_tooltip),
    Stage::spec("build_tree_frame", build_tree_frame),
  ]
}

/// Builds the deduplicated node sequence and index-addressed links.
pub fn build_flat_data(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let dataset = ctx.advanced.require_dataset("build_flat_data")?;
  let FieldRoles::Flat {
    source_field,
    target_field,
    value_field,
  } = ctx.advanced.require_fields("build_flat_data")?
  else {
    return Err(BuildError::structural(
      "flat data stage received hierarchical field roles",
    ));
  };
  let fields = FlatFields {
    source: source_field.clone(),
    target: target_field.clone(),
    value: value_field.clone(),
  };
  let graph = graph::build_flat_graph(dataset, &fields)?;
  Ok(SpecDraft {
    payload: Some(Payload::Flat(graph)),
    ..prev
  })
}

/// Passes the tree through as the node payload.
pub fn build_tree_data(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let dataset = ctx.advanced.require_dataset("build_tree_data")?;
  Ok(SpecDraft {
    payload: Some(Payload::Tree(graph::build_tree_payload(dataset))),
    ..prev
  })
}

/// Copies the resolved palette.
pub fn apply_color_scheme(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let color = ctx.advanced.require_color_scheme("apply_color_scheme")?.clone();
  Ok(SpecDraft {
    color: Some(color),
    ..prev
  })
}

/// Copies the resolved labels.
pub fn apply_labels(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let label = ctx.advanced.require_label("apply_labels")?.clone();
  Ok(SpecDraft {
    label: Some(label),
    ..prev
  })
}

/// Copies the resolved labels and dims them while another node is emphasized.
pub fn apply_tree_labels(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let mut label = ctx.advanced.require_label("apply_tree_labels")?.clone();
  label.state.blur = Some(MarkStyle::new().fill(BLUR_FILL).fill_opacity(BLUR_OPACITY));
  Ok(SpecDraft {
    label: Some(label),
    ..prev
  })
}

/// Resolves the tooltip settings and attaches the link resolver.
pub fn apply_tooltip(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  Ok(SpecDraft {
    tooltip: Some(tooltip::resolve_tooltip(ctx.seed)),
    ..prev
  })
}

/// The seed's title, unless it is empty (`null`, `false`, `0` or `""`).
fn seed_title(seed: &Seed) -> Option<Value> {
  match seed.title.as_ref()? {
    Value::Null | Value::Bool(false) => None,
    Value::String(s) if s.is_empty() => None,
    Value::Number(n) if n.as_f64() == Some(0.0) => None,
    title => Some(title.clone()),
  }
}

fn selected_style() -> MarkStyle {
  MarkStyle::new()
    .fill("#dddddd")
    .stroke("#333333")
    .line_width(1.0)
    .brighter(1.0)
    .fill_opacity(1.0)
}

/// Adds roles, layout and mark styles of an edge-list chart.
pub fn build_flat_frame(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let node = NodeSpec {
    style: Some(
      MarkStyle::new()
        .fill_rule(FillRule::NodeIndex)
        .fill_opacity(0.8)
        .stroke("#fff")
        .line_width(1.0),
    ),
    state: StateStyles {
      hover: Some(MarkStyle::new().stroke("#333333").line_width(2.0).fill_opacity(1.0)),
      selected: Some(selected_style()),
      blur: None,
    },
  };
  let link = LinkSpec {
    background_style: None,
    fill_opacity: None,
    style: Some(
      MarkStyle::new()
        .fill_rule(FillRule::SourceNode)
        .fill_opacity(0.4)
        .stroke("transparent"),
    ),
    state: StateStyles {
      hover: Some(MarkStyle::new().fill_opacity(0.9).stroke("#333").line_width(1.0)),
      selected: Some(selected_style()),
      blur: None,
    },
  };
  let frame = SpecFrame {
    chart_type: RENDERER_CHART_TYPE.to_string(),
    category_field: "nodeName".to_string(),
    value_field: "value".to_string(),
    source_field: Some("source".to_string()),
    target_field: Some("target".to_string()),
    layout: LayoutConfig::flat(),
    node_key: None,
    node,
    link,
    emphasis: None,
    title: seed_title(ctx.seed),
  };
  debug!(
    layout = ?frame.layout,
    has_title = frame.title.is_some(),
    "assembled flat sankey frame"
  );
  Ok(SpecDraft {
    frame: Some(frame),
    ..prev
  })
}

/// Adds roles, layout, mark styles and emphasis of a tree chart.
pub fn build_tree_frame(prev: SpecDraft, ctx: &SpecContext<'_>) -> Result<SpecDraft> {
  let blur = MarkStyle::new().fill(BLUR_FILL).fill_opacity(BLUR_OPACITY);
  let node = NodeSpec {
    style: None,
    state: StateStyles {
      hover: Some(MarkStyle::new().fill("red")),
      selected: None,
      blur: Some(blur),
    },
  };
  let link = LinkSpec {
    background_style: Some(MarkStyle::new().fill("#ccc").fill_opacity(0.2)),
    fill_opacity: Some(0.6),
    style: Some(MarkStyle::new().stroke("transparent")),
    state: StateStyles {
      hover: Some(MarkStyle::new().fill_opacity(1.0).stroke("#000000").line_width(1.0)),
      selected: None,
      blur: Some(MarkStyle::new().fill(BLUR_FILL)),
    },
  };
  let frame = SpecFrame {
    chart_type: RENDERER_CHART_TYPE.to_string(),
    category_field: TREE_NAME_FIELD.to_string(),
    value_field: TREE_VALUE_FIELD.to_string(),
    source_field: None,
    target_field: None,
    layout: LayoutConfig::hierarchical(),
    node_key: Some(TREE_NAME_FIELD.to_string()),
    node,
    link,
    emphasis: Some(Emphasis {
      enable: true,
      effect: "related".to_string(),
    }),
    title: seed_title(ctx.seed),
  };
  debug!(
    layout = ?frame.layout,
    has_title = frame.title.is_some(),
    "assembled hierarchical sankey frame"
  );
  Ok(SpecDraft {
    frame: Some(frame),
    ..prev
  })
}
