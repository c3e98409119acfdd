//! # Specification Documents
//!
//! The renderer-ready output of a build. A [`SpecDocument`] is owned entirely
//! by the caller once returned; nothing in the crate keeps a reference to it.
//!
//! Serialized, a document looks like:
//!
//! ```json
//! {
//!   "type": "sankey",
//!   "categoryField": "nodeName",
//!   "valueField": "value",
//!   "sourceField": "source",
//!   "targetField": "target",
//!   "nodeAlign": "justify",
//!   "nodeGap": 8,
//!   "nodeWidth": 10,
//!   "minNodeHeight": 4,
//!   "data": [{ "values": [{ "nodes": [...], "links": [...] }] }],
//!   "color": { "type": "ordinal", "range": [...] },
//!   "label": { "visible": true, "style": { "fontSize": 10.0 } },
//!   "tooltip": { "visible": true, "mark": { ... } },
//!   "node": { ... },
//!   "link": { ... }
//! }
//! ```

use crate::error::{BuildError, Result};
use crate::graph::Payload;
use crate::style::{
  ColorScheme, FALLBACK_LINK_FILL, Fill, FillRule, LabelSpec, MarkStyle, StateStyles,
};
use crate::tooltip::{TooltipContent, TooltipSpec};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// How the renderer aligns nodes across columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeAlign {
  /// Sinks pushed to the last column.
  Justify,
  /// Nodes placed by depth from the left.
  Left,
  /// Nodes placed by height from the right.
  Right,
  /// Sources and sinks centered.
  Center,
}

/// Fixed layout constants handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
  /// Column alignment.
  pub node_align: NodeAlign,
  /// Vertical gap between nodes.
  pub node_gap: u32,
  /// Node thickness.
  pub node_width: u32,
  /// Minimum node height.
  pub min_node_height: u32,
}

impl LayoutConfig {
  /// Defaults for edge-list diagrams.
  #[must_use]
  pub fn flat() -> Self {
    Self {
      node_align: NodeAlign::Justify,
      node_gap: 8,
      node_width: 10,
      min_node_height: 4,
    }
  }

  /// Defaults for tree diagrams.
  #[must_use]
  pub fn hierarchical() -> Self {
    Self {
      node_align: NodeAlign::Left,
      ..Self::flat()
    }
  }
}

/// Node mark declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeSpec {
  /// Default-state style.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<MarkStyle>,
  /// Interaction-state overrides.
  #[serde(skip_serializing_if = "StateStyles::is_empty")]
  pub state: StateStyles,
}

/// Link mark declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpec {
  /// Style of the track drawn behind links.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub background_style: Option<MarkStyle>,
  /// Link-wide fill opacity.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fill_opacity: Option<f64>,
  /// Default-state style.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<MarkStyle>,
  /// Interaction-state overrides.
  #[serde(skip_serializing_if = "StateStyles::is_empty")]
  pub state: StateStyles,
}

/// Emphasis behavior on hover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emphasis {
  /// Whether emphasis is on.
  pub enable: bool,
  /// Which marks are emphasized, e.g. `related`.
  pub effect: String,
}

/// Diagram type, field roles, layout and mark declarations of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecFrame {
  /// Renderer chart type.
  #[serde(rename = "type")]
  pub chart_type: String,
  /// Field holding node identity.
  pub category_field: String,
  /// Field holding the flow value.
  pub value_field: String,
  /// Field holding a link's source, for edge-list payloads.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_field: Option<String>,
  /// Field holding a link's target, for edge-list payloads.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_field: Option<String>,
  /// Layout constants.
  #[serde(flatten)]
  pub layout: LayoutConfig,
  /// Field the renderer keys tree nodes by.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub node_key: Option<String>,
  /// Node marks.
  pub node: NodeSpec,
  /// Link marks.
  pub link: LinkSpec,
  /// Hover emphasis.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub emphasis: Option<Emphasis>,
  /// Title block from the seed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<Value>,
}

/// Finished renderer-ready document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecDocument {
  /// Type, roles, layout and marks.
  #[serde(flatten)]
  pub frame: SpecFrame,
  /// Graph or tree payload.
  #[serde(rename = "data", serialize_with = "serialize_data")]
  pub payload: Payload,
  /// Palette.
  pub color: ColorScheme,
  /// Labels.
  pub label: LabelSpec,
  /// Tooltip.
  pub tooltip: TooltipSpec,
}

#[derive(Serialize)]
struct DataEntry<'a> {
  values: [&'a Payload; 1],
}

fn serialize_data<S: Serializer>(
  payload: &Payload,
  serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
  [DataEntry { values: [payload] }].serialize(serializer)
}

impl SpecDocument {
  /// Hover text for the link at `link_index`, or `None` when tooltips are
  /// hidden or the link does not exist.
  #[must_use]
  pub fn tooltip_for(&self, link_index: usize) -> Option<TooltipContent> {
    self
      .tooltip
      .resolver
      .as_ref()?
      .resolve(&self.payload, link_index)
  }

  /// Fill color of the node called `name` under the node style.
  #[must_use]
  pub fn node_fill(&self, name: &str) -> Option<String> {
    match self.frame.node.style.as_ref()?.fill.as_ref()? {
      Fill::Color(color) => Some(color.clone()),
      Fill::Rule(FillRule::NodeIndex) => {
        let Payload::Flat(graph) = &self.payload else {
          return None;
        };
        let index = graph.node_index(name)?;
        self.color.color_at(index).map(str::to_string)
      }
      Fill::Rule(FillRule::SourceNode) => None,
    }
  }

  /// Fill color of the link at `link_index` under the link style.
  #[must_use]
  pub fn link_fill(&self, link_index: usize) -> Option<String> {
    let Payload::Flat(graph) = &self.payload else {
      return None;
    };
    let link = graph.links.get(link_index)?;
    match self.frame.link.style.as_ref()?.fill.as_ref()? {
      Fill::Color(color) => Some(color.clone()),
      Fill::Rule(FillRule::SourceNode) | Fill::Rule(FillRule::NodeIndex) => Some(
        graph
          .nodes
          .get(link.source)
          .and_then(|_| self.color.color_at(link.source))
          .unwrap_or(FALLBACK_LINK_FILL)
          .to_string(),
      ),
    }
  }

  /// Compact JSON text.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }

  /// Indented JSON text.
  pub fn to_json_pretty(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

/// A document under assembly. Each spec stage fills the parts it owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDraft {
  /// Set by the data stage.
  pub payload: Option<Payload>,
  /// Set by the color stage.
  pub color: Option<ColorScheme>,
  /// Set by the label stage.
  pub label: Option<LabelSpec>,
  /// Set by the tooltip stage.
  pub tooltip: Option<TooltipSpec>,
  /// Set by the frame stage.
  pub frame: Option<SpecFrame>,
}

impl SpecDraft {
  /// Finishes the draft, failing if a part was never produced.
  pub fn into_document(self) -> Result<SpecDocument> {
    fn require<T>(part: Option<T>, field: &'static str) -> Result<T> {
      part.ok_or(BuildError::IncompleteDescription {
        stage: "finish",
        field,
      })
    }
    Ok(SpecDocument {
      frame: require(self.frame, "frame")?,
      payload: require(self.payload, "payload")?,
      color: require(self.color, "color")?,
      label: require(self.label, "label")?,
      tooltip: require(self.tooltip, "tooltip")?,
    })
  }
}
