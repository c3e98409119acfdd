//! Normalization stages: seed → [`AdvancedSeed`].

use super::{AdvancedContext, AdvancedStage, Stage};
use crate::advanced::AdvancedSeed;
use crate::encoding;
use crate::error::{BuildError, Result};
use crate::fields::{self, FieldRoles};
use crate::style;

/// Normalization stages of an edge-list chart.
#[must_use]
pub fn flat_pipeline() -> Vec<AdvancedStage> {
  vec![
    Stage::advanced("init_advanced_seed", init_advanced_seed),
    Stage::advanced("identify_flat_fields", identify_flat_fields),
    Stage::advanced("build_measures", build_measures),
    Stage::advanced("build_dimensions", build_dimensions),
    Stage::advanced("build_color_config", build_color_config),
    Stage::advanced("build_label_config", build_label_config),
  ]
}

/// Normalization stages of a tree chart.
#[must_use]
pub fn tree_pipeline() -> Vec<AdvancedStage> {
  vec![
    Stage::advanced("init_advanced_seed", init_advanced_seed),
    Stage::advanced("identify_tree_fields", identify_tree_fields),
    Stage::advanced("build_measures", build_measures),
    Stage::advanced("build_dimensions", build_dimensions),
    Stage::advanced("build_color_config", build_color_config),
    Stage::advanced("build_label_config", build_label_config),
  ]
}

/// Copies the chart type and dataset, rejecting seeds that lack either.
pub fn init_advanced_seed(prev: AdvancedSeed, ctx: &AdvancedContext<'_>) -> Result<AdvancedSeed> {
  let chart_type = ctx
    .seed
    .chart_type
    .clone()
    .ok_or_else(|| BuildError::missing("chartType is required"))?;
  let dataset = match &ctx.seed.dataset {
    Some(rows) if !rows.is_empty() => rows.clone(),
    _ => {
      return Err(BuildError::missing(
        "dataset is required and must not be empty",
      ));
    }
  };
  Ok(AdvancedSeed {
    chart_type: Some(chart_type),
    dataset: Some(dataset),
    ..prev
  })
}

/// Infers or validates source, target and value fields from the first row.
pub fn identify_flat_fields(prev: AdvancedSeed, ctx: &AdvancedContext<'_>) -> Result<AdvancedSeed> {
  let dataset = prev.require_dataset("identify_flat_fields")?;
  let sample = dataset.first().ok_or_else(|| {
    BuildError::missing("dataset is required and must not be empty")
  })?;
  let resolved = fields::resolve_flat_fields(sample, ctx.seed)?;
  let numeric_fields = sample
    .as_object()
    .map(fields::numeric_fields)
    .unwrap_or_default();
  Ok(AdvancedSeed {
    fields: Some(FieldRoles::from(resolved)),
    numeric_fields,
    ..prev
  })
}

/// Checks the tree shape and fixes the `name`/`value` roles.
pub fn identify_tree_fields(
  prev: AdvancedSeed,
  _ctx: &AdvancedContext<'_>,
) -> Result<AdvancedSeed> {
  let roles = fields::check_tree_shape(prev.require_dataset("identify_tree_fields")?)?;
  Ok(AdvancedSeed {
    fields: Some(roles),
    ..prev
  })
}

/// Projects the measure descriptor.
pub fn build_measures(prev: AdvancedSeed, _ctx: &AdvancedContext<'_>) -> Result<AdvancedSeed> {
  let measures = encoding::build_measures(prev.require_fields("build_measures")?);
  Ok(AdvancedSeed {
    measures: Some(measures),
    ..prev
  })
}

/// Projects the dimension descriptors.
pub fn build_dimensions(prev: AdvancedSeed, _ctx: &AdvancedContext<'_>) -> Result<AdvancedSeed> {
  let dimensions = encoding::build_dimensions(prev.require_fields("build_dimensions")?);
  Ok(AdvancedSeed {
    dimensions: Some(dimensions),
    ..prev
  })
}

/// Resolves the palette.
pub fn build_color_config(prev: AdvancedSeed, ctx: &AdvancedContext<'_>) -> Result<AdvancedSeed> {
  Ok(AdvancedSeed {
    color_scheme: Some(style::resolve_color_scheme(ctx.seed)),
    ..prev
  })
}

/// Resolves the label settings.
pub fn build_label_config(prev: AdvancedSeed, ctx: &AdvancedContext<'_>) -> Result<AdvancedSeed> {
  Ok(AdvancedSeed {
    label: Some(style::resolve_label(ctx.seed)),
    ..prev
  })
}
