//! # Pipeline Dispatch
//!
//! A build runs two ordered stage lists chosen by chart type:
//!
//! 1. **Normalization**: `AdvancedSeed::default()` is threaded through stages
//!    that read the seed and resolve fields, encodings and styles.
//! 2. **Assembly**: `SpecDraft::default()` is threaded through stages that read
//!    the seed and the finished normalized description and produce the
//!    document parts.
//!
//! Each stage is a plain function `(value, &context) -> Result<value>`. It gets
//! the accumulated value by move, never mutates the context, and returns the
//! next value. The first error stops the build.
//!
//! Chart types map to pipeline pairs through a [`PipelineRegistry`], an
//! immutable table built once and passed by reference to a [`SankeyBuilder`].
//!
//! ```rust
//! use sankeyweave::pipeline::{PipelineRegistry, SankeyBuilder};
//! use sankeyweave::seed::Seed;
//! use serde_json::json;
//!
//! let registry = PipelineRegistry::standard();
//! let seed = Seed::flat(vec![json!({"s": "X", "t": "Y", "v": 10})]);
//! let doc = SankeyBuilder::new(&registry).build(&seed)?;
//! assert_eq!(doc.frame.chart_type, "sankey");
//! # Ok::<(), sankeyweave::error::BuildError>(())
//! ```

pub mod advanced_stages;
pub mod spec_stages;

use crate::advanced::AdvancedSeed;
use crate::error::{BuildError, Result};
use crate::seed::{ChartVariant, Seed};
use crate::spec::{SpecDocument, SpecDraft};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Read-only context of the normalization pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AdvancedContext<'a> {
  /// The seed being built.
  pub seed: &'a Seed,
}

/// Read-only context of the assembly pipeline.
#[derive(Debug, Clone, Copy)]
pub struct SpecContext<'a> {
  /// The seed being built.
  pub seed: &'a Seed,
  /// The finished normalized description.
  pub advanced: &'a AdvancedSeed,
}

/// Signature of a normalization stage.
pub type AdvancedStageFn = fn(AdvancedSeed, &AdvancedContext<'_>) -> Result<AdvancedSeed>;

/// Signature of an assembly stage.
pub type SpecStageFn = fn(SpecDraft, &SpecContext<'_>) -> Result<SpecDraft>;

/// A named pipeline stage.
#[derive(Clone, Copy)]
pub struct Stage<F> {
  /// Name used in diagnostics.
  pub name: &'static str,
  /// The stage function.
  pub run: F,
}

impl Stage<AdvancedStageFn> {
  /// Creates a named normalization stage.
  pub const fn advanced(name: &'static str, run: AdvancedStageFn) -> Self {
    Self { name, run }
  }
}

impl Stage<SpecStageFn> {
  /// Creates a named assembly stage.
  pub const fn spec(name: &'static str, run: SpecStageFn) -> Self {
    Self { name, run }
  }
}

impl<F> fmt::Debug for Stage<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Stage").field(&self.name).finish()
  }
}

/// A normalization stage.
pub type AdvancedStage = Stage<AdvancedStageFn>;

/// An assembly stage.
pub type SpecStage = Stage<SpecStageFn>;

/// Normalization and assembly stage lists for one chart type.
#[derive(Debug, Clone, Default)]
pub struct PipelinePair {
  /// Normalization stages, run first.
  pub advanced: Vec<AdvancedStage>,
  /// Assembly stages, run second.
  pub spec: Vec<SpecStage>,
}

impl PipelinePair {
  /// Creates a pair from its two stage lists.
  #[must_use]
  pub fn new(advanced: Vec<AdvancedStage>, spec: Vec<SpecStage>) -> Self {
    Self { advanced, spec }
  }

  /// The built-in edge-list pipelines.
  #[must_use]
  pub fn flat() -> Self {
    Self::new(advanced_stages::flat_pipeline(), spec_stages::flat_pipeline())
  }

  /// The built-in tree pipelines.
  #[must_use]
  pub fn hierarchical() -> Self {
    Self::new(advanced_stages::tree_pipeline(), spec_stages::tree_pipeline())
  }
}

/// Immutable chart type → pipeline pair table.
#[derive(Debug, Clone, Default)]
pub struct PipelineRegistry {
  pipelines: HashMap<ChartVariant, PipelinePair>,
}

impl PipelineRegistry {
  /// Starts an empty registry.
  #[must_use]
  pub fn builder() -> RegistryBuilder {
    RegistryBuilder::default()
  }

  /// A registry with the flat and hierarchical chart types.
  #[must_use]
  pub fn standard() -> Self {
    Self::builder()
      .register(ChartVariant::Flat, PipelinePair::flat())
      .register(ChartVariant::Hierarchical, PipelinePair::hierarchical())
      .build()
  }

  /// The pipelines registered for `variant`.
  #[must_use]
  pub fn get(&self, variant: &ChartVariant) -> Option<&PipelinePair> {
    self.pipelines.get(variant)
  }

  /// Whether `variant` has pipelines.
  #[must_use]
  pub fn contains(&self, variant: &ChartVariant) -> bool {
    self.pipelines.contains_key(variant)
  }
}

/// Collects registrations before freezing them into a [`PipelineRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
  pipelines: HashMap<ChartVariant, PipelinePair>,
}

impl RegistryBuilder {
  /// Registers (or replaces) the pipelines for `variant`.
  #[must_use]
  pub fn register(mut self, variant: ChartVariant, pair: PipelinePair) -> Self {
    self.pipelines.insert(variant, pair);
    self
  }

  /// Freezes the registrations.
  #[must_use]
  pub fn build(self) -> PipelineRegistry {
    PipelineRegistry {
      pipelines: self.pipelines,
    }
  }
}

/// Runs seeds through the pipelines of a registry.
#[derive(Debug, Clone, Copy)]
pub struct SankeyBuilder<'r> {
  registry: &'r PipelineRegistry,
}

impl<'r> SankeyBuilder<'r> {
  /// Creates a builder over `registry`.
  #[must_use]
  pub fn new(registry: &'r PipelineRegistry) -> Self {
    Self { registry }
  }

  fn pipelines(&self, seed: &Seed) -> Result<&'r PipelinePair> {
    let variant = seed
      .chart_type
      .as_ref()
      .ok_or_else(|| BuildError::missing("chartType is required"))?;
    self
      .registry
      .get(variant)
      .ok_or_else(|| BuildError::UnregisteredVariant(variant.to_string()))
  }

  /// Runs the normalization pipeline.
  pub fn build_advanced(&self, seed: &Seed) -> Result<AdvancedSeed> {
    let pair = self.pipelines(seed)?;
    let context = AdvancedContext { seed };
    let mut value = AdvancedSeed::default();
    for stage in &pair.advanced {
      trace!(stage = stage.name, "running normalization stage");
      value = (stage.run)(value, &context)?;
    }
    Ok(value)
  }

  /// Runs the assembly pipeline over a normalized description.
  pub fn build_spec(&self, seed: &Seed, advanced: &AdvancedSeed) -> Result<SpecDocument> {
    let pair = self.pipelines(seed)?;
    let context = SpecContext { seed, advanced };
    let mut draft = SpecDraft::default();
    for stage in &pair.spec {
      trace!(stage = stage.name, "running assembly stage");
      draft = (stage.run)(draft, &context)?;
    }
    draft.into_document()
  }

  /// Runs both pipelines.
  pub fn build(&self, seed: &Seed) -> Result<SpecDocument> {
    let advanced = self.build_advanced(seed)?;
    let doc = self.build_spec(seed, &advanced)?;
    debug!(chart_type = %doc.frame.chart_type, "built sankey specification");
    Ok(doc)
  }
}
