//! # Error Handling
//!
//! Every stage of the build fails fast: the first condition detected is
//! returned to the caller and nothing partial is left behind. Defaults are only
//! applied to optional configuration (colors, labels, tooltip, title), never to
//! the conditions below.
//!
//! ## Error Kinds
//!
//! - **MissingRequiredInput**: the chart type is absent, or the dataset is absent or empty
//! - **UnresolvableField**: no usable measure or identifier field could be determined
//! - **StructuralMismatch**: a hierarchical dataset is not tree-shaped
//! - **UnregisteredVariant**: no pipeline pair is registered for the requested chart type
//! - **IncompleteDescription**: a stage read a field no earlier stage produced

use std::path::PathBuf;

/// Error raised while turning a seed into a specification document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
  /// A mandatory part of the seed is absent or empty.
  #[error("missing required input: {0}")]
  MissingRequiredInput(String),
  /// Field roles could not be determined or a named field is unusable.
  #[error("unresolvable field: {0}")]
  UnresolvableField(String),
  /// The dataset does not have the shape the chart type requires.
  #[error("structural mismatch: {0}")]
  StructuralMismatch(String),
  /// The dispatcher has no pipelines for this chart type.
  #[error("no pipeline registered for chart type `{0}`")]
  UnregisteredVariant(String),
  /// A stage ran before the stage that produces the field it needs.
  #[error("stage `{stage}` requires `{field}`, which no earlier stage produced")]
  IncompleteDescription {
    /// The stage that observed the gap.
    stage: &'static str,
    /// The missing field of the intermediate value.
    field: &'static str,
  },
}

impl BuildError {
  /// Shorthand for [`BuildError::MissingRequiredInput`].
  pub fn missing(msg: impl Into<String>) -> Self {
    Self::MissingRequiredInput(msg.into())
  }

  /// Shorthand for [`BuildError::UnresolvableField`].
  pub fn unresolvable(msg: impl Into<String>) -> Self {
    Self::UnresolvableField(msg.into())
  }

  /// Shorthand for [`BuildError::StructuralMismatch`].
  pub fn structural(msg: impl Into<String>) -> Self {
    Self::StructuralMismatch(msg.into())
  }
}

/// Error raised while loading a seed from JSON text or a file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
  /// Reading the seed file failed.
  #[error("read seed file {path}: {source}")]
  Io {
    /// The file that could not be read.
    path: PathBuf,
    /// The underlying I/O error.
    #[source]
    source: std::io::Error,
  },
  /// The seed is not valid JSON or does not match the seed schema.
  #[error("invalid seed json: {0}")]
  Json(#[from] serde_json::Error),
}

/// Result alias used throughout the build pipeline.
pub type Result<T> = std::result::Result<T, BuildError>;
