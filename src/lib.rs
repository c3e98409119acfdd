//! # SankeyWeave
//!
//! Staged, declarative sankey specification building in pure Rust.
//!
//! SankeyWeave turns a loosely-typed *seed* (a chart type, a dataset and a few
//! optional overrides) into a renderer-ready specification document. Two
//! diagram variants are supported:
//!
//! - **Flat**: an edge list of source/target/value rows, normalized into a
//!   deduplicated node sequence plus index-addressed links
//! - **Hierarchical**: a forest of nested name/value nodes, passed through as a
//!   tree with implicit parent/child links
//!
//! ## Key Features
//!
//! - **Schema Inference**: identifier and measure fields are inferred from a
//!   sample record when the seed does not name them, and validated when it does
//! - **Staged Pipelines**: normalization and assembly run as ordered lists of
//!   pure stages, selected per chart type from an explicit registry
//! - **Resolvable Tooltips**: hover text maps link indices back to node names
//!   or full tree paths, independently of the document that carries them
//! - **Fail Fast**: missing input, unresolvable fields and shape mismatches are
//!   reported before any graph is built
//!
//! ## Quick Start
//!
//! ```rust
//! use sankeyweave::pipeline::{PipelineRegistry, SankeyBuilder};
//! use sankeyweave::seed::Seed;
//! use serde_json::json;
//!
//! let registry = PipelineRegistry::standard();
//! let seed = Seed::flat(vec![
//!   json!({"s": "X", "t": "Y", "v": 10}),
//!   json!({"s": "X", "t": "Z", "v": 5}),
//! ])
//! .with_fields("s", "t", "v");
//!
//! let doc = SankeyBuilder::new(&registry).build(&seed)?;
//! let tip = doc.tooltip_for(1).unwrap();
//! assert_eq!(tip.title, "X → Z");
//! # Ok::<(), sankeyweave::error::BuildError>(())
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Normalized seed description produced by the first pipeline.
pub mod advanced;
/// Dimension and measure descriptors.
pub mod encoding;
/// Build and seed-loading errors.
pub mod error;
/// Field role inference and validation.
pub mod fields;
/// Flat graph construction and tree payloads.
pub mod graph;
/// Chart-type registry and the two-stage build dispatcher.
pub mod pipeline;
/// Seed types and JSON loading.
pub mod seed;
/// Specification document types.
pub mod spec;
/// Palette, label and mark style composition.
pub mod style;
/// Link tooltip resolution.
pub mod tooltip;
/// Structural addressing of tree nodes.
pub mod tree;

pub use error::{BuildError, Result, SeedError};
pub use pipeline::{PipelineRegistry, SankeyBuilder};
pub use seed::{ChartVariant, Seed};
pub use spec::SpecDocument;

#[cfg(test)]
mod fields_test;
#[cfg(test)]
mod graph_test;
#[cfg(test)]
mod seed_test;
