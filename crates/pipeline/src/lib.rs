//! Pipeline for filtering recommendation candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Candidates arrive straight from the neighbor scan and pass through the
//! filters in order:
//! 1. AlreadyRatedFilter drops films the target user has marked
//! 2. PositiveMarkFilter drops films the proposing neighbor did not like
//!
//! What survives is deduplicated and resolved to full films by the engine.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyRatedFilter)
//!     .add_filter(PositiveMarkFilter::new(graph.clone()));
//!
//! let filtered = pipeline.apply(candidates, &profile)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
