//! # Catalog Crate
//!
//! This crate holds the domain model and data access for the film
//! catalogue: films, user marks, the store seam the engine reads through,
//! and the per-request rating graph.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Film, Rating, Genre, Mpa)
//! - **store**: The `RatingStore` trait and the in-memory implementation
//! - **graph**: `RatingGraph`, the per-request film/user indexed view
//! - **parser**: Parse .dat catalogue files into Rust structs
//! - **error**: Error types for loading, validation, and lookups
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{InMemoryRatingStore, RatingGraph, RatingStore};
//! use std::path::Path;
//!
//! // Load the catalogue
//! let store = InMemoryRatingStore::load_from_files(Path::new("data/catalog"))?;
//!
//! // Snapshot it for one request
//! let graph = RatingGraph::from_snapshot(store.all_ratings()?);
//!
//! println!("{} films carry {} marks", graph.film_count(), graph.rating_count());
//! ```

// Public modules
pub mod error;
pub mod graph;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use graph::RatingGraph;
pub use store::{InMemoryRatingStore, RatingStore};
pub use types::{Film, FilmId, Genre, Mpa, Rating, UserId, MAX_MARK, MIN_MARK};
