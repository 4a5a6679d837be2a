//! # Similarity Crate
//!
//! This crate turns the rating graph into recommendation candidates by
//! finding the users whose taste sits closest to the target's.
//!
//! ## Components
//!
//! ### Delta aggregation
//! One pass over the target's films tallies, per co-rater, the signed sum
//! of mark differences and the number of shared films.
//!
//! ### Neighbor selection
//! Proximity is `|sum_diff| / co_rated`; the full group tied at the global
//! minimum is kept, compared exactly so ties never depend on float
//! rounding.
//!
//! ### Candidate gathering
//! Each neighbor proposes every film they marked, tagged with the neighbor
//! id so later stages can check how that neighbor felt about it.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{accumulate_deltas, closest_neighbors, gather_candidates};
//!
//! let deltas = accumulate_deltas(&graph, user_id);
//! let neighbors = closest_neighbors(&deltas);
//! let candidates = gather_candidates(&graph, &neighbors);
//! ```

// Public modules
pub mod aggregate;
pub mod neighbors;
pub mod profile;
pub mod types;

// Re-export commonly used items
pub use aggregate::accumulate_deltas;
pub use neighbors::{closest_neighbors, gather_candidates};
pub use profile::{build_taste_profile, TasteProfile};
pub use types::{Candidate, TasteDelta};
