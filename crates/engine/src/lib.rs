//! Engine crate for the CineCircle recommendation core.
//!
//! This crate wires the catalogue, the similarity scan, and the filter
//! pipeline into the two operations callers actually ask for: personal
//! recommendations and popularity rankings.

pub mod ranking;
pub mod recommender;

pub use ranking::{rank_films, PopularityQuery, RankedFilm};
pub use recommender::Recommender;
