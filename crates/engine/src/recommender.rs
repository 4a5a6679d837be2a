//! # Recommender
//!
//! This module coordinates a full recommendation request:
//! 1. Snapshot the rating graph from the store
//! 2. Build the target user's taste profile
//! 3. Accumulate mark deltas against every co-rater
//! 4. Select the closest-taste neighbors (all ties kept)
//! 5. Gather the neighbors' films as candidates
//! 6. Apply filters (already rated, positive mark)
//! 7. Deduplicate and resolve candidates to full films
//!
//! Every request works on its own snapshot; two requests never share
//! mutable state, so no locking happens anywhere on this path.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use catalog::{Film, FilmId, RatingGraph, RatingStore, UserId};
use pipeline::filters::{AlreadyRatedFilter, PositiveMarkFilter, DEFAULT_GOOD_MARK};
use pipeline::FilterPipeline;
use similarity::{
    accumulate_deltas, build_taste_profile, closest_neighbors, gather_candidates, Candidate,
    TasteProfile,
};

use crate::ranking::{self, PopularityQuery, RankedFilm};

/// Entry point for recommendation and popularity queries over one store.
pub struct Recommender<S: RatingStore> {
    store: S,
    good_mark_threshold: u8,
}

impl<S: RatingStore> Recommender<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            good_mark_threshold: DEFAULT_GOOD_MARK,
        }
    }

    /// Configure the mark a neighbor's film must strictly exceed to be
    /// recommended (default: 5)
    pub fn with_good_mark_threshold(mut self, threshold: u8) -> Self {
        self.good_mark_threshold = threshold;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to apply writes between requests
    pub fn into_store(self) -> S {
        self.store
    }

    /// Films the closest-taste neighbors liked that `user_id` has not rated.
    ///
    /// Returns every accepted film, deduplicated, in ascending film id
    /// order. A user with no ratings (or no co-raters) gets an empty list.
    /// A candidate film missing from the catalogue is a data inconsistency
    /// and fails the whole request.
    pub fn find_recommendations(&self, user_id: UserId) -> Result<Vec<Film>> {
        let start_time = Instant::now();

        let graph = self.snapshot_graph()?;
        let profile = build_taste_profile(&graph, user_id);
        if profile.rated_films.is_empty() {
            info!("User {} has no ratings, nothing to recommend from", user_id);
            return Ok(Vec::new());
        }

        let deltas = accumulate_deltas(&graph, user_id);
        let neighbors = closest_neighbors(&deltas);
        info!(
            "User {} has {} co-raters, {} at minimal distance",
            user_id,
            deltas.len(),
            neighbors.len()
        );

        let candidates = gather_candidates(&graph, &neighbors);
        let accepted = self.apply_filters(candidates, &profile, &graph)?;
        info!("Filters accepted {} candidates", accepted.len());

        let films = self.resolve_films(accepted)?;
        info!(
            "Recommended {} films for user {} in {:.2?}",
            films.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(films)
    }

    /// The films with the highest mean mark, best first.
    ///
    /// Only films with at least one mark are ranked; the query may narrow
    /// by genre or release year before ranking and caps the result length.
    pub fn popular_films(&self, query: &PopularityQuery) -> Result<Vec<RankedFilm>> {
        let start_time = Instant::now();

        let graph = self.snapshot_graph()?;
        let ranked = ranking::rank_films(&self.store, &graph, query)?;

        info!(
            "Ranked {} films for {:?} in {:.2?}",
            ranked.len(),
            query,
            start_time.elapsed()
        );
        Ok(ranked)
    }

    fn snapshot_graph(&self) -> Result<Arc<RatingGraph>> {
        let snapshot = self
            .store
            .all_ratings()
            .context("Failed to snapshot ratings")?;
        Ok(Arc::new(RatingGraph::from_snapshot(snapshot)))
    }

    /// Run the candidate set through the filter pipeline
    fn apply_filters(
        &self,
        candidates: Vec<Candidate>,
        profile: &TasteProfile,
        graph: &Arc<RatingGraph>,
    ) -> Result<Vec<Candidate>> {
        let filter_pipeline = FilterPipeline::new()
            .add_filter(AlreadyRatedFilter)
            .add_filter(
                PositiveMarkFilter::new(Arc::clone(graph))
                    .with_threshold(self.good_mark_threshold),
            );

        filter_pipeline
            .apply(candidates, profile)
            .context("Failed to apply filters")
    }

    /// Deduplicate accepted candidates and resolve them in the catalogue.
    ///
    /// The same film may have been proposed by several neighbors; it is
    /// returned once. Resolution failures propagate.
    fn resolve_films(&self, accepted: Vec<Candidate>) -> Result<Vec<Film>> {
        let mut film_ids: Vec<FilmId> = accepted.into_iter().map(|c| c.film_id).collect();
        film_ids.sort_unstable();
        film_ids.dedup();

        film_ids
            .into_iter()
            .map(|film_id| {
                self.store
                    .film_by_id(film_id)
                    .with_context(|| format!("Failed to resolve recommended film {film_id}"))
            })
            .collect()
    }
}
