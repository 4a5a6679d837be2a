//! Filter that keeps only films the proposing neighbor genuinely liked.
//!
//! A neighbor having sat through a film is not an endorsement; their mark
//! decides. A film passes only when every mark the proposing neighbor put
//! on it clears the threshold.

use std::sync::Arc;

use crate::traits::Filter;
use anyhow::Result;
use catalog::RatingGraph;
use similarity::{Candidate, TasteProfile};

/// Default threshold: a good mark is strictly greater than 5 of 10.
pub const DEFAULT_GOOD_MARK: u8 = 5;

/// Removes candidates whose proposing neighbor did not like the film.
///
/// ## Algorithm
/// For each candidate:
/// 1. Look up the film's ratings in the request's graph
/// 2. Narrow to those placed by the proposing neighbor
/// 3. Keep the candidate only if every one is strictly above the threshold
pub struct PositiveMarkFilter {
    graph: Arc<RatingGraph>,
    threshold: u8,
}

impl PositiveMarkFilter {
    /// Create a filter over this request's rating graph.
    pub fn new(graph: Arc<RatingGraph>) -> Self {
        Self {
            graph,
            threshold: DEFAULT_GOOD_MARK,
        }
    }

    /// Configure the mark a film must strictly exceed (default: 5)
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Filter for PositiveMarkFilter {
    fn name(&self) -> &str {
        "PositiveMarkFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &TasteProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                self.graph
                    .film_ratings(candidate.film_id)
                    .iter()
                    .filter(|r| r.user_id == candidate.neighbor_id)
                    .all(|r| r.value > self.threshold)
            })
            .collect();

        Ok(filtered)
    }
}
