//! Closest-neighbor selection and candidate gathering.
//!
//! The aggregated deltas rank every co-rater by `|sum_diff| / co_rated`.
//! The whole group tied at the global minimum counts as "the neighbors";
//! keeping the full tie group instead of one arbitrary winner is what
//! makes the result independent of map iteration order.

use std::cmp::Ordering;
use std::collections::HashMap;

use catalog::{RatingGraph, UserId};
use tracing::debug;

use crate::types::{Candidate, TasteDelta};

/// Users whose taste sits at the minimal distance from the target.
///
/// All ties at the minimum are returned, sorted by user id. An empty
/// delta map (target rated nothing, or nobody co-rated) yields an empty
/// list.
pub fn closest_neighbors(deltas: &HashMap<UserId, TasteDelta>) -> Vec<UserId> {
    let Some(best) = deltas.values().min_by(|a, b| a.proximity_cmp(b)) else {
        return Vec::new();
    };
    let best = *best;

    let mut neighbors: Vec<UserId> = deltas
        .iter()
        .filter(|(_, delta)| delta.proximity_cmp(&best) == Ordering::Equal)
        .map(|(&user_id, _)| user_id)
        .collect();
    neighbors.sort_unstable();

    debug!(
        score = best.score(),
        count = neighbors.len(),
        "selected closest neighbors"
    );
    neighbors
}

/// Every film the neighbors have marked, one candidate per (film, neighbor).
///
/// No filtering happens here; the pipeline decides what survives.
pub fn gather_candidates(graph: &RatingGraph, neighbors: &[UserId]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for &neighbor_id in neighbors {
        for rating in graph.user_ratings(neighbor_id) {
            candidates.push(Candidate::new(rating.film_id, neighbor_id));
        }
    }

    debug!(
        neighbors = neighbors.len(),
        candidates = candidates.len(),
        "gathered raw candidates"
    );
    candidates
}
