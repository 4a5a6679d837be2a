//! Mark-difference accumulation between the target user and everyone else.
//!
//! ## Algorithm
//! 1. Walk the target's own ratings (the user-side view of the graph)
//! 2. For each of those films, walk every other user's rating of it
//! 3. Tally `target_value - other_value` and bump the co-rated count
//!
//! One pass over the target's films, one entry per co-rater. The target
//! never tallies against themselves, and a target with no ratings yields
//! an empty map.

use std::collections::HashMap;

use catalog::{RatingGraph, UserId};
use tracing::{debug, instrument};

use crate::types::TasteDelta;

/// Accumulate a [`TasteDelta`] for every user that co-rated at least one
/// film with `target_id`.
///
/// Pure with respect to the graph: reads it, never changes it, and the
/// result depends only on its contents.
#[instrument(skip(graph), fields(target = target_id))]
pub fn accumulate_deltas(graph: &RatingGraph, target_id: UserId) -> HashMap<UserId, TasteDelta> {
    let mut deltas: HashMap<UserId, TasteDelta> = HashMap::new();

    for own in graph.user_ratings(target_id) {
        for other in graph.film_ratings(own.film_id) {
            if other.user_id == target_id {
                continue;
            }
            let delta = deltas.entry(other.user_id).or_default();
            delta.sum_diff += own.value as i64 - other.value as i64;
            delta.co_rated += 1;
        }
    }

    debug!("accumulated deltas against {} co-raters", deltas.len());
    deltas
}
