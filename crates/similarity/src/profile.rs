//! Target-user profile built once per request.
//!
//! Gathers what the rest of the run needs to know about the target user
//! up front so the filters and the composer never rescan the graph for it.

use std::collections::HashSet;

use catalog::{FilmId, RatingGraph, UserId};

/// What the target user has already marked.
#[derive(Debug, Clone)]
pub struct TasteProfile {
    pub user_id: UserId,
    /// Films the user has marked, any value
    pub rated_films: HashSet<FilmId>,
}

impl TasteProfile {
    pub fn has_rated(&self, film_id: FilmId) -> bool {
        self.rated_films.contains(&film_id)
    }
}

/// Build a profile for `user_id` from the request's rating graph.
///
/// A user the graph has never seen gets an empty profile; that is a valid
/// state (it just means every downstream stage produces nothing), not an
/// error.
pub fn build_taste_profile(graph: &RatingGraph, user_id: UserId) -> TasteProfile {
    let rated_films = graph
        .user_ratings(user_id)
        .iter()
        .map(|r| r.film_id)
        .collect();

    TasteProfile {
        user_id,
        rated_films,
    }
}
