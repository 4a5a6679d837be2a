//! Per-request view of the rating graph.
//!
//! A [`RatingGraph`] is built once from a store snapshot at the start of a
//! recommendation or popularity run and then only read. It keys the same
//! ratings both by film and by user, so the similarity scan walks films
//! while candidate expansion walks users, each in O(1) per lookup.

use std::collections::{HashMap, HashSet};

use crate::types::{FilmId, Rating, UserId};

/// All ratings in the system, indexed by film and by user.
///
/// Both views are materialized in a single pass over the snapshot. The
/// graph never outlives the request that built it, so later writes to the
/// store are invisible here.
#[derive(Debug, Default)]
pub struct RatingGraph {
    /// All ratings received by each film
    by_film: HashMap<FilmId, Vec<Rating>>,
    /// All ratings placed by each user
    by_user: HashMap<UserId, Vec<Rating>>,
    rating_count: usize,
}

impl RatingGraph {
    /// Builds both views from a film-keyed snapshot.
    ///
    /// Films with an empty rating set are dropped; every film present in
    /// the graph afterwards has at least one rating.
    pub fn from_snapshot(snapshot: HashMap<FilmId, HashSet<Rating>>) -> Self {
        let mut by_film: HashMap<FilmId, Vec<Rating>> =
            HashMap::with_capacity(snapshot.len());
        let mut by_user: HashMap<UserId, Vec<Rating>> = HashMap::new();
        let mut rating_count = 0;

        for (film_id, ratings) in snapshot {
            if ratings.is_empty() {
                continue;
            }
            let film_entry = by_film.entry(film_id).or_default();
            for rating in ratings {
                by_user.entry(rating.user_id).or_default().push(rating);
                film_entry.push(rating);
                rating_count += 1;
            }
        }

        Self {
            by_film,
            by_user,
            rating_count,
        }
    }

    /// Ratings recorded for a film
    ///
    /// Returns an empty slice if the film has none.
    pub fn film_ratings(&self, film_id: FilmId) -> &[Rating] {
        self.by_film
            .get(&film_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Ratings a user has placed
    ///
    /// Returns an empty slice if the user has none.
    pub fn user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.by_user
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over every film that has at least one rating
    pub fn films(&self) -> impl Iterator<Item = (FilmId, &[Rating])> {
        self.by_film.iter().map(|(&id, r)| (id, r.as_slice()))
    }

    /// Ids of every user that has placed at least one rating
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.by_user.keys().copied()
    }

    /// Total number of ratings in the graph
    pub fn rating_count(&self) -> usize {
        self.rating_count
    }

    /// Number of films with at least one rating
    pub fn film_count(&self) -> usize {
        self.by_film.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rating_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(ratings: &[(FilmId, UserId, u8)]) -> HashMap<FilmId, HashSet<Rating>> {
        let mut map: HashMap<FilmId, HashSet<Rating>> = HashMap::new();
        for &(film_id, user_id, value) in ratings {
            map.entry(film_id)
                .or_default()
                .insert(Rating::new(film_id, user_id, value));
        }
        map
    }

    #[test]
    fn test_both_views_agree() {
        let graph = RatingGraph::from_snapshot(snapshot(&[
            (1, 10, 7),
            (1, 20, 3),
            (2, 10, 9),
        ]));

        assert_eq!(graph.rating_count(), 3);
        assert_eq!(graph.film_ratings(1).len(), 2);
        assert_eq!(graph.film_ratings(2).len(), 1);
        assert_eq!(graph.user_ratings(10).len(), 2);
        assert_eq!(graph.user_ratings(20).len(), 1);

        // The same record is reachable through both views.
        let via_film = graph
            .film_ratings(2)
            .iter()
            .find(|r| r.user_id == 10)
            .copied();
        let via_user = graph
            .user_ratings(10)
            .iter()
            .find(|r| r.film_id == 2)
            .copied();
        assert_eq!(via_film, via_user);
    }

    #[test]
    fn test_unknown_ids_return_empty_slices() {
        let graph = RatingGraph::from_snapshot(snapshot(&[(1, 10, 5)]));
        assert!(graph.film_ratings(99).is_empty());
        assert!(graph.user_ratings(99).is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let graph = RatingGraph::from_snapshot(HashMap::new());
        assert!(graph.is_empty());
        assert_eq!(graph.film_count(), 0);
        assert_eq!(graph.films().count(), 0);
    }

    #[test]
    fn test_films_with_empty_sets_are_dropped() {
        let mut map = snapshot(&[(1, 10, 5)]);
        map.insert(7, HashSet::new());

        let graph = RatingGraph::from_snapshot(map);
        assert_eq!(graph.film_count(), 1);
        assert!(graph.films().all(|(id, ratings)| id == 1 && !ratings.is_empty()));
    }
}
