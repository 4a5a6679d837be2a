//! Popularity ranking over the rating graph.
//!
//! A film's popularity is the plain mean of its marks, recomputed from
//! the graph on every query rather than read from a cached aggregate.
//! Films nobody has marked are not ranked at all. Means are compared by
//! integer cross-multiplication so two films with genuinely equal means
//! always tie, and ties break toward the lower film id to keep results
//! deterministic.

use std::cmp::Ordering;

use anyhow::{Context, Result};
use catalog::{Film, Genre, RatingGraph, RatingStore};

/// Parameters for a popularity query.
#[derive(Debug, Clone)]
pub struct PopularityQuery {
    /// Maximum number of films to return
    pub limit: usize,
    /// Only rank films carrying this genre
    pub genre: Option<Genre>,
    /// Only rank films released this year
    pub year: Option<u16>,
}

impl PopularityQuery {
    /// Query for the `limit` best-rated films across the whole catalogue
    pub fn top(limit: usize) -> Self {
        Self {
            limit,
            genre: None,
            year: None,
        }
    }

    /// Narrow the ranking to films tagged with `genre`
    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    /// Narrow the ranking to films released in `year`
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    fn matches(&self, film: &Film) -> bool {
        if let Some(genre) = self.genre {
            if !film.has_genre(genre) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if film.year != Some(year) {
                return false;
            }
        }
        true
    }
}

/// A film with its recomputed popularity figures.
#[derive(Debug, Clone)]
pub struct RankedFilm {
    pub film: Film,
    /// Mean of all marks the film has received
    pub mean_mark: f64,
    pub mark_count: u32,
}

/// Mark sums per film, kept as integers until the order is settled.
struct FilmTally {
    film: Film,
    mark_sum: u64,
    mark_count: u32,
}

impl FilmTally {
    /// Descending by mean mark, ascending film id between equal means.
    ///
    /// `sum_a / count_a` vs `sum_b / count_b` is decided by comparing
    /// `sum_a * count_b` with `sum_b * count_a`.
    fn rank_cmp(&self, other: &FilmTally) -> Ordering {
        let lhs = self.mark_sum as u128 * other.mark_count as u128;
        let rhs = other.mark_sum as u128 * self.mark_count as u128;
        rhs.cmp(&lhs).then(self.film.id.cmp(&other.film.id))
    }
}

/// Rank the graph's films by mean mark and keep the query's top slice.
///
/// Every film in the graph has at least one mark, so the mean is always
/// defined. A limit beyond the number of ranked films returns them all.
pub fn rank_films<S: RatingStore>(
    store: &S,
    graph: &RatingGraph,
    query: &PopularityQuery,
) -> Result<Vec<RankedFilm>> {
    let mut tallies = Vec::new();

    for (film_id, ratings) in graph.films() {
        let film = store
            .film_by_id(film_id)
            .with_context(|| format!("Failed to resolve rated film {film_id}"))?;
        if !query.matches(&film) {
            continue;
        }

        let mark_sum = ratings.iter().map(|r| r.value as u64).sum();
        tallies.push(FilmTally {
            film,
            mark_sum,
            mark_count: ratings.len() as u32,
        });
    }

    tallies.sort_by(|a, b| a.rank_cmp(b));
    tallies.truncate(query.limit);

    Ok(tallies
        .into_iter()
        .map(|tally| RankedFilm {
            mean_mark: tally.mark_sum as f64 / tally.mark_count as f64,
            mark_count: tally.mark_count,
            film: tally.film,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{FilmId, InMemoryRatingStore, Mpa, Rating, RatingStore, UserId};

    fn film(id: FilmId, year: Option<u16>, genres: Vec<Genre>) -> Film {
        Film {
            id,
            title: format!("Film {id}"),
            year,
            genres,
            mpa: Some(Mpa::Pg13),
        }
    }

    fn seeded_store(films: Vec<Film>, ratings: &[(FilmId, UserId, u8)]) -> InMemoryRatingStore {
        let mut store = InMemoryRatingStore::new();
        for f in films {
            store.insert_film(f);
        }
        for &(film_id, user_id, value) in ratings {
            store.insert_rating(Rating::new(film_id, user_id, value)).unwrap();
        }
        store
    }

    fn rank(store: &InMemoryRatingStore, query: &PopularityQuery) -> Vec<FilmId> {
        let graph = RatingGraph::from_snapshot(store.all_ratings().unwrap());
        rank_films(store, &graph, query)
            .unwrap()
            .into_iter()
            .map(|r| r.film.id)
            .collect()
    }

    #[test]
    fn test_means_decide_the_order() {
        let store = seeded_store(
            vec![
                film(1, None, vec![Genre::Drama]),
                film(2, None, vec![Genre::Drama]),
                film(3, None, vec![Genre::Drama]),
            ],
            &[
                (1, 1, 2),
                (2, 1, 4),
                (3, 1, 7),
                (1, 2, 4),
                (2, 2, 6),
                (2, 3, 5),
            ],
        );

        // Means: film 1 = 3.0, film 2 = 5.0, film 3 = 7.0.
        assert_eq!(rank(&store, &PopularityQuery::top(2)), vec![3, 2]);
        assert_eq!(rank(&store, &PopularityQuery::top(10)), vec![3, 2, 1]);
    }

    #[test]
    fn test_unrated_films_are_not_ranked() {
        let store = seeded_store(
            vec![film(1, None, vec![Genre::Drama]), film(2, None, vec![Genre::Drama])],
            &[(1, 1, 8)],
        );

        assert_eq!(rank(&store, &PopularityQuery::top(10)), vec![1]);
    }

    #[test]
    fn test_equal_means_tie_toward_lower_id() {
        // 6/1 and 12/2 are the same mean; float arithmetic never enters.
        let store = seeded_store(
            vec![film(7, None, vec![Genre::Drama]), film(3, None, vec![Genre::Drama])],
            &[(7, 1, 6), (3, 1, 4), (3, 2, 8)],
        );

        assert_eq!(rank(&store, &PopularityQuery::top(10)), vec![3, 7]);
    }

    #[test]
    fn test_genre_narrows_before_ranking() {
        let store = seeded_store(
            vec![
                film(1, None, vec![Genre::Comedy]),
                film(2, None, vec![Genre::Drama]),
                film(3, None, vec![Genre::Comedy, Genre::Drama]),
            ],
            &[(1, 1, 9), (2, 1, 8), (3, 1, 2)],
        );

        let query = PopularityQuery::top(10).with_genre(Genre::Comedy);
        assert_eq!(rank(&store, &query), vec![1, 3]);
    }

    #[test]
    fn test_year_narrows_before_ranking() {
        let store = seeded_store(
            vec![
                film(1, Some(1999), vec![Genre::Drama]),
                film(2, Some(2003), vec![Genre::Drama]),
            ],
            &[(1, 1, 3), (2, 1, 9)],
        );

        let query = PopularityQuery::top(10).with_year(1999);
        assert_eq!(rank(&store, &query), vec![1]);
    }

    #[test]
    fn test_genre_and_year_combine() {
        let store = seeded_store(
            vec![
                film(1, Some(1999), vec![Genre::Comedy]),
                film(2, Some(1999), vec![Genre::Drama]),
                film(3, Some(2001), vec![Genre::Comedy]),
            ],
            &[(1, 1, 5), (2, 1, 9), (3, 1, 9)],
        );

        let query = PopularityQuery::top(10)
            .with_genre(Genre::Comedy)
            .with_year(1999);
        assert_eq!(rank(&store, &query), vec![1]);
    }

    #[test]
    fn test_mean_reflects_replaced_marks() {
        let mut store = seeded_store(vec![film(1, None, vec![Genre::Drama])], &[(1, 1, 2)]);
        store.insert_rating(Rating::new(1, 1, 10)).unwrap();

        let graph = RatingGraph::from_snapshot(store.all_ratings().unwrap());
        let ranked = rank_films(&store, &graph, &PopularityQuery::top(1)).unwrap();

        assert_eq!(ranked[0].mark_count, 1);
        assert_eq!(ranked[0].mean_mark, 10.0);
    }
}
