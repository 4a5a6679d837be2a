//! The rating-store seam and its in-memory implementation.
//!
//! The recommendation core reads the catalogue through exactly two
//! operations, captured by [`RatingStore`]: a full snapshot of the rating
//! graph and a point lookup for a film. Whatever else the surrounding
//! service does with films and users stays on its side of this trait.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{Film, FilmId, Rating, UserId, MAX_MARK, MIN_MARK};

/// Read access the recommendation core needs from the catalogue
pub trait RatingStore {
    /// Full snapshot of the rating graph, keyed by film.
    ///
    /// The caller owns the returned map; writes that land in the store
    /// after this call do not show up in it.
    fn all_ratings(&self) -> Result<HashMap<FilmId, HashSet<Rating>>>;

    /// Resolve a film by id.
    ///
    /// Fails with [`CatalogError::FilmNotFound`] when the id is absent.
    fn film_by_id(&self, film_id: FilmId) -> Result<Film>;
}

/// In-memory catalogue backing the engine.
///
/// Owns the films and ratings, and enforces the write-side invariants:
/// mark values stay in range, marks only attach to registered films, and
/// a user re-marking a film replaces their previous mark.
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    films: HashMap<FilmId, Film>,
    ratings: HashMap<FilmId, HashSet<Rating>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalogue from `films.dat` and `ratings.dat` in `data_dir`.
    ///
    /// The two files are independent, so they are parsed in parallel.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let films_path = data_dir.join("films.dat");
        let ratings_path = data_dir.join("ratings.dat");

        let (films, ratings) = rayon::join(
            || parser::parse_films(&films_path),
            || parser::parse_ratings(&ratings_path),
        );
        let films = films?;
        let ratings = ratings?;

        let mut store = Self::new();
        for film in films {
            store.insert_film(film);
        }
        for rating in ratings {
            store.insert_rating(rating)?;
        }

        info!(
            films = store.film_count(),
            ratings = store.rating_count(),
            "catalogue loaded"
        );
        Ok(store)
    }

    /// Register a film, replacing any previous entry with the same id
    pub fn insert_film(&mut self, film: Film) {
        self.films.insert(film.id, film);
    }

    /// Record a user's mark for a film.
    ///
    /// Validates the mark range and the film reference. If the user has
    /// already marked this film, the old record is replaced rather than
    /// kept alongside the new one.
    pub fn insert_rating(&mut self, rating: Rating) -> Result<()> {
        if !(MIN_MARK..=MAX_MARK).contains(&rating.value) {
            return Err(CatalogError::InvalidValue {
                field: "mark".to_string(),
                value: rating.value.to_string(),
            });
        }
        if !self.films.contains_key(&rating.film_id) {
            return Err(CatalogError::MissingReference {
                entity: "Film".to_string(),
                id: rating.film_id,
            });
        }

        let marks = self.ratings.entry(rating.film_id).or_default();
        marks.retain(|r| r.user_id != rating.user_id);
        marks.insert(rating);
        Ok(())
    }

    /// Remove a user's mark for a film, if one exists
    pub fn remove_rating(&mut self, film_id: FilmId, user_id: UserId) {
        if let Some(marks) = self.ratings.get_mut(&film_id) {
            marks.retain(|r| r.user_id != user_id);
            if marks.is_empty() {
                self.ratings.remove(&film_id);
            }
        }
    }

    pub fn film_count(&self) -> usize {
        self.films.len()
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.values().map(|m| m.len()).sum()
    }

    /// Ids of every user with at least one recorded mark, sorted
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self
            .ratings
            .values()
            .flatten()
            .map(|r| r.user_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// All registered films, in no particular order
    pub fn films(&self) -> impl Iterator<Item = &Film> {
        self.films.values()
    }
}

impl RatingStore for InMemoryRatingStore {
    fn all_ratings(&self) -> Result<HashMap<FilmId, HashSet<Rating>>> {
        Ok(self.ratings.clone())
    }

    fn film_by_id(&self, film_id: FilmId) -> Result<Film> {
        self.films
            .get(&film_id)
            .cloned()
            .ok_or(CatalogError::FilmNotFound { id: film_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Genre;

    fn film(id: FilmId, title: &str) -> Film {
        Film {
            id,
            title: title.to_string(),
            year: None,
            genres: vec![Genre::Drama],
            mpa: None,
        }
    }

    fn store_with_films(ids: &[FilmId]) -> InMemoryRatingStore {
        let mut store = InMemoryRatingStore::new();
        for &id in ids {
            store.insert_film(film(id, &format!("Film {id}")));
        }
        store
    }

    #[test]
    fn test_insert_and_lookup() {
        let store = store_with_films(&[1, 2]);
        assert_eq!(store.film_by_id(1).unwrap().id, 1);
        assert!(matches!(
            store.film_by_id(99),
            Err(CatalogError::FilmNotFound { id: 99 })
        ));
    }

    #[test]
    fn test_rerating_replaces_previous_mark() {
        let mut store = store_with_films(&[1]);
        store.insert_rating(Rating::new(1, 10, 3)).unwrap();
        store.insert_rating(Rating::new(1, 10, 9)).unwrap();

        assert_eq!(store.rating_count(), 1);
        let snapshot = store.all_ratings().unwrap();
        let marks = &snapshot[&1];
        assert_eq!(marks.len(), 1);
        assert_eq!(marks.iter().next().unwrap().value, 9);
    }

    #[test]
    fn test_mark_range_is_validated() {
        let mut store = store_with_films(&[1]);
        assert!(matches!(
            store.insert_rating(Rating::new(1, 10, 0)),
            Err(CatalogError::InvalidValue { .. })
        ));
        assert!(matches!(
            store.insert_rating(Rating::new(1, 10, 11)),
            Err(CatalogError::InvalidValue { .. })
        ));
        store.insert_rating(Rating::new(1, 10, 1)).unwrap();
        store.insert_rating(Rating::new(1, 11, 10)).unwrap();
    }

    #[test]
    fn test_mark_for_unregistered_film_is_rejected() {
        let mut store = store_with_films(&[1]);
        assert!(matches!(
            store.insert_rating(Rating::new(2, 10, 5)),
            Err(CatalogError::MissingReference { id: 2, .. })
        ));
    }

    #[test]
    fn test_snapshot_is_independent_of_later_writes() {
        let mut store = store_with_films(&[1]);
        store.insert_rating(Rating::new(1, 10, 5)).unwrap();

        let snapshot = store.all_ratings().unwrap();
        store.insert_rating(Rating::new(1, 20, 8)).unwrap();

        assert_eq!(snapshot[&1].len(), 1);
        assert_eq!(store.all_ratings().unwrap()[&1].len(), 2);
    }

    #[test]
    fn test_remove_rating_drops_empty_film_entry() {
        let mut store = store_with_films(&[1]);
        store.insert_rating(Rating::new(1, 10, 5)).unwrap();
        store.remove_rating(1, 10);

        assert_eq!(store.rating_count(), 0);
        assert!(store.all_ratings().unwrap().is_empty());
    }

    #[test]
    fn test_user_ids_sorted_and_deduped() {
        let mut store = store_with_films(&[1, 2]);
        store.insert_rating(Rating::new(1, 30, 5)).unwrap();
        store.insert_rating(Rating::new(2, 30, 6)).unwrap();
        store.insert_rating(Rating::new(1, 10, 7)).unwrap();

        assert_eq!(store.user_ids(), vec![10, 30]);
    }
}
