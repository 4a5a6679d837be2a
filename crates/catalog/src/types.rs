//! Core domain types for the film catalogue.
//!
//! This module defines the fundamental data structures used throughout the
//! system: identifiers, the `Rating` record the whole engine revolves
//! around, and the film metadata that feeds popularity queries and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with film IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a film
pub type FilmId = u32;

// =============================================================================
// Rating Type
// =============================================================================

/// Lowest mark a user can give a film
pub const MIN_MARK: u8 = 1;

/// Highest mark a user can give a film
pub const MAX_MARK: u8 = 10;

/// A single user's mark for a film.
///
/// At most one rating exists per (film, user) pair; re-rating replaces the
/// previous record. The store enforces that invariant, everything downstream
/// relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rating {
    pub film_id: FilmId,
    pub user_id: UserId,
    /// Mark value, always within `MIN_MARK..=MAX_MARK`
    pub value: u8,
}

impl Rating {
    pub fn new(film_id: FilmId, user_id: UserId, value: u8) -> Self {
        Self {
            film_id,
            user_id,
            value,
        }
    }
}

// =============================================================================
// Film-related Types
// =============================================================================

/// A film in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    /// Year extracted from the title (e.g., "Toy Story (1995)")
    pub year: Option<u16>,
    /// List of genres for this film
    pub genres: Vec<Genre>,
    /// Age rating, when the catalogue records one
    pub mpa: Option<Mpa>,
}

impl Film {
    /// Whether the film is tagged with the given genre
    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.contains(&genre)
    }
}

/// Film genres known to the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Comedy,
    Drama,
    Cartoon,
    Thriller,
    Documentary,
    Action,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Cartoon => "Cartoon",
            Genre::Thriller => "Thriller",
            Genre::Documentary => "Documentary",
            Genre::Action => "Action",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    /// Parses the catalogue spelling, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comedy" => Ok(Genre::Comedy),
            "drama" => Ok(Genre::Drama),
            "cartoon" => Ok(Genre::Cartoon),
            "thriller" => Ok(Genre::Thriller),
            "documentary" => Ok(Genre::Documentary),
            "action" => Ok(Genre::Action),
            _ => Err(CatalogError::InvalidValue {
                field: "genre".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// MPA age ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mpa {
    G,
    Pg,
    Pg13,
    R,
    Nc17,
}

impl Mpa {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mpa::G => "G",
            Mpa::Pg => "PG",
            Mpa::Pg13 => "PG-13",
            Mpa::R => "R",
            Mpa::Nc17 => "NC-17",
        }
    }
}

impl fmt::Display for Mpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mpa {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "G" => Ok(Mpa::G),
            "PG" => Ok(Mpa::Pg),
            "PG-13" => Ok(Mpa::Pg13),
            "R" => Ok(Mpa::R),
            "NC-17" => Ok(Mpa::Nc17),
            _ => Err(CatalogError::InvalidValue {
                field: "mpa".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
