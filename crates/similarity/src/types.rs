//! Types shared by the similarity scan and candidate gathering.

use std::cmp::Ordering;

use catalog::{FilmId, UserId};

/// Running mark-difference tally between the target user and one candidate.
///
/// For every film both users marked, `sum_diff` accumulates
/// `target_value - candidate_value` (sign preserved) and `co_rated` counts
/// the shared film. The pair's proximity score is `|sum_diff| / co_rated`;
/// smaller means closer taste.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TasteDelta {
    /// Signed sum of per-film mark differences
    pub sum_diff: i64,
    /// Number of films both users marked
    pub co_rated: u32,
}

impl TasteDelta {
    /// Proximity score as a real number, for display and logging.
    ///
    /// A delta only exists once at least one co-rated film was seen, so
    /// `co_rated` is never zero here.
    pub fn score(&self) -> f64 {
        debug_assert!(self.co_rated > 0, "TasteDelta with no co-rated films");
        (self.sum_diff as f64 / self.co_rated as f64).abs()
    }

    /// Compares two proximity scores exactly.
    ///
    /// `|a.sum_diff| / a.co_rated` vs `|b.sum_diff| / b.co_rated` is decided
    /// by cross-multiplying in u128, so ties are exact instead of hanging on
    /// float rounding.
    pub fn proximity_cmp(&self, other: &TasteDelta) -> Ordering {
        debug_assert!(self.co_rated > 0 && other.co_rated > 0);
        let lhs = self.sum_diff.unsigned_abs() as u128 * other.co_rated as u128;
        let rhs = other.sum_diff.unsigned_abs() as u128 * self.co_rated as u128;
        lhs.cmp(&rhs)
    }
}

/// A film proposed for recommendation, tagged with the neighbor it came from.
///
/// The same film can show up once per neighbor that marked it; composition
/// dedupes after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub film_id: FilmId,
    /// The closest-taste user whose history proposed this film
    pub neighbor_id: UserId,
}

impl Candidate {
    pub fn new(film_id: FilmId, neighbor_id: UserId) -> Self {
        Self {
            film_id,
            neighbor_id,
        }
    }
}
