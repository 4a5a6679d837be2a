//! Filter to remove films the target user has already marked.
//!
//! This is the first filter in the pipeline; recommending a film the
//! user has already sat through and scored helps nobody.

use crate::traits::Filter;
use anyhow::Result;
use similarity::{Candidate, TasteProfile};

/// Removes candidates whose film the target user has already rated.
///
/// Uses the HashSet in TasteProfile.rated_films for O(1) lookups.
pub struct AlreadyRatedFilter;

impl Filter for AlreadyRatedFilter {
    fn name(&self) -> &str {
        "AlreadyRatedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &TasteProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !profile.has_rated(candidate.film_id))
            .collect();
        Ok(filtered)
    }
}
