//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use anyhow::Result;
use similarity::{Candidate, TasteProfile};

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// `Send + Sync` keeps filters usable from concurrent callers; filters take
/// ownership of the candidate vector and return the survivors, so a pass
/// never clones what it keeps.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `profile` - The target user's profile (identity and rated films)
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - The candidates that survived
    /// * `Err` - If filtering fails
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &TasteProfile,
    ) -> Result<Vec<Candidate>>;
}
