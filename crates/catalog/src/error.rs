//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading, validating, or querying the catalogue
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Point lookup for a film id the store has never seen
    ///
    /// A recommendation run treats this as fatal: the rating graph claimed
    /// the film exists, so an absent record means the data is inconsistent.
    #[error("Film {id} not found")]
    FilmNotFound { id: u32 },

    /// I/O error occurred while reading a catalogue file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a catalogue file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., mark for an unregistered film)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
