//! Error types for groombase.

use thiserror::Error;

use crate::taxonomy::TaxonomyCategory;

/// Result type alias using groombase's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for groombase operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Dog not found
    #[error("Dog not found: {0}")]
    DogNotFound(uuid::Uuid),

    /// Owner not found
    #[error("Owner not found: {0}")]
    OwnerNotFound(uuid::Uuid),

    /// Taxonomy value already present in the category (exact string match)
    #[error("Duplicate value in {category}: {value}")]
    DuplicateValue {
        category: TaxonomyCategory,
        value: String,
    },

    /// A cascade aborted partway through its entity rewrites.
    ///
    /// `applied` rewrites were committed before the failure and are NOT
    /// rolled back; the taxonomy list itself was left unchanged, so a retry
    /// of the same operation re-scans and picks up the remaining entities.
    #[error("Cascade on {category} aborted after {applied} entity update(s): {source}")]
    Cascade {
        category: TaxonomyCategory,
        applied: usize,
        #[source]
        source: Box<Error>,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
