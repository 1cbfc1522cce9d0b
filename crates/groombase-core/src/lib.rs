//! # groombase-core
//!
//! Core types, traits, and abstractions for the groombase grooming-salon
//! system: the domain models, the taxonomy binding table, the rename/delete
//! cascade engine, and the search semantics. Persistence lives in
//! `groombase-db`; this crate only defines the contracts it implements.

pub mod cascade;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod taxonomy;
pub mod traits;

// Re-export commonly used types at crate root
pub use cascade::TaxonomyAdmin;
pub use error::{Error, Result};
pub use models::*;
pub use search::{rank_dogs, rank_owners, DogQuery, OwnerCandidate, OwnerQuery};
pub use taxonomy::{validate_taxonomy_value, EntityKind, FieldBinding, TaxonomyCategory};
pub use traits::*;
