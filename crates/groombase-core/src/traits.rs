//! Core traits for groombase abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. The cascade engine
//! talks only to these traits, so its partial-failure semantics can be
//! exercised without a database.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::search::{DogQuery, OwnerQuery};
use crate::taxonomy::TaxonomyCategory;

/// Pure list storage for the five taxonomy categories.
///
/// No cross-entity knowledge lives here; propagating a rename or delete to
/// denormalized entity fields is the cascade engine's job.
#[async_trait]
pub trait TaxonomyStore: Send + Sync {
    /// Current ordered value list, empty if the category was never written.
    async fn get(&self, category: TaxonomyCategory) -> Result<Vec<String>>;

    /// Replace the list in a single write. Last-writer-wins, no locking.
    async fn set(&self, category: TaxonomyCategory, values: Vec<String>) -> Result<()>;

    /// Append a value, failing with `DuplicateValue` on an exact-string
    /// collision with an existing entry.
    async fn add_value(&self, category: TaxonomyCategory, value: &str) -> Result<()>;

    /// Insert the default list for every category that has no row yet.
    /// Idempotent; called once at startup.
    async fn ensure_seeded(&self) -> Result<()>;
}

/// Repository for dog CRUD, search, and owner association.
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Insert a new dog. Fails with `InvalidInput` if the name trims empty.
    async fn insert(&self, req: CreateDogRequest) -> Result<Uuid>;

    /// Fetch a dog with its owners. Fails with `DogNotFound` if absent.
    async fn fetch(&self, id: Uuid) -> Result<DogFull>;

    /// Search dogs (text + tag-set filters), newest-updated first, capped at
    /// [`crate::defaults::SEARCH_RESULT_LIMIT`] rows.
    async fn list(&self, query: DogQuery) -> Result<Vec<DogFull>>;

    /// Every dog record, uncapped. Used by cascade scans.
    async fn list_all(&self) -> Result<Vec<Dog>>;

    /// Full-record replace. Touches `updated_at_utc`.
    async fn update(&self, id: Uuid, req: UpdateDogRequest) -> Result<()>;

    /// Delete a dog; its owner-association rows go with it.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Associate a dog with an owner. Idempotent.
    async fn link_owner(&self, dog_id: Uuid, owner_id: Uuid) -> Result<()>;

    /// Remove a dog-owner association. Missing pairs are a no-op.
    async fn unlink_owner(&self, dog_id: Uuid, owner_id: Uuid) -> Result<()>;
}

/// Repository for owner CRUD and search.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Insert a new owner. Fails with `InvalidInput` if the name trims empty.
    async fn insert(&self, req: CreateOwnerRequest) -> Result<Uuid>;

    /// Fetch an owner. Fails with `OwnerNotFound` if absent.
    async fn fetch(&self, id: Uuid) -> Result<Owner>;

    /// Search owners, newest-updated first, capped at
    /// [`crate::defaults::SEARCH_RESULT_LIMIT`] rows.
    async fn list(&self, query: OwnerQuery) -> Result<Vec<OwnerSummary>>;

    /// Every owner record, uncapped. Used by cascade scans.
    async fn list_all(&self) -> Result<Vec<Owner>>;

    /// Full-record replace. Touches `updated_at_utc`.
    async fn update(&self, id: Uuid, req: UpdateOwnerRequest) -> Result<()>;

    /// Delete an owner; association rows go with it.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
