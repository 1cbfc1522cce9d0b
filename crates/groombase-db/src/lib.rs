//! # groombase-db
//!
//! PostgreSQL database layer for groombase.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for dogs, owners, and the taxonomy store
//! - Wiring for the taxonomy cascade engine defined in `groombase-core`
//!
//! ## Example
//!
//! ```rust,ignore
//! use groombase_db::{Database, DogQuery, DogRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/groombase").await?;
//!     db.taxonomies.ensure_seeded().await?;
//!
//!     let dogs = db.dogs.list(DogQuery {
//!         search: "rex".to_string(),
//!         ..Default::default()
//!     }).await?;
//!     println!("{} dogs", dogs.len());
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod dogs;
pub mod owners;
pub mod pool;
pub mod taxonomies;

// Test fixtures for integration tests
// Note: always compiled so integration tests (in tests/) can use
// DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use groombase_core::*;

// Re-export repository implementations
pub use dogs::PgDogRepository;
pub use owners::PgOwnerRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use taxonomies::PgTaxonomyStore;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Dog repository for CRUD, search, and owner association.
    pub dogs: PgDogRepository,
    /// Owner repository for CRUD and search.
    pub owners: PgOwnerRepository,
    /// Taxonomy list storage.
    pub taxonomies: PgTaxonomyStore,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            dogs: PgDogRepository::new(pool.clone()),
            owners: PgOwnerRepository::new(pool.clone()),
            taxonomies: PgTaxonomyStore::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// The taxonomy admin surface, wired to this database's repositories.
    ///
    /// All taxonomy mutations should go through the returned engine so value
    /// renames and deletes always cascade into denormalized entity fields.
    pub fn taxonomy_admin(&self) -> TaxonomyAdmin {
        TaxonomyAdmin::new(
            Arc::new(PgTaxonomyStore::new(self.pool.clone())),
            Arc::new(PgDogRepository::new(self.pool.clone())),
            Arc::new(PgOwnerRepository::new(self.pool.clone())),
        )
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

