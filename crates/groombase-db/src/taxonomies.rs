//! Taxonomy store implementation.
//!
//! Each category's ordered value list is persisted as one `jsonb` array under
//! its key in the `taxonomy` table. This layer is pure list storage: the
//! entity cascade that keeps denormalized copies consistent lives in
//! `groombase_core::cascade` and calls down through [`TaxonomyStore`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use tracing::info;

use groombase_core::{defaults, Error, Result, TaxonomyCategory, TaxonomyStore};

/// PostgreSQL implementation of TaxonomyStore.
pub struct PgTaxonomyStore {
    pool: Pool<Postgres>,
}

impl PgTaxonomyStore {
    /// Create a new PgTaxonomyStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxonomyStore for PgTaxonomyStore {
    async fn get(&self, category: TaxonomyCategory) -> Result<Vec<String>> {
        let row = sqlx::query("SELECT values FROM taxonomy WHERE key = $1")
            .bind(category.key())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        match row {
            Some(row) => {
                let values: serde_json::Value = row.get("values");
                Ok(serde_json::from_value(values)?)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn set(&self, category: TaxonomyCategory, values: Vec<String>) -> Result<()> {
        // Single-statement upsert: last-writer-wins, no locking.
        sqlx::query(
            r#"
            INSERT INTO taxonomy (key, values, updated_at_utc)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE
            SET values = EXCLUDED.values, updated_at_utc = EXCLUDED.updated_at_utc
            "#,
        )
        .bind(category.key())
        .bind(serde_json::to_value(&values)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn add_value(&self, category: TaxonomyCategory, value: &str) -> Result<()> {
        let mut values = self.get(category).await?;
        if values.iter().any(|v| v == value) {
            return Err(Error::DuplicateValue {
                category,
                value: value.to_string(),
            });
        }
        values.push(value.to_string());
        self.set(category, values).await
    }

    async fn ensure_seeded(&self) -> Result<()> {
        let mut seeded = 0u64;
        for category in TaxonomyCategory::ALL {
            let result = sqlx::query(
                r#"
                INSERT INTO taxonomy (key, values, updated_at_utc)
                VALUES ($1, $2, $3)
                ON CONFLICT (key) DO NOTHING
                "#,
            )
            .bind(category.key())
            .bind(serde_json::to_value(defaults::seed_values(category))?)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
            seeded += result.rows_affected();
        }

        if seeded > 0 {
            info!(
                subsystem = "database",
                component = "taxonomies",
                op = "seed",
                result_count = seeded,
                "Seeded default taxonomy lists"
            );
        }
        Ok(())
    }
}
