//! Owner repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use groombase_core::{
    rank_owners, validate_entity_name, CreateOwnerRequest, Error, Owner, OwnerCandidate,
    OwnerQuery, OwnerRepository, OwnerSummary, Result, UpdateOwnerRequest,
};

/// PostgreSQL implementation of OwnerRepository.
pub struct PgOwnerRepository {
    pool: Pool<Postgres>,
}

impl PgOwnerRepository {
    /// Create a new PgOwnerRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn owner_from_row(row: &PgRow) -> Result<Owner> {
        let methods: serde_json::Value = row.get("communication_methods");
        Ok(Owner {
            id: row.get("id"),
            name: row.get("name"),
            communication_methods: serde_json::from_value(methods)?,
            important_info: row.get("important_info"),
            created_at_utc: row.get("created_at_utc"),
            updated_at_utc: row.get("updated_at_utc"),
        })
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn insert(&self, req: CreateOwnerRequest) -> Result<Uuid> {
        let name = validate_entity_name(&req.name)?;
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO owner (
                id, name, communication_methods, important_info,
                created_at_utc, updated_at_utc
            )
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(serde_json::to_value(&req.communication_methods)?)
        .bind(&req.important_info)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "owners",
            op = "create",
            owner_id = %id,
            "Created owner"
        );
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Owner> {
        let row = sqlx::query("SELECT * FROM owner WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::OwnerNotFound(id))?;
        Self::owner_from_row(&row)
    }

    async fn list(&self, query: OwnerQuery) -> Result<Vec<OwnerSummary>> {
        // One aggregate query pulls the join data the filters need (owned
        // dog names and breeds); the matching rules themselves live in
        // groombase_core::search.
        let rows = sqlx::query(
            r#"
            SELECT o.*,
                   COUNT(d.id) AS dog_count,
                   COALESCE(array_agg(d.name) FILTER (WHERE d.id IS NOT NULL), '{}') AS dog_names,
                   COALESCE(array_agg(d.breed) FILTER (WHERE d.breed IS NOT NULL), '{}') AS dog_breeds
            FROM owner o
            LEFT JOIN dog_owner dw ON dw.owner_id = o.id
            LEFT JOIN dog d ON d.id = dw.dog_id
            GROUP BY o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let candidates = rows
            .iter()
            .map(|row| {
                Ok(OwnerCandidate {
                    owner: Self::owner_from_row(row)?,
                    dog_count: row.get("dog_count"),
                    dog_names: row.get("dog_names"),
                    dog_breeds: row.get("dog_breeds"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let hits = rank_owners(candidates, &query);
        debug!(
            subsystem = "search",
            component = "owners",
            op = "list",
            result_count = hits.len(),
            "Owner search"
        );
        Ok(hits)
    }

    async fn list_all(&self) -> Result<Vec<Owner>> {
        let rows = sqlx::query("SELECT * FROM owner ORDER BY created_at_utc ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        rows.iter().map(Self::owner_from_row).collect()
    }

    async fn update(&self, id: Uuid, req: UpdateOwnerRequest) -> Result<()> {
        let name = validate_entity_name(&req.name)?;

        let result = sqlx::query(
            r#"
            UPDATE owner SET
                name = $2, communication_methods = $3, important_info = $4,
                updated_at_utc = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(serde_json::to_value(&req.communication_methods)?)
        .bind(&req.important_info)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::OwnerNotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // dog_owner rows cascade via the foreign key.
        let result = sqlx::query("DELETE FROM owner WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::OwnerNotFound(id));
        }
        Ok(())
    }
}
