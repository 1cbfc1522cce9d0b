//! Dog repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use groombase_core::{
    rank_dogs, validate_entity_name, CreateDogRequest, Dog, DogFull, DogQuery, DogRepository,
    Error, OwnerRef, Result, UpdateDogRequest,
};

/// PostgreSQL implementation of DogRepository.
pub struct PgDogRepository {
    pool: Pool<Postgres>,
}

impl PgDogRepository {
    /// Create a new PgDogRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn dog_from_row(row: &PgRow) -> Result<Dog> {
        let cosmetics: serde_json::Value = row.get("cosmetics_used");
        Ok(Dog {
            id: row.get("id"),
            name: row.get("name"),
            breed: row.get("breed"),
            weight_kg: row.get("weight_kg"),
            birthdate: row.get("birthdate"),
            grooming_time_minutes: row.get("grooming_time_minutes"),
            grooming_tolerance: row.get("grooming_tolerance"),
            character_tags: row.get("character_tags"),
            cosmetics_used: serde_json::from_value(cosmetics)?,
            behavior_notes: row.get("behavior_notes"),
            health_notes: row.get("health_notes"),
            character_notes: row.get("character_notes"),
            created_at_utc: row.get("created_at_utc"),
            updated_at_utc: row.get("updated_at_utc"),
        })
    }

    /// Owners per dog, name-ascending, for a set of dog rows in one query.
    async fn owners_by_dog(&self) -> Result<HashMap<Uuid, Vec<OwnerRef>>> {
        let rows = sqlx::query(
            r#"
            SELECT dw.dog_id, o.id, o.name
            FROM dog_owner dw
            JOIN owner o ON o.id = dw.owner_id
            ORDER BY o.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut map: HashMap<Uuid, Vec<OwnerRef>> = HashMap::new();
        for row in rows {
            map.entry(row.get("dog_id")).or_default().push(OwnerRef {
                id: row.get("id"),
                name: row.get("name"),
            });
        }
        Ok(map)
    }
}

#[async_trait]
impl DogRepository for PgDogRepository {
    async fn insert(&self, req: CreateDogRequest) -> Result<Uuid> {
        let name = validate_entity_name(&req.name)?;
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO dog (
                id, name, breed, weight_kg, birthdate, grooming_time_minutes,
                grooming_tolerance, character_tags, cosmetics_used,
                behavior_notes, health_notes, character_notes,
                created_at_utc, updated_at_utc
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&req.breed)
        .bind(req.weight_kg)
        .bind(req.birthdate)
        .bind(req.grooming_time_minutes)
        .bind(&req.grooming_tolerance)
        .bind(&req.character_tags)
        .bind(serde_json::to_value(&req.cosmetics_used)?)
        .bind(&req.behavior_notes)
        .bind(&req.health_notes)
        .bind(&req.character_notes)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "dogs",
            op = "create",
            dog_id = %id,
            "Created dog"
        );
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<DogFull> {
        let row = sqlx::query("SELECT * FROM dog WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::DogNotFound(id))?;
        let dog = Self::dog_from_row(&row)?;

        let owner_rows = sqlx::query(
            r#"
            SELECT o.id, o.name
            FROM dog_owner dw
            JOIN owner o ON o.id = dw.owner_id
            WHERE dw.dog_id = $1
            ORDER BY o.name ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(DogFull {
            dog,
            owners: owner_rows
                .into_iter()
                .map(|row| OwnerRef {
                    id: row.get("id"),
                    name: row.get("name"),
                })
                .collect(),
        })
    }

    async fn list(&self, query: DogQuery) -> Result<Vec<DogFull>> {
        // Candidate rows are loaded in full and filtered in code; the salon
        // data set is small and the matching rules stay in one place
        // (groombase_core::search).
        let rows = sqlx::query("SELECT * FROM dog")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        let mut owners = self.owners_by_dog().await?;

        let candidates = rows
            .iter()
            .map(|row| {
                let dog = Self::dog_from_row(row)?;
                let owners = owners.remove(&dog.id).unwrap_or_default();
                Ok(DogFull { dog, owners })
            })
            .collect::<Result<Vec<_>>>()?;

        let hits = rank_dogs(candidates, &query);
        debug!(
            subsystem = "search",
            component = "dogs",
            op = "list",
            result_count = hits.len(),
            "Dog search"
        );
        Ok(hits)
    }

    async fn list_all(&self) -> Result<Vec<Dog>> {
        let rows = sqlx::query("SELECT * FROM dog ORDER BY created_at_utc ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        rows.iter().map(Self::dog_from_row).collect()
    }

    async fn update(&self, id: Uuid, req: UpdateDogRequest) -> Result<()> {
        let name = validate_entity_name(&req.name)?;

        let result = sqlx::query(
            r#"
            UPDATE dog SET
                name = $2, breed = $3, weight_kg = $4, birthdate = $5,
                grooming_time_minutes = $6, grooming_tolerance = $7,
                character_tags = $8, cosmetics_used = $9,
                behavior_notes = $10, health_notes = $11, character_notes = $12,
                updated_at_utc = $13
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&req.breed)
        .bind(req.weight_kg)
        .bind(req.birthdate)
        .bind(req.grooming_time_minutes)
        .bind(&req.grooming_tolerance)
        .bind(&req.character_tags)
        .bind(serde_json::to_value(&req.cosmetics_used)?)
        .bind(&req.behavior_notes)
        .bind(&req.health_notes)
        .bind(&req.character_notes)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::DogNotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // dog_owner rows cascade via the foreign key.
        let result = sqlx::query("DELETE FROM dog WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::DogNotFound(id));
        }
        Ok(())
    }

    async fn link_owner(&self, dog_id: Uuid, owner_id: Uuid) -> Result<()> {
        sqlx::query(
            "INSERT INTO dog_owner (dog_id, owner_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(dog_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn unlink_owner(&self, dog_id: Uuid, owner_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM dog_owner WHERE dog_id = $1 AND owner_id = $2")
            .bind(dog_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
