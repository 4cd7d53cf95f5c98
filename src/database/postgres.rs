use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use tracing::{error, info};

use super::{Person, PersonPayload, PersonStore, StorageError};
use crate::config::DatabaseConfig;

const SELECT_ALL: &str = "SELECT id, name, sex, country FROM persons ORDER BY id";
const SELECT_ONE: &str = "SELECT id, name, sex, country FROM persons WHERE id = $1";
const INSERT: &str = "INSERT INTO persons (name, sex, country) VALUES ($1, $2, $3) RETURNING id";
const UPDATE: &str = "UPDATE persons SET name = $1, sex = $2, country = $3 WHERE id = $4";
const DELETE: &str = "DELETE FROM persons WHERE id = $1";

/// PostgreSQL-backed person store over a long-lived pool
#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from config. Connection failures come back as errors.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let url = config
            .connection_url()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let pool = PgPoolOptions::new().connect(&url).await.map_err(|e| {
            error!("Failed to open database {} on {}:{}: {}", config.name, config.host, config.port, e);
            StorageError::Connection(e.to_string())
        })?;

        info!("Created database pool for: {}", config.name);
        Ok(Self::new(pool))
    }

    async fn commit_or_rollback<T>(
        tx: Transaction<'static, Postgres>,
        outcome: Result<T, sqlx::Error>,
    ) -> Result<T, StorageError> {
        match outcome {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    error!("Rollback failed: {}", rollback);
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn list(&self) -> Result<Vec<Person>, StorageError> {
        let rows = sqlx::query_as::<_, Person>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn detail(&self, id: i64) -> Result<Person, StorageError> {
        sqlx::query_as::<_, Person>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound(id))
    }

    async fn insert(&self, person: PersonPayload) -> Result<Person, StorageError> {
        let mut tx = self.pool.begin().await?;

        let outcome = sqlx::query_scalar::<_, i64>(INSERT)
            .bind(&person.name)
            .bind(&person.sex)
            .bind(&person.country)
            .fetch_one(&mut *tx)
            .await;

        let id = Self::commit_or_rollback(tx, outcome).await?;
        self.detail(id).await
    }

    async fn update(&self, person: PersonPayload, id: i64) -> Result<Person, StorageError> {
        let mut tx = self.pool.begin().await?;

        let outcome = sqlx::query(UPDATE)
            .bind(&person.name)
            .bind(&person.sex)
            .bind(&person.country)
            .bind(id)
            .execute(&mut *tx)
            .await;

        Self::commit_or_rollback(tx, outcome).await?;
        self.detail(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        let outcome = sqlx::query(DELETE).bind(id).execute(&mut *tx).await;

        Self::commit_or_rollback(tx, outcome).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
