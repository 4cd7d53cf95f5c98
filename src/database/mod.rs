//! Person storage.
//!
//! Handlers talk to a [`PersonStore`]; the production backend is
//! PostgreSQL ([`PgPersonStore`]) and [`MemoryPersonStore`] keeps rows in
//! process for development and tests.

pub mod memory;
pub mod models;
pub mod postgres;

pub use memory::MemoryPersonStore;
pub use models::person::{Person, PersonPayload};
pub use postgres::PgPersonStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No Row Found for id {0}")]
    NotFound(i64),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// CRUD operations on persons. Every mutation runs in its own transaction
/// and re-reads the stored row, so callers always see what was committed.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All persons ordered by id
    async fn list(&self) -> Result<Vec<Person>, StorageError>;

    async fn detail(&self, id: i64) -> Result<Person, StorageError>;

    async fn insert(&self, person: PersonPayload) -> Result<Person, StorageError>;

    /// Replace all mutable fields of `id`. A missing id surfaces as
    /// [`StorageError::NotFound`] from the re-read.
    async fn update(&self, person: PersonPayload, id: i64) -> Result<Person, StorageError>;

    /// Idempotent: deleting an absent id is not an error
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    async fn ping(&self) -> Result<(), StorageError>;
}
