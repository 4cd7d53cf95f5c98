//! In-memory person store.
//!
//! Rows live in a `BTreeMap` keyed by id; ids are assigned from a counter
//! and never reused. Data is lost on restart.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Person, PersonPayload, PersonStore, StorageError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Person>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryPersonStore {
    table: RwLock<Table>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn list(&self) -> Result<Vec<Person>, StorageError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn detail(&self, id: i64) -> Result<Person, StorageError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(StorageError::NotFound(id))
    }

    async fn insert(&self, person: PersonPayload) -> Result<Person, StorageError> {
        let id = {
            let mut table = self.table.write().await;
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(id, person.into_person(id));
            id
        };
        debug!(id, "Inserted person");
        self.detail(id).await
    }

    async fn update(&self, person: PersonPayload, id: i64) -> Result<Person, StorageError> {
        {
            let mut table = self.table.write().await;
            if let Some(row) = table.rows.get_mut(&id) {
                *row = person.into_person(id);
            }
        }
        self.detail(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
