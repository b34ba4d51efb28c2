use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Entity, Store};
use crate::core::StoreResult;

/// Store backed by an ordered map behind an async lock.
///
/// `get_all` returns records ordered by key.
pub struct InMemoryStore<E> {
    records: RwLock<BTreeMap<String, E>>,
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id().to_string(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Store<E> for InMemoryStore<E> {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn upsert(&self, entity: E) -> StoreResult<Option<E>> {
        self.records
            .write()
            .await
            .insert(entity.id().to_string(), entity.clone());
        Ok(Some(entity))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
