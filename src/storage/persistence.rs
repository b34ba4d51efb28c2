//! File-backed store that keeps a JSON snapshot per collection.
//!
//! Records live in memory; every write rewrites `<dir>/<name>.json` through a
//! temporary file and a rename, so a crash leaves either the old or the new
//! snapshot on disk. A write whose snapshot cannot be saved is undone in
//! memory and reported as an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Entity, Store};
use crate::core::{StoreError, StoreResult};

pub struct JsonFileStore<E> {
    path: PathBuf,
    records: RwLock<BTreeMap<String, E>>,
}

impl<E> JsonFileStore<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    /// Opens (or creates) the collection `name` under `dir`.
    pub async fn open(dir: impl AsRef<Path>, name: &str) -> StoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await.map_err(|err| {
            StoreError::Io(format!(
                "Failed to create data directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let path = dir.join(format!("{name}.json"));
        let records = load_snapshot::<E>(&path).await?;
        debug!(path = %path.display(), records = records.len(), "opened json store");

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, records: &BTreeMap<String, E>) -> StoreResult<()> {
        let snapshot: Vec<&E> = records.values().collect();
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        atomic_write(&self.path, &bytes).await
    }
}

#[async_trait]
impl<E> Store<E> for JsonFileStore<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn upsert(&self, entity: E) -> StoreResult<Option<E>> {
        let mut records = self.records.write().await;
        let key = entity.id().to_string();
        let previous = records.insert(key.clone(), entity.clone());

        if let Err(err) = self.save(&records).await {
            match previous {
                Some(previous) => records.insert(key, previous),
                None => records.remove(&key),
            };
            return Err(err);
        }

        Ok(Some(entity))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let Some(previous) = records.remove(id) else {
            return Ok(());
        };

        if let Err(err) = self.save(&records).await {
            records.insert(id.to_string(), previous);
            return Err(err);
        }

        Ok(())
    }
}

async fn load_snapshot<E>(path: &Path) -> StoreResult<BTreeMap<String, E>>
where
    E: Entity + DeserializeOwned,
{
    let exists = fs::try_exists(path).await.map_err(|err| {
        StoreError::Io(format!(
            "Failed to check snapshot path '{}': {}",
            path.display(),
            err
        ))
    })?;
    if !exists {
        return Ok(BTreeMap::new());
    }

    let bytes = fs::read(path).await.map_err(|err| {
        StoreError::Io(format!(
            "Failed to read snapshot '{}': {}",
            path.display(),
            err
        ))
    })?;
    if bytes.is_empty() {
        return Ok(BTreeMap::new());
    }

    let records: Vec<E> = serde_json::from_slice(&bytes).map_err(|err| {
        StoreError::Codec(format!(
            "Failed to decode snapshot '{}': {}",
            path.display(),
            err
        ))
    })?;

    Ok(records
        .into_iter()
        .map(|record| (record.id().to_string(), record))
        .collect())
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await.map_err(|err| {
        StoreError::Io(format!(
            "Failed to write temp file '{}': {}",
            tmp.display(),
            err
        ))
    })?;

    fs::rename(&tmp, path).await.map_err(|err| {
        StoreError::Io(format!(
            "Failed to rename temp file '{}' -> '{}': {}",
            tmp.display(),
            path.display(),
            err
        ))
    })?;
    Ok(())
}
