//! Keyed asynchronous stores for tracks and playlists.
//!
//! Services only see the [`Store`] trait, so the in-memory and file-backed
//! implementations (and any test double) are interchangeable.

pub mod memory;
pub mod persistence;

pub use memory::InMemoryStore;
pub use persistence::JsonFileStore;

use async_trait::async_trait;

use crate::core::{Playlist, StoreResult, Track};

/// A record that can be addressed by an opaque string key.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Entity for Track {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Playlist {
    fn id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<E>>;

    async fn get_all(&self) -> StoreResult<Vec<E>>;

    /// Inserts or overwrites the record under `entity.id()`.
    ///
    /// Returns the stored record when the backend echoes one back.
    async fn upsert(&self, entity: E) -> StoreResult<Option<E>>;

    /// Deleting a key that is not present is not an error.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

pub type TrackStore = dyn Store<Track>;
pub type PlaylistStore = dyn Store<Playlist>;
