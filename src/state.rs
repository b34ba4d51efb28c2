use std::sync::Arc;

use crate::core::{Playlist, StoreResult, Track};
use crate::service::{PlaylistService, TrackService};
use crate::storage::{InMemoryStore, JsonFileStore, PlaylistStore, TrackStore};

#[derive(Clone)]
pub struct AppState {
    pub playlists: PlaylistService,
    pub tracks: TrackService,
}

impl AppState {
    pub fn new(playlists: Arc<PlaylistStore>, tracks: Arc<TrackStore>) -> Self {
        Self {
            playlists: PlaylistService::new(playlists, tracks.clone()),
            tracks: TrackService::new(tracks),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStore::<Playlist>::new()),
            Arc::new(InMemoryStore::<Track>::new()),
        )
    }

    /// Opens `playlists.json` and `tracks.json` under `dir`.
    pub async fn open_dir(dir: impl AsRef<std::path::Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        let playlists = JsonFileStore::<Playlist>::open(dir, "playlists").await?;
        let tracks = JsonFileStore::<Track>::open(dir, "tracks").await?;
        Ok(Self::new(Arc::new(playlists), Arc::new(tracks)))
    }
}
