use std::sync::Arc;

use uuid::Uuid;

use super::crud;
use crate::core::{EntityKind, Track};
use crate::models::TrackDto;
use crate::result::Outcome;
use crate::storage::TrackStore;

/// Catalogue operations on tracks.
///
/// Playlists hold their own copies of tracks, so replacing or deleting a
/// track here leaves existing playlists as they are.
#[derive(Clone)]
pub struct TrackService {
    tracks: Arc<TrackStore>,
}

impl TrackService {
    pub fn new(tracks: Arc<TrackStore>) -> Self {
        Self { tracks }
    }

    pub async fn list(&self) -> Outcome<Vec<TrackDto>> {
        crud::list(self.tracks.as_ref(), EntityKind::Track).await
    }

    pub async fn get_by_id(&self, id: &str) -> Outcome<TrackDto> {
        crud::find(self.tracks.as_ref(), EntityKind::Track, id).await
    }

    pub async fn create(&self, dto: TrackDto) -> Outcome<TrackDto> {
        let mut track = Track::from(dto);
        if track.id.is_empty() {
            track.id = Uuid::new_v4().to_string();
        }

        crud::create(self.tracks.as_ref(), EntityKind::Track, track).await
    }

    pub async fn replace(&self, id: &str, dto: TrackDto) -> Outcome<TrackDto> {
        let mut track = Track::from(dto);
        track.id = id.to_string();

        crud::replace(self.tracks.as_ref(), EntityKind::Track, track).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Outcome<String> {
        crud::delete(self.tracks.as_ref(), EntityKind::Track, id).await
    }
}
