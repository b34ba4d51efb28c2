//! Playlist operations, including the track list mutation pipeline.
//!
//! Adding or removing a track runs strictly in sequence:
//!
//! 1. fetch the playlist (missing -> `NotFound`)
//! 2. fetch the track (missing -> `NotFound` when adding; ignored when removing)
//! 3. append the track, or drop every occurrence of its id
//! 4. recompute the playlist duration
//! 5. upsert the playlist (store error -> `UpsertFailed`)
//!
//! Nothing is written before step 5, so an early failure leaves both stores
//! untouched. Concurrent mutations of one playlist are not coordinated: the
//! last successful upsert wins.

use std::fmt;
use std::sync::Arc;

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::crud;
use crate::core::{EngineError, EngineResult, EntityKind, Playlist};
use crate::models::PlaylistDto;
use crate::result::{Outcome, SuccessStatus};
use crate::storage::{PlaylistStore, TrackStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMutation {
    Add,
    Remove,
}

impl fmt::Display for TrackMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackMutation::Add => write!(f, "add_track"),
            TrackMutation::Remove => write!(f, "remove_track"),
        }
    }
}

/// Progress of a single mutation, reported in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStage {
    Start,
    PlaylistFetched,
    TrackFetched,
    Mutated,
    Persisted,
    Failed,
}

#[derive(Clone)]
pub struct PlaylistService {
    playlists: Arc<PlaylistStore>,
    tracks: Arc<TrackStore>,
}

impl PlaylistService {
    pub fn new(playlists: Arc<PlaylistStore>, tracks: Arc<TrackStore>) -> Self {
        Self { playlists, tracks }
    }

    /// Appends the catalogued track `track_id` to the playlist.
    pub async fn add_track(&self, playlist_id: &str, track_id: &str) -> Outcome<PlaylistDto> {
        self.run(TrackMutation::Add, playlist_id, track_id).await
    }

    /// Removes every occurrence of `track_id` from the playlist.
    ///
    /// The track does not have to exist in the track store.
    pub async fn remove_track(&self, playlist_id: &str, track_id: &str) -> Outcome<PlaylistDto> {
        self.run(TrackMutation::Remove, playlist_id, track_id).await
    }

    async fn run(
        &self,
        mutation: TrackMutation,
        playlist_id: &str,
        track_id: &str,
    ) -> Outcome<PlaylistDto> {
        let span = info_span!(
            "playlist_mutation",
            op = %mutation,
            playlist_id = %playlist_id,
            track_id = %track_id
        );

        async {
            debug!(stage = ?MutationStage::Start);
            let result = self.mutate(mutation, playlist_id, track_id).await;
            match &result {
                Ok(playlist) => info!(
                    stage = ?MutationStage::Persisted,
                    tracks = playlist.tracks.len(),
                    duration = %playlist.duration,
                    "playlist updated"
                ),
                Err(err) => warn!(
                    stage = ?MutationStage::Failed,
                    status = %err.status(),
                    error = %err,
                    "playlist mutation failed"
                ),
            }
            Outcome::from_result(result, SuccessStatus::Ok).map(PlaylistDto::from)
        }
        .instrument(span)
        .await
    }

    async fn mutate(
        &self,
        mutation: TrackMutation,
        playlist_id: &str,
        track_id: &str,
    ) -> EngineResult<Playlist> {
        let mut playlist =
            crud::lookup(self.playlists.as_ref(), EntityKind::Playlist, playlist_id).await?;
        debug!(stage = ?MutationStage::PlaylistFetched, tracks = playlist.tracks.len());

        match mutation {
            TrackMutation::Add => {
                let track =
                    crud::lookup(self.tracks.as_ref(), EntityKind::Track, track_id).await?;
                debug!(stage = ?MutationStage::TrackFetched);
                playlist.push_track(track);
            }
            TrackMutation::Remove => {
                match self.tracks.get_by_id(track_id).await {
                    Ok(Some(_)) => debug!(stage = ?MutationStage::TrackFetched),
                    Ok(None) => debug!("track not in catalogue, removing by id"),
                    Err(err) => debug!(error = %err, "track lookup failed, removing by id"),
                }
                let removed = playlist.remove_track(track_id);
                debug!(removed, "filtered track list");
            }
        }

        let duration = playlist.recompute_duration();
        debug!(stage = ?MutationStage::Mutated, duration = %duration);

        let saved = self
            .playlists
            .upsert(playlist.clone())
            .await
            .map_err(EngineError::UpsertFailed)?;

        Ok(saved.unwrap_or(playlist))
    }

    pub async fn list(&self) -> Outcome<Vec<PlaylistDto>> {
        crud::list(self.playlists.as_ref(), EntityKind::Playlist).await
    }

    pub async fn get_by_id(&self, id: &str) -> Outcome<PlaylistDto> {
        crud::find(self.playlists.as_ref(), EntityKind::Playlist, id).await
    }

    /// Stores a new playlist. A missing id is generated and the duration is
    /// derived from the supplied tracks.
    pub async fn create(&self, dto: PlaylistDto) -> Outcome<PlaylistDto> {
        let mut playlist = Playlist::from(dto);
        if playlist.id.is_empty() {
            playlist.id = Uuid::new_v4().to_string();
        }
        playlist.recompute_duration();

        crud::create(self.playlists.as_ref(), EntityKind::Playlist, playlist).await
    }

    /// Replaces the whole playlist stored under `id`. The id in the body is
    /// ignored.
    pub async fn replace(&self, id: &str, dto: PlaylistDto) -> Outcome<PlaylistDto> {
        let mut playlist = Playlist::from(dto);
        playlist.id = id.to_string();
        playlist.recompute_duration();

        crud::replace(self.playlists.as_ref(), EntityKind::Playlist, playlist).await
    }

    /// Deletes the playlist. Tracks are not affected.
    pub async fn delete_by_id(&self, id: &str) -> Outcome<String> {
        crud::delete(self.playlists.as_ref(), EntityKind::Playlist, id).await
    }
}
