//! Wire representations and their conversions to and from entities.
//!
//! Conversions are plain field copies. A DTO without an id maps to an entity
//! with an empty id; services assign ids on create.

use serde::{Deserialize, Serialize};

use crate::core::{Playlist, Track, TrackDuration};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album_id: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub lyrics_by: String,
    #[serde(default)]
    pub produced_by: String,
    #[serde(default)]
    pub arranged_by: String,
    pub duration: TrackDuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub tracks: Vec<TrackDto>,
    /// Ignored on input; always derived from `tracks`.
    #[serde(default)]
    pub duration: TrackDuration,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl From<Track> for TrackDto {
    fn from(track: Track) -> Self {
        Self {
            id: Some(track.id),
            title: track.title,
            artist: track.artist,
            album_id: track.album_id,
            genre: track.genre,
            lyrics_by: track.lyrics_by,
            produced_by: track.produced_by,
            arranged_by: track.arranged_by,
            duration: track.duration,
        }
    }
}

impl From<TrackDto> for Track {
    fn from(dto: TrackDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            title: dto.title,
            artist: dto.artist,
            album_id: dto.album_id,
            genre: dto.genre,
            lyrics_by: dto.lyrics_by,
            produced_by: dto.produced_by,
            arranged_by: dto.arranged_by,
            duration: dto.duration,
        }
    }
}

impl From<Playlist> for PlaylistDto {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: Some(playlist.id),
            name: playlist.name,
            username: playlist.username,
            tracks: playlist.tracks.into_iter().map(TrackDto::from).collect(),
            duration: playlist.duration,
        }
    }
}

impl From<PlaylistDto> for Playlist {
    fn from(dto: PlaylistDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            name: dto.name,
            username: dto.username,
            tracks: dto.tracks.into_iter().map(Track::from).collect(),
            duration: dto.duration,
        }
    }
}
