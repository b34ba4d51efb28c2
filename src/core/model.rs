use serde::{Deserialize, Serialize};

use super::duration::{TrackDuration, aggregate};

/// A catalogued track.
///
/// Playlists embed copies of tracks; the track store stays the owner of the
/// record and deleting a track never touches playlists that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album_id: String,
    pub genre: String,
    pub lyrics_by: String,
    pub produced_by: String,
    pub arranged_by: String,
    pub duration: TrackDuration,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: TrackDuration) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album_id: String::new(),
            genre: String::new(),
            lyrics_by: String::new(),
            produced_by: String::new(),
            arranged_by: String::new(),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub username: String,
    pub tracks: Vec<Track>,
    /// Cached total of `tracks`; see [`Playlist::recompute_duration`].
    pub duration: TrackDuration,
}

impl Playlist {
    /// Creates a playlist whose duration already matches `tracks`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        tracks: Vec<Track>,
    ) -> Self {
        let mut playlist = Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            tracks,
            duration: TrackDuration::zero(),
        };
        playlist.recompute_duration();
        playlist
    }

    /// Re-derives the cached duration from the current track sequence.
    pub fn recompute_duration(&mut self) -> TrackDuration {
        self.duration = aggregate(self.tracks.iter().map(|track| track.duration));
        self.duration
    }

    /// Appends a track. Duplicates are kept.
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Drops every occurrence of `track_id`, returning how many were removed.
    pub fn remove_track(&mut self, track_id: &str) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|track| track.id != track_id);
        before - self.tracks.len()
    }

    pub fn occurrences(&self, track_id: &str) -> usize {
        self.tracks.iter().filter(|track| track.id == track_id).count()
    }

    /// Whether the cached duration agrees with the track sequence.
    pub fn duration_is_consistent(&self) -> bool {
        self.duration == aggregate(self.tracks.iter().map(|track| track.duration))
    }
}
