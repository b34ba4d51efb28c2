// ============================================================================
// Playlist Service Library
// ============================================================================

pub mod config;
pub mod core;
pub mod models;
pub mod result;
pub mod service;
pub mod state;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use crate::core::{
    EngineError, EntityKind, Playlist, StoreError, StoreResult, Track, TrackDuration, aggregate,
};
pub use models::{PlaylistDto, TrackDto};
pub use result::{FailureStatus, Outcome, SuccessStatus};
pub use service::{PlaylistService, TrackService};
pub use state::AppState;
pub use storage::{Entity, InMemoryStore, JsonFileStore, Store};
pub use web::build_router;
