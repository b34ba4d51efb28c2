//! Service layer: every operation answers with an [`Outcome`](crate::result::Outcome).

mod crud;
pub mod playlist;
pub mod track;

pub use playlist::{MutationStage, PlaylistService, TrackMutation};
pub use track::TrackService;
