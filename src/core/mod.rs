pub mod duration;
pub mod error;
pub mod model;

pub use duration::{ParseDurationError, TrackDuration, aggregate};
pub use error::{EngineError, EngineResult, EntityKind, StoreError, StoreResult};
pub use model::{Playlist, Track};
