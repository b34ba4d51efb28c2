use thiserror::Error;

use crate::result::FailureStatus;

/// Errors raised by a keyed store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Codec error: {0}")]
    Codec(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

/// Which kind of record a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Playlist,
    Track,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Playlist => write!(f, "playlist"),
            EntityKind::Track => write!(f, "track"),
        }
    }
}

/// Failures of a service operation before they are folded into an outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("failed to persist record: {0}")]
    UpsertFailed(#[source] StoreError),

    #[error("failed to delete record: {0}")]
    DeleteFailed(#[source] StoreError),
}

impl EngineError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn status(&self) -> FailureStatus {
        match self {
            EngineError::NotFound { .. } => FailureStatus::NotFound,
            EngineError::UpsertFailed(_) => FailureStatus::UpsertFailed,
            EngineError::DeleteFailed(_) => FailureStatus::DeleteFailed,
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
