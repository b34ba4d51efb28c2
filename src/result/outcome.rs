//! Status-tagged results returned by every service operation.
//!
//! An [`Outcome`] carries either a payload together with the status that
//! describes the success, or just the status that describes the failure.
//! Boundary adapters only have to translate statuses into their own
//! vocabulary (see `web::IntoResponse for Outcome`).

use crate::core::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuccessStatus {
    /// A track list mutation completed.
    Ok,
    Found,
    Created,
    /// A replace or delete was applied.
    Accepted,
    /// A collection read returned nothing.
    NoContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStatus {
    NotFound,
    /// Create could not be persisted.
    ExpectationFailed,
    /// Replace could not be persisted.
    NotModified,
    /// A track list mutation could not be persisted.
    UpsertFailed,
    DeleteFailed,
    /// A collection read could not reach the store.
    Unavailable,
}

impl SuccessStatus {
    pub fn code(&self) -> u16 {
        match self {
            SuccessStatus::Ok => 200,
            SuccessStatus::Created => 201,
            SuccessStatus::Accepted => 202,
            SuccessStatus::NoContent => 204,
            SuccessStatus::Found => 302,
        }
    }
}

impl FailureStatus {
    pub fn code(&self) -> u16 {
        match self {
            FailureStatus::NotModified => 304,
            FailureStatus::NotFound => 404,
            FailureStatus::ExpectationFailed => 417,
            FailureStatus::UpsertFailed | FailureStatus::DeleteFailed => 500,
            FailureStatus::Unavailable => 503,
        }
    }

    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStatus::NotFound => "not_found",
            FailureStatus::ExpectationFailed => "expectation_failed",
            FailureStatus::NotModified => "not_modified",
            FailureStatus::UpsertFailed => "upsert_failed",
            FailureStatus::DeleteFailed => "delete_failed",
            FailureStatus::Unavailable => "unavailable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FailureStatus::NotFound => "requested record does not exist",
            FailureStatus::ExpectationFailed => "record could not be created",
            FailureStatus::NotModified => "record could not be updated",
            FailureStatus::UpsertFailed => "playlist could not be saved",
            FailureStatus::DeleteFailed => "record could not be deleted",
            FailureStatus::Unavailable => "store is unavailable",
        }
    }
}

impl std::fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T, SuccessStatus),
    Failure(FailureStatus),
}

impl<T> Outcome<T> {
    pub fn success(payload: T, status: SuccessStatus) -> Self {
        Outcome::Success(payload, status)
    }

    pub fn failure(status: FailureStatus) -> Self {
        Outcome::Failure(status)
    }

    /// Folds an engine result into an outcome.
    pub fn from_result(result: Result<T, EngineError>, status: SuccessStatus) -> Self {
        match result {
            Ok(payload) => Outcome::Success(payload, status),
            Err(err) => Outcome::Failure(err.status()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(..))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Success(_, status) => status.code(),
            Outcome::Failure(status) => status.code(),
        }
    }

    pub fn success_status(&self) -> Option<SuccessStatus> {
        match self {
            Outcome::Success(_, status) => Some(*status),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure_status(&self) -> Option<FailureStatus> {
        match self {
            Outcome::Success(..) => None,
            Outcome::Failure(status) => Some(*status),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success(payload, _) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            Outcome::Success(payload, _) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(payload, status) => Outcome::Success(f(payload), status),
            Outcome::Failure(status) => Outcome::Failure(status),
        }
    }
}
