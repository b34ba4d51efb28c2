//! Single-store operations shared by the playlist and track services.
//!
//! Each helper performs at most one lookup and one write, and folds every
//! store answer into an [`Outcome`].

use tracing::{debug, warn};

use crate::core::{EngineError, EngineResult, EntityKind};
use crate::result::{FailureStatus, Outcome, SuccessStatus};
use crate::storage::{Entity, Store};

/// Fetches a record, treating both absence and lookup errors as not found.
pub(crate) async fn lookup<E: Entity>(
    store: &dyn Store<E>,
    kind: EntityKind,
    id: &str,
) -> EngineResult<E> {
    match store.get_by_id(id).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(EngineError::not_found(kind, id)),
        Err(err) => {
            warn!(entity = %kind, id = %id, error = %err, "lookup failed");
            Err(EngineError::not_found(kind, id))
        }
    }
}

pub(crate) async fn list<E, D>(store: &dyn Store<E>, kind: EntityKind) -> Outcome<Vec<D>>
where
    E: Entity,
    D: From<E>,
{
    match store.get_all().await {
        Ok(records) if records.is_empty() => Outcome::success(Vec::new(), SuccessStatus::NoContent),
        Ok(records) => Outcome::success(
            records.into_iter().map(D::from).collect(),
            SuccessStatus::Found,
        ),
        Err(err) => {
            warn!(entity = %kind, error = %err, "listing failed");
            Outcome::failure(FailureStatus::Unavailable)
        }
    }
}

pub(crate) async fn find<E, D>(store: &dyn Store<E>, kind: EntityKind, id: &str) -> Outcome<D>
where
    E: Entity,
    D: From<E>,
{
    Outcome::from_result(lookup(store, kind, id).await, SuccessStatus::Found).map(D::from)
}

pub(crate) async fn create<E, D>(store: &dyn Store<E>, kind: EntityKind, record: E) -> Outcome<D>
where
    E: Entity,
    D: From<E>,
{
    let id = record.id().to_string();
    match store.upsert(record).await {
        Ok(Some(saved)) => {
            debug!(entity = %kind, id = %id, "created");
            Outcome::success(D::from(saved), SuccessStatus::Created)
        }
        Ok(None) => {
            warn!(entity = %kind, id = %id, "store did not return the created record");
            Outcome::failure(FailureStatus::ExpectationFailed)
        }
        Err(err) => {
            warn!(entity = %kind, id = %id, error = %err, "create failed");
            Outcome::failure(FailureStatus::ExpectationFailed)
        }
    }
}

/// Overwrites an existing record. `record` must already carry the target id.
///
/// A missing target and a failed write both report `NotModified`.
pub(crate) async fn replace<E, D>(store: &dyn Store<E>, kind: EntityKind, record: E) -> Outcome<D>
where
    E: Entity,
    D: From<E>,
{
    let id = record.id().to_string();
    if lookup(store, kind, &id).await.is_err() {
        debug!(entity = %kind, id = %id, "replace target missing");
        return Outcome::failure(FailureStatus::NotModified);
    }

    match store.upsert(record.clone()).await {
        Ok(saved) => {
            debug!(entity = %kind, id = %id, "replaced");
            Outcome::success(D::from(saved.unwrap_or(record)), SuccessStatus::Accepted)
        }
        Err(err) => {
            warn!(entity = %kind, id = %id, error = %err, "replace failed");
            Outcome::failure(FailureStatus::NotModified)
        }
    }
}

/// Deletes an existing record and echoes its id.
pub(crate) async fn delete<E: Entity>(
    store: &dyn Store<E>,
    kind: EntityKind,
    id: &str,
) -> Outcome<String> {
    let result = async {
        lookup(store, kind, id).await?;
        store
            .delete_by_id(id)
            .await
            .map_err(EngineError::DeleteFailed)?;
        Ok::<_, EngineError>(id.to_string())
    }
    .await;

    if let Err(err) = &result {
        warn!(entity = %kind, id = %id, error = %err, "delete failed");
    }
    Outcome::from_result(result, SuccessStatus::Accepted)
}
