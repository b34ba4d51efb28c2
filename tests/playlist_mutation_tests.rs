/// Playlist mutation pipeline tests
///
/// Covers add/remove track against in-memory and failing stores.
/// Run with: cargo test --test playlist_mutation_tests

use async_trait::async_trait;
use futures::future::join_all;
use playlist_service::{
    Entity, FailureStatus, InMemoryStore, Playlist, PlaylistService, Store, StoreError,
    StoreResult, SuccessStatus, Track, TrackDuration, aggregate,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory store that can be told to fail and counts writes.
struct FlakyStore<E> {
    inner: InMemoryStore<E>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    echo_writes: AtomicBool,
    writes: AtomicUsize,
}

impl<E: Entity> FlakyStore<E> {
    fn new(records: Vec<E>) -> Self {
        Self {
            inner: InMemoryStore::with_records(records),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            echo_writes: AtomicBool::new(true),
            writes: AtomicUsize::new(0),
        }
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> Store<E> for FlakyStore<E> {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        self.inner.get_by_id(id).await
    }

    async fn get_all(&self) -> StoreResult<Vec<E>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        self.inner.get_all().await
    }

    async fn upsert(&self, entity: E) -> StoreResult<Option<E>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("writes disabled".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let saved = self.inner.upsert(entity).await?;
        if self.echo_writes.load(Ordering::SeqCst) {
            Ok(saved)
        } else {
            Ok(None)
        }
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("writes disabled".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(id).await
    }
}

fn track(id: &str, m: u64, s: u64) -> Track {
    Track::new(id, format!("song {id}"), TrackDuration::from_hms(0, m, s))
}

struct Fixture {
    service: PlaylistService,
    playlists: Arc<FlakyStore<Playlist>>,
    tracks: Arc<FlakyStore<Track>>,
}

fn fixture(playlists: Vec<Playlist>, tracks: Vec<Track>) -> Fixture {
    let playlists = Arc::new(FlakyStore::new(playlists));
    let tracks = Arc::new(FlakyStore::new(tracks));
    Fixture {
        service: PlaylistService::new(playlists.clone(), tracks.clone()),
        playlists,
        tracks,
    }
}

async fn stored(fx: &Fixture, id: &str) -> Playlist {
    fx.playlists
        .inner
        .get_by_id(id)
        .await
        .unwrap()
        .expect("playlist should be stored")
}

#[tokio::test]
async fn test_add_track_to_empty_playlist() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", Vec::new())],
        vec![track("t1", 5, 6)],
    );

    let outcome = fx.service.add_track("p1", "t1").await;

    assert_eq!(outcome.success_status(), Some(SuccessStatus::Ok));
    let dto = outcome.into_payload().unwrap();
    assert_eq!(dto.tracks.len(), 1);
    assert_eq!(dto.tracks[0].id.as_deref(), Some("t1"));
    assert_eq!(dto.duration.to_string(), "0:05:06");

    let playlist = stored(&fx, "p1").await;
    assert_eq!(playlist.tracks, vec![track("t1", 5, 6)]);
    assert_eq!(playlist.duration, TrackDuration::from_hms(0, 5, 6));
}

#[tokio::test]
async fn test_remove_track_recomputes_duration() {
    let fx = fixture(
        vec![Playlist::new(
            "p1",
            "mix",
            "agus",
            vec![track("t1", 5, 6), track("t2", 3, 0)],
        )],
        vec![track("t1", 5, 6), track("t2", 3, 0)],
    );
    assert_eq!(stored(&fx, "p1").await.duration.to_string(), "0:08:06");

    let outcome = fx.service.remove_track("p1", "t1").await;

    assert_eq!(outcome.success_status(), Some(SuccessStatus::Ok));
    let playlist = stored(&fx, "p1").await;
    assert_eq!(playlist.tracks, vec![track("t2", 3, 0)]);
    assert_eq!(playlist.duration.to_string(), "0:03:00");
}

#[tokio::test]
async fn test_remove_from_missing_playlist_is_not_found() {
    let fx = fixture(Vec::new(), vec![track("t1", 5, 6)]);

    let outcome = fx.service.remove_track("missing-playlist", "t1").await;

    assert_eq!(outcome.failure_status(), Some(FailureStatus::NotFound));
    assert_eq!(fx.playlists.writes(), 0);
}

#[tokio::test]
async fn test_add_to_missing_playlist_leaves_stores_unchanged() {
    let fx = fixture(Vec::new(), vec![track("t1", 5, 6)]);

    let outcome = fx.service.add_track("nope", "t1").await;

    assert_eq!(outcome.failure_status(), Some(FailureStatus::NotFound));
    assert_eq!(fx.playlists.writes(), 0);
    assert_eq!(fx.tracks.writes(), 0);
    assert!(fx.playlists.inner.is_empty().await);
    assert_eq!(fx.tracks.inner.len().await, 1);
}

#[tokio::test]
async fn test_add_missing_track_keeps_playlist() {
    let original = Playlist::new("p1", "mix", "agus", vec![track("t1", 1, 0)]);
    let fx = fixture(vec![original.clone()], vec![track("t1", 1, 0)]);

    let outcome = fx.service.add_track("p1", "ghost").await;

    assert_eq!(outcome.failure_status(), Some(FailureStatus::NotFound));
    assert_eq!(fx.playlists.writes(), 0);
    assert_eq!(stored(&fx, "p1").await, original);
}

#[tokio::test]
async fn test_add_keeps_duplicates() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", vec![track("t1", 2, 30)])],
        vec![track("t1", 2, 30)],
    );

    let dto = fx.service.add_track("p1", "t1").await.into_payload().unwrap();

    assert_eq!(dto.tracks.len(), 2);
    assert_eq!(dto.duration.to_string(), "0:05:00");
    assert_eq!(stored(&fx, "p1").await.occurrences("t1"), 2);
}

#[tokio::test]
async fn test_add_increments_occurrences_by_one() {
    let tracks = vec![track("a", 1, 10), track("b", 4, 55), track("c", 0, 7)];
    let initial = vec![tracks[0].clone(), tracks[1].clone(), tracks[0].clone()];

    for target in &tracks {
        let fx = fixture(
            vec![Playlist::new("p1", "mix", "agus", initial.clone())],
            tracks.clone(),
        );
        let before = stored(&fx, "p1").await;

        let outcome = fx.service.add_track("p1", &target.id).await;
        assert!(outcome.is_success());

        let after = stored(&fx, "p1").await;
        assert_eq!(after.occurrences(&target.id), before.occurrences(&target.id) + 1);

        let mut expected_tracks = before.tracks.clone();
        expected_tracks.push(target.clone());
        assert_eq!(
            after.duration,
            aggregate(expected_tracks.iter().map(|t| t.duration))
        );
    }
}

#[tokio::test]
async fn test_remove_drops_every_occurrence() {
    let fx = fixture(
        vec![Playlist::new(
            "p1",
            "mix",
            "agus",
            vec![track("t1", 1, 0), track("t2", 2, 0), track("t1", 1, 0), track("t3", 0, 30)],
        )],
        vec![track("t1", 1, 0)],
    );

    let dto = fx.service.remove_track("p1", "t1").await.into_payload().unwrap();

    assert!(dto.tracks.iter().all(|t| t.id.as_deref() != Some("t1")));
    assert_eq!(dto.duration.to_string(), "0:02:30");
    let playlist = stored(&fx, "p1").await;
    assert_eq!(playlist.occurrences("t1"), 0);
    assert!(playlist.duration_is_consistent());
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", vec![track("t1", 1, 0), track("t2", 2, 0)])],
        Vec::new(),
    );

    let first = fx.service.remove_track("p1", "t1").await.into_payload().unwrap();
    let second = fx.service.remove_track("p1", "t1").await.into_payload().unwrap();

    assert_eq!(first, second);
    assert_eq!(second.duration.to_string(), "0:02:00");
}

#[tokio::test]
async fn test_remove_tolerates_track_store_outage() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", vec![track("t1", 1, 0)])],
        vec![track("t1", 1, 0)],
    );
    fx.tracks.fail_reads.store(true, Ordering::SeqCst);

    let outcome = fx.service.remove_track("p1", "t1").await;

    assert_eq!(outcome.success_status(), Some(SuccessStatus::Ok));
    assert!(stored(&fx, "p1").await.tracks.is_empty());
}

#[tokio::test]
async fn test_add_with_track_store_outage_is_not_found() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", Vec::new())],
        vec![track("t1", 1, 0)],
    );
    fx.tracks.fail_reads.store(true, Ordering::SeqCst);

    let outcome = fx.service.add_track("p1", "t1").await;

    assert_eq!(outcome.failure_status(), Some(FailureStatus::NotFound));
    assert_eq!(fx.playlists.writes(), 0);
}

#[tokio::test]
async fn test_persist_failure_reports_upsert_failed() {
    let original = Playlist::new("p1", "mix", "agus", Vec::new());
    let fx = fixture(vec![original.clone()], vec![track("t1", 5, 6)]);
    fx.playlists.fail_writes.store(true, Ordering::SeqCst);

    let add = fx.service.add_track("p1", "t1").await;
    let remove = fx.service.remove_track("p1", "t1").await;

    assert_eq!(add.failure_status(), Some(FailureStatus::UpsertFailed));
    assert_eq!(remove.failure_status(), Some(FailureStatus::UpsertFailed));
    assert_eq!(add.status_code(), 500);
    assert_eq!(stored(&fx, "p1").await, original);
}

#[tokio::test]
async fn test_list_reports_unavailable_when_reads_fail() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", Vec::new())],
        Vec::new(),
    );
    fx.playlists.fail_reads.store(true, Ordering::SeqCst);

    let outcome = fx.service.list().await;

    assert_eq!(outcome.failure_status(), Some(FailureStatus::Unavailable));
    assert_eq!(outcome.status_code(), 503);
    assert!(outcome.payload().is_none());

    fx.playlists.fail_reads.store(false, Ordering::SeqCst);
    assert_eq!(fx.service.list().await.success_status(), Some(SuccessStatus::Found));
}

#[tokio::test]
async fn test_replace_after_read_outage_is_not_modified() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", Vec::new())],
        Vec::new(),
    );
    fx.playlists.fail_reads.store(true, Ordering::SeqCst);
    let dto = playlist_service::PlaylistDto::from(stored(&fx, "p1").await);

    let outcome = fx.service.replace("p1", dto).await;

    assert_eq!(outcome.failure_status(), Some(FailureStatus::NotModified));
    assert_eq!(fx.playlists.writes(), 0);
}

#[tokio::test]
async fn test_store_without_echo_returns_local_playlist() {
    let fx = fixture(
        vec![Playlist::new("p1", "mix", "agus", Vec::new())],
        vec![track("t1", 5, 6)],
    );
    fx.playlists.echo_writes.store(false, Ordering::SeqCst);

    let dto = fx.service.add_track("p1", "t1").await.into_payload().unwrap();

    assert_eq!(dto.id.as_deref(), Some("p1"));
    assert_eq!(dto.tracks.len(), 1);
    assert_eq!(dto.duration.to_string(), "0:05:06");
}

#[tokio::test]
async fn test_concurrent_mutations_leave_consistent_playlist() {
    let tracks: Vec<Track> = (0..8).map(|i| track(&format!("t{i}"), 1, i)).collect();
    let fx = Arc::new(fixture(
        vec![Playlist::new("p1", "mix", "agus", Vec::new())],
        tracks.clone(),
    ));

    let outcomes = join_all(tracks.iter().map(|t| {
        let fx = Arc::clone(&fx);
        let id = t.id.clone();
        async move { fx.service.add_track("p1", &id).await }
    }))
    .await;

    assert!(outcomes.iter().all(|o| o.is_success()));

    // updates may be lost, but the stored record is always self-consistent
    let playlist = stored(&fx, "p1").await;
    assert!(!playlist.tracks.is_empty());
    assert!(playlist.tracks.len() <= tracks.len());
    assert!(playlist.duration_is_consistent());
}

#[tokio::test]
async fn test_mutations_on_different_playlists_run_in_parallel() {
    let playlists: Vec<Playlist> = (0..5)
        .map(|i| Playlist::new(format!("p{i}"), "mix", "agus", Vec::new()))
        .collect();
    let fx = Arc::new(fixture(playlists, vec![track("t1", 3, 33)]));

    let mut handles = vec![];
    for i in 0..5 {
        let fx = Arc::clone(&fx);
        handles.push(tokio::spawn(async move {
            fx.service.add_track(&format!("p{i}"), "t1").await
        }));
    }

    for handle in handles {
        let outcome = handle.await.unwrap();
        assert_eq!(outcome.success_status(), Some(SuccessStatus::Ok));
    }

    for i in 0..5 {
        let playlist = stored(&fx, &format!("p{i}")).await;
        assert_eq!(playlist.duration.to_string(), "0:03:33");
    }
}
