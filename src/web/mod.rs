//! HTTP boundary.
//!
//! Handlers forward to the services and return their [`Outcome`] as is; the
//! only transport logic is the status rendering in `IntoResponse`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::{ApiMessage, PlaylistDto, TrackDto};
use crate::result::{FailureStatus, Outcome};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<FailureStatus> for ErrorResponse {
    fn from(status: FailureStatus) -> Self {
        Self {
            error: status.description().to_string(),
            code: status.as_str().to_string(),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 204 and 304 must not carry a body
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
            return status.into_response();
        }

        match self {
            Outcome::Success(payload, _) => (status, Json(payload)).into_response(),
            Outcome::Failure(failure) => (status, Json(ErrorResponse::from(failure))).into_response(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(healthcheck))
        .route("/playlists", get(list_playlists).post(create_playlist))
        .route(
            "/playlists/:id",
            get(get_playlist).put(replace_playlist).delete(delete_playlist),
        )
        .route(
            "/playlists/:id/tracks/:track_id",
            put(add_track).delete(remove_track),
        )
        .route("/tracks", get(list_tracks).post(create_track))
        .route(
            "/tracks/:id",
            get(get_track).put(replace_track).delete(delete_track),
        );

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn healthcheck() -> Json<ApiMessage> {
    Json(ApiMessage {
        message: "ok".to_string(),
    })
}

pub async fn add_track(
    State(state): State<AppState>,
    Path((id, track_id)): Path<(String, String)>,
) -> Outcome<PlaylistDto> {
    state.playlists.add_track(&id, &track_id).await
}

pub async fn remove_track(
    State(state): State<AppState>,
    Path((id, track_id)): Path<(String, String)>,
) -> Outcome<PlaylistDto> {
    state.playlists.remove_track(&id, &track_id).await
}

pub async fn list_playlists(State(state): State<AppState>) -> Outcome<Vec<PlaylistDto>> {
    state.playlists.list().await
}

pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Outcome<PlaylistDto> {
    state.playlists.get_by_id(&id).await
}

pub async fn create_playlist(
    State(state): State<AppState>,
    Json(payload): Json<PlaylistDto>,
) -> Outcome<PlaylistDto> {
    state.playlists.create(payload).await
}

pub async fn replace_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlaylistDto>,
) -> Outcome<PlaylistDto> {
    state.playlists.replace(&id, payload).await
}

pub async fn delete_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Outcome<String> {
    state.playlists.delete_by_id(&id).await
}

pub async fn list_tracks(State(state): State<AppState>) -> Outcome<Vec<TrackDto>> {
    state.tracks.list().await
}

pub async fn get_track(State(state): State<AppState>, Path(id): Path<String>) -> Outcome<TrackDto> {
    state.tracks.get_by_id(&id).await
}

pub async fn create_track(
    State(state): State<AppState>,
    Json(payload): Json<TrackDto>,
) -> Outcome<TrackDto> {
    state.tracks.create(payload).await
}

pub async fn replace_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TrackDto>,
) -> Outcome<TrackDto> {
    state.tracks.replace(&id, payload).await
}

pub async fn delete_track(State(state): State<AppState>, Path(id): Path<String>) -> Outcome<String> {
    state.tracks.delete_by_id(&id).await
}
