//! # Song Handlers
//!
//! Maps `/songs` verbs onto [`SongService`] calls.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/songs` | 200 + list |
//! | GET | `/songs/:id` | 200 + song |
//! | POST | `/songs` | 201 + song + `Location` |
//! | PUT | `/songs/:id` | 200 + song |
//! | DELETE | `/songs/:id` | 204 |
//!
//! Repository calls may block (SQLite), so every service call runs on the
//! blocking pool.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::song::{SongError, SongId, SongRepository, SongResult, SongService};

use super::dto::SongDto;
use super::errors::RestResult;

/// Base path the song routes are mounted under
pub const SONGS_PATH: &str = "/songs";

type SongPath = Result<Path<SongId>, PathRejection>;

/// Song routes with shared service state
pub fn song_routes<R: SongRepository + 'static>(service: Arc<SongService<R>>) -> Router {
    Router::new()
        .route("/", get(list_songs::<R>).post(create_song::<R>))
        .route(
            "/:id",
            get(get_song::<R>)
                .put(update_song::<R>)
                .delete(delete_song::<R>),
        )
        .with_state(service)
}

/// Run a service call off the async workers
async fn blocking<T, F>(call: F) -> RestResult<T>
where
    F: FnOnce() -> SongResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| SongError::Storage(format!("Song task failed: {}", e)))?;
    Ok(result?)
}

async fn list_songs<R: SongRepository + 'static>(
    State(service): State<Arc<SongService<R>>>,
) -> RestResult<Json<Vec<SongDto>>> {
    let songs = blocking(move || service.find_all()).await?;
    Ok(Json(songs.iter().map(SongDto::from).collect()))
}

async fn get_song<R: SongRepository + 'static>(
    State(service): State<Arc<SongService<R>>>,
    path: SongPath,
) -> RestResult<Json<SongDto>> {
    let Path(id) = path?;
    let song = blocking(move || service.find_by_id(id)).await?;
    Ok(Json(SongDto::from(&song)))
}

async fn create_song<R: SongRepository + 'static>(
    State(service): State<Arc<SongService<R>>>,
    payload: Result<Json<Option<SongDto>>, JsonRejection>,
) -> RestResult<impl IntoResponse> {
    let Json(body) = payload?;
    let song = blocking(move || service.create(body.map(Into::into))).await?;

    let location = format!("{}/{}", SONGS_PATH, song.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SongDto::from(&song)),
    ))
}

async fn update_song<R: SongRepository + 'static>(
    State(service): State<Arc<SongService<R>>>,
    path: SongPath,
    payload: Result<Json<SongDto>, JsonRejection>,
) -> RestResult<Json<SongDto>> {
    let Path(id) = path?;
    let Json(body) = payload?;
    let song = blocking(move || service.update(id, body.into())).await?;
    Ok(Json(SongDto::from(&song)))
}

async fn delete_song<R: SongRepository + 'static>(
    State(service): State<Arc<SongService<R>>>,
    path: SongPath,
) -> RestResult<StatusCode> {
    let Path(id) = path?;
    blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
