use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::models::{ClientState, QuizRecord, TaskItem};
use crate::error::ApiResult;

use super::Ack;

#[derive(Debug, Deserialize)]
pub struct BookmarkBody {
    pub bookmarked: bool,
}

#[derive(Debug, Serialize)]
pub struct BookmarkSet {
    pub slug: String,
    pub bookmarked: bool,
}

#[derive(Debug, Deserialize)]
pub struct TasksBody {
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Deserialize)]
pub struct QuizBestBody {
    pub best: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizBestSet {
    pub slug: String,
    pub best: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Notes {
    pub notes: String,
}

/// GET /api/state/:client_id
pub async fn get(State(app): State<AppState>, Path(client_id): Path<String>) -> ApiResult<Json<ClientState>> {
    Ok(Json(app.state.get_state(&client_id).await?))
}

/// PUT /api/state/:client_id/bookmarks/:slug
pub async fn put_bookmark(
    State(app): State<AppState>,
    Path((client_id, slug)): Path<(String, String)>,
    payload: Result<Json<BookmarkBody>, JsonRejection>,
) -> ApiResult<Json<BookmarkSet>> {
    let Json(body) = payload?;
    app.state.set_bookmark(&client_id, &slug, body.bookmarked).await?;
    Ok(Json(BookmarkSet {
        slug,
        bookmarked: body.bookmarked,
    }))
}

/// GET /api/state/:client_id/tasks/:slug
pub async fn get_tasks(
    State(app): State<AppState>,
    Path((client_id, slug)): Path<(String, String)>,
) -> ApiResult<Json<Vec<TaskItem>>> {
    Ok(Json(app.state.get_tasks(&client_id, &slug).await?))
}

/// PUT /api/state/:client_id/tasks/:slug
pub async fn put_tasks(
    State(app): State<AppState>,
    Path((client_id, slug)): Path<(String, String)>,
    payload: Result<Json<TasksBody>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(body) = payload?;
    app.state.set_tasks(&client_id, &slug, &body.tasks).await?;
    Ok(Json(Ack::ok()))
}

/// GET /api/state/:client_id/quiz
pub async fn get_quiz(
    State(app): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<BTreeMap<String, QuizRecord>>> {
    Ok(Json(app.state.get_quiz_progress(&client_id).await?))
}

/// PUT /api/state/:client_id/quiz/:slug
pub async fn put_quiz(
    State(app): State<AppState>,
    Path((client_id, slug)): Path<(String, String)>,
    payload: Result<Json<QuizBestBody>, JsonRejection>,
) -> ApiResult<Json<QuizBestSet>> {
    let Json(body) = payload?;
    app.state.set_quiz_best(&client_id, &slug, body.best).await?;
    Ok(Json(QuizBestSet { slug, best: body.best }))
}

/// GET /api/state/:client_id/notes
pub async fn get_notes(State(app): State<AppState>, Path(client_id): Path<String>) -> ApiResult<Json<Notes>> {
    let notes = app.state.get_notes(&client_id).await?;
    Ok(Json(Notes { notes }))
}

/// PUT /api/state/:client_id/notes
pub async fn put_notes(
    State(app): State<AppState>,
    Path(client_id): Path<String>,
    payload: Result<Json<Notes>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(body) = payload?;
    app.state.set_notes(&client_id, &body.notes).await?;
    Ok(Json(Ack::ok()))
}
