use axum::extract::{Path, State};
use axum::Json;

use crate::app::AppState;
use crate::database::models::Branch;
use crate::error::ApiResult;

/// GET /api/branches
pub async fn list(State(app): State<AppState>) -> ApiResult<Json<Vec<Branch>>> {
    Ok(Json(app.catalogue.list_branches().await?))
}

/// GET /api/branches/:slug
pub async fn get(State(app): State<AppState>, Path(slug): Path<String>) -> ApiResult<Json<Branch>> {
    Ok(Json(app.catalogue.get_branch(&slug).await?))
}
