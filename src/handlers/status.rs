use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::StatusCheck;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// POST /api/status
pub async fn post(
    State(app): State<AppState>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> ApiResult<Json<StatusCheck>> {
    let Json(body) = payload?;
    Ok(Json(app.status.record(&body.client_name).await?))
}

/// GET /api/status
pub async fn list(State(app): State<AppState>) -> ApiResult<Json<Vec<StatusCheck>>> {
    Ok(Json(app.status.list().await?))
}
