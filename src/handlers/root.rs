use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service description
pub async fn index() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Psychology Study API",
        "version": version,
        "endpoints": {
            "health": "/health",
            "branches": "/api/branches[/:slug]",
            "state": "/api/state/:client_id",
            "bookmarks": "/api/state/:client_id/bookmarks/:slug",
            "tasks": "/api/state/:client_id/tasks/:slug",
            "quiz": "/api/state/:client_id/quiz[/:slug]",
            "notes": "/api/state/:client_id/notes",
            "status": "/api/status",
        }
    }))
}

/// GET /api/
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

/// GET /health - 503 when the store does not answer
pub async fn health(State(app): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match app.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
