use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::{AppConfig, Environment};
use crate::database::Store;
use crate::handlers;
use crate::services::{CatalogueService, StateService, StatusService};

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub catalogue: CatalogueService,
    pub state: StateService,
    pub status: StatusService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        let catalogue = CatalogueService::new(store.clone());
        let state = StateService::new(store.clone(), catalogue.clone());
        let status = StatusService::new(store.clone(), config.api.status_list_limit);

        Self {
            store,
            catalogue,
            state,
            status,
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::root::health))
        .route("/api", get(handlers::root::hello))
        .route("/api/", get(handlers::root::hello))
        // Catalogue and per-client state
        .merge(branch_routes())
        .merge(state_routes())
        .merge(status_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match cors_layer(config) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn branch_routes() -> Router<AppState> {
    use handlers::branches;

    Router::new()
        .route("/api/branches", get(branches::list))
        .route("/api/branches/:slug", get(branches::get))
}

fn state_routes() -> Router<AppState> {
    use handlers::state;

    Router::new()
        .route("/api/state/:client_id", get(state::get))
        .route("/api/state/:client_id/bookmarks/:slug", put(state::put_bookmark))
        .route(
            "/api/state/:client_id/tasks/:slug",
            get(state::get_tasks).put(state::put_tasks),
        )
        .route("/api/state/:client_id/quiz", get(state::get_quiz))
        .route("/api/state/:client_id/quiz/:slug", put(state::put_quiz))
        .route(
            "/api/state/:client_id/notes",
            get(state::get_notes).put(state::put_notes),
        )
}

fn status_routes() -> Router<AppState> {
    use handlers::status;

    Router::new().route("/api/status", get(status::list).post(status::post))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let security = &config.security;
    if !security.enable_cors {
        return None;
    }

    if config.environment == Environment::Development || security.allows_any_origin() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("CORS is enabled but no origins are allowed; set SECURITY_CORS_ORIGINS");
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::testing::TestContext;

    async fn router() -> Router {
        let ctx = TestContext::seeded().await;
        let config = AppConfig::development();
        app(AppState::new(ctx.store, &config), &config)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn bookmark_then_full_state() {
        let router = router().await;

        let put = Request::put("/api/state/c1/bookmarks/cognitive")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"bookmarked": true}"#))
            .unwrap();
        let (status, body) = send(router.clone(), put).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "slug": "cognitive", "bookmarked": true }));

        let get = Request::get("/api/state/c1").body(Body::empty()).unwrap();
        let (status, body) = send(router, get).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["client_id"], json!("c1"));
        assert_eq!(body["bookmarks"], json!({ "cognitive": true }));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_as_invalid_json() {
        let router = router().await;
        let put = Request::put("/api/state/c1/quiz/social")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"best": "lots"}"#))
            .unwrap();

        let (status, body) = send(router, put).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_JSON"));
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let router = router().await;
        let put = Request::put("/api/state/c1/notes")
            .body(Body::from(r#"{"notes": "x"}"#))
            .unwrap();

        let (status, body) = send(router, put).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("BAD_REQUEST"));
    }

    #[tokio::test]
    async fn hello_under_api_prefix() {
        let router = router().await;
        let (status, body) = send(router, Request::get("/api/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello World" }));
    }

    #[test]
    fn production_without_origins_yields_no_layer() {
        let mut config = AppConfig::from_preset(Environment::Production);
        assert!(cors_layer(&config).is_none());

        config.security.cors_origins = vec!["https://study.example.org".to_string()];
        assert!(cors_layer(&config).is_some());
    }

    #[test]
    fn cors_disabled_yields_no_layer() {
        let mut config = AppConfig::development();
        config.security.enable_cors = false;
        assert!(cors_layer(&config).is_none());
    }
}
