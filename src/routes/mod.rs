// HTTP routes

mod http;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
}

pub fn app(config: AppConfig) -> Router {
    let state = AppState { config };
    Router::new()
        .route("/", get(|| async { "Hello from voldash!" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/capacity/sort", post(http::sort_capacity_handler)) // POST /api/capacity/sort
        .route("/api/series/densify", post(http::densify_handler)) // POST /api/series/densify
        .route("/api/volumes/metrics", post(http::volume_metrics_handler)) // POST /api/volumes/metrics
        .route("/api/age", get(http::age_handler)) // GET /api/age
        .route("/api/sort-search", get(http::sort_search_handler)) // GET /api/sort-search
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
