pub mod render;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use crate::adapters::http::state::HttpState;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/analyze", post(routes::analyze_page))
        .route("/api/analyze", post(routes::analyze_api))
        .route("/api/health", get(routes::health))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state)
}
