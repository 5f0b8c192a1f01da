use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{
    modules,
    web::{AppState, landing},
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing::landing_page))
        .route("/healthz", get(healthz))
        .merge(modules::review::router())
        .merge(modules::chat::router())
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
