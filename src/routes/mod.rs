//! Router assembly.
//!
//! One WebSocket endpoint at `/ws`, the HTTP API under `/api/v1/...`, and a
//! static SPA served from `./static` with an index fallback so client-side
//! routes resolve. CORS is wide open (single-user app, no credentials) and
//! every request gets a trace span with method, path, status, and latency.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

pub fn build_router(state: Arc<AppState>) -> Router {
    let spa = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let http_trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/state", get(http::http_get_state))
        .route("/api/v1/login", post(http::http_post_login))
        .route("/api/v1/navigate", post(http::http_post_navigate))
        .route("/api/v1/track", post(http::http_post_track))
        .route("/api/v1/mission/start", post(http::http_post_mission_start))
        .route("/api/v1/mission/code", post(http::http_post_mission_code))
        .route("/api/v1/mission/choice", post(http::http_post_mission_choice))
        .route("/api/v1/restart", post(http::http_post_restart))
        .route("/api/v1/leaderboard", get(http::http_get_leaderboard))
        .route("/api/v1/practice/language", post(http::http_post_practice_language))
        .route("/api/v1/practice/level", post(http::http_post_practice_level))
        .route("/api/v1/practice/answer", post(http::http_post_practice_answer))
        .route("/api/v1/practice/back", post(http::http_post_practice_back))
        .with_state(state)
        .layer(cors)
        .layer(http_trace)
        .fallback_service(spa)
}
