// src/routes/mod.rs
pub mod chat;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;
use chat::{chat_handler, get_metrics_handler, get_sessions_handler, graph_handler};

pub fn create_router(state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .route("/sessions", get(get_sessions_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/graph", get(graph_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Admin endpoints are gated on a shared key header. No key configured means
// the admin surface is closed, not open.
async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = state.admin_key.as_deref() else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    match req.headers().get("x-admin-key") {
        Some(val) if val == expected => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
