// src/routes/chat.rs
use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::{
        hybrid::ReplySource,
        local_responder,
        metrics_manager::MetricsData,
        resume::ResumeGraph,
        session_manager::MessageRole,
    },
    state::SharedState,
};

const MAX_MESSAGE_LEN: usize = 4000;

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => {
            state.sessions.ensure_session(s).await;
            s.clone()
        }
        _ => state.sessions.create_session().await,
    };

    let trimmed = payload.message.trim();

    if trimmed.len() > MAX_MESSAGE_LEN {
        return Err(AppError::BadRequest("Message too long".to_string()));
    }

    // Empty input bypasses the remote path entirely. The UI should prevent
    // it, but the local responder is total so this never fails.
    if trimmed.is_empty() {
        let reply = local_responder::respond(&state.resume, trimmed);
        state
            .sessions
            .append_message(&session_id, MessageRole::Bot, &reply.text)
            .await;
        state
            .metrics
            .record_source(ReplySource::Local.as_str())
            .await;
        state
            .analytics
            .record_chat_event(&session_id, ReplySource::Local.as_str());
        return Ok(Json(ChatResponse::new(session_id, reply)));
    }

    // One outstanding resolution per session; overlapping submissions are
    // rejected rather than queued or raced. The guard releases the session
    // even if this future is dropped mid-resolution.
    let Some(resolution) = state.sessions.begin_resolution(&session_id).await else {
        return Err(AppError::Busy);
    };

    state
        .sessions
        .append_message(&session_id, MessageRole::User, trimmed)
        .await;
    let history = state
        .sessions
        .get_history(&session_id)
        .await
        .unwrap_or_default();

    let (reply, source) = state.ai.resolve(&history).await;

    state
        .sessions
        .append_message(&session_id, MessageRole::Bot, &reply.text)
        .await;
    drop(resolution);

    state.metrics.record_source(source.as_str()).await;
    if let Some(node_id) = &reply.node_id {
        state.metrics.record_node(node_id).await;
    }
    if let Some(action) = reply.action {
        state.metrics.record_action(action.as_str()).await;
    }
    state.analytics.record_chat_event(&session_id, source.as_str());

    Ok(Json(ChatResponse::new(session_id, reply)))
}

/// The full resume graph for the frontend renderer. Fetched once per page
/// load, so it doubles as the page-view signal for analytics.
pub async fn graph_handler(State(state): State<SharedState>) -> Json<ResumeGraph> {
    state.analytics.record_page_view("graph-viewer", "/graph");
    Json((*state.resume).clone())
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

pub async fn get_sessions_handler(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.sessions.list_session_ids().await)
}
