//! # Helpbot Chat API Handlers
//!
//! File: cli/src/commands/srv/api.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! JSON endpoints for a chat widget embedded in the web platform:
//! - `GET /api/health`: liveness probe, answers `ok`
//! - `GET /api/suggestions`: the example queries to show as quick replies
//! - `POST /api/chat`: one message in, one reply out after the thinking delay
//!
//! The API is stateless. Each request is answered on its own and the widget
//! keeps its own transcript, so no conversation is stored server-side. A blank
//! message is a no-op and gets `204 No Content`.
//!
//! ## Examples
//!
//! ```bash
//! curl -s localhost:8000/api/chat -H 'content-type: application/json' \
//!      -d '{"message": "How do I upload a paper?"}'
//! ```
//!
//! ```json
//! {
//!   "reply": "📄 To upload a paper:\n1. ...",
//!   "html": "📄 To upload a paper:<br>1. ...",
//!   "links": [{"label": "Upload Paper", "target": "/papers/upload/", "url": "/papers/upload/"}],
//!   "matched": {"kind": "rule", "index": 0}
//! }
//! ```
//!
use crate::bot::render::{resolve_target, to_html};
use crate::bot::responder::{ReplySource, Responder};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Responder>,
    pub delay: Duration,
    pub base_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct LinkView {
    pub label: String,
    pub target: String,
    /// `target` joined to `links.base_url` when one is configured.
    pub url: String,
}

#[derive(Serialize, Debug)]
pub struct ChatResponse {
    pub reply: String,
    pub html: String,
    pub links: Vec<LinkView>,
    pub matched: ReplySource,
}

#[derive(Serialize, Debug)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn suggestions_handler(State(state): State<AppState>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: state.responder.fallback().example_queries().to_vec(),
    })
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let text = payload.message.trim();
    if text.is_empty() {
        debug!("Ignoring blank chat message.");
        return StatusCode::NO_CONTENT.into_response();
    }

    tokio::time::sleep(state.delay).await;
    let reply = state.responder.respond(text);
    debug!(source = ?reply.source, "Chat reply ready");

    let links = reply
        .links
        .iter()
        .map(|link| LinkView {
            label: link.label.clone(),
            target: link.target.clone(),
            url: resolve_target(state.base_url.as_deref(), &link.target),
        })
        .collect();

    Json(ChatResponse {
        html: to_html(&reply.text),
        reply: reply.text,
        links,
        matched: reply.source,
    })
    .into_response()
}
