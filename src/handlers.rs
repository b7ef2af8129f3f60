//! HTTP route handlers for the twitlink service.
//!
//! These handlers let a chat bot (or a bridge in front of one) hand over
//! messages as JSON and receive the lines to post back.

use axum::{extract::State, response::Json};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::dispatch::{Trigger, TwitterPlugin};

/// Shared state for the HTTP handlers.
pub type AppState = Arc<TwitterPlugin>;

/// A chat message relayed by the host bot.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Nick of the sender
    pub nick: String,
    /// Channel the message was seen in (the nick itself for private messages)
    pub channel: String,
    /// Message text
    pub text: String,
}

/// Lines the host should send back to the channel, in order.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub lines: Vec<String>,
}

/// Handles GET requests to the `/` endpoint.
pub async fn handle_root() -> &'static str {
    "twitlink is listening for Twitter links."
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "twitlink"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "twitlink"}))
}

/// Handles POST requests to the `/message` endpoint.
///
/// Every Twitter link in `text` is looked up and formatted. A message without
/// links yields an empty `lines` array. Each returned line is a single IRC
/// line of at most 400 bytes.
///
/// # Example Request
///
/// ```json
/// {"nick": "alice", "channel": "#rust", "text": "https://twitter.com/jack/status/20"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"lines": ["[Twitter] jack (@jack): just setting up my twttr | ..."]}
/// ```
pub async fn handle_message(
    State(plugin): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let trigger = Trigger::new(request.nick, request.channel, request.text);
    let lines = plugin.handle(&trigger).await;
    if !lines.is_empty() {
        info!(
            "Replying to {} in {} with {} line(s)",
            trigger.nick,
            trigger.sender,
            lines.len()
        );
    }
    Json(MessageResponse { lines })
}

/// Builds the router with every route, without middleware layers.
pub fn create_app(state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/message", post(handle_message))
        .with_state(state)
}
