//! HTTP endpoints.
//!
//! Inbound messages arrive either from an SMS gateway webhook or as plain
//! JSON. Handlers only queue the text; the game loop picks it up on its
//! next tick.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::inbox::Inbox;
use crate::state::GameSnapshot;

const EMPTY_TWIML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#;

#[derive(Clone)]
pub struct ApiState {
    pub inbox: Inbox,
    pub status: watch::Receiver<GameSnapshot>,
}

/// Fields posted by the SMS gateway. Everything else in the form is ignored.
#[derive(Debug, Deserialize)]
pub struct SmsWebhook {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct PostedMessage {
    pub sender: String,
    pub text: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/sms", post(receive_sms))
        .route("/api/messages", post(post_message))
        .route("/api/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /sms
///
/// Replies with an empty TwiML document so the gateway sends nothing back.
pub async fn receive_sms(
    State(state): State<ApiState>,
    Form(sms): Form<SmsWebhook>,
) -> impl IntoResponse {
    state.inbox.post(sms.body, sms.from);
    ([(header::CONTENT_TYPE, "text/xml")], EMPTY_TWIML)
}

/// POST /api/messages
pub async fn post_message(
    State(state): State<ApiState>,
    Json(message): Json<PostedMessage>,
) -> StatusCode {
    state.inbox.post(message.text, message.sender);
    StatusCode::ACCEPTED
}

/// GET /api/status
pub async fn status(State(state): State<ApiState>) -> Json<GameSnapshot> {
    Json(state.status.borrow().clone())
}
