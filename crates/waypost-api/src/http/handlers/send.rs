//! Outbound send trigger.
//!
//! External callers (automation flows) use this endpoint to send a chat
//! message through the connected client. The response shape is part of the
//! external interface and is kept stable: 400 carries `{error}`, 200 carries
//! `{success: true, message}`, 500 carries `{success: false, error}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use waypost_core::client::ChatClient;
use waypost_core::relay::qualify_recipient;

use crate::state::AppState;

/// Request body for triggering an outbound send.
///
/// Both fields are optional at the deserialization layer so that missing
/// values produce the documented 400 body instead of a generic rejection.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to: Option<String>,
    pub text: Option<String>,
}

/// POST /send-message - Send a message through the chat client.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Response {
    let (to, text) = match (body.to.as_deref(), body.text.as_deref()) {
        (Some(to), Some(text)) if !to.is_empty() && !text.is_empty() => (to, text),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "both 'to' and 'text' are required",
                })),
            )
                .into_response();
        }
    };

    let recipient = qualify_recipient(to);

    match state.client.send_message(&recipient, text).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "message sent",
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(to = %recipient, error = %err, "triggered send failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}
