//! Inbound client event ingestion.
//!
//! The external chat client pushes its lifecycle events here as tagged JSON.
//! The handler only publishes to the bus; the dispatcher consumes and acts
//! on them off the request path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use waypost_types::event::ClientEvent;

use crate::state::AppState;

/// POST /client-event - Publish a client lifecycle event onto the bus.
pub async fn client_event(
    State(state): State<AppState>,
    Json(event): Json<ClientEvent>,
) -> StatusCode {
    state.events.publish(event);
    StatusCode::ACCEPTED
}
