//! Axum router configuration with middleware.
//!
//! Four routes, all at the root: liveness, health, the outbound send
//! trigger, and the client event ingest. Middleware: CORS, tracing.

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/send-message", post(handlers::send::send_message))
        .route("/client-event", post(handlers::event::client_event))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Liveness probe. No state, no side effects.
async fn root() -> &'static str {
    "Waypost relay is running"
}

/// GET /health - Health summary including stored-session presence.
///
/// A store failure is not the same as "no stored session": the field goes
/// null and the error is logged, while the endpoint itself stays 200.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let stored_session = match state.lifecycle.has_session().await {
        Ok(present) => serde_json::Value::Bool(present),
        Err(err) => {
            tracing::warn!(error = %err, "session store unavailable during health check");
            serde_json::Value::Null
        }
    };

    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "stored_session": stored_session,
    }))
}
