//! Waypost entry point.
//!
//! Binary name: `waypost`
//!
//! Loads configuration from the environment, initializes tracing and the
//! database, restores the stored session into the chat client, then starts
//! the event dispatcher, the periodic session backup, and the HTTP server.

mod http;
mod state;

use tokio_util::sync::CancellationToken;
use waypost_core::session::RestoreOutcome;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: a missing store URL must terminate the process
    // before anything binds or connects.
    let config = match waypost_infra::config::load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    // Held until exit so buffered OTel spans are flushed on drop.
    let _otel_guard = waypost_observe::tracing_setup::init_tracing(config.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let state = AppState::init(config).await?;

    // Push the stored session into the chat client before it starts its
    // connection attempt. Restore failures degrade to fresh pairing; the
    // relay still serves its HTTP surface.
    match state.lifecycle.restore().await {
        Ok(RestoreOutcome::Resumed) => {
            tracing::info!("resuming with stored session");
        }
        Ok(RestoreOutcome::NoSession) => {
            tracing::info!("starting without a stored session; pairing required");
        }
        Err(err) => {
            tracing::error!(error = %err, "session restore failed; starting without a stored session");
        }
    }

    let cancel = CancellationToken::new();

    let dispatcher = state.dispatcher();
    let rx = state.events.subscribe();
    let dispatcher_task = tokio::spawn(async move { dispatcher.run(rx).await });

    let backup_task = {
        let lifecycle = state.lifecycle.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { lifecycle.run_backup(cancel).await })
    };

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "waypost listening");

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it the event bus sender) is dropped once serve
    // returns, which closes the dispatcher's receiver.
    cancel.cancel();
    let _ = backup_task.await;
    let _ = dispatcher_task.await;

    tracing::info!("waypost stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
