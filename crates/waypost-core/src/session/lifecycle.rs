//! Session lifecycle controller.
//!
//! Drives the session store at its fixed trigger points: restore once at
//! startup, checkpoint periodically and on auth events, delete on explicit
//! invalidation. Store failures are logged and contained here; nothing on
//! this path may crash the process.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use waypost_types::error::SessionStoreError;

use crate::client::ChatClient;
use crate::session::store::SessionStore;

/// Result of the startup restore decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A stored blob was pushed into the client; the session resumes.
    Resumed,
    /// No usable stored session; a fresh pairing flow is required.
    NoSession,
}

/// Controls when session blobs move between the chat client and the store.
pub struct SessionLifecycle<S, C> {
    store: Arc<S>,
    client: Arc<C>,
    session_id: String,
    backup_interval: Duration,
}

impl<S: SessionStore, C: ChatClient> SessionLifecycle<S, C> {
    pub fn new(
        store: Arc<S>,
        client: Arc<C>,
        session_id: impl Into<String>,
        backup_interval: Duration,
    ) -> Self {
        Self {
            store,
            client,
            session_id: session_id.into(),
            backup_interval,
        }
    }

    /// Startup restore: decide between "resume" and "fresh pairing".
    ///
    /// A backend error propagates to the caller -- it must not be mistaken
    /// for an absent session. An unimportable blob degrades to fresh pairing
    /// (the blob format belongs to the external auth layer and may have
    /// changed underneath us).
    pub async fn restore(&self) -> Result<RestoreOutcome, SessionStoreError> {
        match self.store.extract(&self.session_id).await? {
            Some(blob) => match self.client.import_session(&blob).await {
                Ok(()) => {
                    tracing::info!(
                        session_id = %self.session_id,
                        bytes = blob.len(),
                        "stored session restored"
                    );
                    Ok(RestoreOutcome::Resumed)
                }
                Err(err) => {
                    tracing::warn!(
                        session_id = %self.session_id,
                        error = %err,
                        "stored session could not be imported; fresh pairing required"
                    );
                    Ok(RestoreOutcome::NoSession)
                }
            },
            None => {
                tracing::info!(
                    session_id = %self.session_id,
                    "no stored session; fresh pairing required"
                );
                Ok(RestoreOutcome::NoSession)
            }
        }
    }

    /// Checkpoint the client's current session blob into the store.
    ///
    /// Skips silently when the client holds no session yet. All failures are
    /// logged; duplicate successful saves are harmless (idempotent upsert).
    pub async fn checkpoint(&self) {
        let blob = match self.client.export_session().await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!(session_id = %self.session_id, "client holds no session yet; checkpoint skipped");
                return;
            }
            Err(err) => {
                tracing::warn!(session_id = %self.session_id, error = %err, "session export failed; checkpoint skipped");
                return;
            }
        };

        match self.store.save(&self.session_id, &blob).await {
            Ok(()) => {
                tracing::debug!(session_id = %self.session_id, bytes = blob.len(), "session checkpointed");
            }
            Err(err) => {
                tracing::error!(session_id = %self.session_id, error = %err, "session checkpoint failed");
            }
        }
    }

    /// Remove the stored session blob (e.g. after the client logged out).
    pub async fn invalidate(&self) {
        match self.store.delete(&self.session_id).await {
            Ok(()) => {
                tracing::info!(session_id = %self.session_id, "stored session invalidated");
            }
            Err(err) => {
                tracing::error!(session_id = %self.session_id, error = %err, "failed to invalidate stored session");
            }
        }
    }

    /// Existence short-circuit: is a session blob stored, without reading it.
    pub async fn has_session(&self) -> Result<bool, SessionStoreError> {
        self.store.exists(&self.session_id).await
    }

    /// Periodic checkpoint loop. Runs until `cancel` fires.
    ///
    /// The first checkpoint happens one full interval after start; the
    /// startup path has just restored or is waiting on pairing, so there is
    /// nothing new to persist yet.
    pub async fn run_backup(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.backup_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval's first tick completes immediately
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("session backup loop stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.checkpoint().await;
                }
            }
        }
    }
}
