//! Sequential dispatcher for client events.
//!
//! Consumes one bus receiver and handles each event variant through a single
//! typed match, one at a time. No handler may crash the loop: relay and
//! lifecycle failures are logged and dropped here.

use std::sync::Arc;

use tokio::sync::broadcast;
use waypost_types::event::ClientEvent;

use crate::client::ChatClient;
use crate::relay::{MessageRelay, WebhookDelivery};
use crate::session::lifecycle::SessionLifecycle;
use crate::session::store::SessionStore;

/// Routes each `ClientEvent` variant to its handler.
pub struct EventDispatcher<S, C, D> {
    lifecycle: Arc<SessionLifecycle<S, C>>,
    relay: Arc<MessageRelay<D>>,
}

impl<S, C, D> EventDispatcher<S, C, D>
where
    S: SessionStore,
    C: ChatClient,
    D: WebhookDelivery,
{
    pub fn new(lifecycle: Arc<SessionLifecycle<S, C>>, relay: Arc<MessageRelay<D>>) -> Self {
        Self { lifecycle, relay }
    }

    /// Run until the bus is closed, handling events sequentially.
    pub async fn run(&self, mut rx: broadcast::Receiver<ClientEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.handle(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event receiver lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("event bus closed; dispatcher stopping");
                    break;
                }
            }
        }
    }

    /// Handle one event to completion.
    pub async fn handle(&self, event: ClientEvent) {
        match event {
            ClientEvent::Qr { code } => {
                // The code itself stays out of the logs; the client renders it.
                tracing::info!(code_len = code.len(), "pairing required; scan the code shown by the chat client");
            }
            ClientEvent::Authenticated => {
                tracing::info!("chat client authenticated");
                self.lifecycle.checkpoint().await;
            }
            ClientEvent::Ready => {
                tracing::info!("chat client connected and ready");
                self.lifecycle.checkpoint().await;
            }
            ClientEvent::AuthFailure { reason } => {
                tracing::error!(%reason, "authentication failure; operator intervention (re-pairing) required");
            }
            ClientEvent::Message(message) => {
                tracing::info!(from = %message.from, "message received");
                // Fire-and-log: a failed forward never affects the receive path.
                let _ = self.relay.forward(message).await;
            }
            ClientEvent::Disconnected { reason } => {
                tracing::warn!(%reason, "chat client disconnected; invalidating stored session");
                self.lifecycle.invalidate().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use waypost_types::error::{ChatClientError, RelayError, SessionStoreError};
    use waypost_types::message::{InboundMessage, RelayPayload};

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl SessionStore for MemoryStore {
        async fn save(&self, id: &str, blob: &[u8]) -> Result<(), SessionStoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(id.to_string(), blob.to_vec());
            Ok(())
        }

        async fn extract(&self, id: &str) -> Result<Option<Vec<u8>>, SessionStoreError> {
            Ok(self.records.lock().unwrap().get(id).cloned())
        }

        async fn delete(&self, id: &str) -> Result<(), SessionStoreError> {
            self.records.lock().unwrap().remove(id);
            Ok(())
        }

        async fn exists(&self, id: &str) -> Result<bool, SessionStoreError> {
            Ok(self.records.lock().unwrap().contains_key(id))
        }
    }

    struct MockClient {
        session: Mutex<Option<Vec<u8>>>,
    }

    impl ChatClient for MockClient {
        async fn send_message(&self, _to: &str, _text: &str) -> Result<(), ChatClientError> {
            Ok(())
        }

        async fn export_session(&self) -> Result<Option<Vec<u8>>, ChatClientError> {
            Ok(self.session.lock().unwrap().clone())
        }

        async fn import_session(&self, blob: &[u8]) -> Result<(), ChatClientError> {
            *self.session.lock().unwrap() = Some(blob.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDelivery {
        delivered: Mutex<Vec<RelayPayload>>,
        fail: bool,
    }

    impl WebhookDelivery for RecordingDelivery {
        async fn deliver(&self, payload: &RelayPayload) -> Result<(), RelayError> {
            self.delivered.lock().unwrap().push(payload.clone());
            if self.fail {
                Err(RelayError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    fn dispatcher(
        store: Arc<MemoryStore>,
        delivery: RecordingDelivery,
    ) -> (
        EventDispatcher<MemoryStore, MockClient, RecordingDelivery>,
        Arc<MessageRelay<RecordingDelivery>>,
    ) {
        let client = Arc::new(MockClient {
            session: Mutex::new(Some(b"session".to_vec())),
        });
        let lifecycle = Arc::new(SessionLifecycle::new(
            store,
            client,
            "primary",
            Duration::from_secs(120),
        ));
        let relay = Arc::new(MessageRelay::new(delivery));
        (EventDispatcher::new(lifecycle, relay.clone()), relay)
    }

    #[tokio::test]
    async fn test_message_event_reaches_webhook() {
        let store = Arc::new(MemoryStore::default());
        let (dispatcher, relay) = dispatcher(store, RecordingDelivery::default());

        dispatcher
            .handle(ClientEvent::Message(InboundMessage {
                from: "56912345678@c.us".to_string(),
                text: "hi".to_string(),
            }))
            .await;

        let delivered = relay.delivery().delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].from, "56912345678");
    }

    #[tokio::test]
    async fn test_failed_forward_does_not_stop_dispatch() {
        let store = Arc::new(MemoryStore::default());
        let (dispatcher, relay) = dispatcher(
            store,
            RecordingDelivery {
                delivered: Mutex::new(Vec::new()),
                fail: true,
            },
        );

        // Two messages through a failing webhook: both attempted, no panic.
        for text in ["first", "second"] {
            dispatcher
                .handle(ClientEvent::Message(InboundMessage {
                    from: "56912345678@c.us".to_string(),
                    text: text.to_string(),
                }))
                .await;
        }

        assert_eq!(relay.delivery().delivered.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ready_event_checkpoints_session() {
        let store = Arc::new(MemoryStore::default());
        let (dispatcher, _) = dispatcher(store.clone(), RecordingDelivery::default());

        dispatcher.handle(ClientEvent::Ready).await;

        assert_eq!(
            store.extract("primary").await.unwrap(),
            Some(b"session".to_vec())
        );
    }

    #[tokio::test]
    async fn test_disconnected_event_invalidates_session() {
        let store = Arc::new(MemoryStore::default());
        store.save("primary", b"old").await.unwrap();
        let (dispatcher, _) = dispatcher(store.clone(), RecordingDelivery::default());

        dispatcher
            .handle(ClientEvent::Disconnected {
                reason: "logged out".to_string(),
            })
            .await;

        assert!(!store.exists("primary").await.unwrap());
    }

    #[tokio::test]
    async fn test_auth_failure_is_logged_not_fatal() {
        let store = Arc::new(MemoryStore::default());
        let (dispatcher, _) = dispatcher(store, RecordingDelivery::default());

        dispatcher
            .handle(ClientEvent::AuthFailure {
                reason: "token expired".to_string(),
            })
            .await;
    }

    #[tokio::test]
    async fn test_run_stops_when_bus_closes() {
        let store = Arc::new(MemoryStore::default());
        let (dispatcher, relay) = dispatcher(store, RecordingDelivery::default());

        let (tx, rx) = tokio::sync::broadcast::channel(16);
        let task = tokio::spawn(async move { dispatcher.run(rx).await });

        tx.send(ClientEvent::Message(InboundMessage {
            from: "1111@c.us".to_string(),
            text: "bye".to_string(),
        }))
        .unwrap();
        drop(tx);

        task.await.unwrap();
        assert_eq!(relay.delivery().delivered.lock().unwrap().len(), 1);
    }
}
