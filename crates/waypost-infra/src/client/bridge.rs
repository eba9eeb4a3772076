//! HTTP bridge to the external chat client.
//!
//! The browser-automation client that speaks the actual chat wire protocol
//! runs as a sidecar. This adapter covers the three calls Waypost makes into
//! it: send a message, export the current session blob, import a stored one.
//! The sidecar pushes its lifecycle events back through `POST /client-event`
//! on the Waypost API.

use waypost_core::client::ChatClient;
use waypost_types::error::ChatClientError;

/// HTTP adapter implementing `ChatClient` against the sidecar's API:
///
/// - `POST {base}/send` with `{to, text}`
/// - `GET {base}/session` -> blob bytes, or 404/204 when unpaired
/// - `PUT {base}/session` with blob bytes
pub struct BridgeChatClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl BridgeChatClient {
    /// Create a bridge pointing at `base_url`. An unset URL is allowed:
    /// every call then fails with `ChatClientError::NotConfigured` instead
    /// of failing the process.
    pub fn new(http: reqwest::Client, base_url: Option<String>) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<String, ChatClientError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(ChatClientError::NotConfigured)?;
        Ok(format!("{}/{path}", base.trim_end_matches('/')))
    }
}

fn transport(err: reqwest::Error) -> ChatClientError {
    ChatClientError::Transport(err.to_string())
}

impl ChatClient for BridgeChatClient {
    async fn send_message(&self, to: &str, text: &str) -> Result<(), ChatClientError> {
        let url = self.endpoint("send")?;

        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({"to": to, "text": text}))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ChatClientError::Status(status.as_u16()))
        }
    }

    async fn export_session(&self) -> Result<Option<Vec<u8>>, ChatClientError> {
        let url = self.endpoint("session")?;

        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();

        // 404/204: the client holds no session yet (pairing not completed).
        if status.as_u16() == 404 || status.as_u16() == 204 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ChatClientError::Status(status.as_u16()));
        }

        let blob = response.bytes().await.map_err(transport)?;
        Ok(Some(blob.to_vec()))
    }

    async fn import_session(&self, blob: &[u8]) -> Result<(), ChatClientError> {
        let url = self.endpoint("session")?;

        let response = self
            .http
            .put(url)
            .body(blob.to_vec())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ChatClientError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct SidecarState {
        session: Mutex<Option<Vec<u8>>>,
        sends: Mutex<Vec<(String, String)>>,
        fail_sends: bool,
    }

    /// Spawn a fake sidecar implementing the bridge API.
    async fn spawn_sidecar(state: Arc<SidecarState>) -> String {
        let app = Router::new()
            .route(
                "/send",
                post(
                    |State(state): State<Arc<SidecarState>>, Json(body): Json<serde_json::Value>| async move {
                        if state.fail_sends {
                            return axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                        }
                        state.sends.lock().unwrap().push((
                            body["to"].as_str().unwrap_or_default().to_string(),
                            body["text"].as_str().unwrap_or_default().to_string(),
                        ));
                        axum::http::StatusCode::OK
                    },
                ),
            )
            .route(
                "/session",
                get(|State(state): State<Arc<SidecarState>>| async move {
                    match state.session.lock().unwrap().clone() {
                        Some(blob) => (axum::http::StatusCode::OK, blob),
                        None => (axum::http::StatusCode::NOT_FOUND, Vec::new()),
                    }
                })
                .put(
                    |State(state): State<Arc<SidecarState>>, body: Bytes| async move {
                        *state.session.lock().unwrap() = Some(body.to_vec());
                        axum::http::StatusCode::NO_CONTENT
                    },
                ),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_send_message_posts_to_sidecar() {
        let state = Arc::new(SidecarState::default());
        let base = spawn_sidecar(state.clone()).await;
        let client = BridgeChatClient::new(reqwest::Client::new(), Some(base));

        client
            .send_message("56912345678@c.us", "hola")
            .await
            .unwrap();

        let sends = state.sends.lock().unwrap();
        assert_eq!(
            sends.as_slice(),
            &[("56912345678@c.us".to_string(), "hola".to_string())]
        );
    }

    #[tokio::test]
    async fn test_send_message_failure_surfaces_status() {
        let state = Arc::new(SidecarState {
            fail_sends: true,
            ..Default::default()
        });
        let base = spawn_sidecar(state).await;
        let client = BridgeChatClient::new(reqwest::Client::new(), Some(base));

        let result = client.send_message("123@c.us", "hola").await;
        assert!(matches!(result, Err(ChatClientError::Status(500))));
    }

    #[tokio::test]
    async fn test_export_session_unpaired_returns_none() {
        let state = Arc::new(SidecarState::default());
        let base = spawn_sidecar(state).await;
        let client = BridgeChatClient::new(reqwest::Client::new(), Some(base));

        assert_eq!(client.export_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_import_then_export_roundtrip() {
        let state = Arc::new(SidecarState::default());
        let base = spawn_sidecar(state).await;
        let client = BridgeChatClient::new(reqwest::Client::new(), Some(base));

        let blob: Vec<u8> = vec![0x00, 0xff, 0x42, 0x80];
        client.import_session(&blob).await.unwrap();

        assert_eq!(client.export_session().await.unwrap(), Some(blob));
    }

    #[tokio::test]
    async fn test_unconfigured_bridge_fails_per_call() {
        let client = BridgeChatClient::new(reqwest::Client::new(), None);

        assert!(matches!(
            client.send_message("123@c.us", "hi").await,
            Err(ChatClientError::NotConfigured)
        ));
        assert!(matches!(
            client.export_session().await,
            Err(ChatClientError::NotConfigured)
        ));
    }
}
