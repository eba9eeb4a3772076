use serde::{Deserialize, Serialize};

use crate::message::InboundMessage;

/// Events emitted by the external chat client.
///
/// The client's callback-per-event surface is modeled as one closed enum so
/// every variant is dispatched through a single typed match. Events are
/// delivered sequentially, one at a time; no ordering is assumed beyond that.
///
/// Serialized with an internal `event` tag, which is also the wire format the
/// client bridge posts to `/client-event`:
/// `{"event": "message", "from": "...", "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A pairing code was generated; a human operator must scan it.
    Qr { code: String },
    /// The authentication handshake completed.
    Authenticated,
    /// The client is connected and ready to send/receive.
    Ready,
    /// The client reported an authentication breakdown.
    AuthFailure { reason: String },
    /// An inbound chat message arrived.
    Message(InboundMessage),
    /// The client lost its session.
    Disconnected { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_event_wire_format() {
        let event = ClientEvent::Message(InboundMessage {
            from: "56912345678@c.us".to_string(),
            text: "hi".to_string(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "message",
                "from": "56912345678@c.us",
                "text": "hi"
            })
        );
    }

    #[test]
    fn test_unit_variants_round_trip() {
        for event in [ClientEvent::Authenticated, ClientEvent::Ready] {
            let json = serde_json::to_string(&event).unwrap();
            let back: ClientEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }

    #[test]
    fn test_qr_event_round_trip() {
        let event = ClientEvent::Qr {
            code: "2@abcdef".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"qr""#));
        let back: ClientEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_auth_failure_from_wire() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"event":"auth_failure","reason":"token expired"}"#).unwrap();
        assert_eq!(
            event,
            ClientEvent::AuthFailure {
                reason: "token expired".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_event_rejected() {
        let result = serde_json::from_str::<ClientEvent>(r#"{"event":"reboot"}"#);
        assert!(result.is_err());
    }
}
