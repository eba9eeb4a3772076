//! Application state wiring all components together.
//!
//! Core components are generic over the store/client/delivery traits, but
//! AppState pins them to the concrete infra implementations: SQLite store,
//! HTTP client bridge, reqwest webhook delivery.

use std::sync::Arc;
use std::time::Duration;

use waypost_core::event::{EventBus, EventDispatcher};
use waypost_core::relay::MessageRelay;
use waypost_core::session::SessionLifecycle;
use waypost_infra::client::BridgeChatClient;
use waypost_infra::sqlite::pool::DatabasePool;
use waypost_infra::sqlite::session::SqliteSessionStore;
use waypost_infra::webhook::HttpWebhookDelivery;
use waypost_types::config::RelayConfig;

/// Concrete type aliases for the component generics pinned to infra.
pub type ConcreteRelay = MessageRelay<HttpWebhookDelivery>;
pub type ConcreteLifecycle = SessionLifecycle<SqliteSessionStore, BridgeChatClient>;
pub type ConcreteDispatcher =
    EventDispatcher<SqliteSessionStore, BridgeChatClient, HttpWebhookDelivery>;

/// Capacity of the client event bus. Events are small and handled quickly;
/// sustained lag beyond this means the dispatcher is wedged, and dropping
/// (with a logged lag warning) beats unbounded growth.
const EVENT_BUS_CAPACITY: usize = 256;

/// Shared application state holding all wired components.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<BridgeChatClient>,
    pub relay: Arc<ConcreteRelay>,
    pub lifecycle: Arc<ConcreteLifecycle>,
    pub events: EventBus,
    pub db_pool: DatabasePool,
    pub config: RelayConfig,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire
    /// components.
    pub async fn init(config: RelayConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;
        let store = Arc::new(SqliteSessionStore::new(db_pool.clone()));

        // One shared outbound HTTP client; the per-call timeout bounds both
        // webhook deliveries and client bridge calls.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let client = Arc::new(BridgeChatClient::new(http.clone(), config.client_url.clone()));
        let relay = Arc::new(MessageRelay::new(HttpWebhookDelivery::new(
            http,
            config.webhook_url.clone(),
        )));
        let lifecycle = Arc::new(SessionLifecycle::new(
            store,
            client.clone(),
            config.session_id.clone(),
            Duration::from_secs(config.backup_interval_secs),
        ));

        Ok(Self {
            client,
            relay,
            lifecycle,
            events: EventBus::new(EVENT_BUS_CAPACITY),
            db_pool,
            config,
        })
    }

    /// Build the event dispatcher over this state's lifecycle and relay.
    pub fn dispatcher(&self) -> ConcreteDispatcher {
        EventDispatcher::new(self.lifecycle.clone(), self.relay.clone())
    }
}
