//! Feed transport implementations

use async_trait::async_trait;
use futures::StreamExt;
use shared::RealtimeEvent;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::FeedError;

/// The push channels the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedChannel {
    /// `/ws/stock`: `stock_update` events
    Stock,
    /// `/ws/ventas`: `new_sale` notices
    Ventas,
}

impl FeedChannel {
    pub fn path(&self) -> &'static str {
        match self {
            FeedChannel::Stock => "/ws/stock",
            FeedChannel::Ventas => "/ws/ventas",
        }
    }
}

/// Transport abstraction for push events
#[async_trait]
pub trait FeedTransport: Send + Sync + std::fmt::Debug {
    /// Next decoded event; `Err(Closed)` once the peer goes away
    async fn next_event(&self) -> Result<RealtimeEvent, FeedError>;
}

/// WebSocket transport
#[derive(Debug)]
pub struct WsFeed {
    stream: Arc<Mutex<WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>>>,
    channel: FeedChannel,
}

impl WsFeed {
    /// Connect to a push channel, carrying the JWT in the query string
    /// the way the server expects
    pub async fn connect(
        ws_base: &str,
        channel: FeedChannel,
        token: &str,
    ) -> Result<Self, FeedError> {
        let url = format!(
            "{}{}?token={}",
            ws_base.trim_end_matches('/'),
            channel.path(),
            token
        );

        // Never log `url`: the credential rides in the query string
        let (stream, _response) = connect_async(&url).await.map_err(|e| {
            FeedError::Connection(format!("Failed to connect to {}: {}", channel.path(), e))
        })?;

        tracing::info!(channel = channel.path(), "Connected to realtime feed");

        Ok(Self {
            stream: Arc::new(Mutex::new(stream)),
            channel,
        })
    }
}

#[async_trait]
impl FeedTransport for WsFeed {
    async fn next_event(&self) -> Result<RealtimeEvent, FeedError> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                None => return Err(FeedError::Closed),
                Some(Err(e)) => return Err(FeedError::Connection(e.to_string())),
                Some(Ok(Message::Text(text))) => match serde_json::from_str(&text) {
                    Ok(event) => return Ok(event),
                    Err(e) => {
                        // Forward-compat: skip payloads this build does not know
                        tracing::debug!(
                            channel = self.channel.path(),
                            error = %e,
                            "Ignoring unrecognized feed payload"
                        );
                    }
                },
                Some(Ok(Message::Close(_))) => return Err(FeedError::Closed),
                // Pings are answered by the library; nothing to surface
                Some(Ok(_)) => {}
            }
        }
    }
}

/// In-memory transport (in-process wiring and tests)
#[derive(Debug, Clone)]
pub struct MemoryFeed {
    rx: Arc<Mutex<broadcast::Receiver<RealtimeEvent>>>,
}

impl MemoryFeed {
    /// Subscribe to an in-process event source
    pub fn new(source: &broadcast::Sender<RealtimeEvent>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(source.subscribe())),
        }
    }
}

#[async_trait]
impl FeedTransport for MemoryFeed {
    async fn next_event(&self) -> Result<RealtimeEvent, FeedError> {
        let mut rx = self.rx.lock().await;
        match rx.recv().await {
            Ok(event) => Ok(event),
            Err(broadcast::error::RecvError::Closed) => Err(FeedError::Closed),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                Err(FeedError::Connection(format!("Feed lagged by {} events", n)))
            }
        }
    }
}
