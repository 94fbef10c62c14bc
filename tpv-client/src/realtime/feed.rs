//! Feed client with broadcast fan-out

use shared::RealtimeEvent;
use tokio::sync::broadcast;

use super::FeedError;
use super::transport::{FeedChannel, FeedTransport, WsFeed};

/// Realtime feed client
///
/// Owns a background read loop over one transport and fans its events
/// out on a broadcast channel, so several parts of the application can
/// observe the same push channel independently. The loop ends when the
/// transport closes or errors; callers reconnect by building a new
/// feed.
#[derive(Debug, Clone)]
pub struct EventFeed {
    event_tx: broadcast::Sender<RealtimeEvent>,
}

impl EventFeed {
    /// Start a feed over an already-connected transport
    pub fn start<T: FeedTransport + 'static>(transport: T) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let tx = event_tx.clone();

        tokio::spawn(async move {
            loop {
                match transport.next_event().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            tracing::debug!("No subscribers for feed event");
                        }
                    }
                    Err(FeedError::Closed) => {
                        tracing::info!("Realtime feed closed");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Realtime feed error: {}", e);
                        break;
                    }
                }
            }
        });

        Self { event_tx }
    }

    /// Connect the WebSocket transport for `channel` and start reading
    pub async fn connect(
        ws_base: &str,
        channel: FeedChannel,
        token: &str,
    ) -> Result<Self, FeedError> {
        let transport = WsFeed::connect(ws_base, channel, token).await?;
        Ok(Self::start(transport))
    }

    /// Subscribe to the fan-out
    ///
    /// Each receiver sees every event from its subscription onward.
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.event_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::MemoryFeed;

    #[tokio::test]
    async fn fans_out_to_multiple_subscribers() {
        let (tx, _) = broadcast::channel(16);
        let feed = EventFeed::start(MemoryFeed::new(&tx));

        let mut a = feed.subscribe();
        let mut b = feed.subscribe();

        tx.send(RealtimeEvent::StockUpdate {
            producto_id: 4,
            new_stock: 2,
        })
        .unwrap();

        let expected = RealtimeEvent::StockUpdate {
            producto_id: 4,
            new_stock: 2,
        };
        assert_eq!(a.recv().await.unwrap(), expected);
        assert_eq!(b.recv().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn loop_ends_quietly_when_source_closes() {
        let (tx, _) = broadcast::channel(16);
        let feed = EventFeed::start(MemoryFeed::new(&tx));
        let mut rx = feed.subscribe();

        tx.send(RealtimeEvent::NewSale).unwrap();
        assert_eq!(rx.recv().await.unwrap(), RealtimeEvent::NewSale);

        drop(tx);
        // Once the read loop exits it drops its sender; ours is the
        // only one left, so the subscription ends with Closed
        drop(feed);
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }
}
