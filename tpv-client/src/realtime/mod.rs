//! Realtime push feeds
//!
//! The server pushes two WebSocket channels: `/ws/stock` (external
//! stock changes) and `/ws/ventas` (sale notices). This module keeps
//! the transport swappable: a WebSocket implementation for production
//! and an in-memory one for tests, with [`EventFeed`] fanning either
//! out to any number of subscribers.

mod feed;
mod transport;

pub use feed::EventFeed;
pub use transport::{FeedChannel, FeedTransport, MemoryFeed, WsFeed};

use thiserror::Error;

/// Feed error type
#[derive(Debug, Error)]
pub enum FeedError {
    /// Could not connect, or the connection broke mid-stream
    #[error("Connection error: {0}")]
    Connection(String),

    /// The peer closed the channel
    #[error("Feed closed")]
    Closed,
}
