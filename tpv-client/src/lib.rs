//! TPV Client Library
//!
//! Network layer for the store server: typed REST endpoints over
//! reqwest, bearer-token session helpers, and the realtime WebSocket
//! feeds (stock updates, sale notices).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tpv_client::{ApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut api = ApiClient::new(&ClientConfig::new("http://localhost:8000"));
//!     let login = api.login("cajero", "secreto").await?;
//!     api.set_token(login.token);
//!
//!     let productos = api.list_productos().await?;
//!     println!("{} productos en catalogo", productos.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod realtime;
pub mod session;

// Re-exports
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, ImageUpload};
pub use realtime::{EventFeed, FeedChannel, FeedError, FeedTransport, MemoryFeed, WsFeed};
pub use session::user_id_from_token;

// Wire-type re-exports so callers rarely need `shared` directly
pub use shared::{LoginRequest, LoginResponse, RealtimeEvent};
