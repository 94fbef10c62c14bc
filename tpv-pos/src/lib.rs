//! TPV Point-of-Sale Engine
//!
//! The cash-register core: catalog cache, cart with mutually exclusive
//! line/global discounts, the two-step scan confirmation protocol, and
//! the checkout orchestrator. All money math runs on `rust_decimal`;
//! `f64` appears only at the wire and display boundaries.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tpv_client::{ApiClient, ClientConfig};
//! use tpv_pos::PosSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8000").with_token("jwt");
//!     let api = ApiClient::new(&config);
//!
//!     let mut pos = PosSession::new(api, 1);
//!     pos.load_catalog().await?;
//!
//!     // First commit previews, identical second commit confirms
//!     pos.edit_input("2xABC123");
//!     pos.commit_input()?;
//!     pos.commit_input()?;
//!
//!     pos.select_customer(Some(1));
//!     let venta = pos.submit_sale().await?;
//!     println!("venta #{} por {:.2}", venta.id, venta.total);
//!     Ok(())
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod receipt;
pub mod scan;
pub mod session;

// Re-exports
pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use checkout::{SaleApi, build_payload};
pub use error::{CartError, CatalogError, CheckoutError, ScanError};
pub use receipt::{ReceiptData, ReceiptSink, TicketRenderer};
pub use scan::{PendingScan, ScanOutcome, ScannedInput, parse_scan};
pub use session::PosSession;
