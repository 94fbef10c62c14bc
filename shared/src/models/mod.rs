//! Data models
//!
//! One file per server entity, each with its Create/Update payloads
//! where the API accepts writes. All IDs are `i64`. Timestamps stay
//! `String` (ISO 8601 as the server sends them); the client never
//! does arithmetic on them.

pub mod categoria;
pub mod cliente;
pub mod devolucion;
pub mod gasto;
pub mod producto;
pub mod usuario;
pub mod venta;

// Re-exports
pub use categoria::*;
pub use cliente::*;
pub use devolucion::*;
pub use gasto::*;
pub use producto::*;
pub use usuario::*;
pub use venta::*;
