//! Shared wire types for the TPV client
//!
//! Entity and payload structs exchanged with the store server. Field
//! names mirror the server's JSON exactly (Spanish), so no serde
//! renames are needed. Money travels as plain JSON numbers (`f64`);
//! precise arithmetic happens in the engine crate, not here.

pub mod auth;
pub mod events;
pub mod models;

// Re-exports
pub use auth::{LoginRequest, LoginResponse};
pub use events::RealtimeEvent;
pub use models::*;
pub use serde::{Deserialize, Serialize};
