//! Session token helpers
//!
//! The server issues a JWT at login. Its payload carries the numeric
//! `id` claim that comes back to the server as `usuario_id` on sale
//! and gasto submissions. The client never verifies the signature
//! (that is the server's job); the payload is just base64url JSON.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Extract the numeric `id` claim from a JWT without verifying it
///
/// Returns `None` for anything that is not a three-part token with a
/// decodable JSON payload carrying a numeric `id`.
pub fn user_id_from_token(token: &str) -> Option<i64> {
    claim(token, "id")?.as_i64()
}

/// Extract the `exp` claim (Unix seconds), when present
pub fn token_expiry(token: &str) -> Option<u64> {
    claim(token, "exp")?.as_u64()
}

fn claim(token: &str, name: &str) -> Option<serde_json::Value> {
    // JWT shape: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    // Some encoders pad base64url segments; strip before decoding
    let segment = parts[1].trim_end_matches('=');
    let payload_bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    payload.get(name).cloned()
}
