//! Login wire types
//!
//! The token returned here is a JWT consumed verbatim as the bearer
//! credential; the client decodes its payload for the `id` claim but
//! never verifies the signature (that is the server's job).

use serde::{Deserialize, Serialize};

/// POST /login body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
