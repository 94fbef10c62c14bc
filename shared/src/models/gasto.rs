//! Gasto model

use serde::{Deserialize, Serialize};

/// Gasto entity (an expense booked against a user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gasto {
    pub id: i64,
    pub monto: f64,
    pub descripcion: String,
    pub usuario_id: i64,
    /// ISO 8601, assigned server-side
    pub fecha: String,
}

/// Create gasto payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GastoCreate {
    pub monto: f64,
    pub descripcion: String,
    pub usuario_id: i64,
}

/// Update gasto payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GastoUpdate {
    pub monto: Option<f64>,
    pub descripcion: Option<String>,
}
