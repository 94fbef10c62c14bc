//! Devolucion model

use serde::{Deserialize, Serialize};

/// Devolucion entity (a return against a recorded sale)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Devolucion {
    pub id: i64,
    pub venta_id: i64,
    /// ISO 8601, assigned server-side
    pub fecha: String,
    #[serde(default)]
    pub detalles: Vec<DevolucionDetalle>,
}

/// One returned line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevolucionDetalle {
    pub id: i64,
    pub producto_id: i64,
    pub cantidad: i64,
}

/// Create devolucion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevolucionCreate {
    pub venta_id: i64,
    pub items: Vec<DevolucionItem>,
}

/// One item of a devolucion submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevolucionItem {
    pub producto_id: i64,
    pub cantidad: i64,
}
