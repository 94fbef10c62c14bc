//! Venta model
//!
//! `VentaCreate` is the checkout payload. Line prices and subtotals
//! are net of that line's own discount; `descuento` at the sale level
//! is the global percentage. The two discount kinds never combine
//! (the engine enforces this before the payload is ever built).

use serde::{Deserialize, Serialize};

/// Venta entity as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venta {
    pub id: i64,
    pub cliente_id: i64,
    pub usuario_id: i64,
    /// ISO 8601, assigned server-side
    pub fecha: String,
    /// Global discount percent applied to the whole sale
    pub descuento: f64,
    pub total: f64,
    #[serde(default)]
    pub total_sin_descuento: f64,
}

/// One sale line as stored server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetalleVenta {
    pub producto_id: i64,
    pub cantidad: i64,
    /// Unit price net of the line's own discount
    pub precio_unitario: f64,
    /// cantidad * precio_unitario, also net
    pub subtotal: f64,
    #[serde(default)]
    pub descuento_individual: f64,
}

/// Create venta payload (checkout submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentaCreate {
    pub cliente_id: i64,
    pub usuario_id: i64,
    pub descuento: f64,
    pub detalles: Vec<DetalleVentaCreate>,
}

/// One line of a venta submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetalleVentaCreate {
    pub producto_id: i64,
    pub cantidad: i64,
    pub precio_unitario: f64,
    pub subtotal: f64,
    pub descuento_individual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_field_names() {
        let payload = VentaCreate {
            cliente_id: 3,
            usuario_id: 1,
            descuento: 10.0,
            detalles: vec![DetalleVentaCreate {
                producto_id: 7,
                cantidad: 2,
                precio_unitario: 1.5,
                subtotal: 3.0,
                descuento_individual: 0.0,
            }],
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["cliente_id"], 3);
        assert_eq!(v["descuento"], 10.0);
        assert_eq!(v["detalles"][0]["producto_id"], 7);
        assert_eq!(v["detalles"][0]["descuento_individual"], 0.0);
    }
}
