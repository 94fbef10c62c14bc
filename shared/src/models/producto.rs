//! Producto model

use serde::{Deserialize, Serialize};

/// Producto entity
///
/// `codigo` is the scan key and is unique within a catalog snapshot.
/// `codigo_barras` is the printed barcode, optional and informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub codigo: String,
    #[serde(default)]
    pub codigo_barras: Option<String>,
    #[serde(default)]
    pub descripcion: String,
    pub stock_actual: i64,
    pub stock_bajo: i64,
    pub precio_costo: f64,
    pub margen: f64,
    pub precio_unitario: f64,
    pub categoria_id: i64,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Producto {
    /// Whether current stock has fallen to or below the reorder level
    pub fn stock_es_bajo(&self) -> bool {
        self.stock_actual <= self.stock_bajo
    }
}

fn default_true() -> bool {
    true
}

/// Fields for creating or replacing a producto
///
/// Sent as multipart form data (the image travels as a separate file
/// part), so this is a plain struct the client flattens field by field
/// rather than a JSON body.
#[derive(Debug, Clone)]
pub struct ProductoForm {
    pub nombre: String,
    pub codigo: String,
    pub descripcion: String,
    pub stock_actual: i64,
    pub stock_bajo: i64,
    pub precio_costo: f64,
    pub margen: f64,
    pub precio_unitario: f64,
    pub categoria_id: i64,
    pub activo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_shape() {
        let json = r#"{
            "id": 7,
            "nombre": "Arroz 1kg",
            "codigo": "ARZ001",
            "codigo_barras": "7790001000017",
            "descripcion": "Arroz largo fino",
            "stock_actual": 24,
            "stock_bajo": 5,
            "precio_costo": 1.10,
            "margen": 36.0,
            "precio_unitario": 1.50,
            "categoria_id": 2,
            "activo": true,
            "image_url": null
        }"#;
        let p: Producto = serde_json::from_str(json).unwrap();
        assert_eq!(p.codigo, "ARZ001");
        assert_eq!(p.stock_actual, 24);
        assert!(!p.stock_es_bajo());
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        // Older server builds omit barcode, description and image
        let json = r#"{
            "id": 1,
            "nombre": "Suelto",
            "codigo": "S1",
            "stock_actual": 3,
            "stock_bajo": 5,
            "precio_costo": 0.5,
            "margen": 100.0,
            "precio_unitario": 1.0,
            "categoria_id": 1
        }"#;
        let p: Producto = serde_json::from_str(json).unwrap();
        assert!(p.activo);
        assert!(p.codigo_barras.is_none());
        assert!(p.stock_es_bajo());
    }
}
