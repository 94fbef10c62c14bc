//! Categoria model

use serde::{Deserialize, Serialize};

/// Categoria entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Categoria {
    pub id: i64,
    pub nombre: String,
}

/// Create categoria payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriaCreate {
    pub nombre: String,
}

/// Update categoria payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriaUpdate {
    pub nombre: Option<String>,
}
