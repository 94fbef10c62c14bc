//! Cliente model

use serde::{Deserialize, Serialize};

/// Cliente entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub documento: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_true() -> bool {
    true
}

/// Create cliente payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClienteCreate {
    pub nombre: String,
    pub documento: String,
    pub direccion: String,
    pub telefono: String,
}

/// Update cliente payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClienteUpdate {
    pub nombre: Option<String>,
    pub documento: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}
