//! Usuario model

use serde::{Deserialize, Serialize};

/// Usuario entity
///
/// The engine only ever needs `id` (it becomes `usuario_id` on sale
/// and gasto submissions); the rest is display data for the back
/// office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_true() -> bool {
    true
}
