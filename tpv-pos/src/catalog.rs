//! Session-local catalog snapshot
//!
//! Products and customers are loaded together before the POS screen
//! becomes interactive and stay read-only for the session, except for
//! stock counts, which the realtime feed may move underneath us.

use shared::{Cliente, Producto};

/// In-memory snapshot of products and customers for one POS session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    productos: Vec<Producto>,
    clientes: Vec<Cliente>,
}

impl Catalog {
    pub fn new(productos: Vec<Producto>, clientes: Vec<Cliente>) -> Self {
        Self {
            productos,
            clientes,
        }
    }

    /// Look up a product by its scan code (exact match)
    pub fn producto_by_codigo(&self, codigo: &str) -> Option<&Producto> {
        self.productos.iter().find(|p| p.codigo == codigo)
    }

    pub fn producto_by_id(&self, id: i64) -> Option<&Producto> {
        self.productos.iter().find(|p| p.id == id)
    }

    pub fn cliente_by_id(&self, id: i64) -> Option<&Cliente> {
        self.clientes.iter().find(|c| c.id == id)
    }

    pub fn productos(&self) -> &[Producto] {
        &self.productos
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    /// Apply an external stock change by product id
    ///
    /// Only the catalog entry moves: cart lines and a pending scan keep
    /// the values they captured. Unknown ids are skipped; the feed may
    /// outrun a stale snapshot.
    pub fn apply_stock_update(&mut self, producto_id: i64, new_stock: i64) -> bool {
        match self.productos.iter_mut().find(|p| p.id == producto_id) {
            Some(producto) => {
                tracing::debug!(
                    producto_id,
                    old_stock = producto.stock_actual,
                    new_stock,
                    "Applying stock update"
                );
                producto.stock_actual = new_stock;
                true
            }
            None => {
                tracing::debug!(producto_id, "Stock update for unknown producto, skipping");
                false
            }
        }
    }

    /// Products at or below their reorder level
    pub fn low_stock(&self) -> impl Iterator<Item = &Producto> {
        self.productos.iter().filter(|p| p.stock_es_bajo())
    }
}
