//! Checkout: the sale API seam and payload construction
//!
//! The engine talks to the server through [`SaleApi`] so tests (and
//! demos) can script responses without a network. `ApiClient` is the
//! production implementation.

use async_trait::async_trait;
use shared::{Cliente, DetalleVentaCreate, Producto, Venta, VentaCreate};
use tpv_client::{ApiClient, ClientResult};

use crate::cart::Cart;
use crate::money::to_f64;

/// The slice of the server API the POS engine consumes
#[async_trait]
pub trait SaleApi: Send + Sync {
    async fn fetch_productos(&self) -> ClientResult<Vec<Producto>>;
    async fn fetch_clientes(&self) -> ClientResult<Vec<Cliente>>;
    async fn submit_venta(&self, venta: &VentaCreate) -> ClientResult<Venta>;
}

#[async_trait]
impl SaleApi for ApiClient {
    async fn fetch_productos(&self) -> ClientResult<Vec<Producto>> {
        self.list_productos().await
    }

    async fn fetch_clientes(&self) -> ClientResult<Vec<Cliente>> {
        self.list_clientes().await
    }

    async fn submit_venta(&self, venta: &VentaCreate) -> ClientResult<Venta> {
        self.create_venta(venta).await
    }
}

/// Build the sale submission payload from the cart
///
/// Each line goes out with its unit price and subtotal already net of
/// that line's own discount, alongside the raw percent; the global
/// percent travels once at the sale level. Both can never be non-zero
/// together, the cart guarantees it.
pub fn build_payload(cart: &Cart, cliente_id: i64, usuario_id: i64) -> VentaCreate {
    VentaCreate {
        cliente_id,
        usuario_id,
        descuento: cart.global_discount(),
        detalles: cart
            .lines()
            .iter()
            .map(|line| DetalleVentaCreate {
                producto_id: line.producto_id,
                cantidad: line.cantidad,
                precio_unitario: to_f64(line.precio_neto()),
                subtotal: to_f64(line.subtotal()),
                descuento_individual: line.descuento_individual,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{discount_factor, money_eq, to_decimal};

    fn producto(id: i64, precio_unitario: f64) -> Producto {
        Producto {
            id,
            nombre: format!("Producto {}", id),
            codigo: format!("P{:03}", id),
            codigo_barras: None,
            descripcion: String::new(),
            stock_actual: 100,
            stock_bajo: 5,
            precio_costo: precio_unitario / 2.0,
            margen: 100.0,
            precio_unitario,
            categoria_id: 1,
            activo: true,
            image_url: None,
        }
    }

    #[test]
    fn lines_go_out_net_of_their_own_discount() {
        let mut cart = Cart::new();
        cart.add_line(&producto(1, 10.0), 2);
        cart.set_line_discount(1, 25.0);

        let payload = build_payload(&cart, 3, 1);
        assert_eq!(payload.cliente_id, 3);
        assert_eq!(payload.usuario_id, 1);
        assert_eq!(payload.descuento, 0.0);

        let line = &payload.detalles[0];
        assert_eq!(line.producto_id, 1);
        assert_eq!(line.cantidad, 2);
        assert_eq!(line.precio_unitario, 7.5);
        assert_eq!(line.subtotal, 15.0);
        assert_eq!(line.descuento_individual, 25.0);
    }

    #[test]
    fn global_discount_travels_at_the_sale_level() {
        let mut cart = Cart::new();
        cart.add_line(&producto(1, 10.0), 2);
        cart.set_global_discount(10.0).unwrap();

        let payload = build_payload(&cart, 3, 1);
        assert_eq!(payload.descuento, 10.0);
        // Line amounts stay gross of the global percent
        assert_eq!(payload.detalles[0].subtotal, 20.0);
    }

    #[test]
    fn cart_total_matches_the_submitted_amounts() {
        let mut cart = Cart::new();
        cart.add_line(&producto(1, 3.33), 3);
        cart.add_line(&producto(2, 1.5), 2);
        cart.set_global_discount(15.0).unwrap();

        let payload = build_payload(&cart, 3, 1);
        let submitted: f64 = payload.detalles.iter().map(|d| d.subtotal).sum();
        let reconstructed = to_decimal(submitted) * discount_factor(payload.descuento);

        assert!(money_eq(to_f64(reconstructed), to_f64(cart.total())));
    }

    #[test]
    fn payload_never_mixes_the_two_discount_kinds() {
        let mut cart = Cart::new();
        cart.add_line(&producto(1, 10.0), 1);
        cart.set_global_discount(20.0).unwrap();
        cart.set_line_discount(1, 5.0);

        let payload = build_payload(&cart, 3, 1);
        assert_eq!(payload.descuento, 0.0);
        assert_eq!(payload.detalles[0].descuento_individual, 5.0);
    }
}
