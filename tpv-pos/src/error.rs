//! POS engine error types
//!
//! Scan and checkout errors carry operator-facing Spanish messages in
//! their `Display` impls; the screen shows them verbatim in the inline
//! message slot for the matching context.

use thiserror::Error;
use tpv_client::ClientError;

/// Errors from committing the scan input line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// Input is empty or does not match `<cantidad>x<codigo>` / `<codigo>`
    #[error("Formato inválido")]
    InvalidFormat,

    /// Explicit quantity prefix below 1, or unreadably large
    #[error("Cantidad mínima 1")]
    InvalidQuantity,

    /// No catalog product carries the scanned code
    #[error("No hallado código \"{0}\"")]
    ProductNotFound(String),

    /// Requested quantity exceeds the stock on hand
    #[error("Stock insuficiente de \"{nombre}\" (disponible: {disponible})")]
    InsufficientStock { nombre: String, disponible: i64 },
}

/// Errors from the checkout action
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// No customer selected for the sale
    #[error("Selecciona un cliente")]
    MissingCustomer,

    /// The cart has no lines
    #[error("Carrito vacío")]
    EmptyCart,

    /// The server rejected the sale; carries its detail text when it
    /// sent one, a generic message otherwise
    #[error("{0}")]
    SaleSubmissionFailed(String),

    /// A submission is already in flight
    #[error("Venta en curso")]
    Busy,
}

impl CheckoutError {
    /// Wrap a client error in the message the operator sees
    pub(crate) fn from_client(err: &ClientError) -> Self {
        let detail = match err.detail() {
            Some(detail) => detail.to_string(),
            None => "Error al crear venta".to_string(),
        };
        CheckoutError::SaleSubmissionFailed(detail)
    }
}

/// Errors from cart mutations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// A non-zero global discount cannot coexist with line discounts
    #[error("Hay descuentos por línea activos")]
    LineDiscountsActive,
}

/// Errors from the joint catalog load
///
/// Either failure leaves the session non-interactive; there is no
/// partial catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Error cargando productos")]
    Productos(#[source] ClientError),

    #[error("Error cargando clientes")]
    Clientes(#[source] ClientError),
}
