//! POS session state holder
//!
//! One `PosSession` per POS screen. It owns the catalog snapshot, the
//! cart, the scan confirmation state and the per-context error slots,
//! and exposes them behind sequential `&mut self` transitions, so the
//! protocol ordering (a commit always resolves the previous pending
//! scan before acting) falls out of the borrow rules rather than a
//! lock. The two suspension points are the catalog load and the sale
//! submission.

use chrono::Utc;
use shared::Venta;
use tpv_client::RealtimeEvent;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::{SaleApi, build_payload};
use crate::error::{CartError, CatalogError, CheckoutError, ScanError};
use crate::money::to_f64;
use crate::receipt::{ReceiptData, ReceiptSink};
use crate::scan::{PendingScan, ScanOutcome, check_stock, parse_scan};

/// State holder for one point-of-sale screen
pub struct PosSession<A: SaleApi> {
    api: A,
    usuario_id: i64,
    catalog: Catalog,
    cart: Cart,
    cliente_id: Option<i64>,
    input: String,
    pending: Option<PendingScan>,
    scan_error: Option<ScanError>,
    checkout_error: Option<CheckoutError>,
    busy: bool,
    loaded: bool,
    receipt_sink: Option<Box<dyn ReceiptSink>>,
}

impl<A: SaleApi> PosSession<A> {
    /// Create a session for the cashier identified by `usuario_id`
    /// (the JWT `id` claim)
    pub fn new(api: A, usuario_id: i64) -> Self {
        Self {
            api,
            usuario_id,
            catalog: Catalog::default(),
            cart: Cart::new(),
            cliente_id: None,
            input: String::new(),
            pending: None,
            scan_error: None,
            checkout_error: None,
            busy: false,
            loaded: false,
            receipt_sink: None,
        }
    }

    /// Plug in a receipt receiver (builder style)
    pub fn with_receipt_sink(mut self, sink: Box<dyn ReceiptSink>) -> Self {
        self.receipt_sink = Some(sink);
        self
    }

    /// Load products and customers together
    ///
    /// Both fetches run concurrently and both must succeed; there is no
    /// partial catalog. A failed call leaves the previous snapshot (if
    /// any) in place, and the same method serves as the manual retry.
    pub async fn load_catalog(&mut self) -> Result<(), CatalogError> {
        let api = &self.api;
        let (productos, clientes) = tokio::try_join!(
            async { api.fetch_productos().await.map_err(CatalogError::Productos) },
            async { api.fetch_clientes().await.map_err(CatalogError::Clientes) },
        )?;

        tracing::info!(
            productos = productos.len(),
            clientes = clientes.len(),
            "Catalog loaded"
        );
        self.catalog = Catalog::new(productos, clientes);
        self.loaded = true;
        Ok(())
    }

    /// Whether the catalog load has succeeded at least once
    pub fn is_ready(&self) -> bool {
        self.loaded
    }

    /// Non-commit edit of the scan buffer
    ///
    /// Typing invalidates a stale confirmation: any pending scan and
    /// displayed scan error are dropped.
    pub fn edit_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.pending = None;
        self.scan_error = None;
    }

    /// Commit the scan buffer (the Enter keystroke)
    ///
    /// With a pending scan and identical text, this is the
    /// confirmation; any other text supersedes the pending scan and is
    /// parsed fresh. Errors land in the scan error slot as well as the
    /// return value.
    pub fn commit_input(&mut self) -> Result<ScanOutcome, ScanError> {
        let text = self.input.trim().to_string();
        self.scan_error = None;

        if let Some(pending) = self.pending.take() {
            if text == pending.raw_text {
                return self.confirm_pending(pending);
            }
            // Differing text: the old pending is discarded (take() did
            // it) and the new text starts its own cycle
        }

        match self.start_pending(text) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.scan_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn start_pending(&mut self, text: String) -> Result<ScanOutcome, ScanError> {
        let parsed = parse_scan(&text)?;
        let producto = self
            .catalog
            .producto_by_codigo(&parsed.codigo)
            .ok_or_else(|| ScanError::ProductNotFound(parsed.codigo.clone()))?;
        let in_cart = self.cart.quantity_of(producto.id);
        let low_stock = check_stock(producto, parsed.cantidad, in_cart)?;

        let outcome = ScanOutcome::Pending {
            nombre: producto.nombre.clone(),
            cantidad: parsed.cantidad,
            low_stock,
        };
        self.pending = Some(PendingScan {
            producto: producto.clone(),
            cantidad: parsed.cantidad,
            raw_text: text,
        });
        Ok(outcome)
    }

    fn confirm_pending(&mut self, pending: PendingScan) -> Result<ScanOutcome, ScanError> {
        // Stock may have moved since the first commit; re-check against
        // the live catalog entry, falling back to the snapshot if the
        // product vanished in a reload
        let producto = self
            .catalog
            .producto_by_id(pending.producto.id)
            .unwrap_or(&pending.producto);
        let in_cart = self.cart.quantity_of(producto.id);

        match check_stock(producto, pending.cantidad, in_cart) {
            Ok(low_stock) => {
                self.cart.add_line(producto, pending.cantidad);
                let outcome = ScanOutcome::Added {
                    producto_id: producto.id,
                    cantidad: pending.cantidad,
                    low_stock,
                };
                self.input.clear();
                Ok(outcome)
            }
            Err(err) => {
                // The pending scan stays discarded; the operator keeps
                // the text and the error and decides what is next
                self.scan_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Select (or clear) the customer for the next sale
    pub fn select_customer(&mut self, cliente_id: Option<i64>) {
        self.cliente_id = cliente_id;
    }

    /// Submit the sale
    ///
    /// Preconditions run in order: not already submitting, customer
    /// selected, cart non-empty; none of them touches the network. On
    /// success the receipt snapshot goes to the sink and the whole
    /// session resets; on failure everything is preserved for a retry.
    pub async fn submit_sale(&mut self) -> Result<Venta, CheckoutError> {
        if self.busy {
            // Double-trigger while in flight; the slot keeps whatever
            // the in-flight attempt will write
            return Err(CheckoutError::Busy);
        }
        let Some(cliente_id) = self.cliente_id else {
            let err = CheckoutError::MissingCustomer;
            self.checkout_error = Some(err.clone());
            return Err(err);
        };
        if self.cart.is_empty() {
            let err = CheckoutError::EmptyCart;
            self.checkout_error = Some(err.clone());
            return Err(err);
        }
        self.checkout_error = None;

        let payload = build_payload(&self.cart, cliente_id, self.usuario_id);
        self.busy = true;
        let result = self.api.submit_venta(&payload).await;
        self.busy = false;

        match result {
            Ok(venta) => {
                tracing::info!(venta_id = venta.id, total = venta.total, "Venta recorded");
                self.emit_receipt(cliente_id);
                self.reset_after_sale();
                Ok(venta)
            }
            Err(client_err) => {
                tracing::warn!(error = %client_err, "Venta submission failed");
                let err = CheckoutError::from_client(&client_err);
                self.checkout_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Hand the pre-reset sale snapshot to the receipt sink, if any
    fn emit_receipt(&mut self, cliente_id: i64) {
        let Some(sink) = self.receipt_sink.as_mut() else {
            return;
        };
        let receipt = ReceiptData {
            lines: self.cart.lines().to_vec(),
            cliente: self.catalog.cliente_by_id(cliente_id).cloned(),
            fecha: Utc::now(),
            total: to_f64(self.cart.total()),
        };
        sink.emit(&receipt);
    }

    fn reset_after_sale(&mut self) {
        self.cart.clear();
        self.cliente_id = None;
        self.input.clear();
        self.pending = None;
        self.scan_error = None;
        self.checkout_error = None;
    }

    /// Apply a realtime event
    ///
    /// Stock updates move the catalog only; `NewSale` notices are for
    /// list screens and mean nothing to a live cart.
    pub fn apply_event(&mut self, event: &RealtimeEvent) {
        if let RealtimeEvent::StockUpdate {
            producto_id,
            new_stock,
        } = event
        {
            self.catalog.apply_stock_update(*producto_id, *new_stock);
        }
    }

    // Cart edits pass through so the screen has one mutation surface

    pub fn set_quantity(&mut self, producto_id: i64, cantidad: i64) {
        self.cart.set_quantity(producto_id, cantidad);
    }

    pub fn set_line_discount(&mut self, producto_id: i64, pct: f64) {
        self.cart.set_line_discount(producto_id, pct);
    }

    pub fn set_global_discount(&mut self, pct: f64) -> Result<(), CartError> {
        self.cart.set_global_discount(pct)
    }

    pub fn remove_line(&mut self, producto_id: i64) {
        self.cart.remove_line(producto_id);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cliente_id(&self) -> Option<i64> {
        self.cliente_id
    }

    pub fn usuario_id(&self) -> i64 {
        self.usuario_id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending(&self) -> Option<&PendingScan> {
        self.pending.as_ref()
    }

    pub fn scan_error(&self) -> Option<&ScanError> {
        self.scan_error.as_ref()
    }

    pub fn checkout_error(&self) -> Option<&CheckoutError> {
        self.checkout_error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}
