//! Cart model
//!
//! An ordered line collection plus one cart-wide discount percent.
//! Line discounts and the global discount are mutually exclusive: a
//! line discount above zero forces the global discount back to zero,
//! and a non-zero global discount is rejected while any line discount
//! is active. The invariant lives here, not in the screen.

use rust_decimal::Decimal;
use shared::Producto;

use crate::error::CartError;
use crate::money::{clamp_percent, discount_factor, to_decimal};

/// One product line in the cart
///
/// `nombre` and `precio_unitario` are captured from the catalog when
/// the line is created and stay fixed for the life of the line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub producto_id: i64,
    pub nombre: String,
    pub precio_unitario: f64,
    pub cantidad: i64,
    pub descuento_individual: f64,
}

impl CartLine {
    /// Unit price net of this line's discount, unrounded
    pub fn precio_neto(&self) -> Decimal {
        to_decimal(self.precio_unitario) * discount_factor(self.descuento_individual)
    }

    /// `precio_unitario * cantidad * (1 - descuento_individual/100)`, unrounded
    pub fn subtotal(&self) -> Decimal {
        self.precio_neto() * Decimal::from(self.cantidad)
    }
}

/// The in-progress sale: cart lines in insertion order plus the global
/// discount percent
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    global_discount: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add quantity for a product, merging into the existing line when
    /// one is already present
    ///
    /// New lines start without a discount, and a merge saturates
    /// rather than wrapping. No stock bound here; the scan protocol
    /// enforces it before calling.
    pub fn add_line(&mut self, producto: &Producto, cantidad: i64) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.producto_id == producto.id)
        {
            line.cantidad = line.cantidad.saturating_add(cantidad);
            return;
        }
        self.lines.push(CartLine {
            producto_id: producto.id,
            nombre: producto.nombre.clone(),
            precio_unitario: producto.precio_unitario,
            cantidad,
            descuento_individual: 0.0,
        });
    }

    /// Set a line's quantity, clamped to a minimum of 1
    ///
    /// Missing lines are ignored.
    pub fn set_quantity(&mut self, producto_id: i64, cantidad: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.producto_id == producto_id) {
            line.cantidad = cantidad.max(1);
        }
    }

    /// Set a line's discount percent, clamped to [0, 100]
    ///
    /// A resulting value above zero resets the global discount. Missing
    /// lines are ignored and leave the global discount untouched.
    pub fn set_line_discount(&mut self, producto_id: i64, pct: f64) {
        let Some(line) = self.lines.iter_mut().find(|l| l.producto_id == producto_id) else {
            return;
        };
        let pct = clamp_percent(pct);
        line.descuento_individual = pct;
        if pct > 0.0 {
            self.global_discount = 0.0;
        }
    }

    /// Set the cart-wide discount percent, clamped to [0, 100]
    ///
    /// Rejected while any line discount is active; resetting to zero is
    /// always allowed.
    pub fn set_global_discount(&mut self, pct: f64) -> Result<(), CartError> {
        let pct = clamp_percent(pct);
        if pct > 0.0 && self.has_line_discounts() {
            return Err(CartError::LineDiscountsActive);
        }
        self.global_discount = pct;
        Ok(())
    }

    /// Remove a line; removing an absent line is a no-op
    pub fn remove_line(&mut self, producto_id: i64) {
        self.lines.retain(|l| l.producto_id != producto_id);
    }

    /// Drop every line and reset the global discount
    pub fn clear(&mut self) {
        self.lines.clear();
        self.global_discount = 0.0;
    }

    /// Quantity already carted for a product, 0 when absent
    pub fn quantity_of(&self, producto_id: i64) -> i64 {
        self.lines
            .iter()
            .find(|l| l.producto_id == producto_id)
            .map_or(0, |l| l.cantidad)
    }

    pub fn has_line_discounts(&self) -> bool {
        self.lines.iter().any(|l| l.descuento_individual > 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn global_discount(&self) -> f64 {
        self.global_discount
    }

    /// Sum of line subtotals, unrounded
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// `subtotal * (1 - global_discount/100)`, unrounded
    pub fn total(&self) -> Decimal {
        self.subtotal() * discount_factor(self.global_discount)
    }
}
