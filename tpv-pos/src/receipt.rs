//! Sale ticket rendering
//!
//! After a successful checkout the session hands a [`ReceiptData`]
//! snapshot to whatever [`ReceiptSink`] the application plugged in.
//! The engine never awaits or inspects the outcome; printing failures
//! are the surrounding app's problem, not a reason to undo a recorded
//! sale.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::Cliente;

use crate::cart::CartLine;
use crate::money::{to_decimal, to_f64};

/// Snapshot of a completed sale, captured before the session resets
#[derive(Debug, Clone)]
pub struct ReceiptData {
    pub lines: Vec<CartLine>,
    pub cliente: Option<Cliente>,
    pub fecha: DateTime<Utc>,
    /// Final amount, net of every discount
    pub total: f64,
}

/// Receiver for finished sale receipts
pub trait ReceiptSink: Send {
    fn emit(&mut self, receipt: &ReceiptData);
}

/// Plain-text ticket renderer
///
/// Fixed-width layout for thermal printers: centered header, customer
/// and date, one name row plus one amount row per line, TOTAL at the
/// right edge.
pub struct TicketRenderer {
    width: usize,
}

impl TicketRenderer {
    /// Create a renderer for the given character width
    ///
    /// Common widths: 32 for 58mm paper, 48 for 80mm.
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render a receipt to ticket text
    pub fn render(&self, receipt: &ReceiptData) -> String {
        let mut out = String::new();
        self.render_header(&mut out, receipt);
        for line in &receipt.lines {
            self.render_line(&mut out, line);
        }
        self.render_footer(&mut out, receipt);
        out
    }

    fn render_header(&self, out: &mut String, receipt: &ReceiptData) {
        out.push_str(&self.center("NOX"));
        out.push_str(&self.center("¡Gracias por tu compra!"));
        out.push('\n');

        // Walk-in sales print without a registered customer
        let cliente = receipt
            .cliente
            .as_ref()
            .map_or("Final", |c| c.nombre.as_str());
        out.push_str(&format!("Cliente: {}\n", cliente));
        out.push_str(&format!(
            "Fecha: {}\n",
            receipt.fecha.format("%d/%m/%Y %H:%M")
        ));
        out.push_str(&self.sep());
    }

    fn render_line(&self, out: &mut String, line: &CartLine) {
        out.push_str(&self.fit(&line.nombre));
        // The printed line total comes from the rounded net price, so
        // the row is the product of the two figures the customer sees
        let net = to_f64(line.precio_neto());
        let amount = to_f64(to_decimal(net) * Decimal::from(line.cantidad));
        out.push_str(&self.line_lr(
            &format!("  {}x ${:.2}", line.cantidad, net),
            &format!("${:.2}", amount),
        ));
    }

    fn render_footer(&self, out: &mut String, receipt: &ReceiptData) {
        out.push_str(&self.sep());
        out.push_str(&self.line_lr("", &format!("TOTAL: ${:.2}", receipt.total)));
        out.push('\n');
        out.push_str(&self.center("Powered by App NOX"));
    }

    fn center(&self, text: &str) -> String {
        let pad = self.width.saturating_sub(text.chars().count()) / 2;
        format!("{}{}\n", " ".repeat(pad), text)
    }

    fn line_lr(&self, left: &str, right: &str) -> String {
        let used = left.chars().count() + right.chars().count();
        let pad = self.width.saturating_sub(used).max(1);
        format!("{}{}{}\n", left, " ".repeat(pad), right)
    }

    /// One row, truncated with an ellipsis when the name overflows
    fn fit(&self, text: &str) -> String {
        if text.chars().count() <= self.width {
            return format!("{}\n", text);
        }
        let cut: String = text.chars().take(self.width.saturating_sub(1)).collect();
        format!("{}…\n", cut)
    }

    fn sep(&self) -> String {
        format!("{}\n", "-".repeat(self.width))
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn receipt() -> ReceiptData {
        ReceiptData {
            lines: vec![
                CartLine {
                    producto_id: 1,
                    nombre: "Agua Mineral 500ml".to_string(),
                    precio_unitario: 0.95,
                    cantidad: 2,
                    descuento_individual: 0.0,
                },
                CartLine {
                    producto_id: 2,
                    nombre: "Arroz 1kg".to_string(),
                    precio_unitario: 1.50,
                    cantidad: 1,
                    descuento_individual: 20.0,
                },
            ],
            cliente: None,
            fecha: Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0).unwrap(),
            total: 3.10,
        }
    }

    #[test]
    fn renders_the_full_ticket_shape() {
        let text = TicketRenderer::default().render(&receipt());

        assert!(text.contains("NOX"));
        assert!(text.contains("¡Gracias por tu compra!"));
        assert!(text.contains("Cliente: Final"));
        assert!(text.contains("Fecha: 14/03/2025 18:30"));
        assert!(text.contains("Agua Mineral 500ml"));
        assert!(text.contains("2x $0.95"));
        assert!(text.contains("$1.90"));
        assert!(text.contains("TOTAL: $3.10"));
        assert!(text.contains("Powered by App NOX"));
    }

    #[test]
    fn line_amounts_are_net_of_the_line_discount() {
        let text = TicketRenderer::default().render(&receipt());
        // 1.50 at 20% off
        assert!(text.contains("1x $1.20"));
    }

    #[test]
    fn registered_customer_prints_by_name() {
        let mut data = receipt();
        data.cliente = Some(Cliente {
            id: 7,
            nombre: "María".to_string(),
            documento: String::new(),
            direccion: String::new(),
            telefono: String::new(),
            activo: true,
        });
        let text = TicketRenderer::default().render(&data);
        assert!(text.contains("Cliente: María"));
    }

    #[test]
    fn rows_respect_the_ticket_width() {
        let renderer = TicketRenderer::new(32);
        let text = renderer.render(&receipt());
        for row in text.lines() {
            assert!(row.chars().count() <= 32, "row too wide: {row:?}");
        }
    }

    #[test]
    fn long_names_are_cut_with_an_ellipsis() {
        let mut data = receipt();
        data.lines[0].nombre = "Detergente líquido concentrado aroma lavanda 3L".to_string();
        let text = TicketRenderer::new(32).render(&data);
        assert!(text.contains('…'));
    }
}
