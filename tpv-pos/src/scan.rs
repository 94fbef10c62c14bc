//! Scan input parsing and confirmation protocol types
//!
//! Input comes from a keyboard-wedge scanner or manual typing as one
//! line of text: an optional `<cantidad>` prefix separated by `x`, `X`
//! or `*`, then the product code (`"3xABC123"`, `"ABC123"`). A first
//! commit only produces a [`PendingScan`]; the cart mutates when the
//! identical text is committed again, which absorbs scanner bounce and
//! one-shot misreads.

use shared::Producto;

use crate::error::ScanError;

/// Parsed scan text: quantity prefix (1 when omitted) and product code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedInput {
    pub cantidad: i64,
    pub codigo: String,
}

/// Unconfirmed scan, held between the first commit and its confirming
/// repeat
///
/// `raw_text` keeps the committed text verbatim; only an exactly equal
/// recommit confirms. The product is snapshotted so a confirm can
/// still resolve it if the catalog reloads underneath.
#[derive(Debug, Clone)]
pub struct PendingScan {
    pub producto: Producto,
    pub cantidad: i64,
    pub raw_text: String,
}

/// What a successful input commit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// First commit: the scan now awaits an identical repeat
    Pending {
        nombre: String,
        cantidad: i64,
        /// Advisory: confirming would leave the product at or below
        /// its reorder level
        low_stock: bool,
    },
    /// Confirming commit: the quantity was merged into the cart
    Added {
        producto_id: i64,
        cantidad: i64,
        low_stock: bool,
    },
}

/// Parse one line of scanner text
///
/// A digits-only input is a code, not a quantity ("12345" scans the
/// product with that code). A prefix with nothing after the separator
/// falls back to being a code too, matching how operators type.
pub fn parse_scan(text: &str) -> Result<ScannedInput, ScanError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ScanError::InvalidFormat);
    }

    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty()
        && let Some(rest) = text[digits.len()..].strip_prefix(['x', 'X', '*'])
    {
        let codigo = rest.trim();
        if !codigo.is_empty() {
            // An explicit prefix must be a usable quantity; "0x..." is
            // an operator error, not a code
            let cantidad: i64 = digits.parse().map_err(|_| ScanError::InvalidQuantity)?;
            if cantidad < 1 {
                return Err(ScanError::InvalidQuantity);
            }
            return Ok(ScannedInput {
                cantidad,
                codigo: codigo.to_string(),
            });
        }
    }

    Ok(ScannedInput {
        cantidad: 1,
        codigo: text.to_string(),
    })
}

/// Validate a requested quantity against current stock, counting units
/// already in the cart
///
/// Blocks entirely rather than clamping. On success returns the
/// low-stock advisory flag: whether confirming would leave
/// `stock_actual` at or below `stock_bajo`.
pub fn check_stock(producto: &Producto, cantidad: i64, in_cart: i64) -> Result<bool, ScanError> {
    // The parser accepts any i64 prefix; saturate so an absurd
    // quantity reads as over-stock instead of wrapping negative
    let requested = cantidad.saturating_add(in_cart);
    if requested > producto.stock_actual {
        return Err(ScanError::InsufficientStock {
            nombre: producto.nombre.clone(),
            disponible: producto.stock_actual.saturating_sub(in_cart),
        });
    }
    Ok(producto.stock_actual - requested <= producto.stock_bajo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> ScannedInput {
        parse_scan(text).unwrap()
    }

    #[test]
    fn code_without_prefix_defaults_to_one() {
        assert_eq!(
            parsed("ABC123"),
            ScannedInput {
                cantidad: 1,
                codigo: "ABC123".to_string()
            }
        );
    }

    #[test]
    fn prefix_sets_the_quantity() {
        assert_eq!(parsed("3xABC123").cantidad, 3);
        assert_eq!(parsed("3xABC123").codigo, "ABC123");
        assert_eq!(parsed("12XDEF").cantidad, 12);
        assert_eq!(parsed("2*GHI").cantidad, 2);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(parsed("  ABC123  ").codigo, "ABC123");
        assert_eq!(parsed("3x ABC123").codigo, "ABC123");
    }

    #[test]
    fn digits_only_input_is_a_code() {
        let input = parsed("7790001000017");
        assert_eq!(input.cantidad, 1);
        assert_eq!(input.codigo, "7790001000017");
    }

    #[test]
    fn prefix_without_code_falls_back_to_a_code() {
        // "3x" alone is a plausible product code, not a dangling prefix
        let input = parsed("3x");
        assert_eq!(input.cantidad, 1);
        assert_eq!(input.codigo, "3x");
    }

    #[test]
    fn separator_must_follow_the_digits() {
        let input = parsed("x3xABC");
        assert_eq!(input.cantidad, 1);
        assert_eq!(input.codigo, "x3xABC");
    }

    #[test]
    fn blank_input_is_invalid() {
        assert_eq!(parse_scan(""), Err(ScanError::InvalidFormat));
        assert_eq!(parse_scan("   "), Err(ScanError::InvalidFormat));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert_eq!(parse_scan("0xABC"), Err(ScanError::InvalidQuantity));
    }

    #[test]
    fn absurd_quantity_is_rejected() {
        assert_eq!(
            parse_scan("99999999999999999999xABC"),
            Err(ScanError::InvalidQuantity)
        );
    }

    fn producto(stock_actual: i64, stock_bajo: i64) -> Producto {
        Producto {
            id: 1,
            nombre: "Arroz 1kg".to_string(),
            codigo: "ARZ001".to_string(),
            codigo_barras: None,
            descripcion: String::new(),
            stock_actual,
            stock_bajo,
            precio_costo: 1.1,
            margen: 36.0,
            precio_unitario: 1.5,
            categoria_id: 1,
            activo: true,
            image_url: None,
        }
    }

    #[test]
    fn stock_check_blocks_over_requests() {
        let p = producto(5, 1);
        assert_eq!(
            check_stock(&p, 10, 0),
            Err(ScanError::InsufficientStock {
                nombre: "Arroz 1kg".to_string(),
                disponible: 5,
            })
        );
    }

    #[test]
    fn stock_check_counts_carted_units() {
        let p = producto(5, 1);
        assert!(check_stock(&p, 2, 3).is_ok());
        assert_eq!(
            check_stock(&p, 3, 3),
            Err(ScanError::InsufficientStock {
                nombre: "Arroz 1kg".to_string(),
                disponible: 2,
            })
        );
    }

    #[test]
    fn overflow_sized_request_reads_as_over_stock() {
        // i64::MAX passes the parser; summed with carted units it must
        // fail the stock guard, not wrap negative past it
        let p = producto(5, 1);
        assert_eq!(
            check_stock(&p, i64::MAX, 1),
            Err(ScanError::InsufficientStock {
                nombre: "Arroz 1kg".to_string(),
                disponible: 4,
            })
        );
    }

    #[test]
    fn low_stock_advisory_uses_post_sale_level() {
        let p = producto(5, 1);
        assert_eq!(check_stock(&p, 3, 0), Ok(false)); // leaves 2
        assert_eq!(check_stock(&p, 4, 0), Ok(true)); // leaves 1
        assert_eq!(check_stock(&p, 5, 0), Ok(true)); // leaves 0
    }
}
