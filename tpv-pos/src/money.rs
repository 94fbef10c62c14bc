//! Money arithmetic using rust_decimal for precision
//!
//! Prices travel the wire as `f64`; every cart computation runs on
//! `Decimal` and converts back only at presentation and payload
//! boundaries, so per-line rounding never compounds across a sale.

use rust_decimal::prelude::*;

/// Rounding target for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert a wire `f64` to `Decimal` for calculation
///
/// If NaN/Infinity reaches here, logs an error and returns ZERO to
/// avoid silent corruption in sale totals.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert a `Decimal` back to `f64`, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Clamp a discount percent to [0, 100]
///
/// NaN is treated as zero, the same fallback [`to_decimal`] applies.
pub fn clamp_percent(pct: f64) -> f64 {
    if pct.is_nan() {
        tracing::error!(value = ?pct, "Non-finite discount percent, defaulting to zero");
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Multiplier left over after a percent discount: `1 - pct/100`
///
/// Expects an already-clamped percent, so the factor stays in [0, 1].
#[inline]
pub fn discount_factor(pct: f64) -> Decimal {
    Decimal::ONE - to_decimal(pct) / Decimal::ONE_HUNDRED
}

/// Retail price derived from cost and margin percent, rounded to money
/// precision: `precio_costo * (1 + margen/100)`
pub fn price_from_cost(precio_costo: f64, margen: f64) -> f64 {
    let price =
        to_decimal(precio_costo) * (Decimal::ONE + to_decimal(margen) / Decimal::ONE_HUNDRED);
    to_f64(price.max(Decimal::ZERO))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
