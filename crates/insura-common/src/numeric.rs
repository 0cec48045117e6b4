//! Decimal arithmetic helpers
//!
//! All formula math runs on [`Decimal`]. Two rules keep results identical to
//! the figures published by the pricing service:
//!
//! - Quotients are rounded to [`DIVISION_SCALE`] decimal places, half away
//!   from zero.
//! - Values handed from one formula step to the next are settled to double
//!   precision with [`settle`]: snapped onto the nearest IEEE-754 double and
//!   re-read from its shortest round-trip rendering. Only the representation
//!   is borrowed from `f64`; no arithmetic happens in binary floating point.

use crate::error::{FormulaError, FormulaResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on every division
pub const DIVISION_SCALE: u32 = 20;

/// Divide, rounding the quotient to [`DIVISION_SCALE`] places.
///
/// A zero divisor is a [`FormulaError::DegenerateInput`] for `operation`.
pub fn div(numerator: Decimal, divisor: Decimal, operation: &'static str) -> FormulaResult<Decimal> {
    if divisor.is_zero() {
        return Err(FormulaError::degenerate(operation, "division by zero"));
    }
    numerator
        .checked_div(divisor)
        .map(|q| q.round_dp_with_strategy(DIVISION_SCALE, RoundingStrategy::MidpointAwayFromZero))
        .ok_or(FormulaError::Overflow { operation })
}

/// Checked multiplication
pub fn mul(lhs: Decimal, rhs: Decimal, operation: &'static str) -> FormulaResult<Decimal> {
    lhs.checked_mul(rhs).ok_or(FormulaError::Overflow { operation })
}

/// Checked addition
pub fn add(lhs: Decimal, rhs: Decimal, operation: &'static str) -> FormulaResult<Decimal> {
    lhs.checked_add(rhs).ok_or(FormulaError::Overflow { operation })
}

/// Checked subtraction
pub fn sub(lhs: Decimal, rhs: Decimal, operation: &'static str) -> FormulaResult<Decimal> {
    lhs.checked_sub(rhs).ok_or(FormulaError::Overflow { operation })
}

/// `|a - b| / b`, settled. The fractional distance of `a` from `b`.
pub fn relative_distance(a: Decimal, b: Decimal, operation: &'static str) -> FormulaResult<Decimal> {
    settle(div(sub(a, b, operation)?.abs(), b, operation)?)
}

/// Settle a value to double precision.
///
/// Both conversions go through text: Rust's float parser is correctly
/// rounded and `f64`'s `Display` emits the shortest string that round-trips.
pub fn settle(value: Decimal) -> FormulaResult<Decimal> {
    let double: f64 = value
        .to_string()
        .parse()
        .map_err(|_| FormulaError::Overflow { operation: "settle" })?;
    if !double.is_finite() {
        return Err(FormulaError::Overflow { operation: "settle" });
    }
    double
        .to_string()
        .parse::<Decimal>()
        .map_err(|_| FormulaError::Overflow { operation: "settle" })
}

/// Reject negative values
pub fn ensure_non_negative(field: &'static str, value: Decimal) -> FormulaResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FormulaError::out_of_range(field, value));
    }
    Ok(value)
}

/// Reject negative values (range) and zero (degenerate divisor)
pub fn ensure_positive(field: &'static str, value: Decimal) -> FormulaResult<Decimal> {
    ensure_non_negative(field, value)?;
    if value.is_zero() {
        return Err(FormulaError::degenerate(field, "must be greater than zero"));
    }
    Ok(value)
}
