//! # Insura Common
//!
//! Shared types, errors, and decimal helpers for the Insura formula engine.
//!
//! ## Core Types
//!
//! - [`PeriodUnit`]/[`Side`]: contract period unit and price direction
//! - [`ClaimRatioTable`]: hedge ratio to claim discount lookup
//! - [`ClaimRequest`]: inputs of claim settlement and hedge sizing
//! - [`InsuranceQuote`]: fully priced contract
//!
//! ## Numerics
//!
//! - [`numeric`]: checked decimal ops, 20-place division and double-precision settling

pub mod error;
pub mod numeric;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{FormulaError, FormulaResult, InsuraError, Result};
pub use types::{
    claim_table::{ClaimRatioRow, ClaimRatioTable, ClaimTables},
    period::{PeriodUnit, Side, DAY_MS, HOUR_MS},
    quote::{ClaimPriceBounds, ClaimRequest, InsuranceQuote, QuoteRequest},
};

/// Insura version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Normalization constant used as the crossing threshold in average lookups
pub const CONSTANT_CLAIM: rust_decimal::Decimal = rust_decimal::Decimal::ONE;

/// Maximum decimal places representable by the decimal type
pub const MAX_DECIMAL_SCALE: u32 = 28;
