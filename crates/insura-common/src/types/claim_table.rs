//! Claim-ratio tables
//!
//! One table per [`PeriodUnit`]. Each row maps a hedge ratio to the discount
//! `x` applied to claim profit. Lookups pick the row whose hedge is closest
//! to the requested one; on a tie the earliest row wins.

use crate::error::{FormulaError, FormulaResult};
use crate::types::period::PeriodUnit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Single `(hedge, x)` row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRatioRow {
    /// Hedge ratio this row applies to
    pub hedge: Decimal,
    /// Profit discount ratio
    pub x: Decimal,
}

impl ClaimRatioRow {
    pub const fn new(hedge: Decimal, x: Decimal) -> Self {
        Self { hedge, x }
    }
}

/// Ordered claim-ratio table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimRatioTable {
    rows: Vec<ClaimRatioRow>,
}

impl ClaimRatioTable {
    pub fn new(rows: Vec<ClaimRatioRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ClaimRatioRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Row with the hedge closest to `hedge`.
    ///
    /// Strict less-than while folding keeps the first row among equals.
    pub fn nearest(&self, hedge: Decimal) -> FormulaResult<&ClaimRatioRow> {
        let mut rows = self.rows.iter();
        let first = rows
            .next()
            .ok_or_else(|| FormulaError::degenerate("claim_ratio_row", "claim-ratio table is empty"))?;

        Ok(rows.fold(first, |best, row| {
            if (row.hedge - hedge).abs() < (best.hedge - hedge).abs() {
                row
            } else {
                best
            }
        }))
    }
}

impl From<Vec<ClaimRatioRow>> for ClaimRatioTable {
    fn from(rows: Vec<ClaimRatioRow>) -> Self {
        Self::new(rows)
    }
}

/// Claim-ratio tables for both period units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTables {
    pub hour: ClaimRatioTable,
    pub day: ClaimRatioTable,
}

impl ClaimTables {
    pub fn for_unit(&self, unit: PeriodUnit) -> &ClaimRatioTable {
        match unit {
            PeriodUnit::Hour => &self.hour,
            PeriodUnit::Day => &self.day,
        }
    }
}
