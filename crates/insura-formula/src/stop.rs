//! Protective stop price and leverage cap

use crate::InsuranceFormula;
use insura_common::numeric::{
    add, div, ensure_non_negative, ensure_positive, mul, relative_distance, settle, sub,
};
use insura_common::{FormulaError, FormulaResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Stop step for targets within 5% of the open price
pub const STEP_NEAR: Decimal = dec!(0.02);

/// Stop step of the middle band
pub const STEP_MID: Decimal = dec!(0.05);

/// Stop step for targets further away
pub const STEP_FAR: Decimal = dec!(0.04);

impl InsuranceFormula {
    /// Stop-distance step for a given profit ratio.
    ///
    /// The middle band (`<= 0.01` and `> 0.05`) can never match. Kept as
    /// deployed.
    pub fn diff_stop(ratio_profit: Decimal) -> Decimal {
        if ratio_profit <= dec!(0.05) {
            return STEP_NEAR;
        }
        if ratio_profit <= dec!(0.01) && ratio_profit > dec!(0.05) {
            return STEP_MID;
        }
        STEP_FAR
    }

    /// Protective stop on the opposite side of `p_open` from the claim target
    pub fn stop_price(&self, p_open: Decimal, p_claim: Decimal) -> FormulaResult<Decimal> {
        ensure_positive("p_open", p_open)?;
        ensure_non_negative("p_claim", p_claim)?;

        let ratio_profit = relative_distance(p_claim, p_open, "stop_price")?;
        let step = Self::diff_stop(ratio_profit);
        let offset = mul(p_open, add(ratio_profit, step, "stop_price")?, "stop_price")?;

        let p_stop = if p_claim > p_open {
            sub(p_open, offset, "stop_price")?
        } else {
            add(p_open, offset, "stop_price")?
        };

        // A bull target more than ~96% above open pushes the stop below zero
        if p_stop.is_sign_negative() && !p_stop.is_zero() {
            return Err(FormulaError::out_of_range("p_stop", p_stop));
        }

        settle(p_stop)
    }

    /// `floor(p_open / |p_open − p_stop|)`
    pub fn leverage(&self, p_open: Decimal, p_stop: Decimal) -> FormulaResult<u64> {
        ensure_positive("p_open", p_open)?;
        ensure_non_negative("p_stop", p_stop)?;

        let distance = sub(p_open, p_stop, "leverage")?.abs();
        if distance.is_zero() {
            return Err(FormulaError::degenerate("leverage", "p_stop equals p_open"));
        }

        div(p_open, distance, "leverage")?
            .floor()
            .to_u64()
            .ok_or(FormulaError::Overflow {
                operation: "leverage",
            })
    }
}
