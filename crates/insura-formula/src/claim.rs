//! Claim settlement, refund price and hedge sizing
//!
//! Settlement and futures quantity share the same exposure chain:
//! stop price → leverage → system risk → system capital. Settlement then
//! applies the profit haircuts; quantity converts the hedged capital into
//! an order size on the futures venue.

use crate::InsuranceFormula;
use insura_common::numeric::{
    add, div, ensure_non_negative, ensure_positive, mul, relative_distance, settle, sub,
};
use insura_common::{ClaimRatioRow, ClaimRequest, FormulaResult, PeriodUnit};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

/// Intermediate figures shared by settlement and quantity
#[derive(Debug, Clone, Copy)]
struct Exposure {
    p_stop: Decimal,
    leverage: u64,
    system_risk: Decimal,
    system_capital: Decimal,
}

impl InsuranceFormula {
    /// `a / b`, typically margin over covered quantity
    pub fn hedge_ratio(&self, a: Decimal, b: Decimal) -> FormulaResult<Decimal> {
        ensure_non_negative("hedge_numerator", a)?;
        ensure_non_negative("hedge_denominator", b)?;
        settle(div(a, b, "hedge_ratio")?)
    }

    /// Claim-ratio row nearest to `hedge` in the table for `period_unit`
    pub fn claim_ratio_row(
        &self,
        period_unit: PeriodUnit,
        hedge: Decimal,
    ) -> FormulaResult<&ClaimRatioRow> {
        let row = self.config.claim_tables.for_unit(period_unit).nearest(hedge)?;
        trace!(%period_unit, %hedge, row_hedge = %row.hedge, x = %row.x, "Claim-ratio row selected");
        Ok(row)
    }

    fn exposure(&self, request: &ClaimRequest) -> FormulaResult<Exposure> {
        ensure_non_negative("margin", request.margin)?;

        let p_stop = self.stop_price(request.p_open, request.p_claim)?;
        let leverage = self.leverage(request.p_open, p_stop)?;
        let system_risk = self.system_risk(request.day_change_token, request.p_open, p_stop)?;
        let system_capital = self.system_capital(request.margin, system_risk)?;

        Ok(Exposure {
            p_stop,
            leverage,
            system_risk,
            system_capital,
        })
    }

    /// Amount owed to the user when the claim price is reached
    #[instrument(skip(self))]
    pub fn claim_settlement(&self, request: &ClaimRequest) -> FormulaResult<Decimal> {
        ensure_non_negative("hedge", request.hedge)?;

        let exposure = self.exposure(request)?;
        let ratio_predict = relative_distance(request.p_claim, request.p_open, "claim_settlement")?;
        let hedge_capital = settle(add(request.margin, exposure.system_capital, "claim_settlement")?)?;
        let profit = settle(mul(
            mul(ratio_predict, hedge_capital, "claim_settlement")?,
            Decimal::from(exposure.leverage),
            "claim_settlement",
        )?)?;

        let row = self.claim_ratio_row(request.period_unit, request.hedge)?;
        let haircut = sub(Decimal::ONE, self.config.diff_claim, "claim_settlement")?;
        let discount = sub(Decimal::ONE, row.x, "claim_settlement")?;

        let discounted = mul(
            mul(profit, haircut, "claim_settlement")?,
            discount,
            "claim_settlement",
        )?;
        let q_claim = settle(add(discounted, request.margin, "claim_settlement")?)?;

        debug!(
            p_stop = %exposure.p_stop,
            leverage = exposure.leverage,
            system_risk = %exposure.system_risk,
            system_capital = %exposure.system_capital,
            %profit,
            x = %row.x,
            %q_claim,
            "Claim settlement calculated"
        );

        Ok(q_claim)
    }

    /// Early-exit price, skewed toward the predicted direction
    pub fn refund_price(&self, p_open: Decimal, p_claim: Decimal) -> FormulaResult<Decimal> {
        ensure_positive("p_open", p_open)?;
        ensure_non_negative("p_claim", p_claim)?;

        let factor = if p_claim > p_open {
            add(Decimal::ONE, self.config.refund_ratio, "refund_price")?
        } else {
            sub(Decimal::ONE, self.config.refund_ratio, "refund_price")?
        };

        settle(mul(p_open, settle(factor)?, "refund_price")?)
    }

    /// Futures order quantity hedging the system's exposure
    #[instrument(skip(self))]
    pub fn future_quantity(&self, request: &ClaimRequest) -> FormulaResult<Decimal> {
        let exposure = self.exposure(request)?;
        let hedge_capital = add(request.margin, exposure.system_capital, "future_quantity")?;
        let notional = mul(hedge_capital, Decimal::from(exposure.leverage), "future_quantity")?;
        let quantity = settle(div(notional, request.p_open, "future_quantity")?)?;

        debug!(
            p_stop = %exposure.p_stop,
            leverage = exposure.leverage,
            %hedge_capital,
            %quantity,
            "Future quantity calculated"
        );

        Ok(quantity)
    }
}
