//! Full contract quote
//!
//! Runs the same sequence the pricing service performs for a new contract:
//! hedge ratio, stop, leverage, settlement, refund, futures quantity and
//! expiration, stamped with a time-ordered quote ID.

use crate::InsuranceFormula;
use insura_common::{ClaimRequest, FormulaResult, InsuranceQuote, QuoteRequest};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

impl InsuranceFormula {
    /// Price a new insurance contract
    #[instrument(skip(self))]
    pub fn quote(&self, request: &QuoteRequest) -> FormulaResult<InsuranceQuote> {
        self.quote_at(chrono::Utc::now().timestamp_millis(), request)
    }

    /// Price a new insurance contract as of `now_ms`
    pub fn quote_at(&self, now_ms: i64, request: &QuoteRequest) -> FormulaResult<InsuranceQuote> {
        let period = self.check_period(request.period)?;
        let hedge = self.hedge_ratio(request.margin, request.q_covered)?;

        let claim = ClaimRequest::new(
            request.margin,
            request.p_open,
            request.p_claim,
            hedge,
            request.day_change_token,
        )
        .with_period_unit(request.period_unit);

        let p_stop = self.stop_price(request.p_open, request.p_claim)?;
        let leverage = self.leverage(request.p_open, p_stop)?;
        let q_claim = self.claim_settlement(&claim)?;
        let p_refund = self.refund_price(request.p_open, request.p_claim)?;
        let future_quantity = self.future_quantity(&claim)?;
        let expires_at = self.expiration_at(now_ms, Decimal::from(period), request.period_unit)?;

        let quote = InsuranceQuote {
            quote_id: uuid::Uuid::now_v7(),
            hedge,
            p_stop,
            leverage,
            q_claim,
            q_claim_display: self.format_amount(q_claim),
            p_refund,
            future_quantity,
            period,
            period_unit: request.period_unit,
            expires_at,
            computed_at: now_ms,
        };

        debug!(quote_id = %quote.quote_id, q_claim = %quote.q_claim, "Quote computed");
        Ok(quote)
    }
}
