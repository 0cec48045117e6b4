//! Claim and quote records
//!
//! A hedge-insurance contract is priced from:
//! - margin: collateral posted by the user
//! - p_open / p_claim: opening price and target claim price
//! - day_change_token: day-over-day volatility of the token
//!
//! and yields stop price, leverage, claim settlement, refund price and the
//! futures quantity needed to hedge the system's exposure.

use crate::types::period::PeriodUnit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs shared by claim settlement and hedge quantity calculations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// User collateral
    pub margin: Decimal,

    /// Opening price
    pub p_open: Decimal,

    /// Target claim price
    pub p_claim: Decimal,

    /// Hedge ratio (margin / covered quantity)
    pub hedge: Decimal,

    /// Day-over-day token change ratio
    pub day_change_token: Decimal,

    /// Selects the claim-ratio table
    pub period_unit: PeriodUnit,
}

impl ClaimRequest {
    pub fn new(
        margin: Decimal,
        p_open: Decimal,
        p_claim: Decimal,
        hedge: Decimal,
        day_change_token: Decimal,
    ) -> Self {
        Self {
            margin,
            p_open,
            p_claim,
            hedge,
            day_change_token,
            period_unit: PeriodUnit::default(),
        }
    }

    /// Set period unit
    pub fn with_period_unit(mut self, period_unit: PeriodUnit) -> Self {
        self.period_unit = period_unit;
        self
    }

    /// Set margin
    pub fn with_margin(mut self, margin: Decimal) -> Self {
        self.margin = margin;
        self
    }

    /// Whether the claim target sits above the opening price
    pub fn is_bull(&self) -> bool {
        self.p_claim > self.p_open
    }
}

/// Allowed claim-price range for a new contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimPriceBounds {
    pub claim_price_min: Decimal,
    pub claim_price_max: Decimal,
}

/// Request for a full insurance quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub margin: Decimal,

    /// Quantity of token covered; hedge = margin / q_covered
    pub q_covered: Decimal,

    pub p_open: Decimal,
    pub p_claim: Decimal,
    pub day_change_token: Decimal,

    /// Number of periods the contract runs
    pub period: u32,
    pub period_unit: PeriodUnit,
}

/// Fully priced insurance contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceQuote {
    /// Unique quote ID
    pub quote_id: uuid::Uuid,

    pub hedge: Decimal,
    pub p_stop: Decimal,
    pub leverage: u64,

    /// Amount paid to the user if the claim price is reached
    pub q_claim: Decimal,

    /// `q_claim` rendered at the USDT display precision
    pub q_claim_display: String,

    /// Early-exit price
    pub p_refund: Decimal,

    /// Order size on the futures venue
    pub future_quantity: Decimal,

    pub period: u32,
    pub period_unit: PeriodUnit,

    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: i64,

    /// Calculation timestamp (Unix milliseconds)
    pub computed_at: i64,
}

impl InsuranceQuote {
    /// Check if the contract period has elapsed at `now_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    /// Settlement gain over the posted margin, if any
    pub fn payout_multiple(&self, margin: Decimal) -> Option<Decimal> {
        if margin > Decimal::ZERO {
            self.q_claim.checked_div(margin)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_claim_request_builder() {
        let req = ClaimRequest::new(dec!(500), dec!(6.561), dec!(6.182), dec!(0.05), dec!(0.0572))
            .with_period_unit(PeriodUnit::Hour);
        assert_eq!(req.period_unit, PeriodUnit::Hour);
        assert!(!req.is_bull());

        let bigger = req.clone().with_margin(dec!(600));
        assert_eq!(bigger.margin, dec!(600));
        assert_eq!(bigger.p_open, req.p_open);
    }

    #[test]
    fn test_quote_expiry_and_multiple() {
        let quote = InsuranceQuote {
            quote_id: uuid::Uuid::nil(),
            hedge: dec!(0.05),
            p_stop: dec!(7.20244),
            leverage: 10,
            q_claim: dec!(1000),
            q_claim_display: "1000.00".to_string(),
            p_refund: dec!(6.2),
            future_quantity: dec!(1726),
            period: 1,
            period_unit: PeriodUnit::Day,
            expires_at: 1_000,
            computed_at: 0,
        };
        assert!(!quote.is_expired_at(999));
        assert!(quote.is_expired_at(1_000));
        assert_eq!(quote.payout_multiple(dec!(500)), Some(dec!(2)));
        assert_eq!(quote.payout_multiple(Decimal::ZERO), None);
    }
}
