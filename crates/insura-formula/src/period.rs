//! Period and cumulative-average analysis
//!
//! The ratio-change and average lists are historical series indexed by
//! period count. Both are expected to be non-decreasing; that is a
//! precondition of the lookups here and is not checked. Scans never look
//! past `max_period` entries.

use crate::InsuranceFormula;
use insura_common::numeric::{add, ensure_non_negative, mul, settle, sub};
use insura_common::{ClaimPriceBounds, FormulaError, FormulaResult, Side, CONSTANT_CLAIM};
use rust_decimal::Decimal;

impl InsuranceFormula {
    fn scan_limit(&self, len: usize) -> usize {
        len.min(self.config.max_period as usize)
    }

    /// Longest period whose ratio change best matches `hedge`.
    ///
    /// Walks the series while the previous entry is still below `hedge`,
    /// keeping whichever of the previous/current period sits closer to it.
    /// Inputs shorter than two entries yield `1`.
    pub fn max_period(&self, hedge: Decimal, list_ratio_change: &[Decimal]) -> usize {
        let mut max_period_user = 1;

        for i in 1..self.scan_limit(list_ratio_change.len()) {
            let previous = list_ratio_change[i - 1];
            if hedge <= previous {
                break;
            }

            let diff_previous = (previous - hedge).abs();
            let diff_current = (list_ratio_change[i] - hedge).abs();
            max_period_user = if diff_previous < diff_current { i } else { i + 1 };
        }

        max_period_user
    }

    /// Last cumulative average at or below [`CONSTANT_CLAIM`].
    ///
    /// Starts from zero; the first entry is never inspected on its own.
    pub fn min_avg(&self, list_avg: &[Decimal]) -> Decimal {
        let mut min_avg = Decimal::ZERO;

        for i in 1..self.scan_limit(list_avg.len()) {
            if list_avg[i] > CONSTANT_CLAIM {
                min_avg = list_avg[i - 1];
                break;
            }
            min_avg = list_avg[i];
        }

        min_avg
    }

    /// Allowed claim-price range around the market price
    pub fn claim_price_bounds(
        &self,
        p_market: Decimal,
        current_avg: Decimal,
        list_avg: &[Decimal],
        side: Side,
    ) -> FormulaResult<ClaimPriceBounds> {
        ensure_non_negative("p_market", p_market)?;

        let min_avg = self.min_avg(list_avg);
        let scaled = |avg: Decimal| -> FormulaResult<Decimal> {
            let factor = match side {
                Side::Bear => sub(CONSTANT_CLAIM, avg, "claim_price_bounds")?,
                Side::Bull => add(CONSTANT_CLAIM, avg, "claim_price_bounds")?,
            };
            settle(mul(factor, p_market, "claim_price_bounds")?)
        };

        let bounds = match side {
            Side::Bear => ClaimPriceBounds {
                claim_price_max: scaled(current_avg)?,
                claim_price_min: scaled(min_avg)?,
            },
            Side::Bull => ClaimPriceBounds {
                claim_price_min: scaled(current_avg)?,
                claim_price_max: scaled(min_avg)?,
            },
        };

        Ok(bounds)
    }

    /// Reject periods outside `[min_period, max_period]`
    pub fn check_period(&self, period: u32) -> FormulaResult<u32> {
        if period < self.config.min_period || period > self.config.max_period {
            return Err(FormulaError::out_of_range(
                "period",
                format!(
                    "{} (allowed {}..={})",
                    period, self.config.min_period, self.config.max_period
                ),
            ));
        }
        Ok(period)
    }
}
