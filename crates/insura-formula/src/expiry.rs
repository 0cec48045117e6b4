//! Expiration timestamps and USDT amount formatting

use crate::InsuranceFormula;
use insura_common::numeric::ensure_non_negative;
use insura_common::{FormulaError, FormulaResult, PeriodUnit};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

impl InsuranceFormula {
    /// Expiration timestamp (Unix milliseconds) `period` units from now
    pub fn expiration(&self, period: Decimal, period_unit: PeriodUnit) -> FormulaResult<i64> {
        self.expiration_at(chrono::Utc::now().timestamp_millis(), period, period_unit)
    }

    /// Expiration timestamp `period` units after `now_ms`.
    ///
    /// Fractional periods are truncated to whole periods.
    pub fn expiration_at(
        &self,
        now_ms: i64,
        period: Decimal,
        period_unit: PeriodUnit,
    ) -> FormulaResult<i64> {
        ensure_non_negative("period", period)?;

        let overflow = FormulaError::Overflow {
            operation: "expiration",
        };
        let periods = period.trunc().to_i64().ok_or_else(|| overflow.clone())?;

        periods
            .checked_mul(period_unit.millis())
            .and_then(|ms| now_ms.checked_add(ms))
            .ok_or(overflow)
    }

    /// Render `amount` with exactly `decimal_usdt` fraction digits.
    ///
    /// Midpoints round away from zero.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let dp = self.config.decimal_usdt;
        let mut rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormulaConfig;
    use insura_common::{DAY_MS, HOUR_MS};
    use rust_decimal_macros::dec;

    fn formula() -> InsuranceFormula {
        InsuranceFormula::default()
    }

    #[test]
    fn test_expiration_at_day_and_hour() {
        let f = formula();
        let now = 1_700_000_000_000;
        assert_eq!(f.expiration_at(now, dec!(4), PeriodUnit::Day).unwrap(), now + 4 * DAY_MS);
        assert_eq!(f.expiration_at(now, dec!(4), PeriodUnit::Hour).unwrap(), now + 4 * HOUR_MS);
        assert_eq!(f.expiration_at(now, Decimal::ZERO, PeriodUnit::Day).unwrap(), now);
    }

    #[test]
    fn test_expiration_truncates_fraction() {
        let f = formula();
        assert_eq!(f.expiration_at(0, dec!(1.9), PeriodUnit::Day).unwrap(), DAY_MS);
        assert_eq!(f.expiration_at(0, dec!(0.5), PeriodUnit::Hour).unwrap(), 0);
    }

    #[test]
    fn test_expiration_negative_period() {
        assert!(matches!(
            formula().expiration_at(0, dec!(-1), PeriodUnit::Day),
            Err(FormulaError::InvalidRange { field: "period", .. })
        ));
    }

    #[test]
    fn test_expiration_overflow() {
        assert!(matches!(
            formula().expiration_at(i64::MAX, dec!(1), PeriodUnit::Hour),
            Err(FormulaError::Overflow { .. })
        ));
    }

    #[test]
    fn test_expiration_from_clock() {
        let f = formula();
        let before = chrono::Utc::now().timestamp_millis();
        let expires = f.expiration(dec!(2), PeriodUnit::Hour).unwrap();
        let after = chrono::Utc::now().timestamp_millis();

        assert!(expires >= before + 2 * HOUR_MS);
        assert!(expires <= after + 2 * HOUR_MS);
    }

    #[test]
    fn test_format_amount() {
        let f = formula();
        assert_eq!(f.format_amount(dec!(1023.3393372000332)), "1023.34");
        assert_eq!(f.format_amount(dec!(0.125)), "0.13");
        assert_eq!(f.format_amount(dec!(-0.125)), "-0.13");
        assert_eq!(f.format_amount(dec!(7)), "7.00");
        assert_eq!(f.format_amount(dec!(12.3)), "12.30");
    }

    #[test]
    fn test_format_amount_preserves_rounded_values() {
        let f = formula();
        for amount in [dec!(0.00), dec!(19.99), dec!(1000000.05)] {
            let text = f.format_amount(amount);
            assert_eq!(text.parse::<Decimal>().unwrap(), amount);
        }
    }

    #[test]
    fn test_format_amount_custom_precision() {
        let config = FormulaConfig {
            decimal_usdt: 4,
            ..FormulaConfig::default()
        };
        let f = InsuranceFormula::new(config).unwrap();
        assert_eq!(f.format_amount(dec!(0.4258927705711511)), "0.4259");
    }
}
