//! System risk and system capital
//!
//! ```text
//! risk    = day_change_token / (|p_stop − p_open| / p_open)
//! capital = margin × rc / risk              if risk > rc
//!         = margin + (rc − risk) × margin   otherwise
//! ```

use crate::InsuranceFormula;
use insura_common::numeric::{
    add, div, ensure_non_negative, ensure_positive, mul, relative_distance, settle, sub,
};
use insura_common::{FormulaError, FormulaResult};
use rust_decimal::Decimal;

impl InsuranceFormula {
    /// Token volatility relative to the open/stop distance.
    ///
    /// `p_stop == p_open` leaves no distance to divide by and is rejected.
    pub fn system_risk(
        &self,
        day_change_token: Decimal,
        p_open: Decimal,
        p_stop: Decimal,
    ) -> FormulaResult<Decimal> {
        ensure_non_negative("day_change_token", day_change_token)?;
        ensure_positive("p_open", p_open)?;
        ensure_non_negative("p_stop", p_stop)?;

        let expired = relative_distance(p_stop, p_open, "system_risk")?;
        if expired.is_zero() {
            return Err(FormulaError::degenerate("system_risk", "p_stop equals p_open"));
        }

        settle(div(day_change_token, expired, "system_risk")?)
    }

    /// Counterparty capital added to the user's margin.
    ///
    /// Capped proportionally once risk exceeds `risk_config`, scaled up by the
    /// remaining risk headroom below it.
    pub fn system_capital(&self, margin: Decimal, system_risk: Decimal) -> FormulaResult<Decimal> {
        ensure_non_negative("margin", margin)?;
        ensure_non_negative("system_risk", system_risk)?;

        let risk_config = self.config.risk_config;
        let capital = if system_risk > risk_config {
            div(mul(margin, risk_config, "system_capital")?, system_risk, "system_capital")?
        } else {
            let headroom = sub(risk_config, system_risk, "system_capital")?;
            add(margin, mul(headroom, margin, "system_capital")?, "system_capital")?
        };

        settle(capital)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn formula() -> InsuranceFormula {
        InsuranceFormula::default()
    }

    #[test]
    fn test_system_risk() {
        let f = formula();
        // 5% from open to stop, 10% daily move
        assert_eq!(f.system_risk(dec!(0.1), dec!(100), dec!(95)).unwrap(), dec!(2));
        assert_eq!(f.system_risk(dec!(0.1), dec!(100), dec!(105)).unwrap(), dec!(2));
    }

    #[test]
    fn test_system_risk_reference_bear() {
        let risk = formula()
            .system_risk(dec!(0.0572), dec!(6.561), dec!(7.20244))
            .unwrap();
        assert_eq!(risk, dec!(0.5850729608381143));
    }

    #[test]
    fn test_system_risk_zero_distance() {
        let err = formula()
            .system_risk(dec!(0.1), dec!(100), dec!(100))
            .unwrap_err();
        assert!(matches!(
            err,
            FormulaError::DegenerateInput { operation: "system_risk", .. }
        ));
    }

    #[test]
    fn test_system_risk_zero_open() {
        assert!(matches!(
            formula().system_risk(dec!(0.1), Decimal::ZERO, dec!(1)),
            Err(FormulaError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_system_capital_capped_above_threshold() {
        // 100 × 0.85 / 1.7
        assert_eq!(formula().system_capital(dec!(100), dec!(1.7)).unwrap(), dec!(50));
    }

    #[test]
    fn test_system_capital_scaled_below_threshold() {
        // 100 × (1 + 0.85 − 0.5)
        assert_eq!(formula().system_capital(dec!(100), dec!(0.5)).unwrap(), dec!(135));
        // at the threshold exactly, the uncapped branch applies
        assert_eq!(formula().system_capital(dec!(100), dec!(0.85)).unwrap(), dec!(100));
    }

    #[test]
    fn test_system_capital_reference() {
        let f = formula();
        assert_eq!(
            f.system_capital(dec!(500), dec!(0.5850729608381143)).unwrap(),
            dec!(632.4635195809428)
        );
        assert_eq!(
            f.system_capital(dec!(0.25), dec!(2.305073033161529)).unwrap(),
            dec!(0.09218796842568804)
        );
    }

    #[test]
    fn test_system_capital_negative_margin() {
        assert!(matches!(
            formula().system_capital(dec!(-1), dec!(0.5)),
            Err(FormulaError::InvalidRange { field: "margin", .. })
        ));
    }
}
