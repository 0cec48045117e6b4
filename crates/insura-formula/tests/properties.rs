//! Property tests for the formula engine

use insura_formula::{ClaimRequest, FormulaError, InsuranceFormula, PeriodUnit};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Decimal with two fraction digits from an integer count of cents
fn cents(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|c| Decimal::new(c, 2))
}

/// Ratio with four fraction digits
fn ratio(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|r| Decimal::new(r, 4))
}

proptest! {
    #[test]
    fn leverage_is_floor_of_distance_ratio(
        p_open in cents(1..1_000_000),
        p_stop in cents(0..2_000_000),
    ) {
        let f = InsuranceFormula::default();
        match f.leverage(p_open, p_stop) {
            Ok(lev) => {
                let expected = (p_open / (p_open - p_stop).abs()).floor();
                prop_assert_eq!(Decimal::from(lev), expected);
            }
            Err(err) => {
                prop_assert_eq!(p_open, p_stop);
                let is_degenerate = matches!(err, FormulaError::DegenerateInput { .. });
                prop_assert!(is_degenerate);
            }
        }
    }

    #[test]
    fn settlement_non_decreasing_in_margin(
        margin in cents(0..10_000_000),
        extra in cents(0..1_000_000),
        p_open in cents(100..100_000),
        move_ratio in ratio(0..9_000),
        bull in any::<bool>(),
        day_change_token in ratio(0..5_000),
        hedge in ratio(0..6_000),
        hourly in any::<bool>(),
    ) {
        let f = InsuranceFormula::default();
        let offset = p_open * move_ratio;
        let p_claim = if bull { p_open + offset } else { p_open - offset };
        let unit = if hourly { PeriodUnit::Hour } else { PeriodUnit::Day };

        let request = ClaimRequest::new(margin, p_open, p_claim, hedge, day_change_token)
            .with_period_unit(unit);
        let smaller = f.claim_settlement(&request).unwrap();
        let larger = f.claim_settlement(&request.clone().with_margin(margin + extra)).unwrap();

        prop_assert!(larger >= smaller);
        prop_assert!(smaller >= margin);
    }

    #[test]
    fn refund_price_leans_toward_claim(
        p_open in cents(1..1_000_000),
        p_claim in cents(0..2_000_000),
    ) {
        let f = InsuranceFormula::default();
        let refund = f.refund_price(p_open, p_claim).unwrap();
        if p_claim > p_open {
            prop_assert!(refund > p_open);
        } else {
            prop_assert!(refund < p_open);
        }
    }

    #[test]
    fn max_period_of_short_input_is_one(
        hedge in ratio(0..20_000),
        single in ratio(0..20_000),
    ) {
        let f = InsuranceFormula::default();
        prop_assert_eq!(f.max_period(hedge, &[]), 1);
        prop_assert_eq!(f.max_period(hedge, &[single]), 1);
    }

    #[test]
    fn max_period_within_scan_window(
        hedge in ratio(0..20_000),
        steps in proptest::collection::vec(1i64..500, 0..40),
    ) {
        let f = InsuranceFormula::default();
        let mut acc: i64 = 0;
        let list: Vec<Decimal> = steps
            .iter()
            .map(|s| {
                acc += *s;
                Decimal::new(acc, 4)
            })
            .collect();

        let period = f.max_period(hedge, &list);
        let window = list.len().min(f.config().max_period as usize);
        prop_assert!(period >= 1);
        prop_assert!(period <= window.max(1));
    }

    #[test]
    fn format_amount_keeps_rounded_values(amount in cents(-100_000_000..100_000_000)) {
        let f = InsuranceFormula::default();
        let text = f.format_amount(amount);
        prop_assert_eq!(text.parse::<Decimal>().unwrap(), amount);
        let fraction_digits = text.split('.').nth(1).map(str::len);
        prop_assert_eq!(fraction_digits, Some(2));
    }
}
