//! Fixed tax tables: regressive income tax (IR) by holding period and the
//! degressive transactional tax (IOF) charged inside the first 30 days.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Degressive IOF schedule for redemptions inside the first 30 days.
/// Index 0 is day 1; the fraction applies to the gross yield.
const IOF_SCHEDULE: [Decimal; 30] = [
    dec!(0.96), dec!(0.93), dec!(0.90), dec!(0.86), dec!(0.83), dec!(0.80),
    dec!(0.76), dec!(0.73), dec!(0.70), dec!(0.66), dec!(0.63), dec!(0.60),
    dec!(0.56), dec!(0.53), dec!(0.50), dec!(0.46), dec!(0.43), dec!(0.40),
    dec!(0.36), dec!(0.33), dec!(0.30), dec!(0.26), dec!(0.23), dec!(0.20),
    dec!(0.16), dec!(0.13), dec!(0.10), dec!(0.06), dec!(0.03), dec!(0.00),
];

/// Marginal IR rate for a holding period. Bracket upper bounds are inclusive:
/// 181 days already falls in the 20% bracket, 360 still does.
pub fn income_tax_bracket(term_days: u32) -> Rate {
    if term_days <= 180 {
        dec!(0.225)
    } else if term_days <= 360 {
        dec!(0.20)
    } else if term_days <= 720 {
        dec!(0.175)
    } else {
        dec!(0.15)
    }
}

/// Income tax withheld on a gross yield.
pub fn income_tax(gross_yield: Money, term_days: u32) -> Money {
    gross_yield * income_tax_bracket(term_days)
}

/// Transactional tax (IOF) on a gross yield.
///
/// Zero at or after day 30 by rule, not by table lookup; inside the first
/// month the day indexes the schedule directly (day 1 pays 96%). A zero-day
/// holding has no yield and never probes the table.
pub fn transaction_tax(gross_yield: Money, term_days: u32) -> Money {
    if term_days == 0 {
        return Money::ZERO;
    }
    if term_days < 30 {
        gross_yield * IOF_SCHEDULE[(term_days - 1) as usize]
    } else {
        Money::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_income_tax_bracket_boundaries() {
        assert_eq!(income_tax_bracket(180), dec!(0.225));
        assert_eq!(income_tax_bracket(181), dec!(0.20));
        assert_eq!(income_tax_bracket(360), dec!(0.20));
        assert_eq!(income_tax_bracket(361), dec!(0.175));
        assert_eq!(income_tax_bracket(720), dec!(0.175));
        assert_eq!(income_tax_bracket(721), dec!(0.15));
    }

    #[test]
    fn test_income_tax_amount() {
        assert_eq!(income_tax(dec!(147.40), 360), dec!(29.48));
        assert_eq!(income_tax(dec!(100), 1000), dec!(15));
    }

    #[test]
    fn test_transaction_tax_first_day_pays_most() {
        assert_eq!(transaction_tax(dec!(100), 1), dec!(96));
        assert_eq!(transaction_tax(dec!(100), 15), dec!(50));
        assert_eq!(transaction_tax(dec!(100), 29), dec!(3));
    }

    #[test]
    fn test_transaction_tax_zero_from_day_30() {
        assert_eq!(transaction_tax(dec!(100), 30), Decimal::ZERO);
        assert_eq!(transaction_tax(dec!(100), 31), Decimal::ZERO);
        assert_eq!(transaction_tax(dec!(100), 360), Decimal::ZERO);
    }

    #[test]
    fn test_transaction_tax_zero_day_holding() {
        assert_eq!(transaction_tax(dec!(100), 0), Decimal::ZERO);
    }

    #[test]
    fn test_transaction_tax_non_increasing() {
        let mut previous = transaction_tax(dec!(100), 1);
        for day in 2..30 {
            let current = transaction_tax(dec!(100), day);
            assert!(current < previous, "IOF should fall from day {day}");
            previous = current;
        }
    }
}
