//! Investment-fund constructors. Funds pay the standard taxes plus a flat
//! administration fee on the period-end total; incentivized debenture funds
//! get the income-tax component refunded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::rates::{round_rate, term_to_days};
use crate::types::{Money, Rate, RateStructure, TimeUnit};
use crate::RendaFixaResult;

use super::model::{Family, Instrument};

fn fund(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    admin_fee_percent: Rate,
    income_tax_rebate: bool,
    name: String,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let rate = round_rate(RateStructure::Single(rate_percent / dec!(100)));
    Instrument::new(
        principal,
        term_days,
        name,
        rate,
        Family::Fund {
            admin_fee: admin_fee_percent / dec!(100),
            income_tax_rebate,
        },
        Vec::new(),
    )
}

/// Fixed-income fund (FIRF).
pub fn fixed_income_fund(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    admin_fee_percent: Rate,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    fund(principal, term, unit, rate_percent, admin_fee_percent, false, name.into())
}

/// Equity fund (FIA). Same fee mechanics as the fixed-income fund; the
/// expected-return input is just quoted off a different book.
pub fn equity_fund(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    admin_fee_percent: Rate,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    fund(principal, term, unit, rate_percent, admin_fee_percent, false, name.into())
}

/// Incentivized debenture fund: admin fee still due, income tax refunded in
/// full.
pub fn incentivized_fund(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    admin_fee_percent: Rate,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    fund(principal, term, unit, rate_percent, admin_fee_percent, true, name.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::income_tax;

    #[test]
    fn test_fixed_income_fund_charges_admin_on_total() {
        let firf = fixed_income_fund(
            dec!(1000),
            dec!(360),
            TimeUnit::Day,
            dec!(13.51),
            dec!(0.5),
            "BB Asset RF CP",
        )
        .unwrap();
        let gross = firf.gross_yield();
        let expected_fee = (gross + dec!(1000)) * dec!(0.005);
        assert_eq!(firf.management_fee(), expected_fee);
        assert_eq!(firf.tax(), income_tax(gross, 360) + expected_fee);
    }

    #[test]
    fn test_incentivized_fund_pays_admin_fee_only_past_day_30() {
        let fund = incentivized_fund(
            dec!(1000),
            dec!(360),
            TimeUnit::Day,
            dec!(13.72),
            dec!(1.58),
            "Debentures Incentivadas",
        )
        .unwrap();
        assert_eq!(fund.tax(), fund.management_fee());
        assert!(fund.net_yield() < fund.gross_yield());
    }

    #[test]
    fn test_equity_fund_matches_fixed_income_mechanics() {
        let fia = equity_fund(
            dec!(1000),
            dec!(720),
            TimeUnit::Day,
            dec!(19.36),
            dec!(1),
            "Dividendos FIA",
        )
        .unwrap();
        assert_eq!(*fia.rate(), RateStructure::Single(dec!(0.1936)));
        // 720 days sits in the 17.5% bracket, inclusive upper bound
        assert_eq!(
            fia.tax(),
            income_tax(fia.gross_yield(), 720) + fia.management_fee()
        );
    }
}
