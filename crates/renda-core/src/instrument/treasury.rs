//! Tesouro Direto constructors. All treasury paper pays the annual custody
//! fee on top of the standard taxes; the policy-linked bond waives custody
//! on the first 10 000 of principal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::rates::{round_rate, term_to_days};
use crate::types::{Money, Rate, RateStructure, TimeUnit};
use crate::RendaFixaResult;

use super::model::{resolve_inflation_index, resolve_policy_rate, Family, Instrument};

/// Custody-free slice of principal on the policy-linked bond.
const CUSTODY_FREE_THRESHOLD: Money = dec!(10000);

/// Fixed-rate treasury bond (Tesouro Prefixado).
pub fn fixed_rate_treasury(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let rate = round_rate(RateStructure::Single(rate_percent / dec!(100)));
    Instrument::new(
        principal,
        term_days,
        name.into(),
        rate,
        Family::Treasury { custody_free_threshold: None },
        Vec::new(),
    )
}

/// IPCA+ treasury bond: inflation leg plus a fixed spread.
pub fn inflation_linked_treasury(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    spread_percent: Rate,
    inflation_index: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let mut advisories = Vec::new();
    let inflation = resolve_inflation_index(inflation_index, &mut advisories);
    let rate = round_rate(RateStructure::Compound(
        inflation / dec!(100),
        spread_percent / dec!(100),
    ));
    Instrument::new(
        principal,
        term_days,
        name.into(),
        rate,
        Family::Treasury { custody_free_threshold: None },
        advisories,
    )
}

/// Selic+ treasury bond: policy-rate leg plus a fixed spread. The only
/// variant with the custody waiver.
pub fn policy_linked_treasury(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    spread_percent: Rate,
    policy_rate: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let mut advisories = Vec::new();
    let policy = resolve_policy_rate(policy_rate, &mut advisories);
    let rate = round_rate(RateStructure::Compound(
        policy / dec!(100),
        spread_percent / dec!(100),
    ));
    Instrument::new(
        principal,
        term_days,
        name.into(),
        rate,
        Family::Treasury { custody_free_threshold: Some(CUSTODY_FREE_THRESHOLD) },
        advisories,
    )
}
