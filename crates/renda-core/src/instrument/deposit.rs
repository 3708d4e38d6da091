//! Constructors for bank certificates of deposit (CDB) and their tax-exempt
//! LCI/LCA twins. The two families share every rate derivation; only the tax
//! regime differs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::rates::{benchmark_to_rate, round_rate, term_to_days};
use crate::types::{Money, Rate, RateStructure, TimeUnit};
use crate::RendaFixaResult;

use super::model::{
    resolve_inflation_index, resolve_interbank_rate, resolve_policy_rate, Family, Instrument,
};

fn fixed_rate_note(
    family: Family,
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    name: String,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let rate = round_rate(RateStructure::Single(rate_percent / dec!(100)));
    Instrument::new(principal, term_days, name, rate, family, Vec::new())
}

fn interbank_linked_note(
    family: Family,
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    percent_of_benchmark: Rate,
    policy_rate: Option<Rate>,
    interbank_rate: Option<Rate>,
    name: String,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let mut advisories = Vec::new();
    let policy = resolve_policy_rate(policy_rate, &mut advisories);
    let interbank = resolve_interbank_rate(interbank_rate, policy, &mut advisories);
    let rate = round_rate(RateStructure::Single(benchmark_to_rate(
        percent_of_benchmark,
        interbank,
    )));
    Instrument::new(principal, term_days, name, rate, family, advisories)
}

fn inflation_linked_note(
    family: Family,
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    spread_percent: Rate,
    inflation_index: Option<Rate>,
    name: String,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let mut advisories = Vec::new();
    let inflation = resolve_inflation_index(inflation_index, &mut advisories);
    let rate = round_rate(RateStructure::Compound(
        inflation / dec!(100),
        spread_percent / dec!(100),
    ));
    Instrument::new(principal, term_days, name, rate, family, advisories)
}

/// Fixed-rate CDB quoted as an annual percentage.
pub fn fixed_rate_deposit(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    fixed_rate_note(Family::BankDeposit, principal, term, unit, rate_percent, name.into())
}

/// CDB quoted as a percentage of the CDI. Omitted benchmarks fall back to
/// the process defaults and leave an advisory on the instrument.
pub fn interbank_linked_deposit(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    percent_of_benchmark: Rate,
    policy_rate: Option<Rate>,
    interbank_rate: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    interbank_linked_note(
        Family::BankDeposit,
        principal,
        term,
        unit,
        percent_of_benchmark,
        policy_rate,
        interbank_rate,
        name.into(),
    )
}

/// IPCA+ CDB: inflation leg plus a fixed spread, compounding multiplicatively.
pub fn inflation_linked_deposit(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    spread_percent: Rate,
    inflation_index: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    inflation_linked_note(
        Family::BankDeposit,
        principal,
        term,
        unit,
        spread_percent,
        inflation_index,
        name.into(),
    )
}

/// Fixed-rate LCI/LCA: same yield arithmetic as the CDB, zero tax.
pub fn fixed_rate_exempt_note(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    rate_percent: Rate,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    fixed_rate_note(Family::ExemptNote, principal, term, unit, rate_percent, name.into())
}

/// CDI-linked LCI/LCA.
pub fn interbank_linked_exempt_note(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    percent_of_benchmark: Rate,
    policy_rate: Option<Rate>,
    interbank_rate: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    interbank_linked_note(
        Family::ExemptNote,
        principal,
        term,
        unit,
        percent_of_benchmark,
        policy_rate,
        interbank_rate,
        name.into(),
    )
}

/// IPCA+ LCI/LCA.
pub fn inflation_linked_exempt_note(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    spread_percent: Rate,
    inflation_index: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    inflation_linked_note(
        Family::ExemptNote,
        principal,
        term,
        unit,
        spread_percent,
        inflation_index,
        name.into(),
    )
}
