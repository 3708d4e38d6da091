//! Poupança: tax-exempt, with the tiered remuneration rule. Below the policy
//! cutoff the account earns 70% of the policy rate; above it, a fixed 0.5%
//! per month. The TR is always the second leg.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::rates::{round_rate, term_to_days};
use crate::types::{Money, Rate, RateStructure, TimeUnit};
use crate::RendaFixaResult;

use super::model::{resolve_policy_rate, resolve_referential_rate, Family, Instrument};

/// Policy-rate cutoff for the tier switch, percent per year.
const POLICY_CUTOFF: Rate = dec!(8.5);

/// Monthly remuneration above the cutoff, as a fraction.
const MONTHLY_RATE_ABOVE_CUTOFF: Rate = dec!(0.005);

/// Savings account. The rate pair is derived once at construction and fed
/// into the shared compounding formula like every other instrument.
pub fn savings_account(
    principal: Money,
    term: Decimal,
    unit: TimeUnit,
    policy_rate: Option<Rate>,
    referential_rate: Option<Rate>,
    name: impl Into<String>,
) -> RendaFixaResult<Instrument> {
    let term_days = term_to_days(term, unit)?;
    let mut advisories = Vec::new();
    let policy = resolve_policy_rate(policy_rate, &mut advisories);
    let referential = resolve_referential_rate(referential_rate, &mut advisories);

    let first_leg = if policy <= POLICY_CUTOFF {
        policy / dec!(100) * dec!(0.70)
    } else {
        (Decimal::ONE + MONTHLY_RATE_ABOVE_CUTOFF).powi(12) - Decimal::ONE
    };
    let rate = round_rate(RateStructure::Compound(first_leg, referential / dec!(100)));

    Instrument::new(
        principal,
        term_days,
        name.into(),
        rate,
        Family::Savings,
        advisories,
    )
}
