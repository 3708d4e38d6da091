//! Rate and time conversions shared by every instrument family.
//!
//! All functions here are pure. The compounding convention is a simplified
//! 360-day year, except for the CDI conversion which follows the 252
//! business-day market convention.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::RendaFixaError;
use crate::types::{Money, Rate, RateStructure, TimeUnit};
use crate::RendaFixaResult;

const DAYS_PER_YEAR: Decimal = dec!(360);
const DAYS_PER_MONTH: Decimal = dec!(30);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const BUSINESS_DAYS_PER_YEAR: Decimal = dec!(252);

/// Converts a holding period into whole days, rounding part-days up.
pub fn term_to_days(term: Decimal, unit: TimeUnit) -> RendaFixaResult<u32> {
    if term < Decimal::ZERO {
        return Err(RendaFixaError::InvalidInput {
            field: "term".into(),
            reason: "holding period cannot be negative".into(),
        });
    }

    let too_large = || RendaFixaError::InvalidInput {
        field: "term".into(),
        reason: "holding period too large".into(),
    };

    // checked multiplication: an extreme term must reject, not abort
    let days = match unit {
        TimeUnit::Day => term.ceil(),
        TimeUnit::Month => term.checked_mul(DAYS_PER_MONTH).ok_or_else(too_large)?.ceil(),
        TimeUnit::Year => term.checked_mul(DAYS_PER_YEAR).ok_or_else(too_large)?.ceil(),
    };

    days.to_u32().ok_or_else(too_large)
}

/// Fractional years for a holding period, used as the compounding exponent.
pub fn term_to_years(term: Decimal, unit: TimeUnit) -> Decimal {
    match unit {
        TimeUnit::Day => term / DAYS_PER_YEAR,
        TimeUnit::Month => term / MONTHS_PER_YEAR,
        TimeUnit::Year => term,
    }
}

/// Compound interest earned on `principal` over `term_days` at an effective
/// annual rate. A two-leg rate compounds each leg over the same period.
///
/// Every gross-yield, custody-fee and real-return figure in the crate comes
/// through this formula.
pub fn compound_yield(principal: Money, rate: &RateStructure, term_days: u32) -> Money {
    let exponent = term_to_years(Decimal::from(term_days), TimeUnit::Day);
    let factor = match rate {
        RateStructure::Single(r) => (Decimal::ONE + r).powd(exponent),
        RateStructure::Compound(a, b) => {
            (Decimal::ONE + a).powd(exponent) * (Decimal::ONE + b).powd(exponent)
        }
    };
    principal * factor - principal
}

/// Rounds each rate leg to four decimal places. Applied once, when a
/// constructor resolves its rate; never re-applied afterwards.
pub fn round_rate(rate: RateStructure) -> RateStructure {
    match rate {
        RateStructure::Single(r) => RateStructure::Single(r.round_dp(4)),
        RateStructure::Compound(a, b) => {
            RateStructure::Compound(a.round_dp(4), b.round_dp(4))
        }
    }
}

/// Converts "X% of the CDI" into an absolute effective annual rate.
///
/// The benchmark is quoted as an annual percent compounded daily over 252
/// business days. The contracted percentage applies to the *daily* excess,
/// so the benchmark is de-annualized first, scaled, then re-annualized.
/// Scaling the annual figure directly misstates the result.
pub fn benchmark_to_rate(percent_of_benchmark: Rate, benchmark_annual_percent: Rate) -> Rate {
    let daily = (Decimal::ONE + benchmark_annual_percent / dec!(100))
        .powd(Decimal::ONE / BUSINESS_DAYS_PER_YEAR)
        - Decimal::ONE;
    let scaled = daily * percent_of_benchmark / dec!(100);
    (Decimal::ONE + scaled).powd(BUSINESS_DAYS_PER_YEAR) - Decimal::ONE
}

/// Purchasing-power erosion (or gain) attributable to inflation over the
/// holding period: what today's equivalent of `nominal_total` would earn at
/// the inflation index. This is a benchmark figure, not a deflation of the
/// nominal total.
pub fn real_return(
    nominal_total: Money,
    inflation_percent: Rate,
    term: Decimal,
    unit: TimeUnit,
) -> Money {
    let exponent = term_to_years(term, unit);
    nominal_total * (Decimal::ONE + inflation_percent / dec!(100)).powd(exponent) - nominal_total
}
