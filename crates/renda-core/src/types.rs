use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RendaFixaError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%), unless the name says percent.
pub type Rate = Decimal;

/// Default Selic policy rate, percent per year. Substituted when a
/// constructor's policy-rate argument is omitted.
pub const DEFAULT_POLICY_RATE: Rate = dec!(10.5);

/// Default IPCA inflation index, percent per year.
pub const DEFAULT_INFLATION_INDEX: Rate = dec!(3.926);

/// Default TR (taxa referencial), percent per year. Second leg of the
/// savings-account rate.
pub const DEFAULT_REFERENTIAL_RATE: Rate = dec!(0.5);

/// Conventional spread of the DI rate below the Selic target, in percentage
/// points.
pub const INTERBANK_SPREAD_BELOW_POLICY: Rate = dec!(0.1);

/// Unit in which a holding period is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Month,
    Year,
}

impl FromStr for TimeUnit {
    type Err = RendaFixaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Portuguese aliases accepted since product sheets quote terms that way.
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "dia" => Ok(TimeUnit::Day),
            "month" | "mes" => Ok(TimeUnit::Month),
            "year" | "ano" => Ok(TimeUnit::Year),
            other => Err(RendaFixaError::UnknownTimeUnit(other.to_string())),
        }
    }
}

/// An effective annualized rate, already resolved to decimal fractions: a
/// single scalar, or an ordered pair of legs whose effects compound
/// multiplicatively (`(1+r1)(1+r2) - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateStructure {
    Single(Rate),
    Compound(Rate, Rate),
}

impl RateStructure {
    /// Combined effective annual rate.
    pub fn effective(&self) -> Rate {
        match self {
            RateStructure::Single(r) => *r,
            RateStructure::Compound(a, b) => {
                (Decimal::ONE + a) * (Decimal::ONE + b) - Decimal::ONE
            }
        }
    }
}

impl fmt::Display for RateStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateStructure::Single(r) => write!(f, "{:.2}%", r * dec!(100)),
            RateStructure::Compound(a, b) => {
                write!(f, "{:.2}% + {:.2}%", a * dec!(100), b * dec!(100))
            }
        }
    }
}

/// Notice that a constructor substituted a process-wide default for an
/// omitted benchmark argument. Non-fatal; retained on the instrument so
/// callers can tell a quoted benchmark from a defaulted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Advisory {
    DefaultPolicyRate { resolved_percent: Rate },
    DefaultInterbankRate { resolved_percent: Rate },
    DefaultInflationIndex { resolved_percent: Rate },
    DefaultReferentialRate { resolved_percent: Rate },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DefaultPolicyRate { resolved_percent } => {
                write!(f, "policy rate not informed, using default of {resolved_percent}%")
            }
            Advisory::DefaultInterbankRate { resolved_percent } => {
                write!(f, "DI rate not informed, using policy rate minus 0.1 = {resolved_percent}%")
            }
            Advisory::DefaultInflationIndex { resolved_percent } => {
                write!(f, "IPCA not informed, using default of {resolved_percent}%")
            }
            Advisory::DefaultReferentialRate { resolved_percent } => {
                write!(f, "TR not informed, using default of {resolved_percent}%")
            }
        }
    }
}
