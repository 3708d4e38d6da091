use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RendaFixaError;
use crate::rates::{compound_yield, real_return};
use crate::tax::{income_tax, transaction_tax};
use crate::types::{
    Advisory, Money, Rate, RateStructure, TimeUnit, DEFAULT_INFLATION_INDEX,
    DEFAULT_POLICY_RATE, DEFAULT_REFERENTIAL_RATE, INTERBANK_SPREAD_BELOW_POLICY,
};
use crate::RendaFixaResult;

/// Annual custody fee charged on treasury holdings.
const CUSTODY_FEE_RATE: RateStructure = RateStructure::Single(dec!(0.002));

// ---------------------------------------------------------------------------
// Families
// ---------------------------------------------------------------------------

/// Tax regime family. One tag per product class; everything else about an
/// instrument is shared by the root accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Family {
    /// Bank certificates of deposit (CDB): IR plus IOF on the gross yield.
    BankDeposit,
    /// LCI/LCA credit notes: same yield arithmetic, fully tax-exempt.
    ExemptNote,
    /// Tesouro Direto: IR plus IOF plus the annual custody fee. The
    /// policy-linked bond waives custody on the first slice of principal.
    Treasury { custody_free_threshold: Option<Money> },
    /// Investment funds: IR plus IOF plus a flat administration fee on the
    /// period-end total. Incentivized funds refund the IR component.
    Fund { admin_fee: Rate, income_tax_rebate: bool },
    /// Poupança: tax-exempt, two-leg rate from the tiered policy-rate rule.
    Savings,
}

// ---------------------------------------------------------------------------
// Instrument
// ---------------------------------------------------------------------------

/// A fixed-income position: principal, holding period and an effective rate
/// resolved once at construction. Yield and tax figures are recomputed from
/// these on every call; nothing derived is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    principal: Money,
    term_days: u32,
    display_name: String,
    rate: RateStructure,
    family: Family,
    advisories: Vec<Advisory>,
}

/// Snapshot of every computed figure, for report rendering and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSummary {
    pub display_name: String,
    pub principal: Money,
    pub term_days: u32,
    pub rate: RateStructure,
    pub gross_yield: Money,
    pub tax: Money,
    pub net_yield: Money,
    pub total_value: Money,
    pub real_return: Money,
}

impl Instrument {
    pub(crate) fn new(
        principal: Money,
        term_days: u32,
        display_name: String,
        rate: RateStructure,
        family: Family,
        advisories: Vec<Advisory>,
    ) -> RendaFixaResult<Self> {
        validate_principal(principal)?;
        validate_rate(&rate)?;
        for advisory in &advisories {
            tracing::debug!(instrument = %display_name, %advisory, "default benchmark substituted");
        }
        Ok(Self {
            principal,
            term_days,
            display_name,
            rate,
            family,
            advisories,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    /// Reassigns the invested amount. Non-positive values are rejected and
    /// the stored principal is left untouched.
    pub fn set_principal(&mut self, principal: Money) -> RendaFixaResult<()> {
        validate_principal(principal)?;
        self.principal = principal;
        Ok(())
    }

    pub fn term_days(&self) -> u32 {
        self.term_days
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn rate(&self) -> &RateStructure {
        &self.rate
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    /// Default-substitution notices recorded at construction.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Interest earned over the holding period before any tax or fee.
    pub fn gross_yield(&self) -> Money {
        compound_yield(self.principal, &self.rate, self.term_days)
    }

    /// Total taxes and fees under this instrument's family rules.
    pub fn tax(&self) -> Money {
        let gross = self.gross_yield();
        match &self.family {
            Family::BankDeposit => {
                income_tax(gross, self.term_days) + transaction_tax(gross, self.term_days)
            }
            Family::ExemptNote | Family::Savings => Money::ZERO,
            Family::Treasury { .. } => {
                income_tax(gross, self.term_days)
                    + transaction_tax(gross, self.term_days)
                    + self.custody_fee()
            }
            Family::Fund { income_tax_rebate, .. } => {
                let ir = income_tax(gross, self.term_days);
                let base = ir + transaction_tax(gross, self.term_days) + self.management_fee();
                if *income_tax_rebate {
                    base - ir
                } else {
                    base
                }
            }
        }
    }

    /// Gross yield minus all taxes and fees.
    pub fn net_yield(&self) -> Money {
        self.gross_yield() - self.tax()
    }

    /// Principal plus net yield at the end of the holding period.
    pub fn total_value(&self) -> Money {
        self.net_yield() + self.principal
    }

    /// Inflation drag on the final total over the holding period. Always
    /// measured against the default IPCA reference, including for
    /// inflation-linked paper whose own index already sits in `rate`.
    pub fn real_return(&self) -> Money {
        real_return(
            self.total_value(),
            DEFAULT_INFLATION_INDEX,
            Decimal::from(self.term_days),
            TimeUnit::Day,
        )
    }

    /// Custody fee for treasury instruments; zero for every other family.
    pub fn custody_fee(&self) -> Money {
        match &self.family {
            Family::Treasury { custody_free_threshold } => {
                let basis = match custody_free_threshold {
                    Some(threshold) => (self.principal - threshold).max(Money::ZERO),
                    None => self.principal,
                };
                compound_yield(basis, &CUSTODY_FEE_RATE, self.term_days)
            }
            _ => Money::ZERO,
        }
    }

    /// Administration fee for fund instruments; zero for every other family.
    /// A flat fraction of the period-end total, not compounded over time.
    pub fn management_fee(&self) -> Money {
        match &self.family {
            Family::Fund { admin_fee, .. } => (self.gross_yield() + self.principal) * admin_fee,
            _ => Money::ZERO,
        }
    }

    /// JSON rendition of the summary, for export collaborators that want a
    /// wire string rather than the struct.
    pub fn summary_json(&self) -> RendaFixaResult<String> {
        Ok(serde_json::to_string(&self.summary())?)
    }

    pub fn summary(&self) -> InstrumentSummary {
        InstrumentSummary {
            display_name: self.display_name.clone(),
            principal: self.principal,
            term_days: self.term_days,
            rate: self.rate,
            gross_yield: self.gross_yield(),
            tax: self.tax(),
            net_yield: self.net_yield(),
            total_value: self.total_value(),
            real_return: self.real_return(),
        }
    }
}

fn validate_principal(principal: Money) -> RendaFixaResult<()> {
    if principal <= Money::ZERO {
        return Err(RendaFixaError::InvalidInput {
            field: "principal".into(),
            reason: "invested amount must be positive".into(),
        });
    }
    Ok(())
}

fn validate_rate(rate: &RateStructure) -> RendaFixaResult<()> {
    let plausible = match rate {
        RateStructure::Single(r) => *r > dec!(-1),
        RateStructure::Compound(a, b) => *a > dec!(-1) && *b > dec!(-1),
    };
    if !plausible {
        return Err(RendaFixaError::InvalidInput {
            field: "rate".into(),
            reason: "rate leg must be greater than -100%".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Benchmark resolution
// ---------------------------------------------------------------------------

pub(crate) fn resolve_policy_rate(
    policy_rate: Option<Rate>,
    advisories: &mut Vec<Advisory>,
) -> Rate {
    match policy_rate {
        Some(rate) => rate,
        None => {
            advisories.push(Advisory::DefaultPolicyRate {
                resolved_percent: DEFAULT_POLICY_RATE,
            });
            DEFAULT_POLICY_RATE
        }
    }
}

/// The DI default tracks the resolved policy rate, not the process constant.
pub(crate) fn resolve_interbank_rate(
    interbank_rate: Option<Rate>,
    policy_percent: Rate,
    advisories: &mut Vec<Advisory>,
) -> Rate {
    match interbank_rate {
        Some(rate) => rate,
        None => {
            let resolved = policy_percent - INTERBANK_SPREAD_BELOW_POLICY;
            advisories.push(Advisory::DefaultInterbankRate {
                resolved_percent: resolved,
            });
            resolved
        }
    }
}

pub(crate) fn resolve_inflation_index(
    inflation_index: Option<Rate>,
    advisories: &mut Vec<Advisory>,
) -> Rate {
    match inflation_index {
        Some(rate) => rate,
        None => {
            advisories.push(Advisory::DefaultInflationIndex {
                resolved_percent: DEFAULT_INFLATION_INDEX,
            });
            DEFAULT_INFLATION_INDEX
        }
    }
}

pub(crate) fn resolve_referential_rate(
    referential_rate: Option<Rate>,
    advisories: &mut Vec<Advisory>,
) -> Rate {
    match referential_rate {
        Some(rate) => rate,
        None => {
            advisories.push(Advisory::DefaultReferentialRate {
                resolved_percent: DEFAULT_REFERENTIAL_RATE,
            });
            DEFAULT_REFERENTIAL_RATE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_deposit(principal: Money, term_days: u32, rate: Rate) -> Instrument {
        Instrument::new(
            principal,
            term_days,
            "CDB".to_string(),
            RateStructure::Single(rate),
            Family::BankDeposit,
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_construction_rejects_non_positive_principal() {
        let result = Instrument::new(
            dec!(0),
            360,
            "CDB".to_string(),
            RateStructure::Single(dec!(0.12)),
            Family::BankDeposit,
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(RendaFixaError::InvalidInput { field, .. }) if field == "principal"
        ));
    }

    #[test]
    fn test_construction_rejects_impossible_rate() {
        let result = Instrument::new(
            dec!(1000),
            360,
            "CDB".to_string(),
            RateStructure::Compound(dec!(0.05), dec!(-1)),
            Family::BankDeposit,
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_principal_validates_and_leaves_state_untouched() {
        let mut instrument = plain_deposit(dec!(1000), 360, dec!(0.1474));
        assert!(instrument.set_principal(dec!(-5)).is_err());
        assert_eq!(instrument.principal(), dec!(1000));
        instrument.set_principal(dec!(2500)).unwrap();
        assert_eq!(instrument.principal(), dec!(2500));
    }

    #[test]
    fn test_net_never_exceeds_gross_and_equality_means_no_tax() {
        let taxable = plain_deposit(dec!(1000), 360, dec!(0.1474));
        assert!(taxable.net_yield() < taxable.gross_yield());

        let exempt = Instrument::new(
            dec!(1000),
            360,
            "LCA".to_string(),
            RateStructure::Single(dec!(0.1474)),
            Family::ExemptNote,
            Vec::new(),
        )
        .unwrap();
        assert_eq!(exempt.tax(), Money::ZERO);
        assert_eq!(exempt.net_yield(), exempt.gross_yield());
    }

    #[test]
    fn test_total_value_is_principal_plus_net() {
        let instrument = plain_deposit(dec!(1000), 360, dec!(0.1474));
        assert_eq!(
            instrument.total_value(),
            instrument.principal() + instrument.net_yield()
        );
    }

    #[test]
    fn test_custody_fee_full_principal() {
        let bond = Instrument::new(
            dec!(1000),
            360,
            "Tesouro Prefixado".to_string(),
            RateStructure::Single(dec!(0.1297)),
            Family::Treasury { custody_free_threshold: None },
            Vec::new(),
        )
        .unwrap();
        // 1000 * (1.002 - 1) over one year
        assert!((bond.custody_fee() - dec!(2)).abs() < dec!(0.01));
        assert_eq!(
            bond.tax(),
            income_tax(bond.gross_yield(), 360) + bond.custody_fee()
        );
    }

    #[test]
    fn test_custody_waiver_applies_to_excess_only() {
        let bond = Instrument::new(
            dec!(20000),
            360,
            "Tesouro Selic".to_string(),
            RateStructure::Compound(dec!(0.105), dec!(0.0012)),
            Family::Treasury { custody_free_threshold: Some(dec!(10000)) },
            Vec::new(),
        )
        .unwrap();
        // fee basis is the 10000 above the threshold
        assert!((bond.custody_fee() - dec!(20)).abs() < dec!(0.05));
    }

    #[test]
    fn test_custody_waiver_zero_below_threshold() {
        let bond = Instrument::new(
            dec!(8000),
            360,
            "Tesouro Selic".to_string(),
            RateStructure::Compound(dec!(0.105), dec!(0.0012)),
            Family::Treasury { custody_free_threshold: Some(dec!(10000)) },
            Vec::new(),
        )
        .unwrap();
        assert_eq!(bond.custody_fee(), Money::ZERO);
    }

    #[test]
    fn test_management_fee_on_period_end_total() {
        let fund = Instrument::new(
            dec!(1000),
            360,
            "FIRF".to_string(),
            RateStructure::Single(dec!(0.1351)),
            Family::Fund { admin_fee: dec!(0.005), income_tax_rebate: false },
            Vec::new(),
        )
        .unwrap();
        let expected = (fund.gross_yield() + dec!(1000)) * dec!(0.005);
        assert_eq!(fund.management_fee(), expected);
    }

    #[test]
    fn test_incentivized_fund_refunds_income_tax_component() {
        let build = |rebate| {
            Instrument::new(
                dec!(1000),
                360,
                "FI Incentivada".to_string(),
                RateStructure::Single(dec!(0.1372)),
                Family::Fund { admin_fee: dec!(0.0158), income_tax_rebate: rebate },
                Vec::new(),
            )
            .unwrap()
        };
        let plain = build(false);
        let incentivized = build(true);
        let ir = income_tax(plain.gross_yield(), 360);
        assert_eq!(plain.tax() - incentivized.tax(), ir);
        // past day 30 the only remaining charge is the admin fee
        assert_eq!(incentivized.tax(), incentivized.management_fee());
    }

    #[test]
    fn test_real_return_uses_default_index() {
        let instrument = plain_deposit(dec!(1000), 360, dec!(0.1474));
        let expected = crate::rates::real_return(
            instrument.total_value(),
            DEFAULT_INFLATION_INDEX,
            dec!(360),
            TimeUnit::Day,
        );
        assert_eq!(instrument.real_return(), expected);
    }

    #[test]
    fn test_summary_round_trips_through_json() {
        let instrument = plain_deposit(dec!(2500), 360, dec!(0.146));
        let json = instrument.summary_json().unwrap();
        let back: InstrumentSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instrument.summary());
    }
}
