//! The instrument hierarchy: a closed set of tax-regime families behind a
//! shared accessor contract, plus one constructor per retail product.

mod deposit;
mod fund;
mod model;
mod savings;
mod treasury;

pub use deposit::{
    fixed_rate_deposit, fixed_rate_exempt_note, inflation_linked_deposit,
    inflation_linked_exempt_note, interbank_linked_deposit, interbank_linked_exempt_note,
};
pub use fund::{equity_fund, fixed_income_fund, incentivized_fund};
pub use model::{Family, Instrument, InstrumentSummary};
pub use savings::savings_account;
pub use treasury::{fixed_rate_treasury, inflation_linked_treasury, policy_linked_treasury};
