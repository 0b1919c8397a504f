//! Value types crossing the engine boundary

mod credit;
mod deposit;

pub use credit::{
    AmortizationKind, CreditConditions, CreditPeriod, CreditSchedule, CreditTermUnit,
    MAX_TERM_MONTHS as MAX_CREDIT_TERM_MONTHS, MAX_TERM_YEARS as MAX_CREDIT_TERM_YEARS,
};
pub use deposit::{
    DepositConditions, DepositResult, DepositTermUnit, MAX_TERM_DAYS as MAX_DEPOSIT_TERM_DAYS,
    MAX_TERM_MONTHS as MAX_DEPOSIT_TERM_MONTHS, MAX_TERM_YEARS as MAX_DEPOSIT_TERM_YEARS, Payout,
    PayoutFrequency, PayoutStep, Transaction, TransactionFrequency,
};

/// Round a monetary amount to whole cents.
#[inline]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
