//! Deposit conditions, scheduled transactions and simulation results

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{AVG_DAYS_IN_MONTH, AVG_DAYS_IN_YEAR};
use crate::error::ConditionsError;

/// Longest accepted deposit term per unit
pub const MAX_TERM_DAYS: u32 = 18_250;
pub const MAX_TERM_MONTHS: u32 = 600;
pub const MAX_TERM_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepositTermUnit {
    Day,
    #[default]
    Month,
    Year,
}

impl DepositTermUnit {
    pub fn name(self) -> &'static str {
        match self {
            DepositTermUnit::Day => "days",
            DepositTermUnit::Month => "months",
            DepositTermUnit::Year => "years",
        }
    }

    fn max_term(self) -> u32 {
        match self {
            DepositTermUnit::Day => MAX_TERM_DAYS,
            DepositTermUnit::Month => MAX_TERM_MONTHS,
            DepositTermUnit::Year => MAX_TERM_YEARS,
        }
    }

    /// Approximate length of `term` units in days
    fn approx_days(self, term: u32) -> u64 {
        let per_unit = match self {
            DepositTermUnit::Day => 1,
            DepositTermUnit::Month => AVG_DAYS_IN_MONTH as u64,
            DepositTermUnit::Year => AVG_DAYS_IN_YEAR as u64,
        };
        term as u64 * per_unit
    }
}

/// How often accrued interest is paid out (or capitalized)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PayoutFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

/// Calendar step between two consecutive payout dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutStep {
    Days(i32),
    Months(i32),
}

impl PayoutFrequency {
    pub fn step(self) -> PayoutStep {
        match self {
            PayoutFrequency::Daily => PayoutStep::Days(1),
            PayoutFrequency::Weekly => PayoutStep::Days(7),
            PayoutFrequency::Monthly => PayoutStep::Months(1),
            PayoutFrequency::Quarterly => PayoutStep::Months(3),
            PayoutFrequency::SemiAnnual => PayoutStep::Months(6),
            PayoutFrequency::Annual => PayoutStep::Months(12),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PayoutFrequency::Daily => "daily",
            PayoutFrequency::Weekly => "weekly",
            PayoutFrequency::Monthly => "monthly",
            PayoutFrequency::Quarterly => "quarterly",
            PayoutFrequency::SemiAnnual => "semiannual",
            PayoutFrequency::Annual => "annual",
        }
    }

    /// A payout period must fit at least once into the deposit term.
    pub fn is_compatible_with(self, unit: DepositTermUnit, term: u32) -> bool {
        let period_days = match self.step() {
            PayoutStep::Days(days) => days as u64,
            PayoutStep::Months(months) => months as u64 * AVG_DAYS_IN_MONTH as u64,
        };
        period_days <= unit.approx_days(term)
    }
}

/// Recurrence of a fund or withdrawal transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionFrequency {
    #[default]
    Once,
    Monthly,
    EveryTwoMonths,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl TransactionFrequency {
    /// Months between occurrences; zero for a one-off transaction.
    pub fn months(self) -> i32 {
        match self {
            TransactionFrequency::Once => 0,
            TransactionFrequency::Monthly => 1,
            TransactionFrequency::EveryTwoMonths => 2,
            TransactionFrequency::Quarterly => 3,
            TransactionFrequency::SemiAnnual => 6,
            TransactionFrequency::Annual => 12,
        }
    }
}

/// An amount tied to a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub date: Date,
    pub amount: f64,
}

/// A scheduled contribution or withdrawal. The amount is always positive;
/// the list it belongs to decides the direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub payout: Payout,
    #[serde(default)]
    pub frequency: TransactionFrequency,
}

impl Transaction {
    pub fn once(date: Date, amount: f64) -> Self {
        Self {
            payout: Payout { date, amount },
            frequency: TransactionFrequency::Once,
        }
    }

    pub fn recurring(date: Date, amount: f64, frequency: TransactionFrequency) -> Self {
        Self {
            payout: Payout { date, amount },
            frequency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositConditions {
    /// Initial principal
    pub sum: f64,
    /// Nominal annual interest rate, percent
    pub rate: f64,
    pub term: u32,
    #[serde(default)]
    pub term_unit: DepositTermUnit,
    /// Fold interest into the balance at each payout date
    #[serde(default)]
    pub capitalization: bool,
    #[serde(default)]
    pub payout_frequency: PayoutFrequency,
    /// Income tax rate applied to taxable interest, percent
    #[serde(default)]
    pub tax_rate: f64,
    /// Reference rate that sets the yearly tax-free interest allowance, percent
    #[serde(default)]
    pub key_rate: f64,
    /// Unused tax-free allowance carried in from earlier periods
    #[serde(default)]
    pub non_taxable_remainder: f64,
    pub start_date: Date,
    #[serde(default)]
    pub funds: Vec<Transaction>,
    #[serde(default)]
    pub withdrawals: Vec<Transaction>,
}

impl DepositConditions {
    /// Check the preconditions the deposit simulator relies on.
    ///
    /// Withdrawals exceeding the available balance are not detected here; the
    /// simulator reports them through a `tracing` warning.
    pub fn validate(&self) -> Result<(), ConditionsError> {
        if self.sum.is_nan() || self.sum <= 0.0 {
            return Err(ConditionsError::NonPositiveSum(self.sum));
        }
        if self.rate.is_nan() || self.rate < 0.0 {
            return Err(ConditionsError::NegativeRate(self.rate));
        }
        if self.term == 0 {
            return Err(ConditionsError::NonPositiveTerm);
        }
        let max = self.term_unit.max_term();
        if self.term > max {
            return Err(ConditionsError::TermTooLong {
                term: self.term,
                max,
                unit: self.term_unit.name(),
            });
        }
        if !(0.0..=100.0).contains(&self.tax_rate) {
            return Err(ConditionsError::TaxRateOutOfRange(self.tax_rate));
        }
        if self.key_rate.is_nan() || self.key_rate < 0.0 {
            return Err(ConditionsError::NegativeKeyRate(self.key_rate));
        }
        if self.non_taxable_remainder.is_nan() || self.non_taxable_remainder < 0.0 {
            return Err(ConditionsError::NegativeRemainder(self.non_taxable_remainder));
        }
        if let Some(tx) = self
            .funds
            .iter()
            .chain(&self.withdrawals)
            .find(|tx| tx.payout.amount.is_nan() || tx.payout.amount <= 0.0)
        {
            return Err(ConditionsError::NonPositiveTransaction {
                date: tx.payout.date,
                amount: tx.payout.amount,
            });
        }
        if !self
            .payout_frequency
            .is_compatible_with(self.term_unit, self.term)
        {
            return Err(ConditionsError::IncompatiblePayoutFrequency {
                frequency: self.payout_frequency.name(),
                unit: self.term_unit.name(),
            });
        }
        Ok(())
    }
}

/// Everything the deposit simulation produces. All sequences are chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositResult {
    /// Interest payout events (capitalized or disbursed)
    pub payouts: Vec<Payout>,
    /// Payout calendar; the last entry is the finish date
    pub pay_dates: Vec<Date>,
    /// Interest amount of each payout
    pub payments: Vec<f64>,
    /// Tax per closed tax period, positive amounts only
    pub taxes: Vec<f64>,
    /// Fund (positive) and withdrawal (negative) occurrences applied
    pub transactions: Vec<Payout>,
    pub start_date: Date,
    pub finish_date: Date,
    /// Annualized interest over the average contributed balance, percent
    pub effective_rate: f64,
    pub interest_total: f64,
    pub tax_total: f64,
    /// Final balance: principal, net transactions, interest, minus tax
    pub total: f64,
}
