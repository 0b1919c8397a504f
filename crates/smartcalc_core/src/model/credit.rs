//! Loan conditions and repayment schedules

use serde::{Deserialize, Serialize};

use crate::date_math::MONTHS_IN_YEAR;
use crate::error::ConditionsError;

/// Longest accepted loan term
pub const MAX_TERM_YEARS: u32 = 50;
pub const MAX_TERM_MONTHS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreditTermUnit {
    #[default]
    Month,
    Year,
}

/// Amortization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmortizationKind {
    /// Constant total payment every period
    #[default]
    Annuity,
    /// Constant principal portion, interest on the remaining balance
    Differentiated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditConditions {
    /// Principal
    pub sum: f64,
    /// Nominal annual interest rate, percent
    pub rate: f64,
    pub term: u32,
    #[serde(default)]
    pub term_unit: CreditTermUnit,
    #[serde(default)]
    pub kind: AmortizationKind,
}

impl CreditConditions {
    /// Term expressed in monthly periods
    pub fn months(&self) -> u32 {
        match self.term_unit {
            CreditTermUnit::Month => self.term,
            CreditTermUnit::Year => self.term.saturating_mul(MONTHS_IN_YEAR as u32),
        }
    }

    /// Monthly interest rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.rate / (MONTHS_IN_YEAR as f64 * 100.0)
    }

    /// Check the preconditions the credit engine relies on.
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
        let (max, unit) = match self.term_unit {
            CreditTermUnit::Month => (MAX_TERM_MONTHS, "months"),
            CreditTermUnit::Year => (MAX_TERM_YEARS, "years"),
        };
        if self.term > max {
            return Err(ConditionsError::TermTooLong {
                term: self.term,
                max,
                unit,
            });
        }
        Ok(())
    }
}

/// Breakdown of a single monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditPeriod {
    /// 1-based period number
    pub number: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Principal still owed after this payment
    pub remaining: f64,
}

/// A complete repayment schedule, period 1 first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditSchedule {
    pub total: f64,
    /// `total - sum`
    pub overpay: f64,
    pub payments: Vec<f64>,
    pub periods: Vec<CreditPeriod>,
}
