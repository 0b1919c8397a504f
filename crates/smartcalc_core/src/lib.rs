//! Financial and arithmetic calculation engine
//!
//! This crate is a pure, synchronous function library. It provides:
//! - Arithmetic expression evaluation with `+ - * / mod ^`, unary signs and
//!   the functions `sqrt sin cos tan asin acos atan ln log`
//! - Equation evaluation and tabulation over the single variable `x`
//! - Loan repayment schedules (annuity and differentiated)
//! - Deposit simulation with capitalization, scheduled funds and withdrawals,
//!   and yearly interest tax
//!
//! Every entry point returns a `Result`; the error types convert into the
//! closed [`ErrorCode`] taxonomy whose integer codes live in [`codes`].
//!
//! ```
//! use smartcalc_core::{evaluate_equation, evaluate_expression};
//!
//! assert_eq!(evaluate_expression("2 + 2 * 2"), Ok(6.0));
//! assert_eq!(evaluate_equation("x ^ 2", 3.0), Ok(9.0));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Engine modules
// ============================================================================

pub mod credit;
pub mod date_math;
pub mod deposit;
pub mod error;
pub mod expression;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod codes;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use codes::{IntCode, SUCCESS_CODE};
pub use error::{ConditionsError, EngineError, ErrorCode, ExprError};
pub use expression::{Expression, evaluate_equation, evaluate_expression, tabulate};
pub use model::{
    AmortizationKind, CreditConditions, CreditPeriod, CreditSchedule, CreditTermUnit,
    DepositConditions, DepositResult, DepositTermUnit, Payout, PayoutFrequency, Transaction,
    TransactionFrequency,
};

/// Build a credit schedule. See [`credit::calculate`].
pub fn calculate_credit(conditions: &CreditConditions) -> Result<CreditSchedule, EngineError> {
    credit::calculate(conditions)
}

/// Simulate a deposit. See [`deposit::calculate`].
pub fn calculate_deposit(conditions: &DepositConditions) -> Result<DepositResult, EngineError> {
    deposit::calculate(conditions)
}
