//! Tests for the calculation engine
//!
//! Tests are organized by topic:
//! - `expression` - Plain expression grammar, precedence and error codes
//! - `equation` - Variable binding, rounding and tabulation
//! - `credit` - Annuity and differentiated schedules
//! - `deposit` - Deposit accrual, transactions, taxes and conservation
//! - `scenarios` - Pinned end-to-end regression cases

mod equation;
