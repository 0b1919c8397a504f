use std::collections::TryReserveError;
use std::fmt;

/// Closed taxonomy of outcomes reported across the engine boundary.
///
/// `Success` is a distinct value so callers never have to infer success from
/// a sentinel numeric result. The integer codes are fixed and documented in
/// [`crate::codes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    AllocationFailure,
    InvalidSyntax,
    BracesMismatch,
    NumberUsage,
    OperatorUsage,
    FunctionUsage,
    InvalidEquation,
    InvalidExpression,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::Success,
        ErrorCode::AllocationFailure,
        ErrorCode::InvalidSyntax,
        ErrorCode::BracesMismatch,
        ErrorCode::NumberUsage,
        ErrorCode::OperatorUsage,
        ErrorCode::FunctionUsage,
        ErrorCode::InvalidEquation,
        ErrorCode::InvalidExpression,
    ];

    /// Human-readable description. Static data, safe to share across threads.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::AllocationFailure => "allocation fail",
            ErrorCode::InvalidSyntax => "invalid expression syntax",
            ErrorCode::BracesMismatch => "braces not matching",
            ErrorCode::NumberUsage => "incorrect number usage",
            ErrorCode::OperatorUsage => "incorrect operator usage",
            ErrorCode::FunctionUsage => "incorrect function usage",
            ErrorCode::InvalidEquation => "invalid equation",
            ErrorCode::InvalidExpression => "invalid expression",
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, ErrorCode::Success)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Failures of expression and equation evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprError {
    /// Result storage for a tabulation could not be reserved
    AllocationFailure,
    InvalidSyntax,
    BracesMismatch,
    NumberUsage,
    OperatorUsage,
    FunctionUsage,
    /// Equation mode only: no variable present, or the variable is misplaced
    InvalidEquation,
    /// Unknown characters, a variable outside equation mode, or a runtime
    /// numeric fault (division by zero, domain error, overflow)
    InvalidExpression,
}

impl ExprError {
    pub const fn code(self) -> ErrorCode {
        match self {
            ExprError::AllocationFailure => ErrorCode::AllocationFailure,
            ExprError::InvalidSyntax => ErrorCode::InvalidSyntax,
            ExprError::BracesMismatch => ErrorCode::BracesMismatch,
            ExprError::NumberUsage => ErrorCode::NumberUsage,
            ExprError::OperatorUsage => ErrorCode::OperatorUsage,
            ExprError::FunctionUsage => ErrorCode::FunctionUsage,
            ExprError::InvalidEquation => ErrorCode::InvalidEquation,
            ExprError::InvalidExpression => ErrorCode::InvalidExpression,
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().description())
    }
}

impl std::error::Error for ExprError {}

impl From<TryReserveError> for ExprError {
    fn from(_: TryReserveError) -> Self {
        ExprError::AllocationFailure
    }
}

impl From<ExprError> for ErrorCode {
    fn from(err: ExprError) -> Self {
        err.code()
    }
}

/// Runtime failures of the credit and deposit engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineError {
    AllocationFailure,
}

impl EngineError {
    pub const fn code(self) -> ErrorCode {
        match self {
            EngineError::AllocationFailure => ErrorCode::AllocationFailure,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().description())
    }
}

impl std::error::Error for EngineError {}

impl From<TryReserveError> for EngineError {
    fn from(_: TryReserveError) -> Self {
        EngineError::AllocationFailure
    }
}

impl From<EngineError> for ErrorCode {
    fn from(err: EngineError) -> Self {
        err.code()
    }
}

/// Push onto a result vector, reporting allocator exhaustion instead of aborting.
pub(crate) fn try_push<T>(vec: &mut Vec<T>, value: T) -> Result<(), EngineError> {
    vec.try_reserve(1)?;
    vec.push(value);
    Ok(())
}

/// Caller-side precondition violations reported by the `validate()` helpers.
///
/// The engines never produce these; they assume validated input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionsError {
    NonPositiveSum(f64),
    NegativeRate(f64),
    NonPositiveTerm,
    TermTooLong { term: u32, max: u32, unit: &'static str },
    TaxRateOutOfRange(f64),
    NegativeKeyRate(f64),
    NegativeRemainder(f64),
    NonPositiveTransaction { date: jiff::civil::Date, amount: f64 },
    IncompatiblePayoutFrequency { frequency: &'static str, unit: &'static str },
}

impl fmt::Display for ConditionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionsError::NonPositiveSum(sum) => write!(f, "sum must be positive (got {sum})"),
            ConditionsError::NegativeRate(rate) => {
                write!(f, "interest rate must not be negative (got {rate})")
            }
            ConditionsError::NonPositiveTerm => write!(f, "term must be positive"),
            ConditionsError::TermTooLong { term, max, unit } => {
                write!(f, "term of {term} {unit} exceeds the maximum of {max} {unit}")
            }
            ConditionsError::TaxRateOutOfRange(rate) => {
                write!(f, "tax rate must be within 0..=100 (got {rate})")
            }
            ConditionsError::NegativeKeyRate(rate) => {
                write!(f, "key rate must not be negative (got {rate})")
            }
            ConditionsError::NegativeRemainder(rem) => {
                write!(f, "non-taxable remainder must not be negative (got {rem})")
            }
            ConditionsError::NonPositiveTransaction { date, amount } => {
                write!(f, "transaction on {date} must have a positive amount (got {amount})")
            }
            ConditionsError::IncompatiblePayoutFrequency { frequency, unit } => {
                write!(f, "{frequency} payouts do not fit into a term measured in {unit}")
            }
        }
    }
}

impl std::error::Error for ConditionsError {}
