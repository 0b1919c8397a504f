//! Fixed integer codes for every enumeration crossing the engine boundary
//!
//! | enumeration            | codes                                                    |
//! |------------------------|----------------------------------------------------------|
//! | `ErrorCode`            | success 0, allocation 1, syntax 2, braces 3, number 4, operator 5, function 6, equation 7, expression 8 |
//! | `CreditTermUnit`       | month 0, year 1                                          |
//! | `AmortizationKind`     | annuity 0, differentiated 1                              |
//! | `DepositTermUnit`      | day 0, month 1, year 2                                   |
//! | `PayoutFrequency`      | daily 0, weekly 1, monthly 2, quarterly 3, semiannual 6, annual 12 |
//! | `TransactionFrequency` | months between occurrences: 0, 1, 2, 3, 6, 12            |
//! | capitalization flag    | off 0, on 1                                              |

use crate::error::ErrorCode;
use crate::model::{
    AmortizationKind, CreditTermUnit, DepositTermUnit, PayoutFrequency, TransactionFrequency,
};

/// Code reported for a successful call
pub const SUCCESS_CODE: i32 = 0;

/// Two-way mapping between a boundary enumeration and its integer code
pub trait IntCode: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn code(self) -> i32;

    fn from_code(code: i32) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.code() == code)
    }
}

impl IntCode for ErrorCode {
    const VARIANTS: &'static [Self] = &ErrorCode::ALL;

    fn code(self) -> i32 {
        match self {
            ErrorCode::Success => SUCCESS_CODE,
            ErrorCode::AllocationFailure => 1,
            ErrorCode::InvalidSyntax => 2,
            ErrorCode::BracesMismatch => 3,
            ErrorCode::NumberUsage => 4,
            ErrorCode::OperatorUsage => 5,
            ErrorCode::FunctionUsage => 6,
            ErrorCode::InvalidEquation => 7,
            ErrorCode::InvalidExpression => 8,
        }
    }
}

impl IntCode for CreditTermUnit {
    const VARIANTS: &'static [Self] = &[CreditTermUnit::Month, CreditTermUnit::Year];

    fn code(self) -> i32 {
        match self {
            CreditTermUnit::Month => 0,
            CreditTermUnit::Year => 1,
        }
    }
}

impl IntCode for AmortizationKind {
    const VARIANTS: &'static [Self] = &[AmortizationKind::Annuity, AmortizationKind::Differentiated];

    fn code(self) -> i32 {
        match self {
            AmortizationKind::Annuity => 0,
            AmortizationKind::Differentiated => 1,
        }
    }
}

impl IntCode for DepositTermUnit {
    const VARIANTS: &'static [Self] = &[
        DepositTermUnit::Day,
        DepositTermUnit::Month,
        DepositTermUnit::Year,
    ];

    fn code(self) -> i32 {
        match self {
            DepositTermUnit::Day => 0,
            DepositTermUnit::Month => 1,
            DepositTermUnit::Year => 2,
        }
    }
}

impl IntCode for PayoutFrequency {
    const VARIANTS: &'static [Self] = &[
        PayoutFrequency::Daily,
        PayoutFrequency::Weekly,
        PayoutFrequency::Monthly,
        PayoutFrequency::Quarterly,
        PayoutFrequency::SemiAnnual,
        PayoutFrequency::Annual,
    ];

    fn code(self) -> i32 {
        match self {
            PayoutFrequency::Daily => 0,
            PayoutFrequency::Weekly => 1,
            PayoutFrequency::Monthly => 2,
            PayoutFrequency::Quarterly => 3,
            PayoutFrequency::SemiAnnual => 6,
            PayoutFrequency::Annual => 12,
        }
    }
}

impl IntCode for TransactionFrequency {
    const VARIANTS: &'static [Self] = &[
        TransactionFrequency::Once,
        TransactionFrequency::Monthly,
        TransactionFrequency::EveryTwoMonths,
        TransactionFrequency::Quarterly,
        TransactionFrequency::SemiAnnual,
        TransactionFrequency::Annual,
    ];

    fn code(self) -> i32 {
        self.months()
    }
}

impl IntCode for bool {
    const VARIANTS: &'static [Self] = &[false, true];

    fn code(self) -> i32 {
        i32::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<T: IntCode + PartialEq + std::fmt::Debug>() {
        let mut seen = Vec::new();
        for &variant in T::VARIANTS {
            let code = variant.code();
            assert!(!seen.contains(&code), "duplicate code {code} for {variant:?}");
            seen.push(code);
            assert_eq!(T::from_code(code), Some(variant));
        }
    }

    #[test]
    fn test_codes_are_unique_and_reversible() {
        assert_round_trip::<ErrorCode>();
        assert_round_trip::<CreditTermUnit>();
        assert_round_trip::<AmortizationKind>();
        assert_round_trip::<DepositTermUnit>();
        assert_round_trip::<PayoutFrequency>();
        assert_round_trip::<TransactionFrequency>();
        assert_round_trip::<bool>();
    }

    #[test]
    fn test_error_codes_are_fixed() {
        assert_eq!(ErrorCode::Success.code(), SUCCESS_CODE);
        assert_eq!(ErrorCode::BracesMismatch.code(), 3);
        assert_eq!(ErrorCode::InvalidEquation.code(), 7);
        assert_eq!(ErrorCode::InvalidExpression.code(), 8);
        assert_eq!(ErrorCode::from_code(9), None);
        assert_eq!(ErrorCode::from_code(-1), None);
    }

    #[test]
    fn test_frequency_codes_match_months() {
        assert_eq!(PayoutFrequency::from_code(6), Some(PayoutFrequency::SemiAnnual));
        assert_eq!(PayoutFrequency::from_code(4), None);
        assert_eq!(TransactionFrequency::from_code(2), Some(TransactionFrequency::EveryTwoMonths));
    }
}
