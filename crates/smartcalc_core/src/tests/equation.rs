//! Tests for equation mode
//!
//! These tests verify that:
//! - The variable is substituted everywhere it appears
//! - The bound value is rounded to ten decimal digits first
//! - Equations without the variable are rejected
//! - Tabulation reports per-point failures as gaps

use crate::error::{ErrorCode, ExprError};
use crate::expression::{Expression, evaluate_equation, round_variable, tabulate};

#[test]
fn test_variable_substitution() {
    assert_eq!(evaluate_equation("x", 4.0), Ok(4.0));
    assert_eq!(evaluate_equation("x * x + 2 * x + 1", 3.0), Ok(16.0));
    assert_eq!(evaluate_equation("-x ^ 2", 3.0), Ok(9.0));
    assert_eq!(evaluate_equation("sqrt(x) mod 2", 9.0), Ok(1.0));
    assert_eq!(evaluate_equation("(x)", -2.5), Ok(-2.5));
}

/// Values differing only past the tenth decimal digit give identical results
#[test]
fn test_variable_is_rounded_before_binding() {
    assert_eq!(round_variable(0.123_456_789_049), Ok(0.123_456_789_0));
    assert_eq!(round_variable(2.0), Ok(2.0));

    let a = evaluate_equation("x * 1000000", 0.1 + 0.2).unwrap();
    let b = evaluate_equation("x * 1000000", 0.3).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn test_equation_without_variable_is_invalid() {
    assert_eq!(evaluate_equation("5 + 3", 1.0), Err(ExprError::InvalidEquation));
    assert_eq!(evaluate_equation("sin(1)", 0.0), Err(ExprError::InvalidEquation));
}

#[test]
fn test_misplaced_variable() {
    assert_eq!(evaluate_equation("2x", 1.0), Err(ExprError::InvalidEquation));
    assert_eq!(evaluate_equation("x x", 1.0), Err(ExprError::InvalidEquation));
    assert_eq!(evaluate_equation("(1)x", 1.0), Err(ExprError::InvalidEquation));
    assert_eq!(evaluate_equation("x 2", 1.0), Err(ExprError::NumberUsage));
}

/// Syntax errors keep their own codes in equation mode
#[test]
fn test_syntax_errors_in_equation_mode() {
    assert_eq!(evaluate_equation("(x + 1", 1.0), Err(ExprError::BracesMismatch));
    assert_eq!(evaluate_equation("x * * 2", 1.0), Err(ExprError::OperatorUsage));
    assert_eq!(evaluate_equation("1 / x", 0.0), Err(ExprError::InvalidExpression));
}

#[test]
fn test_parse_once_evaluate_many() {
    let expr = Expression::parse_equation("x ^ 2 - 4").unwrap();
    let roots: Vec<f64> = [-2.0, 2.0]
        .iter()
        .map(|&x| expr.evaluate_with(x).unwrap())
        .collect();
    assert_eq!(roots, vec![0.0, 0.0]);
}

#[test]
fn test_tabulate_points_and_gaps() {
    let points = tabulate("1 / x", -1.0, 1.0, 4).unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], (-1.0, Ok(-1.0)));
    assert_eq!(points[2], (0.0, Err(ExprError::InvalidExpression)));
    assert_eq!(points[4], (1.0, Ok(1.0)));
}

#[test]
fn test_tabulate_rejects_bad_source() {
    assert_eq!(tabulate("2 + 2", 0.0, 1.0, 10), Err(ExprError::InvalidEquation));
    assert_eq!(tabulate("x +", 0.0, 1.0, 10), Err(ExprError::InvalidSyntax));
}

/// Point counts beyond what can be stored fail instead of aborting
#[test]
fn test_tabulate_unstorable_point_count() {
    assert_eq!(tabulate("x", 0.0, 1.0, usize::MAX), Err(ExprError::AllocationFailure));
    assert_eq!(tabulate("x", 0.0, 1.0, usize::MAX / 2), Err(ExprError::AllocationFailure));
    assert_eq!(ExprError::AllocationFailure.code(), ErrorCode::AllocationFailure);
}
