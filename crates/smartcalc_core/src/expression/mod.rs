//! Arithmetic expressions and single-variable equations
//!
//! Source text is lexed ([`token`]), converted to a postfix program
//! ([`parser`]) and executed on a value stack ([`evaluate`]). The public entry
//! points below are the whole boundary contract; [`Expression`] is exposed for
//! callers that want to parse once and evaluate many times.

pub mod evaluate;
pub mod parser;
pub mod token;

pub use parser::{Expression, Mode};
pub use token::VARIABLE;

use crate::error::ExprError;

/// Digits kept when binding the variable at the boundary
pub const VARIABLE_PRECISION: usize = 10;

/// Round a bound variable to [`VARIABLE_PRECISION`] decimal digits.
///
/// Formatting and re-parsing keeps results reproducible no matter how the
/// caller produced the value.
pub fn round_variable(x: f64) -> Result<f64, ExprError> {
    format!("{x:.prec$}", prec = VARIABLE_PRECISION)
        .parse::<f64>()
        .map_err(|_| ExprError::InvalidEquation)
}

/// Evaluate a plain arithmetic expression.
pub fn evaluate_expression(src: &str) -> Result<f64, ExprError> {
    tracing::debug!(len = src.len(), "Evaluating expression");
    let result = Expression::parse(src).and_then(|expr| expr.evaluate());
    if let Err(e) = result {
        tracing::debug!(error = %e, "Expression rejected");
    }
    result
}

/// Evaluate an expression that must reference the variable, bound to `x`.
pub fn evaluate_equation(src: &str, x: f64) -> Result<f64, ExprError> {
    tracing::debug!(len = src.len(), x = x, "Evaluating equation");
    let expr = Expression::parse_equation(src)?;
    if !expr.has_variable() {
        return Err(ExprError::InvalidEquation);
    }
    expr.evaluate_with(round_variable(x)?)
}

/// Evaluate an equation at `steps + 1` evenly spaced points of `[from, to]`.
///
/// Parse failures abort the whole call; evaluation failures at individual
/// points are returned in place so a plot can show them as gaps. A point
/// count that cannot be stored is an allocation failure.
pub fn tabulate(
    src: &str,
    from: f64,
    to: f64,
    steps: usize,
) -> Result<Vec<(f64, Result<f64, ExprError>)>, ExprError> {
    let expr = Expression::parse_equation(src)?;
    if !expr.has_variable() {
        return Err(ExprError::InvalidEquation);
    }
    let steps = steps.max(1);
    let width = (to - from) / steps as f64;
    let count = steps.checked_add(1).ok_or(ExprError::AllocationFailure)?;
    let mut points = Vec::new();
    points.try_reserve_exact(count)?;
    for i in 0..=steps {
        let x = if i == steps {
            to
        } else {
            from + width * i as f64
        };
        let y = round_variable(x).and_then(|x| expr.evaluate_with(x));
        points.push((x, y));
    }
    tracing::debug!(points = points.len(), "Tabulated equation");
    Ok(points)
}
