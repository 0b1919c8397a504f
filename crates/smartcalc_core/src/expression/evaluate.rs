//! Stack machine executing a postfix [`Expression`]

use super::parser::Expression;
use super::token::Token;
use crate::error::ExprError;

fn finite(value: f64) -> Result<f64, ExprError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExprError::InvalidExpression)
    }
}

impl Expression {
    /// Evaluate a program that contains no variable.
    pub fn evaluate(&self) -> Result<f64, ExprError> {
        if self.has_variable() {
            return Err(ExprError::InvalidExpression);
        }
        self.run(None)
    }

    /// Evaluate with the variable bound to `x`. `x` is used as given; callers
    /// crossing the public boundary round it first.
    pub fn evaluate_with(&self, x: f64) -> Result<f64, ExprError> {
        self.run(Some(x))
    }

    fn run(&self, x: Option<f64>) -> Result<f64, ExprError> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.program().len());
        for token in self.program() {
            let value = match *token {
                Token::Number(value) => value,
                Token::Variable => x.ok_or(ExprError::InvalidExpression)?,
                Token::Unary(op) => {
                    let operand = stack.pop().ok_or(ExprError::InvalidSyntax)?;
                    op.apply(operand)
                }
                Token::Function(function) => {
                    let operand = stack.pop().ok_or(ExprError::InvalidSyntax)?;
                    function.apply(operand)
                }
                Token::Binary(op) => {
                    let rhs = stack.pop().ok_or(ExprError::InvalidSyntax)?;
                    let lhs = stack.pop().ok_or(ExprError::InvalidSyntax)?;
                    op.apply(lhs, rhs)
                }
            };
            stack.push(finite(value)?);
        }
        match stack.as_slice() {
            [result] => Ok(*result),
            _ => Err(ExprError::InvalidExpression),
        }
    }
}
