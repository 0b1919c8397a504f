//! Shunting-yard conversion from infix source to a postfix program
//!
//! Placement rules are enforced while converting, so a successfully parsed
//! [`Expression`] is always a well-formed postfix program: operands never
//! follow operands, binary operators always sit between operands, and braces
//! are balanced.

use super::token::{BinaryOp, Function, Lexeme, Lexer, Priority, Token, UnaryOp};
use crate::error::ExprError;

/// Whether the reserved variable may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Expression,
    Equation,
}

/// Pending entry on the operator stack
#[derive(Debug, Clone, Copy)]
enum Pending {
    OpenBrace,
    Function(Function),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Pending {
    fn to_token(self) -> Option<Token> {
        match self {
            Pending::OpenBrace => None,
            Pending::Function(f) => Some(Token::Function(f)),
            Pending::Unary(op) => Some(Token::Unary(op)),
            Pending::Binary(op) => Some(Token::Binary(op)),
        }
    }
}

/// An immutable, validated postfix program
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    program: Vec<Token>,
    has_variable: bool,
}

impl Expression {
    /// Parse a plain arithmetic expression; the variable is rejected.
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        Parser::new(src, Mode::Expression).run()
    }

    /// Parse an expression that may reference the variable.
    pub fn parse_equation(src: &str) -> Result<Self, ExprError> {
        Parser::new(src, Mode::Equation).run()
    }

    pub fn program(&self) -> &[Token] {
        &self.program
    }

    pub fn has_variable(&self) -> bool {
        self.has_variable
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    mode: Mode,
    output: Vec<Token>,
    pending: Vec<Pending>,
    expect_operand: bool,
    prev: Option<Lexeme>,
    has_variable: bool,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, mode: Mode) -> Self {
        Self {
            lexer: Lexer::new(src),
            mode,
            output: Vec::new(),
            pending: Vec::new(),
            expect_operand: true,
            prev: None,
            has_variable: false,
        }
    }

    fn run(mut self) -> Result<Expression, ExprError> {
        while let Some(lexeme) = self.lexer.next() {
            let lexeme = lexeme?;
            self.step(lexeme)?;
            self.prev = Some(lexeme);
        }
        if self.prev.is_none() {
            return Err(ExprError::InvalidExpression);
        }
        if self.expect_operand {
            return Err(ExprError::InvalidSyntax);
        }
        while let Some(top) = self.pending.pop() {
            let token = top.to_token().ok_or(ExprError::BracesMismatch)?;
            self.output.push(token);
        }
        Ok(Expression {
            program: self.output,
            has_variable: self.has_variable,
        })
    }

    fn step(&mut self, lexeme: Lexeme) -> Result<(), ExprError> {
        match lexeme {
            Lexeme::Number(value) => {
                if !self.expect_operand {
                    return Err(ExprError::NumberUsage);
                }
                self.operand(Token::Number(value));
            }
            Lexeme::Variable => {
                if self.mode == Mode::Expression {
                    return Err(ExprError::InvalidExpression);
                }
                if !self.expect_operand {
                    return Err(ExprError::InvalidEquation);
                }
                self.has_variable = true;
                self.operand(Token::Variable);
            }
            Lexeme::Plus | Lexeme::Minus if self.expect_operand => {
                let op = if lexeme == Lexeme::Plus {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Minus
                };
                self.pending.push(Pending::Unary(op));
            }
            Lexeme::Plus => self.binary(BinaryOp::Add)?,
            Lexeme::Minus => self.binary(BinaryOp::Sub)?,
            Lexeme::Star => self.binary(BinaryOp::Mul)?,
            Lexeme::Slash => self.binary(BinaryOp::Div)?,
            Lexeme::Mod => self.binary(BinaryOp::Mod)?,
            Lexeme::Caret => self.binary(BinaryOp::Pow)?,
            Lexeme::Function(function) => {
                if !self.expect_operand || !self.lexer.at_open_brace() {
                    return Err(ExprError::FunctionUsage);
                }
                self.pending.push(Pending::Function(function));
            }
            Lexeme::OpenBrace => {
                if !self.expect_operand {
                    return Err(ExprError::NumberUsage);
                }
                self.pending.push(Pending::OpenBrace);
            }
            Lexeme::CloseBrace => self.close_brace()?,
        }
        Ok(())
    }

    fn operand(&mut self, token: Token) {
        self.output.push(token);
        self.expect_operand = false;
    }

    fn binary(&mut self, op: BinaryOp) -> Result<(), ExprError> {
        if self.expect_operand {
            return Err(ExprError::OperatorUsage);
        }
        let priority = op.priority();
        while let Some(&top) = self.pending.last() {
            let top_priority = match top {
                Pending::Unary(_) => Priority::Sign,
                Pending::Binary(other) => other.priority(),
                Pending::OpenBrace | Pending::Function(_) => break,
            };
            let pops = if op.is_right_associative() {
                top_priority > priority
            } else {
                top_priority >= priority
            };
            if !pops {
                break;
            }
            self.pending.pop();
            if let Some(token) = top.to_token() {
                self.output.push(token);
            }
        }
        self.pending.push(Pending::Binary(op));
        self.expect_operand = true;
        Ok(())
    }

    fn close_brace(&mut self) -> Result<(), ExprError> {
        if self.expect_operand {
            // `()` or a dangling operator before `)`
            return match self.prev {
                None => Err(ExprError::BracesMismatch),
                Some(_) => Err(ExprError::InvalidSyntax),
            };
        }
        loop {
            match self.pending.pop() {
                None => return Err(ExprError::BracesMismatch),
                Some(Pending::OpenBrace) => break,
                Some(top) => {
                    if let Some(token) = top.to_token() {
                        self.output.push(token);
                    }
                }
            }
        }
        if let Some(&Pending::Function(function)) = self.pending.last() {
            self.pending.pop();
            self.output.push(Token::Function(function));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::token::BinaryOp::{Add, Mul, Pow, Sub};
    use crate::expression::token::Token::{Binary, Number, Unary};

    #[test]
    fn test_precedence_to_postfix() {
        let expr = Expression::parse("1 + 2 * 3").unwrap();
        assert_eq!(
            expr.program(),
            &[Number(1.0), Number(2.0), Number(3.0), Binary(Mul), Binary(Add)]
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        let expr = Expression::parse("8 - 3 - 2").unwrap();
        assert_eq!(
            expr.program(),
            &[Number(8.0), Number(3.0), Binary(Sub), Number(2.0), Binary(Sub)]
        );
    }

    #[test]
    fn test_right_associative_power() {
        let expr = Expression::parse("2 ^ 3 ^ 2").unwrap();
        assert_eq!(
            expr.program(),
            &[Number(2.0), Number(3.0), Number(2.0), Binary(Pow), Binary(Pow)]
        );
    }

    #[test]
    fn test_function_closes_with_its_brace() {
        let expr = Expression::parse("sin(1)^2").unwrap();
        assert_eq!(
            expr.program(),
            &[
                Number(1.0),
                Token::Function(Function::Sin),
                Number(2.0),
                Binary(Pow)
            ]
        );
    }

    #[test]
    fn test_unary_minus_is_tighter_than_power() {
        let expr = Expression::parse("-2^2").unwrap();
        assert_eq!(
            expr.program(),
            &[Number(2.0), Unary(UnaryOp::Minus), Number(2.0), Binary(Pow)]
        );
    }

    // Two spellings are equivalent when they compile to the same program.
    fn program(src: &str) -> Vec<Token> {
        Expression::parse(src)
            .unwrap_or_else(|e| panic!("{src}: {e}"))
            .program()
            .to_vec()
    }

    #[test]
    fn test_implicit_grouping_matches_explicit() {
        assert_eq!(program("1 + 2 - 3 + 4"), program("((1 + 2) - 3) + 4"));
        assert_eq!(program("1 * 2 / 3 mod 4"), program("((1 * 2) / 3) mod 4"));
        assert_eq!(program("1 + 2 * 3 ^ 4"), program("1 + (2 * (3 ^ 4))"));
        assert_eq!(program("2 ^ 3 ^ 4 ^ 5"), program("2 ^ (3 ^ (4 ^ 5))"));
        assert_eq!(program("-1 ^ 2 * 3"), program("((-1) ^ 2) * 3"));
        assert_eq!(program("sqrt(4) * 2"), program("(sqrt(4)) * 2"));
    }

    #[test]
    fn test_placement_errors() {
        assert_eq!(Expression::parse("1 2"), Err(ExprError::NumberUsage));
        assert_eq!(Expression::parse("1 */ 2"), Err(ExprError::OperatorUsage));
        assert_eq!(Expression::parse("* 2"), Err(ExprError::OperatorUsage));
        assert_eq!(Expression::parse("2 sin(1)"), Err(ExprError::FunctionUsage));
        assert_eq!(Expression::parse("sin 1"), Err(ExprError::FunctionUsage));
        assert_eq!(Expression::parse("1 +"), Err(ExprError::InvalidSyntax));
        assert_eq!(Expression::parse("()"), Err(ExprError::InvalidSyntax));
    }

    #[test]
    fn test_brace_errors() {
        assert_eq!(Expression::parse("(1+2"), Err(ExprError::BracesMismatch));
        assert_eq!(Expression::parse("1+2)"), Err(ExprError::BracesMismatch));
        assert_eq!(Expression::parse(")"), Err(ExprError::BracesMismatch));
    }

    #[test]
    fn test_variable_by_mode() {
        assert_eq!(Expression::parse("x + 1"), Err(ExprError::InvalidExpression));
        let eq = Expression::parse_equation("x + 1").unwrap();
        assert!(eq.has_variable());
        assert_eq!(Expression::parse_equation("2x"), Err(ExprError::InvalidEquation));
        assert_eq!(Expression::parse_equation("xx"), Err(ExprError::InvalidEquation));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Expression::parse(""), Err(ExprError::InvalidExpression));
        assert_eq!(Expression::parse("   "), Err(ExprError::InvalidExpression));
    }
}
