//! Lexical units of an arithmetic expression
//!
//! The lexer turns source text into [`Lexeme`]s without deciding whether a
//! `+`/`-` is unary or binary; that depends on parser state. The parser emits
//! [`Token`]s, the postfix alphabet the evaluator executes.

use crate::error::ExprError;

/// The single free symbol of equation mode
pub const VARIABLE: char = 'x';
const VARIABLE_BYTE: u8 = VARIABLE as u8;

/// Operator binding strength, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Simple,
    Complex,
    Power,
    Sign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Log,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sqrt" => Function::Sqrt,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "ln" => Function::Ln,
            "log" => Function::Log,
            _ => return None,
        };
        Some(function)
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            Function::Sqrt => value.sqrt(),
            Function::Sin => value.sin(),
            Function::Cos => value.cos(),
            Function::Tan => value.tan(),
            Function::Asin => value.asin(),
            Function::Acos => value.acos(),
            Function::Atan => value.atan(),
            Function::Ln => value.ln(),
            Function::Log => value.log10(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnaryOp::Plus => value,
            UnaryOp::Minus => -value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn priority(self) -> Priority {
        match self {
            BinaryOp::Add | BinaryOp::Sub => Priority::Simple,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Priority::Complex,
            BinaryOp::Pow => Priority::Power,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Pow)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Mod => lhs % rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// One instruction of the postfix program
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Variable,
    Unary(UnaryOp),
    Binary(BinaryOp),
    Function(Function),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lexeme {
    Number(f64),
    Variable,
    Plus,
    Minus,
    Star,
    Slash,
    Mod,
    Caret,
    OpenBrace,
    CloseBrace,
    Function(Function),
}

/// Streaming lexer over an expression string
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// `digits [ '.' digits* ] [ ('e'|'E') ['+'|'-'] digits ]`
    fn number(&mut self) -> Result<Lexeme, ExprError> {
        let start = self.pos;
        self.eat_digits();
        if self.peek_byte() == Some(b'.') {
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                // Not an exponent; leave the letter to the identifier rules
                self.pos = mark;
            }
        }
        self.src[start..self.pos]
            .parse::<f64>()
            .map(Lexeme::Number)
            .map_err(|_| ExprError::NumberUsage)
    }

    /// Identifiers stop at the variable letter so `xx` and `modx` split apart.
    fn identifier(&mut self) -> Result<Lexeme, ExprError> {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            if !b.is_ascii_alphabetic() || b == VARIABLE_BYTE {
                break;
            }
            self.pos += 1;
        }
        match &self.src[start..self.pos] {
            "mod" => Ok(Lexeme::Mod),
            name => Function::from_name(name)
                .map(Lexeme::Function)
                .ok_or(ExprError::FunctionUsage),
        }
    }

    /// Whether the next non-whitespace character opens a brace
    pub fn at_open_brace(&mut self) -> bool {
        self.skip_whitespace();
        self.peek_byte() == Some(b'(')
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme, ExprError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let b = self.peek_byte()?;
        let single = match b {
            b'+' => Some(Lexeme::Plus),
            b'-' => Some(Lexeme::Minus),
            b'*' => Some(Lexeme::Star),
            b'/' => Some(Lexeme::Slash),
            b'^' => Some(Lexeme::Caret),
            b'(' => Some(Lexeme::OpenBrace),
            b')' => Some(Lexeme::CloseBrace),
            VARIABLE_BYTE => Some(Lexeme::Variable),
            _ => None,
        };
        if let Some(lexeme) = single {
            self.pos += 1;
            return Some(Ok(lexeme));
        }
        let lexeme = match b {
            b'0'..=b'9' => self.number(),
            b if b.is_ascii_alphabetic() => self.identifier(),
            _ => Err(ExprError::InvalidExpression),
        };
        if lexeme.is_err() {
            // Stop after the first error
            self.pos = self.src.len();
        }
        Some(lexeme)
    }
}
