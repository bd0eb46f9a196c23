use thiserror::Error;

use crate::operator::Operator;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("empty expression")]
    EmptyInput,
    #[error("no valid tokens found")]
    NoTokensFound,
    /// The position is a zero-based char index, not a byte offset.
    #[error("invalid character '{0}' at position {1}")]
    InvalidCharacter(char, usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty token list")]
    EmptyTokenList,
    #[error("mismatched parentheses: unmatched ')'")]
    UnmatchedCloseParen,
    #[error("mismatched parentheses: unmatched '('")]
    UnmatchedOpenParen,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("invalid expression: insufficient operands for operator '{0}'")]
    InsufficientOperands(Operator),
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("invalid expression: too many operands")]
    TooManyOperands,
}

/// Failure of any stage of the full pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Char position of the offending character, if the scanner rejected one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Scan(ScanError::InvalidCharacter(_, pos)) => Some(*pos),
            _ => None,
        }
    }
}
