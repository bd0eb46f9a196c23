use std::{mem, str::Chars};

use tracing::{debug, trace};

use crate::{error::ScanError, operator::Operator};

/// Splits an infix expression into number, operator and parenthesis tokens.
///
/// Numbers are kept as their source text. Whether a run of digits and points is a
/// valid float is left to the later stages.
pub struct Scanner<'a> {
    pos: usize,
    current: Option<char>,
    iter: Chars<'a>,
    number: String,
    tokens: Vec<String>,
}

impl<'a> Scanner<'a> {
    pub fn new(s: &'a str) -> Self {
        let mut iter = s.chars();
        let next = iter.next();
        Scanner {
            pos: 0,
            current: next,
            iter,
            number: String::new(),
            tokens: Vec::new(),
        }
    }

    fn next(&mut self) -> Option<char> {
        self.current = self.iter.next();
        if self.current.is_some() {
            self.pos += 1;
        }
        self.current
    }

    fn token(&mut self, token: String) {
        trace!(%token, pos = self.pos, "token");
        self.tokens.push(token);
    }

    fn flush_number(&mut self) {
        if !self.number.is_empty() {
            let number = mem::take(&mut self.number);
            self.token(number);
        }
    }

    fn scan_raw(&mut self) -> Result<(), ScanError> {
        while let Some(current) = self.current {
            if current.is_ascii_digit() || current == '.' {
                self.number.push(current);
            } else if Operator::from_char(current).is_some() || matches!(current, '(' | ')') {
                self.flush_number();
                self.token(current.to_string());
            } else if current.is_whitespace() {
                self.flush_number();
            } else {
                return Err(ScanError::InvalidCharacter(current, self.pos));
            }
            self.next();
        }
        self.flush_number();
        Ok(())
    }

    pub fn scan(mut self) -> Result<Vec<String>, ScanError> {
        self.scan_raw()?;
        if self.tokens.is_empty() {
            Err(ScanError::NoTokensFound)
        } else {
            Ok(self.tokens)
        }
    }
}

/// Tokenizes `expression`. Whitespace only separates tokens, so `"1+2"` and
/// `"1 + 2"` scan the same.
pub fn scan(expression: &str) -> Result<Vec<String>, ScanError> {
    #[cfg(feature = "tracy")]
    profiling::scope!("scan");
    if expression.is_empty() {
        return Err(ScanError::EmptyInput);
    }
    let tokens = Scanner::new(expression).scan()?;
    debug!(tokens = tokens.len(), "scanned expression");
    Ok(tokens)
}
