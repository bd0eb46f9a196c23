use itertools::Itertools;
use tracing::{debug, trace};

use crate::{error::ParseError, number::parse_number, operator::Operator};

#[derive(Clone, Copy, PartialEq, Debug)]
enum Entry {
    Op(Operator),
    OpenParen,
}

/// Shunting Yard state for one conversion. `)` is never stored on the stack.
#[derive(Debug, Default)]
pub struct Converter {
    stack: Vec<Entry>,
    output: Vec<String>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&mut self, token: String) {
        trace!(%token, "output");
        self.output.push(token);
    }

    // move operators from the stack to output while the top one does not bind
    // looser than `op`; equal precedence pops, which makes everything left-associative
    fn pop_while_precedence(&mut self, op: Operator) {
        while let Some(&Entry::Op(top)) = self.stack.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.stack.pop();
            self.emit(top.to_string());
        }
    }

    // move operators from the stack to output until the matching `(`, which is dropped
    fn pop_until_paren(&mut self) -> Result<(), ParseError> {
        loop {
            match self.stack.pop() {
                Some(Entry::OpenParen) => return Ok(()),
                Some(Entry::Op(op)) => self.emit(op.to_string()),
                None => return Err(ParseError::UnmatchedCloseParen),
            }
        }
    }

    // Must be called only after the last token.
    fn pop_all(&mut self) -> Result<(), ParseError> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                Entry::OpenParen => return Err(ParseError::UnmatchedOpenParen),
                Entry::Op(op) => self.emit(op.to_string()),
            }
        }
        Ok(())
    }

    pub fn push(&mut self, token: &str) -> Result<(), ParseError> {
        if let Some(op) = Operator::from_token(token) {
            self.pop_while_precedence(op);
            self.stack.push(Entry::Op(op));
            return Ok(());
        }
        match token {
            "(" => self.stack.push(Entry::OpenParen),
            ")" => self.pop_until_paren()?,
            _ => {
                if parse_number(token).is_none() {
                    return Err(ParseError::InvalidNumber(token.to_owned()));
                }
                self.emit(token.to_owned());
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<String>, ParseError> {
        self.pop_all()?;
        Ok(self.output)
    }
}

/// Converts infix tokens to postfix (Reverse Polish) order.
///
/// Numbers keep their source text. The output never contains parentheses.
pub fn convert<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, ParseError> {
    #[cfg(feature = "tracy")]
    profiling::scope!("convert");
    if tokens.is_empty() {
        return Err(ParseError::EmptyTokenList);
    }
    let mut converter = Converter::new();
    for token in tokens {
        converter.push(token.as_ref())?;
    }
    let postfix = converter.finish()?;
    debug!(postfix = %postfix.iter().join(" "), "converted to postfix");
    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence() {
        assert_eq!(convert(&["2", "+", "3"]).unwrap(), ["2", "3", "+"]);
        assert_eq!(
            convert(&["2", "+", "3", "*", "4"]).unwrap(),
            ["2", "3", "4", "*", "+"]
        );
        assert_eq!(
            convert(&["10", "-", "6", "/", "2"]).unwrap(),
            ["10", "6", "2", "/", "-"]
        );
        assert_eq!(
            convert(&["2", "*", "3", "-", "4"]).unwrap(),
            ["2", "3", "*", "4", "-"]
        );
    }

    #[test]
    fn left_associative() {
        assert_eq!(
            convert(&["1", "+", "2", "+", "3", "+", "4", "+", "5"]).unwrap(),
            ["1", "2", "+", "3", "+", "4", "+", "5", "+"]
        );
        assert_eq!(
            convert(&["8", "/", "4", "*", "2"]).unwrap(),
            ["8", "4", "/", "2", "*"]
        );
        assert_eq!(
            convert(&["8", "-", "4", "+", "2"]).unwrap(),
            ["8", "4", "-", "2", "+"]
        );
    }

    #[test]
    fn parentheses() {
        assert_eq!(
            convert(&["(", "2", "+", "3", ")", "*", "4"]).unwrap(),
            ["2", "3", "+", "4", "*"]
        );
        assert_eq!(
            convert(&["(", "(", "2", "+", "3", ")", "*", "4", ")", "-", "5"]).unwrap(),
            ["2", "3", "+", "4", "*", "5", "-"]
        );
        assert_eq!(
            convert(&["(", "2", "+", "3", ")", "*", "(", "4", "+", "1", ")"]).unwrap(),
            ["2", "3", "+", "4", "1", "+", "*"]
        );
        assert_eq!(convert(&["(", "7", ")"]).unwrap(), ["7"]);
    }

    #[test]
    fn keeps_number_text() {
        assert_eq!(convert(&["1.50", "*", "007"]).unwrap(), ["1.50", "007", "*"]);
        assert_eq!(convert(&[".5", "+", "1."]).unwrap(), [".5", "1.", "+"]);
    }

    #[test]
    fn errors() {
        let empty: [&str; 0] = [];
        assert_eq!(convert(&empty), Err(ParseError::EmptyTokenList));
        assert_eq!(
            convert(&["2", "+", "3", ")"]),
            Err(ParseError::UnmatchedCloseParen)
        );
        assert_eq!(
            convert(&[")", "2", "+", "3"]),
            Err(ParseError::UnmatchedCloseParen)
        );
        assert_eq!(
            convert(&["(", "2", "+", "3"]),
            Err(ParseError::UnmatchedOpenParen)
        );
        assert_eq!(
            convert(&["2", "+", "abc"]),
            Err(ParseError::InvalidNumber("abc".to_owned()))
        );
        assert_eq!(
            convert(&["1.2.3"]),
            Err(ParseError::InvalidNumber("1.2.3".to_owned()))
        );
        assert_eq!(
            convert(&["."]),
            Err(ParseError::InvalidNumber(".".to_owned()))
        );
    }

    #[test]
    fn rejects_overflowing_literals() {
        let big = format!("1{}", "0".repeat(400));
        assert_eq!(
            convert(&[big.as_str(), "-", "1"]),
            Err(ParseError::InvalidNumber(big.clone()))
        );
        assert_eq!(convert(&["inf"]).unwrap(), ["inf"]);
    }

    #[test]
    fn first_error_wins() {
        assert_eq!(
            convert(&["x", ")"]),
            Err(ParseError::InvalidNumber("x".to_owned()))
        );
        assert_eq!(
            convert(&[")", "x"]),
            Err(ParseError::UnmatchedCloseParen)
        );
    }

    #[test]
    fn owned_tokens() {
        let tokens = vec!["3".to_owned(), "*".to_owned(), "4".to_owned()];
        assert_eq!(convert(&tokens).unwrap(), ["3", "4", "*"]);
    }
}
