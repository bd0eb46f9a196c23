//! Arithmetic over `f64` with the Shunting Yard algorithm.
//!
//! Text goes through three pure stages: [`scan`] splits it into tokens, [`convert`]
//! reorders them into postfix, and [`evaluate`] runs the postfix form on a value stack.
//! Each stage can be called on its own; [`calculate`] chains all three.
//!
//! ```
//! let postfix = yard::convert(&yard::scan("2 + 3 * 4").unwrap()).unwrap();
//! assert_eq!(postfix, ["2", "3", "4", "*", "+"]);
//! assert_eq!(yard::evaluate(&postfix), Ok(14.0));
//! ```

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

mod converter;
mod error;
mod evaluator;
mod number;
mod operator;
mod scanner;

pub use converter::{convert, Converter};
pub use error::{Error, EvalError, ParseError, ScanError};
pub use evaluator::{evaluate, Evaluator};
pub use operator::Operator;
pub use scanner::{scan, Scanner};

/// Scans and converts `expression` without evaluating it.
pub fn to_postfix(expression: &str) -> Result<Vec<String>, Error> {
    let tokens = scan(expression)?;
    Ok(convert(&tokens)?)
}

pub fn calculate(expression: &str) -> Result<f64, Error> {
    let postfix = to_postfix(expression)?;
    Ok(evaluate(&postfix)?)
}

/// Calculates every expression independently, in parallel. Results keep the input order.
pub fn calculate_all<S: AsRef<str> + Sync>(expressions: &[S]) -> Vec<Result<f64, Error>> {
    #[cfg(feature = "tracy")]
    profiling::scope!("calculate_all");
    expressions
        .par_iter()
        .map(|expr| calculate(expr.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline() {
        assert_eq!(calculate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(calculate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(
            to_postfix("(1 + 2) / 3").unwrap(),
            ["1", "2", "+", "3", "/"]
        );
    }

    #[test]
    fn stage_errors() {
        assert_eq!(
            calculate("2 + a"),
            Err(Error::Scan(ScanError::InvalidCharacter('a', 4)))
        );
        assert_eq!(
            calculate("(2 + 3"),
            Err(Error::Parse(ParseError::UnmatchedOpenParen))
        );
        assert_eq!(
            calculate("10 / 0"),
            Err(Error::Eval(EvalError::DivisionByZero))
        );
        assert_eq!(
            calculate("-5"),
            Err(Error::Eval(EvalError::InsufficientOperands(Operator::Sub)))
        );
    }

    #[test]
    fn batch() {
        let results = calculate_all(&["1 + 1", "2 * (3", "9 / 3"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(2.0));
        assert_eq!(results[1], Err(ParseError::UnmatchedOpenParen.into()));
        assert_eq!(results[2], Ok(3.0));
    }
}
