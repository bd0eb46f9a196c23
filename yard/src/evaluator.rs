use tracing::{debug, trace};

use crate::{error::EvalError, number::parse_number, operator::Operator};

/// Stack machine over postfix tokens.
#[derive(Debug, Default)]
pub struct Evaluator {
    values: Vec<f64>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, op: Operator) -> Result<(), EvalError> {
        // the value pushed last is the right-hand operand
        let (b, a) = match (self.values.pop(), self.values.pop()) {
            (Some(b), Some(a)) => (b, a),
            _ => return Err(EvalError::InsufficientOperands(op)),
        };
        let v = op.apply(a, b).ok_or(EvalError::DivisionByZero)?;
        trace!(%op, a, b, result = v, "applied");
        self.values.push(v);
        Ok(())
    }

    pub fn push(&mut self, token: &str) -> Result<(), EvalError> {
        if let Some(op) = Operator::from_token(token) {
            return self.apply(op);
        }
        let v = parse_number(token).ok_or_else(|| EvalError::InvalidNumber(token.to_owned()))?;
        self.values.push(v);
        Ok(())
    }

    pub fn finish(self) -> Result<f64, EvalError> {
        match self.values.as_slice() {
            [v] => Ok(*v),
            [] => Err(EvalError::EmptyExpression),
            _ => Err(EvalError::TooManyOperands),
        }
    }
}

/// Evaluates a postfix token sequence, either produced by
/// [`convert`](crate::convert) or built by hand.
pub fn evaluate<S: AsRef<str>>(postfix: &[S]) -> Result<f64, EvalError> {
    #[cfg(feature = "tracy")]
    profiling::scope!("evaluate");
    if postfix.is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    let mut evaluator = Evaluator::new();
    for token in postfix {
        evaluator.push(token.as_ref())?;
    }
    let result = evaluator.finish()?;
    debug!(result, "evaluated postfix");
    Ok(result)
}
