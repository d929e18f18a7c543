use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates an arithmetic operator.
    ///
    /// `+` adds numbers, joins strings and concatenates arrays; any other
    /// pairing fails with `CannotConcat`. The remaining operators need two
    /// numbers. Division and modulo by zero are rejected before the operation
    /// runs. `%` is the floating remainder, so its sign follows the dividend.
    ///
    /// # Parameters
    /// - `op`: One of `+ - * / % **`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Example
    /// ```
    /// use dlite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let r = Evaluator::eval_arithmetic(BinaryOperator::Mod,
    ///                                    &Value::Number(-7.0),
    ///                                    &Value::Number(3.0),
    ///                                    1).unwrap();
    /// assert!(matches!(r, Value::Number(n) if n == -1.0));
    ///
    /// let s = Evaluator::eval_arithmetic(BinaryOperator::Add,
    ///                                    &Value::from("ab"),
    ///                                    &Value::from("cd"),
    ///                                    1).unwrap();
    /// assert_eq!(s.to_string(), "abcd");
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        if op == Add {
            return Self::eval_add(left, right, line);
        }

        let l = left.as_number(line)?;
        let r = right.as_number(line)?;

        let result = match op {
            Sub => l - r,
            Mul => l * r,
            Div => {
                if r == 0.0 {
                    return Err(RuntimeError::DivByZero { line });
                }
                l / r
            },
            Mod => {
                if r == 0.0 {
                    return Err(RuntimeError::ModByZero { line });
                }
                l % r
            },
            Pow => l.powf(r),
            _ => {
                return Err(RuntimeError::UnknownOperator { operator: op.to_string(),
                                                           line });
            },
        };

        Ok(Value::Number(result))
    }

    fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            (Value::Array(a), Value::Array(b)) => Self::concat_arrays(a, b, line),
            _ => {
                Err(RuntimeError::CannotConcat { left:  left.data_type().to_string(),
                                                 right: right.data_type().to_string(),
                                                 line })
            },
        }
    }

    /// Concatenates two arrays.
    ///
    /// An empty side always matches; otherwise the data types of the first
    /// elements must agree.
    fn concat_arrays(a: &Rc<Vec<Value>>, b: &Rc<Vec<Value>>, line: usize) -> EvalResult<Value> {
        if let (Some(first_a), Some(first_b)) = (a.first(), b.first())
           && first_a.data_type() != first_b.data_type()
        {
            return Err(RuntimeError::TypeMismatch { expected: first_a.data_type().to_string(),
                                                    found:    first_b.data_type().to_string(),
                                                    line });
        }

        let mut values = Vec::with_capacity(a.len() + b.len());
        values.extend(a.iter().cloned());
        values.extend(b.iter().cloned());

        Ok(Value::from(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Value {
        Value::from(values.iter().copied().map(Value::Number).collect::<Vec<_>>())
    }

    #[test]
    fn division_and_modulo_by_zero_fail() {
        let zero = Value::Number(0.0);
        let one = Value::Number(1.0);

        assert!(matches!(Evaluator::eval_arithmetic(BinaryOperator::Div, &one, &zero, 3),
                         Err(RuntimeError::DivByZero { line: 3 })));
        assert!(matches!(Evaluator::eval_arithmetic(BinaryOperator::Mod, &one, &zero, 4),
                         Err(RuntimeError::ModByZero { line: 4 })));
    }

    #[test]
    fn arrays_of_one_type_concatenate() {
        let joined =
            Evaluator::eval_arithmetic(BinaryOperator::Add, &numbers(&[1.0, 2.0]), &numbers(&[3.0]), 1)
            .unwrap();
        assert_eq!(joined.to_string(), "[1, 2, 3]");

        let with_empty =
            Evaluator::eval_arithmetic(BinaryOperator::Add, &numbers(&[]), &Value::from(vec![Value::from("a")]), 1)
            .unwrap();
        assert_eq!(with_empty.to_string(), "[a]");
    }

    #[test]
    fn mixed_arrays_and_operands_are_rejected() {
        let strings = Value::from(vec![Value::from("a")]);

        assert!(matches!(Evaluator::eval_arithmetic(BinaryOperator::Add, &numbers(&[1.0]), &strings, 1),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(Evaluator::eval_arithmetic(BinaryOperator::Add,
                                                    &Value::from("a"),
                                                    &Value::Number(1.0),
                                                    1),
                         Err(RuntimeError::CannotConcat { .. })));
        assert!(matches!(Evaluator::eval_arithmetic(BinaryOperator::Sub,
                                                    &Value::from("a"),
                                                    &Value::Number(1.0),
                                                    1),
                         Err(RuntimeError::TypeExpected { .. })));
    }

    #[test]
    fn power_uses_real_exponents() {
        let r = Evaluator::eval_arithmetic(BinaryOperator::Pow,
                                           &Value::Number(9.0),
                                           &Value::Number(0.5),
                                           1).unwrap();
        assert!(matches!(r, Value::Number(n) if (n - 3.0).abs() < f64::EPSILON));
    }
}
