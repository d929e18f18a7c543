use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates an ordering comparison between two numbers.
    ///
    /// Non-numeric operands fail with `TypeExpected`.
    ///
    /// # Example
    /// ```
    /// use dlite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let r = Evaluator::eval_comparison(BinaryOperator::LessEqual,
    ///                                    &Value::Number(2.0),
    ///                                    &Value::Number(2.0),
    ///                                    1).unwrap();
    /// assert!(matches!(r, Value::Bool(true)));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Greater, GreaterEqual, Less, LessEqual};

        let l = left.as_number(line)?;
        let r = right.as_number(line)?;

        let result = match op {
            Less => l < r,
            Greater => l > r,
            LessEqual => l <= r,
            GreaterEqual => l >= r,
            _ => unreachable!(),
        };

        Ok(Value::Bool(result))
    }

    /// Evaluates `==` or `!=`.
    ///
    /// Operands of different data types are simply unequal. Equal types
    /// compare with [`Value::equals`]: scalars by value, arrays and tuples
    /// element by element, and function values never compare equal.
    ///
    /// # Example
    /// ```
    /// use dlite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let r = Evaluator::eval_equality(BinaryOperator::NotEqual,
    ///                                  &Value::Number(1.0),
    ///                                  &Value::from("1"));
    /// assert!(matches!(r, Value::Bool(true)));
    /// ```
    #[must_use]
    pub fn eval_equality(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let equal = left.equals(right);

        match op {
            BinaryOperator::NotEqual => Value::Bool(!equal),
            _ => Value::Bool(equal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn ordering_requires_numbers() {
        let err = Evaluator::eval_comparison(BinaryOperator::Less,
                                             &Value::from("a"),
                                             &Value::Number(1.0),
                                             5).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeExpected { line: 5, .. }));
    }

    #[test]
    fn null_equals_null_and_functions_never_match() {
        assert!(matches!(Evaluator::eval_equality(BinaryOperator::Equal, &Value::Null, &Value::Null),
                         Value::Bool(true)));
        assert!(matches!(Evaluator::eval_equality(BinaryOperator::Equal,
                                                  &Value::Function(None),
                                                  &Value::Function(None)),
                         Value::Bool(false)));
        assert!(matches!(Evaluator::eval_equality(BinaryOperator::NotEqual,
                                                  &Value::Function(None),
                                                  &Value::Function(None)),
                         Value::Bool(true)));
    }
}
