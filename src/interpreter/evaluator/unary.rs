use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                line: usize)
                                -> EvalResult<Value> {
        let value = self.eval_expr(expr)?;
        Self::eval_unary(op, &value, line)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation.
    /// - `Plus`: numeric identity.
    /// - `Not`: boolean negation.
    ///
    /// An operand of the wrong type fails with `TypeExpected`.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use dlite::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
    /// assert!(matches!(v, Value::Number(n) if n == -5.0));
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert!(matches!(v, Value::Bool(true)));
    ///
    /// assert!(Evaluator::eval_unary(UnaryOperator::Plus, &Value::from("x"), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-value.as_number(line)?)),
            UnaryOperator::Plus => Ok(Value::Number(value.as_number(line)?)),
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }
}
