use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a logical operation between two boolean values.
    ///
    /// The operands are converted to booleans using `as_bool`; anything else
    /// fails with `TypeExpected`. Supported operators are logical AND and OR.
    ///
    /// # Parameters
    /// - `op`: The logical operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    ///
    /// # Example
    /// ```
    /// use dlite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let a = Value::Bool(true);
    /// let b = Value::Bool(false);
    ///
    /// let result = Evaluator::eval_logic(BinaryOperator::Or, &a, &b, 1);
    /// assert!(matches!(result.unwrap(), Value::Bool(true)));
    /// ```
    pub fn eval_logic(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      line: usize)
                      -> EvalResult<Value> {
        let l = left.as_bool(line)?;
        let r = right.as_bool(line)?;

        match op {
            BinaryOperator::And => Ok(Value::Bool(l && r)),
            _ => Ok(Value::Bool(l || r)),
        }
    }
}
