use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
    util::num::f64_to_index,
};

impl Evaluator {
    /// Evaluates `array[index]`.
    ///
    /// The array operand must be an array and the index a number; the
    /// position must lie in `0..len`. An out-of-range index fails with
    /// `ArrayIndexOutOfBounds` quoting the index expression.
    pub(crate) fn eval_index(&mut self,
                             array: &Expr,
                             index: &Expr,
                             line: usize)
                             -> EvalResult<Value> {
        let container = self.eval_expr(array)?;
        let items = container.as_array(line)?;
        let position = self.eval_expr(index)?.as_number(line)?;

        let position = Self::checked_position(position, items.len(), index, line)?;

        Ok(items[position].clone())
    }

    /// Writes `value` to an assignment target.
    ///
    /// Identifiers are re-bound through the scope stack. For `a[i] = v` the
    /// array is read, the element replaced and the whole array written back
    /// to `a`; nested targets such as `a[i][j]` recurse outward the same way.
    /// When the array has no owning variable, as in `f()[0] = v`, nothing is
    /// written back.
    ///
    /// # Returns
    /// The assigned value.
    pub(crate) fn assign_to(&mut self, target: &Expr, value: Value, line: usize) -> EvalResult<Value> {
        match target {
            Expr::Identifier { name, .. } => self.scopes.assign(name, value, line),
            Expr::Index { array, index, .. } => {
                let container = self.eval_expr(array)?;
                let position = self.eval_expr(index)?.as_number(line)?;

                let Value::Array(mut items) = container else {
                    return Err(RuntimeError::TypeExpected { expected: "array".to_string(),
                                                            found:    container.data_type()
                                                                               .to_string(),
                                                            line });
                };

                let position = Self::checked_position(position, items.len(), index, line)?;
                Rc::make_mut(&mut items)[position] = value.clone();

                if matches!(**array, Expr::Identifier { .. } | Expr::Index { .. }) {
                    self.assign_to(array, Value::Array(items), line)?;
                }
                Ok(value)
            },
            _ => {
                Err(RuntimeError::InvalidAssignmentTarget { target: target.to_string(),
                                                            line })
            },
        }
    }

    fn checked_position(position: f64,
                        len: usize,
                        index: &Expr,
                        line: usize)
                        -> EvalResult<usize> {
        f64_to_index(position).filter(|p| *p < len)
                              .ok_or_else(|| {
                                  RuntimeError::ArrayIndexOutOfBounds { index: index.to_string(),
                                                                        line }
                              })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Literal, interpreter::evaluator::scope::ScopedValue};

    fn number(n: f64) -> Expr {
        Expr::Literal { value: Literal::Number(n),
                        line:  1, }
    }

    fn identifier(name: &str) -> Expr {
        Expr::Identifier { name: name.into(),
                           line: 1, }
    }

    fn index(array: Expr, position: f64) -> Expr {
        Expr::Index { array: Box::new(array),
                      index: Box::new(number(position)),
                      line:  1, }
    }

    fn evaluator_with(name: &str, value: Value) -> Evaluator {
        let mut evaluator = Evaluator::new();
        evaluator.scopes.declare(name, ScopedValue::Variable { value });
        evaluator
    }

    #[test]
    fn nested_targets_write_through_every_level() {
        let grid = Value::from(vec![Value::from(vec![Value::Number(1.0), Value::Number(2.0)]),
                                    Value::from(vec![Value::Number(3.0)])]);
        let mut evaluator = evaluator_with("grid", grid);

        let target = index(index(identifier("grid"), 0.0), 1.0);
        evaluator.assign_to(&target, Value::Number(9.0), 1).unwrap();

        let value = evaluator.eval_expr(&identifier("grid")).unwrap();
        assert_eq!(value.to_string(), "[[1, 9], [3]]");
    }

    #[test]
    fn out_of_bounds_quotes_the_index_expression() {
        let mut evaluator = evaluator_with("a", Value::from(vec![Value::Number(1.0)]));

        let err = evaluator.eval_expr(&index(identifier("a"), 1.0)).unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 1: array index out of bounds: '1'");

        let err = evaluator.assign_to(&index(identifier("a"), -1.0), Value::Null, 1)
                           .unwrap_err();
        assert!(matches!(err, RuntimeError::ArrayIndexOutOfBounds { .. }));
    }

    #[test]
    fn temporaries_can_be_indexed_and_assigned() {
        let mut evaluator = evaluator_with("a", Value::from(vec![Value::Number(1.0)]));
        let literal = Expr::ArrayLiteral { elements: vec![identifier("a")],
                                           line:     1, };

        let value = evaluator.assign_to(&index(literal, 0.0), Value::Number(5.0), 1).unwrap();

        assert!(matches!(value, Value::Number(n) if n == 5.0));
        assert_eq!(evaluator.eval_expr(&identifier("a")).unwrap().to_string(), "[1]");
    }

    #[test]
    fn literals_are_not_assignable() {
        let mut evaluator = Evaluator::new();
        let err = evaluator.assign_to(&number(1.0), Value::Null, 2).unwrap_err();

        assert!(matches!(err, RuntimeError::InvalidAssignmentTarget { line: 2, .. }));
    }
}
