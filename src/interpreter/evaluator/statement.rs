use crate::{
    ast::{BinaryOperator, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            control::{ControlKind, EvaluationResult},
            core::{EvalResult, Evaluator},
            scope::ScopedValue,
        },
        value::{core::Value, data_type::DeclaredType},
    },
};

impl Evaluator {
    /// Evaluates `var NAME TYPE [= expr]`.
    ///
    /// The initializer, when present, must be accepted by the declared type.
    /// Without an initializer the variable holds `null`. The binding lands in
    /// the innermost open scope.
    pub(crate) fn eval_variable_declaration(&mut self,
                                            name: &str,
                                            declared: &DeclaredType,
                                            value: Option<&Expr>,
                                            line: usize)
                                            -> EvalResult<EvaluationResult> {
        let value = match value {
            Some(expr) => {
                let value = self.eval_expr(expr)?;
                Self::check_declared(declared, &value, line)?;
                value
            },
            None => Value::Null,
        };

        self.scopes.declare(name, ScopedValue::Variable { value });

        Ok(EvaluationResult::regular(Value::Null))
    }

    /// Evaluates `const NAME TYPE = expr`.
    pub(crate) fn eval_constant_declaration(&mut self,
                                            name: &str,
                                            declared: &DeclaredType,
                                            value: &Expr,
                                            line: usize)
                                            -> EvalResult<EvaluationResult> {
        let value = self.eval_expr(value)?;
        Self::check_declared(declared, &value, line)?;

        self.scopes.declare(name, ScopedValue::Constant { value });

        Ok(EvaluationResult::regular(Value::Null))
    }

    fn check_declared(declared: &DeclaredType, value: &Value, line: usize) -> EvalResult<()> {
        if declared.accepts(value) {
            return Ok(());
        }

        Err(RuntimeError::TypeMismatch { expected: declared.to_string(),
                                         found: value.data_type().to_string(),
                                         line })
    }

    /// Evaluates `target = value`.
    pub(crate) fn eval_assignment(&mut self,
                                  target: &Expr,
                                  value: &Expr,
                                  line: usize)
                                  -> EvalResult<EvaluationResult> {
        let value = self.eval_expr(value)?;
        self.assign_to(target, value, line)
            .map(EvaluationResult::regular)
    }

    /// Evaluates `target op= value`.
    ///
    /// The right side is evaluated first, then the current value of the
    /// target; the arithmetic result is written back to the target.
    pub(crate) fn eval_compound_assignment(&mut self,
                                           target: &Expr,
                                           op: BinaryOperator,
                                           value: &Expr,
                                           line: usize)
                                           -> EvalResult<EvaluationResult> {
        let right = self.eval_expr(value)?;
        let left = self.eval_expr(target)?;

        let result = Self::eval_arithmetic(op, &left, &right, line)?;

        self.assign_to(target, result, line)
            .map(EvaluationResult::regular)
    }

    /// Evaluates a `{ ... }` block in a fresh scope.
    ///
    /// The scope is popped on every exit path, including errors.
    pub(crate) fn eval_block(&mut self, statements: &[Statement]) -> EvalResult<EvaluationResult> {
        self.scopes.push();
        let result = self.eval_statements(statements);
        self.scopes.pop();

        result
    }

    /// Evaluates an `if` statement.
    ///
    /// A false condition without an `else` branch yields `null`.
    pub(crate) fn eval_if(&mut self,
                          condition: &Expr,
                          then_branch: &Statement,
                          else_branch: Option<&Statement>,
                          line: usize)
                          -> EvalResult<EvaluationResult> {
        if self.eval_expr(condition)?.as_bool(line)? {
            return self.eval_statement(then_branch);
        }

        match else_branch {
            Some(branch) => self.eval_statement(branch),
            None => Ok(EvaluationResult::regular(Value::Null)),
        }
    }

    /// Evaluates `return [values]`.
    ///
    /// No values return `null`, one value returns itself and several values
    /// are wrapped in a tuple. The caller checks the count against the
    /// function's declaration.
    pub(crate) fn eval_return(&mut self, values: &[Expr]) -> EvalResult<EvaluationResult> {
        let mut evaluated = values.iter()
                                  .map(|value| self.eval_expr(value))
                                  .collect::<EvalResult<Vec<_>>>()?;

        let value = match evaluated.len() {
            0 => Value::Null,
            1 => evaluated.swap_remove(0),
            _ => Value::tuple(evaluated),
        };

        Ok(EvaluationResult::returning(value))
    }

    pub(crate) const fn eval_break(count: usize) -> EvaluationResult {
        EvaluationResult::with_control(Value::Null, ControlKind::Break, count)
    }

    pub(crate) const fn eval_continue(count: usize) -> EvaluationResult {
        EvaluationResult::with_control(Value::Null, ControlKind::Continue, count)
    }
}
