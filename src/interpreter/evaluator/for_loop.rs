use crate::{
    ast::{Expr, ForKind, ForLoop},
    interpreter::{
        evaluator::{
            control::EvaluationResult,
            core::{EvalResult, Evaluator},
            scope::ScopedValue,
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a `for` statement.
    ///
    /// Three forms are supported:
    ///
    /// 1. **Infinite:** `for { body }` runs until a `break`, a `return` or
    ///    termination.
    ///
    /// 2. **Conditional:** `for expr { body }` re-evaluates the boolean
    ///    condition before each iteration. With a declared variable (`for var
    ///    i < 10 { body }`) the variable starts at `0` and is incremented after
    ///    every iteration.
    ///
    /// 3. **Range:** `for var i from a to b { body }` counts from `a` (or `0`)
    ///    up to and including `b` in steps of one. The upper bound is
    ///    re-evaluated before each iteration.
    ///
    /// The whole loop runs in one block scope holding the loop variable; each
    /// iteration's body block gets its own scope on top. The variable is
    /// incremented even when the iteration ended with `continue` or `break`.
    ///
    /// A `break` or `continue` addressed to this loop is consumed here. Deeper
    /// counts are decremented and returned to the enclosing loop, and
    /// `return` passes through untouched.
    ///
    /// # Returns
    /// The value of the last iteration, or a propagated control signal.
    ///
    /// # Example
    /// ```
    /// use dlite::get_result;
    ///
    /// let outcome = get_result("var total number = 0\n\
    ///                           for var i from 1 to 4 { total += i }\n\
    ///                           total").unwrap();
    ///
    /// assert_eq!(outcome.value.to_string(), "10");
    /// ```
    pub(crate) fn eval_for(&mut self, for_loop: &ForLoop) -> EvalResult<EvaluationResult> {
        self.scopes.push();
        let result = self.run_loop(for_loop);
        self.scopes.pop();

        result
    }

    fn run_loop(&mut self, for_loop: &ForLoop) -> EvalResult<EvaluationResult> {
        let mut counter = self.declare_loop_variable(&for_loop.kind, for_loop.line)?;
        let mut result = EvaluationResult::regular(Value::Null);

        while !self.is_terminated() && self.should_iterate(&for_loop.kind, counter, for_loop.line)? {
            let iteration = self.eval_statement(&for_loop.body)?;
            counter = self.increment_loop_variable(&for_loop.kind, counter, for_loop.line)?;

            if iteration.is_break() {
                match iteration.unwind_loop() {
                    Some(propagated) => return Ok(propagated),
                    None => break,
                }
            }

            match iteration.unwind_loop() {
                Some(propagated) if propagated.has_control() => return Ok(propagated),
                Some(regular) => result = regular,
                None => {},
            }
        }

        Ok(result)
    }

    const fn loop_variable(kind: &ForKind) -> Option<&String> {
        match kind {
            ForKind::Infinite => None,
            ForKind::Conditional { variable, .. } | ForKind::Range { variable, .. } => {
                variable.as_ref()
            },
        }
    }

    /// Declares the loop variable in the loop scope and returns the starting
    /// count.
    fn declare_loop_variable(&mut self, kind: &ForKind, line: usize) -> EvalResult<f64> {
        let start = match kind {
            ForKind::Range { from: Some(from), .. } => self.eval_expr(from)?,
            _ => Value::Number(0.0),
        };

        let count = start.as_number(line)?;

        if let Some(name) = Self::loop_variable(kind) {
            self.scopes.declare(name.as_str(), ScopedValue::Variable { value: start });
        }

        Ok(count)
    }

    fn should_iterate(&mut self, kind: &ForKind, counter: f64, line: usize) -> EvalResult<bool> {
        match kind {
            ForKind::Infinite => Ok(true),
            ForKind::Conditional { condition, .. } => self.eval_expr(condition)?.as_bool(line),
            ForKind::Range { variable, to, .. } => {
                let current = match variable {
                    Some(name) => self.eval_loop_variable(name, line)?,
                    None => counter,
                };
                let to = self.eval_expr(to)?.as_number(line)?;

                Ok(current <= to)
            },
        }
    }

    fn increment_loop_variable(&mut self,
                               kind: &ForKind,
                               counter: f64,
                               line: usize)
                               -> EvalResult<f64> {
        let Some(name) = Self::loop_variable(kind) else {
            return Ok(counter + 1.0);
        };

        let next = self.eval_loop_variable(name, line)? + 1.0;
        self.scopes.assign(name, Value::Number(next), line)?;

        Ok(next)
    }

    fn eval_loop_variable(&mut self, name: &str, line: usize) -> EvalResult<f64> {
        let variable = Expr::Identifier { name: name.to_string(),
                                          line };
        self.eval_expr(&variable)?.as_number(line)
    }
}
