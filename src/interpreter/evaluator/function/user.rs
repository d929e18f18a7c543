use crate::{
    ast::FunctionDeclaration,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            scope::ScopedValue,
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Executes a user-declared function.
    ///
    /// The argument count must match the parameter count and every argument
    /// must be accepted by its parameter's declared type. Parameters are bound
    /// as variables in one new block scope, which is popped on every exit
    /// path.
    ///
    /// A `return` in the body ends the call; its value is checked against the
    /// declared return count. A body that runs to its end yields the value of
    /// its last statement without any check, and a stray `break` or
    /// `continue` stops at the call boundary.
    ///
    /// # Parameters
    /// - `declaration`: The function to run.
    /// - `args`: Evaluated, spread-expanded arguments.
    /// - `line`: Line of the call, for error reporting.
    ///
    /// # Returns
    /// The returned value.
    pub(crate) fn call_user_function(&mut self,
                                     declaration: &FunctionDeclaration,
                                     args: Vec<Value>,
                                     line: usize)
                                     -> EvalResult<Value> {
        let name = &declaration.name;

        if args.len() != declaration.params.len() {
            return Err(RuntimeError::FunctionNumArgs { name: name.clone(),
                                                       expected: declaration.params.len(),
                                                       found: args.len(),
                                                       line });
        }

        for (index, (param, arg)) in declaration.params.iter().zip(&args).enumerate() {
            if !param.declared.accepts(arg) {
                return Err(RuntimeError::FunctionArgType { name: name.clone(),
                                                           position: index + 1,
                                                           expected: param.declared.to_string(),
                                                           found: arg.data_type().to_string(),
                                                           line });
            }
        }

        tracing::trace!(function = %name, depth = self.scopes.depth(), "entering user function");

        self.scopes.push();
        for (param, value) in declaration.params.iter().zip(args) {
            self.scopes.declare(param.name.as_str(), ScopedValue::Variable { value });
        }
        let result = self.eval_statements(&declaration.body);
        self.scopes.pop();

        let result = result?;

        if !result.is_return() {
            return Ok(result.value);
        }

        check_returned(declaration, result.value, line)
    }
}

/// Checks an explicitly returned value against the declared return count.
///
/// Several declared values need a tuple of exactly that length; a single
/// declared value must not be a tuple. The returned values themselves are
/// not type checked, so `return value, null` satisfies `number, error`.
/// Functions without declared return types accept whatever is returned.
fn check_returned(declaration: &FunctionDeclaration, value: Value, line: usize) -> EvalResult<Value> {
    let expected = declaration.return_types.len();
    if expected == 0 {
        return Ok(value);
    }

    let found = match &value {
        Value::Tuple(items) => items.len(),
        _ => 1,
    };
    let is_tuple = matches!(value, Value::Tuple(_));

    if found != expected || (expected == 1 && is_tuple) {
        return Err(RuntimeError::FunctionReturnCount { name: declaration.name.clone(),
                                                       expected,
                                                       found,
                                                       line });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Expr, Literal, Parameter, Statement},
        interpreter::value::data_type::{DataType, DeclaredType},
    };

    fn number(n: f64) -> Expr {
        Expr::Literal { value: Literal::Number(n),
                        line:  1, }
    }

    fn declaration(return_types: Vec<DeclaredType>, values: Vec<Expr>) -> FunctionDeclaration {
        FunctionDeclaration { name: "f".into(),
                              params: vec![Parameter { name:     "x".into(),
                                                       declared: DeclaredType::Exact(DataType::Number), }],
                              return_types,
                              body: vec![Statement::Return { values,
                                                             line: 1 }],
                              line: 1 }
    }

    #[test]
    fn multiple_declared_values_need_a_matching_tuple() {
        let mut evaluator = Evaluator::new();
        let numbers = vec![DeclaredType::Exact(DataType::Number); 2];

        let f = declaration(numbers.clone(), vec![number(1.0), number(2.0)]);
        let value = evaluator.call_user_function(&f, vec![Value::Number(0.0)], 1).unwrap();
        assert_eq!(value.to_string(), "(1, 2)");

        let f = declaration(numbers, vec![number(1.0)]);
        let err = evaluator.call_user_function(&f, vec![Value::Number(0.0)], 1).unwrap_err();
        assert!(matches!(err, RuntimeError::FunctionReturnCount { expected: 2, found: 1, .. }));
    }

    #[test]
    fn parameters_are_type_checked_and_scoped() {
        let mut evaluator = Evaluator::new();
        let f = declaration(vec![], vec![Expr::Identifier { name: "x".into(),
                                                            line: 1, }]);

        let err = evaluator.call_user_function(&f, vec![Value::from("a")], 3).unwrap_err();
        assert!(matches!(err, RuntimeError::FunctionArgType { position: 1, line: 3, .. }));

        let value = evaluator.call_user_function(&f, vec![Value::Number(5.0)], 1).unwrap();
        assert!(matches!(value, Value::Number(n) if n == 5.0));
        assert!(evaluator.scopes.lookup("x").is_none());
        assert_eq!(evaluator.scopes.depth(), 0);
    }
}
