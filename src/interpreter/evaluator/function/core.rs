use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::registry::{ArgKind, Arity, FunctionInfo},
        },
        value::core::Value,
    },
};

/// Joins a namespace and a function name the way calls are written.
///
/// # Example
/// ```
/// use dlite::interpreter::evaluator::function::core::qualified_name;
///
/// assert_eq!(qualified_name("math", "abs"), "math.abs");
/// assert_eq!(qualified_name("", "printf"), "printf");
/// ```
#[must_use]
pub fn qualified_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

impl Evaluator {
    /// Evaluates a function call.
    ///
    /// The callee is resolved in this order:
    /// 1. a user function imported under `namespace`,
    /// 2. a standard-library function in package `namespace`,
    /// 3. a global user function, when `namespace` is empty.
    ///
    /// Library calls have their arguments validated against the function's
    /// arity class before the handler runs.
    ///
    /// # Parameters
    /// - `namespace`: Qualifier of the call; empty for unqualified calls.
    /// - `name`: Function name.
    /// - `arguments`: Argument expressions, possibly spread.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result, or `UndefinedNamespace` / `UndefinedFunction` when
    /// nothing matches.
    #[tracing::instrument(level = "trace",
                          skip_all,
                          fields(namespace = %namespace, name = %name, line = line))]
    pub(crate) fn eval_function_call(&mut self,
                                     namespace: &str,
                                     name: &str,
                                     arguments: &[Expr],
                                     line: usize)
                                     -> EvalResult<Value> {
        let imported = self.namespace_functions
                           .get(namespace)
                           .and_then(|functions| functions.get(name))
                           .map(Rc::clone);

        if let Some(declaration) = imported {
            let args = self.eval_arguments(arguments)?;
            return self.call_user_function(&declaration, args, line);
        }

        if let Some(function) = self.registry.get(namespace, name) {
            let args = self.eval_arguments(arguments)?;
            validate_arguments(function, &args, line)?;
            tracing::trace!(args = args.len(), "calling library function");
            return (function.handler)(self, &args, line);
        }

        if namespace.is_empty()
           && let Some(declaration) = self.functions.get(name).map(Rc::clone)
        {
            let args = self.eval_arguments(arguments)?;
            return self.call_user_function(&declaration, args, line);
        }

        if !namespace.is_empty()
           && !self.registry.has_package(namespace)
           && !self.namespace_functions.contains_key(namespace)
        {
            return Err(RuntimeError::UndefinedNamespace { name: namespace.to_string(),
                                                          line });
        }

        Err(RuntimeError::UndefinedFunction { name: qualified_name(namespace, name),
                                              line })
    }

    /// Evaluates call arguments, expanding `...expr` spreads.
    ///
    /// A spread over a tuple or an array inlines its elements; spreading any
    /// other value fails with `TypeExpected`.
    fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(arguments.len());

        for argument in arguments {
            if let Expr::Spread { expr, line } = argument {
                match self.eval_expr(expr)? {
                    Value::Tuple(items) | Value::Array(items) => {
                        values.extend(items.iter().cloned());
                    },
                    other => {
                        return Err(RuntimeError::TypeExpected { expected: "tuple".to_string(),
                                                                found:    other.data_type()
                                                                               .to_string(),
                                                                line:     *line, });
                    },
                }
                continue;
            }

            values.push(self.eval_expr(argument)?);
        }

        Ok(values)
    }
}

/// Validates arguments against a library function's parameters.
///
/// # Errors
/// - `FunctionNumArgs` when a fixed function gets the wrong count or a
///   mixed-variadic function misses required arguments.
/// - `FunctionArgType` when an argument has the wrong type; the position is
///   1-based.
pub fn validate_arguments(function: &FunctionInfo, args: &[Value], line: usize) -> EvalResult<()> {
    let name = qualified_name(function.package, function.name);
    let kinds = function.params.iter().map(|param| param.kind).collect::<Vec<_>>();

    match function.arity {
        Arity::Fixed => {
            if args.len() != kinds.len() {
                return Err(RuntimeError::FunctionNumArgs { name,
                                                           expected: kinds.len(),
                                                           found: args.len(),
                                                           line });
            }
            check_kinds(&name, args, kinds.iter().copied(), 0, line)
        },
        Arity::Variadic => match kinds.first() {
            Some(kind) => check_kinds(&name, args, std::iter::repeat(*kind), 0, line),
            None => Ok(()),
        },
        Arity::MixedVariadic => {
            let required = kinds.len().saturating_sub(1);

            if args.len() < required {
                return Err(RuntimeError::FunctionNumArgs { name,
                                                           expected: required,
                                                           found: args.len(),
                                                           line });
            }

            let (prefix, rest) = args.split_at(required);
            check_kinds(&name, prefix, kinds.iter().copied(), 0, line)?;

            match kinds.last() {
                Some(kind) => check_kinds(&name, rest, std::iter::repeat(*kind), required, line),
                None => Ok(()),
            }
        },
    }
}

fn check_kinds(name: &str,
               args: &[Value],
               kinds: impl Iterator<Item = ArgKind>,
               offset: usize,
               line: usize)
               -> EvalResult<()> {
    for (index, (arg, kind)) in args.iter().zip(kinds).enumerate() {
        if !kind.accepts(arg) {
            return Err(RuntimeError::FunctionArgType { name: name.to_string(),
                                                       position: offset + index + 1,
                                                       expected: kind.to_string(),
                                                       found: arg.data_type().to_string(),
                                                       line });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::function::registry::Registry;

    fn library(namespace: &str, name: &str) -> &'static FunctionInfo {
        Registry::standard().get(namespace, name).unwrap()
    }

    #[test]
    fn fixed_functions_check_count_then_types() {
        let pow = library("math", "pow");

        let err = validate_arguments(pow, &[Value::Number(1.0)], 1).unwrap_err();
        assert!(matches!(err, RuntimeError::FunctionNumArgs { expected: 2, found: 1, .. }));

        let err = validate_arguments(pow, &[Value::Number(1.0), Value::from("2")], 1).unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 1: 'math.pow()' expects argument 2 to be 'number', but got 'string'");
    }

    #[test]
    fn mixed_variadic_checks_prefix_and_rest() {
        let printf = library("", "printf");

        assert!(validate_arguments(printf, &[Value::from("%v"), Value::Null, Value::Bool(true)], 1).is_ok());
        assert!(matches!(validate_arguments(printf, &[], 1),
                         Err(RuntimeError::FunctionNumArgs { expected: 1, found: 0, .. })));
        assert!(matches!(validate_arguments(printf, &[Value::Number(1.0)], 1),
                         Err(RuntimeError::FunctionArgType { position: 1, .. })));
    }

    #[test]
    fn variadic_arguments_share_one_type() {
        let min = library("math", "min");

        assert!(validate_arguments(min, &[], 1).is_ok());
        let err = validate_arguments(min, &[Value::Number(1.0), Value::Bool(true)], 1).unwrap_err();
        assert!(matches!(err, RuntimeError::FunctionArgType { position: 2, .. }));
    }
}
