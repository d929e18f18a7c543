use std::{collections::HashMap, io::Write, path::PathBuf, rc::Rc};

use crate::{
    ast::{Expr, FunctionDeclaration, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            control::EvaluationResult,
            function::registry::{Host, Registry},
            scope::ScopeStack,
        },
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Read-only names resolved after every scope misses.
const BUILTIN_CONSTANTS: &[(&str, f64)] = &[("PI", std::f64::consts::PI),
                                            ("TAU", std::f64::consts::TAU),
                                            ("E", std::f64::consts::E),
                                            ("PHI", 1.618_033_988_749_895),
                                            ("LN2", std::f64::consts::LN_2),
                                            ("LN10", std::f64::consts::LN_10)];

/// Stores the runtime evaluation state.
///
/// This struct holds everything a program run mutates: the scope stack, the
/// user function tables, the output buffer and the termination flag. It owns
/// an immutable standard-library [`Registry`].
///
/// ## Usage
///
/// An `Evaluator` is created once per program run. Imported files are run by
/// a child evaluator whose declarations are merged back into the parent.
///
/// # Example
/// ```
/// use dlite::{
///     ast::{Expr, Literal, Statement},
///     interpreter::{evaluator::core::Evaluator, value::core::Value},
/// };
///
/// let mut evaluator = Evaluator::new();
/// let program = vec![Statement::Expression { expr: Expr::Literal { value: Literal::Number(4.0),
///                                                                 line:  1, },
///                                            line: 1, }];
///
/// let result = evaluator.evaluate(&program).unwrap();
/// assert!(matches!(result.value, Value::Number(n) if n == 4.0));
/// ```
pub struct Evaluator {
    /// Variables and constants.
    pub scopes:              ScopeStack,
    /// Functions declared at the top level of this program, or merged in by
    /// an `import ... as _`.
    pub functions:           HashMap<String, Rc<FunctionDeclaration>>,
    /// Functions of imported files, by namespace.
    pub namespace_functions: HashMap<String, HashMap<String, Rc<FunctionDeclaration>>>,
    pub(crate) registry:     Rc<Registry>,
    buffer:                  String,
    captured:                String,
    sink:                    Option<Box<dyn Write>>,
    pub(crate) current_file: Option<PathBuf>,
    termination:             Option<u8>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the standard library and output captured in
    /// memory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Rc::new(Registry::standard()))
    }

    /// Creates an evaluator sharing an existing registry.
    #[must_use]
    pub fn with_registry(registry: Rc<Registry>) -> Self {
        Self { scopes: ScopeStack::default(),
               functions: HashMap::new(),
               namespace_functions: HashMap::new(),
               registry,
               buffer: String::new(),
               captured: String::new(),
               sink: None,
               current_file: None,
               termination: None }
    }

    /// Sends flushed output to `sink` instead of capturing it.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn Write>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the file being evaluated. Relative imports resolve against its
    /// directory.
    pub fn set_current_file(&mut self, path: impl Into<PathBuf>) {
        self.current_file = Some(path.into());
    }

    /// Returns all captured output, including output not yet flushed.
    #[must_use]
    pub fn output(&self) -> String {
        let mut output = self.captured.clone();
        output.push_str(&self.buffer);
        output
    }

    /// Removes and returns all captured and buffered output.
    pub fn take_output(&mut self) -> String {
        let mut output = std::mem::take(&mut self.captured);
        output.push_str(&std::mem::take(&mut self.buffer));
        output
    }

    /// The exit code requested by `exit(...)`, if the program terminated.
    #[must_use]
    pub const fn exit_code(&self) -> Option<u8> {
        self.termination
    }

    /// Returns `true` once `exit(...)` was called.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    /// Evaluates a whole program.
    ///
    /// Statements run in order; the buffer is flushed after each one. A
    /// control signal or termination stops the program early without error.
    ///
    /// # Returns
    /// The result of the last statement that ran.
    pub fn evaluate(&mut self, program: &[Statement]) -> EvalResult<EvaluationResult> {
        tracing::debug!(statements = program.len(), "evaluating program");

        let mut last = EvaluationResult::regular(Value::Null);

        for statement in program {
            if self.is_terminated() {
                break;
            }

            last = self.eval_statement(statement)?;
            self.flush(statement.line_number())?;

            if last.has_control() {
                break;
            }
        }

        Ok(last)
    }

    /// Evaluates a sequence of statements in the current scope.
    ///
    /// Stops at the first result that carries a control signal and returns it
    /// unchanged; stops silently once the program terminated.
    pub fn eval_statements(&mut self, statements: &[Statement]) -> EvalResult<EvaluationResult> {
        let mut last = EvaluationResult::regular(Value::Null);

        for statement in statements {
            if self.is_terminated() {
                break;
            }

            last = self.eval_statement(statement)?;

            if last.has_control() {
                break;
            }
        }

        Ok(last)
    }

    /// Evaluates a single statement.
    ///
    /// # Returns
    /// The statement's value plus any control signal it raised.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<EvaluationResult> {
        match statement {
            Statement::Expression { expr, .. } => self.eval_expr(expr).map(EvaluationResult::regular),
            Statement::VariableDeclaration { name,
                                             declared,
                                             value,
                                             line, } => {
                self.eval_variable_declaration(name, declared, value.as_ref(), *line)
            },
            Statement::ConstantDeclaration { name,
                                             declared,
                                             value,
                                             line, } => {
                self.eval_constant_declaration(name, declared, value, *line)
            },
            Statement::Assignment { target, value, line } => {
                self.eval_assignment(target, value, *line)
            },
            Statement::CompoundAssignment { target,
                                            op,
                                            value,
                                            line, } => {
                self.eval_compound_assignment(target, *op, value, *line)
            },
            Statement::Block { statements, .. } => self.eval_block(statements),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                self.eval_if(condition, then_branch, else_branch.as_deref(), *line)
            },
            Statement::For(for_loop) => self.eval_for(for_loop),
            Statement::Function(declaration) => {
                self.functions
                    .insert(declaration.name.clone(), Rc::clone(declaration));
                Ok(EvaluationResult::regular(Value::Null))
            },
            Statement::Return { values, .. } => self.eval_return(values),
            Statement::Break { count, .. } => Ok(Self::eval_break(*count)),
            Statement::Continue { count, .. } => Ok(Self::eval_continue(*count)),
            Statement::Import { path, alias, line } => {
                self.eval_import(path, alias.as_deref(), *line)
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Expressions
    /// never carry control signals; only statements do.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value the expression produced.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, line } => self.eval_identifier(name, *line),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::Index { array, index, line } => self.eval_index(array, index, *line),
            Expr::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval_expr(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::FunctionCall { namespace,
                                 name,
                                 arguments,
                                 line, } => {
                self.eval_function_call(namespace, name, arguments, *line)
            },
            Expr::Spread { line, .. } => {
                Err(RuntimeError::UnknownOperator { operator: "...".to_string(),
                                                    line:     *line, })
            },
        }
    }

    /// Resolves a name: scopes first, then the built-in constants, then user
    /// functions as function values.
    fn eval_identifier(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(binding) = self.scopes.lookup(name) {
            return Ok(binding.value().clone());
        }

        let constant = name.strip_prefix("math.").unwrap_or(name);
        if let Some((_, value)) = BUILTIN_CONSTANTS.iter().find(|(n, _)| *n == constant) {
            return Ok(Value::Number(*value));
        }

        if let Some(declaration) = self.lookup_function_value(name) {
            return Ok(Value::Function(Some(declaration)));
        }

        Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                line })
    }

    fn lookup_function_value(&self, name: &str) -> Option<Rc<FunctionDeclaration>> {
        if let Some((namespace, function)) = name.split_once('.') {
            return self.namespace_functions
                       .get(namespace)
                       .and_then(|functions| functions.get(function))
                       .cloned();
        }
        self.functions.get(name).cloned()
    }

    /// Moves everything a child evaluator printed into this evaluator's
    /// buffer.
    pub(crate) fn absorb_output(&mut self, child: &mut Self) {
        let output = child.take_output();
        self.buffer.push_str(&output);
    }

    /// Writes the buffer to the sink, or into the captured output when there
    /// is no sink.
    pub(crate) fn flush(&mut self, line: usize) -> EvalResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let text = std::mem::take(&mut self.buffer);
        match self.sink.as_mut() {
            Some(sink) => {
                sink.write_all(text.as_bytes())
                    .and_then(|()| sink.flush())
                    .map_err(|source| RuntimeError::Output { source, line })
            },
            None => {
                self.captured.push_str(&text);
                Ok(())
            },
        }
    }
}

impl Host for Evaluator {
    fn add_to_buffer(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn terminate(&mut self, code: u8) {
        tracing::debug!(code, "program terminated");
        self.termination = Some(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    fn number(n: f64) -> Expr {
        Expr::Literal { value: Literal::Number(n),
                        line:  1, }
    }

    #[test]
    fn builtin_constants_resolve_after_scopes() {
        let mut evaluator = Evaluator::new();
        let pi = Expr::Identifier { name: "PI".into(),
                                    line: 1, };

        assert!(matches!(evaluator.eval_expr(&pi).unwrap(),
                         Value::Number(n) if n == std::f64::consts::PI));
    }

    #[test]
    fn termination_stops_the_program() {
        let mut evaluator = Evaluator::new();
        evaluator.terminate(3);

        let program = vec![Statement::Expression { expr: number(1.0),
                                                   line: 1, }];
        let result = evaluator.evaluate(&program).unwrap();

        assert!(matches!(result.value, Value::Null));
        assert_eq!(evaluator.exit_code(), Some(3));
    }

    #[test]
    fn buffered_output_is_captured_on_flush() {
        let mut evaluator = Evaluator::new();
        evaluator.add_to_buffer("hello");
        evaluator.flush(1).unwrap();
        evaluator.add_to_buffer(" world");

        assert_eq!(evaluator.output(), "hello world");
        assert_eq!(evaluator.take_output(), "hello world");
        assert_eq!(evaluator.output(), "");
    }
}
