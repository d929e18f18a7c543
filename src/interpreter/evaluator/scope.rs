use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::Value,
    },
};

/// A named binding.
///
/// Variables may be re-assigned; constants may not.
#[derive(Debug, Clone)]
pub enum ScopedValue {
    /// A mutable binding introduced by `var` or a parameter.
    Variable {
        /// Current value.
        value: Value,
    },
    /// An immutable binding introduced by `const`.
    Constant {
        /// The bound value.
        value: Value,
    },
}

impl ScopedValue {
    /// Returns the bound value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Variable { value, .. } | Self::Constant { value, .. } => value,
        }
    }

    /// Returns `true` for constants.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant { .. })
    }
}

/// The two-tier binding store.
///
/// One outer scope lives as long as the evaluator; block scopes are pushed
/// and popped by blocks, loops and function calls in strict LIFO order.
/// Lookups search the block scopes innermost first, then the outer scope.
///
/// # Example
/// ```
/// use dlite::interpreter::{
///     evaluator::scope::{ScopeStack, ScopedValue},
///     value::core::Value,
/// };
///
/// let mut scopes = ScopeStack::default();
/// scopes.declare("x", ScopedValue::Variable { value: Value::Number(1.0) });
///
/// scopes.push();
/// scopes.declare("x", ScopedValue::Variable { value: Value::Number(2.0) });
/// assert!(matches!(scopes.lookup("x").unwrap().value(), Value::Number(n) if *n == 2.0));
///
/// scopes.pop();
/// assert!(matches!(scopes.lookup("x").unwrap().value(), Value::Number(n) if *n == 1.0));
/// ```
#[derive(Debug, Default)]
pub struct ScopeStack {
    outer:  HashMap<String, ScopedValue>,
    blocks: Vec<HashMap<String, ScopedValue>>,
}

impl ScopeStack {
    /// Opens a new block scope.
    pub fn push(&mut self) {
        self.blocks.push(HashMap::new());
    }

    /// Closes the innermost block scope. Does nothing when none is open.
    pub fn pop(&mut self) {
        self.blocks.pop();
    }

    /// Number of open block scopes.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Binds `name` in the innermost open scope, or the outer scope when no
    /// block is open. An existing binding of the same name in that scope is
    /// replaced.
    pub fn declare(&mut self, name: impl Into<String>, binding: ScopedValue) {
        self.blocks
            .last_mut()
            .unwrap_or(&mut self.outer)
            .insert(name.into(), binding);
    }

    /// Finds the binding `name` resolves to.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ScopedValue> {
        self.blocks
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.outer.get(name))
    }

    /// Re-binds an existing variable.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Errors
    /// - `ReassignmentToConstant` if `name` resolves to a constant.
    /// - `UndefinedIdentifier` if `name` is bound nowhere.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<Value> {
        let binding = self.blocks
                          .iter_mut()
                          .rev()
                          .find_map(|scope| scope.get_mut(name))
                          .or_else(|| self.outer.get_mut(name))
                          .ok_or_else(|| RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                                             line })?;

        match binding {
            ScopedValue::Constant { .. } => {
                Err(RuntimeError::ReassignmentToConstant { name: name.to_string(),
                                                           line })
            },
            ScopedValue::Variable { value: slot } => {
                *slot = value.clone();
                Ok(value)
            },
        }
    }

    /// The outer scope's bindings, used when merging an imported file.
    #[must_use]
    pub const fn outer(&self) -> &HashMap<String, ScopedValue> {
        &self.outer
    }

    /// Inserts a binding directly into the outer scope.
    pub fn insert_outer(&mut self, name: String, binding: ScopedValue) {
        self.outer.insert(name, binding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(n: f64) -> ScopedValue {
        ScopedValue::Variable { value: Value::Number(n) }
    }

    fn number(scopes: &ScopeStack, name: &str) -> f64 {
        match scopes.lookup(name).map(ScopedValue::value) {
            Some(Value::Number(n)) => *n,
            other => panic!("expected a number for {name}, got {other:?}"),
        }
    }

    #[test]
    fn assignment_reaches_the_nearest_binding() {
        let mut scopes = ScopeStack::default();
        scopes.declare("x", var(1.0));
        scopes.push();
        scopes.assign("x", Value::Number(5.0), 1).unwrap();
        scopes.pop();

        assert_eq!(number(&scopes, "x"), 5.0);
    }

    #[test]
    fn shadowed_bindings_are_restored_after_pop() {
        let mut scopes = ScopeStack::default();
        scopes.declare("x", var(1.0));
        scopes.push();
        scopes.declare("x", var(2.0));
        scopes.assign("x", Value::Number(3.0), 1).unwrap();
        assert_eq!(number(&scopes, "x"), 3.0);
        scopes.pop();

        assert_eq!(number(&scopes, "x"), 1.0);
    }

    #[test]
    fn constants_reject_assignment_at_any_depth() {
        let mut scopes = ScopeStack::default();
        scopes.declare("c", ScopedValue::Constant { value: Value::Number(1.0) });
        scopes.push();
        scopes.push();

        let err = scopes.assign("c", Value::Number(2.0), 7).unwrap_err();
        assert!(matches!(err, RuntimeError::ReassignmentToConstant { line: 7, .. }));
    }

    #[test]
    fn unknown_names_fail_and_empty_pop_is_harmless() {
        let mut scopes = ScopeStack::default();
        scopes.pop();

        assert_eq!(scopes.depth(), 0);
        assert!(matches!(scopes.assign("nope", Value::Null, 2),
                         Err(RuntimeError::UndefinedIdentifier { .. })));
    }

    #[test]
    fn redeclaring_in_the_same_scope_overwrites() {
        let mut scopes = ScopeStack::default();
        scopes.declare("x", var(1.0));
        scopes.declare("x", var(9.0));

        assert_eq!(number(&scopes, "x"), 9.0);
    }
}
