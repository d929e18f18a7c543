use crate::interpreter::value::core::Value;

/// The kind of non-local exit a statement requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlKind {
    /// Leave the `count`-th enclosing loop.
    Break,
    /// Advance the `count`-th enclosing loop.
    Continue,
    /// Leave the enclosing function with the carried value.
    Return,
}

/// A pending non-local exit.
///
/// `count` is the number of loop levels still to unwind for `break` and
/// `continue`; `1` addresses the innermost loop. It is unused for `return`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Control {
    /// What kind of exit.
    pub kind:  ControlKind,
    /// Remaining loop levels.
    pub count: usize,
}

/// The outcome of evaluating a statement or expression.
///
/// Carries the produced value plus an optional control signal. A result
/// without a signal means "keep executing the following statements".
///
/// # Example
/// ```
/// use dlite::interpreter::{
///     evaluator::control::{ControlKind, EvaluationResult},
///     value::core::Value,
/// };
///
/// let result = EvaluationResult::with_control(Value::Null, ControlKind::Break, 2);
/// let unwound = result.unwind_loop().unwrap();
///
/// assert!(unwound.is_break());
/// assert_eq!(unwound.control.unwrap().count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// The produced value.
    pub value:   Value,
    /// The pending non-local exit, if any.
    pub control: Option<Control>,
}

impl EvaluationResult {
    /// A normal result carrying `value`.
    #[must_use]
    pub const fn regular(value: Value) -> Self {
        Self { value,
               control: None }
    }

    /// A result carrying both a value and a control signal.
    #[must_use]
    pub const fn with_control(value: Value, kind: ControlKind, count: usize) -> Self {
        Self { value,
               control: Some(Control { kind, count }) }
    }

    /// A `return` signal carrying `value`.
    #[must_use]
    pub const fn returning(value: Value) -> Self {
        Self::with_control(value, ControlKind::Return, 1)
    }

    /// Returns `true` when a signal is pending.
    #[must_use]
    pub const fn has_control(&self) -> bool {
        self.control.is_some()
    }

    /// Returns `true` for a pending `break`.
    #[must_use]
    pub fn is_break(&self) -> bool {
        self.control.is_some_and(|c| c.kind == ControlKind::Break)
    }

    /// Returns `true` for a pending `continue`.
    #[must_use]
    pub fn is_continue(&self) -> bool {
        self.control.is_some_and(|c| c.kind == ControlKind::Continue)
    }

    /// Returns `true` for a pending `return`.
    #[must_use]
    pub fn is_return(&self) -> bool {
        self.control.is_some_and(|c| c.kind == ControlKind::Return)
    }

    /// Unwinds one loop level from a `break`/`continue` signal.
    ///
    /// Returns `None` when the signal addressed the loop that is unwinding it
    /// (`count == 1`), otherwise the signal with its count decremented, to be
    /// re-propagated to the next enclosing loop. Other results are returned
    /// unchanged.
    #[must_use]
    pub fn unwind_loop(self) -> Option<Self> {
        match self.control {
            Some(Control { kind: ControlKind::Break | ControlKind::Continue,
                           count, }) if count <= 1 => None,
            Some(Control { kind: kind @ (ControlKind::Break | ControlKind::Continue),
                           count, }) => Some(Self::with_control(self.value, kind, count - 1)),
            _ => Some(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_signals_addressed_to_this_loop_are_consumed() {
        let brk = EvaluationResult::with_control(Value::Null, ControlKind::Break, 1);
        let cont = EvaluationResult::with_control(Value::Null, ControlKind::Continue, 1);

        assert!(brk.unwind_loop().is_none());
        assert!(cont.unwind_loop().is_none());
    }

    #[test]
    fn returns_pass_through_loops_untouched() {
        let ret = EvaluationResult::returning(Value::Number(3.0));
        let unwound = ret.unwind_loop().unwrap();

        assert!(unwound.is_return());
        assert!(matches!(unwound.value, Value::Number(n) if n == 3.0));
    }

    #[test]
    fn regular_results_carry_no_signal() {
        let result = EvaluationResult::regular(Value::Bool(true));

        assert!(!result.has_control());
        assert!(!result.is_break() && !result.is_continue() && !result.is_return());
    }
}
