use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDeclaration, Literal},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::data_type::DataType},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values that can appear in expressions,
/// assignments, function arguments and returns. Aggregates are reference
/// counted so copying a value into a new binding is cheap; writes go through
/// `Rc::make_mut`.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string.
    String(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An array of `Value` elements.
    Array(Rc<Vec<Self>>),
    /// A fixed-length group of values, produced by multi-value `return`.
    Tuple(Rc<Vec<Self>>),
    /// A reference to a user function. `None` for functions without a
    /// declaration.
    Function(Option<Rc<FunctionDeclaration>>),
    /// An error value returned by fallible library functions. `None` means
    /// "no error".
    Error(Option<String>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Self::Null,
            Literal::Number(n) => Self::Number(*n),
            Literal::String(s) => Self::String(s.clone()),
            Literal::Bool(b) => Self::Bool(*b),
        }
    }
}

impl Value {
    /// Builds a tuple from its elements.
    #[must_use]
    pub fn tuple(values: Vec<Self>) -> Self {
        Self::Tuple(Rc::new(values))
    }

    /// Builds an error value carrying `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(Some(message.into()))
    }

    /// Builds the "no error" value.
    #[must_use]
    pub const fn no_error() -> Self {
        Self::Error(None)
    }

    /// Returns the data type tag of the value.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Number(_) => DataType::Number,
            Self::String(_) => DataType::String,
            Self::Bool(_) => DataType::Bool,
            Self::Array(_) => DataType::Array,
            Self::Tuple(_) => DataType::Tuple,
            Self::Function(_) => DataType::Function,
            Self::Error(_) => DataType::Error,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::TypeExpected)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use dlite::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(10.0).as_number(1).unwrap(), 10.0);
    /// assert!(Value::Bool(true).as_number(1).is_err());
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(self.expected(DataType::Number, line)),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions in `if` and `for` statements and logical
    /// operations.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(self.expected(DataType::Bool, line)),
        }
    }

    /// Borrows the string contents, or returns an error if not a string.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(self.expected(DataType::String, line)),
        }
    }

    /// Borrows the elements of an array, or returns an error if not an array.
    pub fn as_array(&self, line: usize) -> EvalResult<&[Self]> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(self.expected(DataType::Array, line)),
        }
    }

    /// Returns whether the value counts as true in a filter.
    ///
    /// `false`, `0`, `""` and `null` are falsy; everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Compares two values with the language's `==` rules.
    ///
    /// Values of different data types are never equal. Numbers, strings and
    /// bools compare by value, `null` equals `null`, arrays and tuples compare
    /// element by element, errors compare by message. Function values are
    /// never equal to each other.
    ///
    /// # Example
    /// ```
    /// use dlite::interpreter::value::core::Value;
    ///
    /// let a = Value::tuple(vec![Value::Number(1.0), Value::from("a")]);
    /// let b = Value::tuple(vec![Value::Number(1.0), Value::from("a")]);
    ///
    /// assert!(a.equals(&b));
    /// assert!(!Value::Number(1.0).equals(&Value::from("1")));
    /// assert!(!Value::Function(None).equals(&Value::Function(None)));
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) | (Self::Tuple(a), Self::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            },
            (Self::Error(a), Self::Error(b)) => a == b,
            _ => false,
        }
    }

    fn expected(&self, expected: DataType, line: usize) -> RuntimeError {
        RuntimeError::TypeExpected { expected: expected.to_string(),
                                     found: self.data_type().to_string(),
                                     line }
    }
}

/// Formats a number the way the language prints it: the shortest decimal
/// that round-trips, never in exponent form.
///
/// # Example
/// ```
/// use dlite::interpreter::value::core::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(1e21), "1000000000000000000000");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "+Inf".to_string() } else { "-Inf".to_string() };
    }
    format!("{n}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Error(None) => f.write_str("null"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Function(declaration) => {
                let name = declaration.as_ref().map_or("", |d| d.name.as_str());
                write!(f, "func {name}")
            },
            Self::Tuple(values) => {
                f.write_str("(")?;
                write_values(f, values)?;
                f.write_str(")")
            },
            Self::Array(values) => {
                f.write_str("[")?;
                write_values(f, values)?;
                f.write_str("]")
            },
            Self::Error(Some(message)) => f.write_str(message),
        }
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}
