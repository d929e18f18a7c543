use std::fmt;

use crate::interpreter::value::core::Value;

/// The tag of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Null,
    Number,
    String,
    Bool,
    Function,
    Tuple,
    Array,
    Error,
}

impl DataType {
    /// Returns the name used in source code and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Function => "function",
            Self::Tuple => "tuple",
            Self::Array => "array",
            Self::Error => "error",
        }
    }

    /// Looks up a data type by its source name.
    ///
    /// # Example
    /// ```
    /// use dlite::interpreter::value::data_type::DataType;
    ///
    /// assert_eq!(DataType::from_name("number"), Some(DataType::Number));
    /// assert_eq!(DataType::from_name("any"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "bool" => Some(Self::Bool),
            "function" => Some(Self::Function),
            "tuple" => Some(Self::Tuple),
            "array" => Some(Self::Array),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type annotation from a declaration or parameter list.
///
/// `any` is only ever a declared type; no runtime value carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// Accepts every value.
    Any,
    /// Accepts values whose data type equals this one.
    Exact(DataType),
    /// `[]T`: accepts arrays whose elements are all accepted by `T`.
    ArrayOf(Box<Self>),
}

impl DeclaredType {
    /// Parses a scalar annotation such as `number` or `any`.
    ///
    /// Array annotations are assembled by the parser from their `[]` prefix.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "any" {
            return Some(Self::Any);
        }
        DataType::from_name(name).map(Self::Exact)
    }

    /// Returns `true` if a binding of this type may hold `value`.
    ///
    /// # Example
    /// ```
    /// use dlite::interpreter::value::{
    ///     core::Value,
    ///     data_type::{DataType, DeclaredType},
    /// };
    ///
    /// let numbers = DeclaredType::ArrayOf(Box::new(DeclaredType::Exact(DataType::Number)));
    ///
    /// assert!(numbers.accepts(&Value::from(vec![Value::Number(1.0)])));
    /// assert!(!numbers.accepts(&Value::from(vec![Value::from("a")])));
    /// assert!(DeclaredType::Any.accepts(&Value::Null));
    /// ```
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(data_type) => value.data_type() == *data_type,
            Self::ArrayOf(element) => match value {
                Value::Array(items) => items.iter().all(|item| element.accepts(item)),
                _ => false,
            },
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Exact(data_type) => write!(f, "{data_type}"),
            Self::ArrayOf(element) => write!(f, "[]{element}"),
        }
    }
}
