use std::{collections::HashMap, fmt};

use crate::interpreter::{
    evaluator::core::EvalResult,
    stdlib,
    value::{core::Value, data_type::DataType},
};

/// What a standard-library handler may do to the running program.
pub trait Host {
    /// Appends text to the output buffer.
    fn add_to_buffer(&mut self, text: &str);

    /// Requests that the program stop with `code`.
    fn terminate(&mut self, code: u8);
}

/// Type alias for standard-library handlers.
///
/// A handler receives the host, the validated argument values and the line
/// of the call. It returns the call's value wrapped in `EvalResult`.
pub type Handler = fn(&mut dyn Host, &[Value], usize) -> EvalResult<Value>;

/// How the arguments of a library function are checked.
///
/// - `Fixed`: exactly one argument per parameter, each checked against its
///   parameter.
/// - `Variadic`: any number of arguments, all checked against the first
///   parameter.
/// - `MixedVariadic`: every parameter but the last is required and checked in
///   order; the remaining arguments are checked against the last parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed,
    Variadic,
    MixedVariadic,
}

/// The type a parameter or return slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Any,
    Of(DataType),
}

pub const ANY: ArgKind = ArgKind::Any;
pub const NUMBER: ArgKind = ArgKind::Of(DataType::Number);
pub const STRING: ArgKind = ArgKind::Of(DataType::String);
pub const BOOL: ArgKind = ArgKind::Of(DataType::Bool);
pub const ARRAY: ArgKind = ArgKind::Of(DataType::Array);
pub const ERROR: ArgKind = ArgKind::Of(DataType::Error);

impl ArgKind {
    /// Returns `true` if `value` fits this slot.
    ///
    /// # Example
    /// ```
    /// use dlite::interpreter::{
    ///     evaluator::function::registry::{ANY, NUMBER},
    ///     value::core::Value,
    /// };
    ///
    /// assert!(NUMBER.accepts(&Value::Number(1.0)));
    /// assert!(!NUMBER.accepts(&Value::from("1")));
    /// assert!(ANY.accepts(&Value::Null));
    /// ```
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Of(data_type) => value.data_type() == data_type,
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Of(data_type) => write!(f, "{data_type}"),
        }
    }
}

/// A named parameter of a library function.
#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ArgKind,
}

/// A library function: its metadata and its handler.
pub struct FunctionInfo {
    /// Namespace the function lives in; empty for the global package.
    pub package: &'static str,
    pub name:    &'static str,
    /// One-line description.
    pub doc:     &'static str,
    pub arity:   Arity,
    pub params:  &'static [Param],
    pub returns: &'static [ArgKind],
    pub handler: Handler,
}

impl FunctionInfo {
    /// Renders the signature the way it would be declared in a script.
    ///
    /// # Example
    /// ```
    /// use dlite::interpreter::evaluator::function::registry::Registry;
    ///
    /// let registry = Registry::standard();
    ///
    /// let pow = registry.get("math", "pow").unwrap();
    /// assert_eq!(pow.signature(), "func pow(base number, exponent number) number");
    ///
    /// let min = registry.get("math", "min").unwrap();
    /// assert_eq!(min.signature(), "func min(...nums number) (number, error)");
    /// ```
    #[must_use]
    pub fn signature(&self) -> String {
        let params = self.params
                         .iter()
                         .map(|param| format!("{} {}", param.name, param.kind))
                         .collect::<Vec<_>>()
                         .join(", ");

        let signature = format!("func {}({params})", self.name);

        match self.returns {
            [] => signature,
            [single] => format!("{signature} {single}"),
            many => {
                let returns = many.iter()
                                  .map(ToString::to_string)
                                  .collect::<Vec<_>>()
                                  .join(", ");
                format!("{signature} ({returns})")
            },
        }
    }
}

/// Declares the function table of one standard-library package.
///
/// Each entry provides:
/// - the script-visible name,
/// - a one-line description,
/// - the arity class,
/// - the parameters as `name: kind` pairs,
/// - the return kinds,
/// - the handler.
///
/// The macro produces `pub static FUNCTIONS: &[FunctionInfo]`.
macro_rules! stdlib_functions {
    (
        package: $package:literal;
        $(
            $name:literal => {
                doc: $doc:literal,
                arity: $arity:ident,
                params: [$($param:literal : $kind:expr),* $(,)?],
                returns: [$($ret:expr),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static FUNCTIONS: &[$crate::interpreter::evaluator::function::registry::FunctionInfo] = &[
            $(
                $crate::interpreter::evaluator::function::registry::FunctionInfo {
                    package: $package,
                    name:    $name,
                    doc:     $doc,
                    arity:   $crate::interpreter::evaluator::function::registry::Arity::$arity,
                    params:  &[$($crate::interpreter::evaluator::function::registry::Param {
                        name: $param,
                        kind: $kind,
                    }),*],
                    returns: &[$($ret),*],
                    handler: $func,
                },
            )*
        ];
    };
}

pub(crate) use stdlib_functions;

/// The immutable table of standard-library functions, by package and name.
///
/// Built once and shared by an evaluator and the child evaluators it creates
/// for imports.
pub struct Registry {
    packages: HashMap<&'static str, HashMap<&'static str, &'static FunctionInfo>>,
}

impl Registry {
    /// Creates a registry with no packages.
    #[must_use]
    pub fn empty() -> Self {
        Self { packages: HashMap::new() }
    }

    /// Creates a registry holding every standard-library package.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        for functions in stdlib::packages() {
            registry.register(functions);
        }

        tracing::trace!(packages = registry.packages.len(), "built function registry");
        registry
    }

    /// Adds a table of functions. Later entries replace earlier ones with
    /// the same package and name.
    pub fn register(&mut self, functions: &'static [FunctionInfo]) {
        for function in functions {
            self.packages
                .entry(function.package)
                .or_default()
                .insert(function.name, function);
        }
    }

    /// Looks up a function by package and name.
    #[must_use]
    pub fn get(&self, package: &str, name: &str) -> Option<&'static FunctionInfo> {
        self.packages
            .get(package)
            .and_then(|functions| functions.get(name))
            .copied()
    }

    /// Returns `true` if a package with this name exists.
    #[must_use]
    pub fn has_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    /// Returns the functions of a package sorted by name.
    #[must_use]
    pub fn functions(&self, package: &str) -> Vec<&'static FunctionInfo> {
        let mut functions = self.packages
                                .get(package)
                                .map(|functions| functions.values().copied().collect::<Vec<_>>())
                                .unwrap_or_default();
        functions.sort_by_key(|function| function.name);
        functions
    }
}

/// Lists every package and, under it, each function's signature and
/// description. The global package is listed as `global`.
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut packages = self.packages.keys().copied().collect::<Vec<_>>();
        packages.sort_unstable();

        for package in packages {
            writeln!(f, "{}", if package.is_empty() { "global" } else { package })?;
            for function in self.functions(package) {
                writeln!(f, "  {}", function.signature())?;
                writeln!(f, "      {}", function.doc)?;
            }
        }

        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packages_resolve_by_namespace() {
        let registry = Registry::standard();

        assert!(registry.has_package(""));
        assert!(registry.has_package("math"));
        assert!(!registry.has_package("nope"));
        assert!(registry.get("", "printf").is_some());
        assert!(registry.get("math", "printf").is_none());
    }

    #[test]
    fn every_entry_lives_in_its_own_package() {
        let registry = Registry::standard();

        for package in ["", "math", "strings", "arrays", "errors", "os", "time", "io"] {
            let functions = registry.functions(package);
            assert!(!functions.is_empty(), "package '{package}' is empty");
            assert!(functions.iter().all(|f| f.package == package));
        }
    }

    #[test]
    fn mixed_variadic_signatures_list_the_rest_parameter_last() {
        let registry = Registry::standard();
        let printf = registry.get("", "printf").unwrap();

        assert_eq!(printf.arity, Arity::MixedVariadic);
        assert_eq!(printf.signature(), "func printf(format string, ...args any)");
    }

    #[test]
    fn listing_shows_signatures_with_their_descriptions() {
        let listing = Registry::standard().to_string();

        assert!(listing.starts_with("global\n  func dump("));
        assert!(listing.contains("\narrays\n"));
        assert!(listing.contains("\nmath\n  func abs("));
        assert!(listing.contains("  func pow(base number, exponent number) number\n      \
                                  Returns base raised to the power of exponent.\n"));
    }
}
