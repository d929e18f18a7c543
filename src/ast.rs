use std::{fmt, rc::Rc};

use crate::interpreter::value::data_type::DeclaredType;

/// Represents a literal value in the language.
///
/// `Literal` covers the constant values that can appear directly in source
/// code: numbers, strings, booleans and `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The `null` keyword.
    Null,
    /// A 64-bit floating-point literal. All numbers are floats.
    Number(f64),
    /// A double-quoted string literal, escapes already resolved.
    String(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// `Expr` covers everything that produces a value: literals, names, operators,
/// indexing, array literals, calls and spread arguments. Each variant carries
/// the source line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or `null`).
    Literal {
        /// The constant value.
        value: Literal,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a binding by name.
    ///
    /// Qualified reads such as `math.PI` or `lib.counter` keep the dotted
    /// name; imported variables are stored under it.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operation (`-x`, `+x`, `!x`).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, logic, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Array element access, `array[index]`.
    Index {
        /// The indexed expression.
        array: Box<Self>,
        /// The index expression.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Array literal, `[a, b, c]`.
    ArrayLiteral {
        /// Element expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Function call expression (e.g. `f(x)` or `math.abs(x)`).
    FunctionCall {
        /// Namespace qualifier; empty for unqualified calls.
        namespace: String,
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A spread argument, `...expr`. Only produced inside call arguments.
    Spread {
        /// The tuple or array being expanded.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Returns the line number associated with the expression.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Index { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::Spread { line, .. } => *line,
        }
    }

    /// Returns `true` if the expression may appear on the left of `=`.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self, Self::Identifier { .. } | Self::Index { .. })
    }
}

/// A parameter in a function declaration, `name TYPE`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The binding name inside the body.
    pub name:     String,
    /// The declared type arguments are checked against.
    pub declared: DeclaredType,
}

/// A user function declaration.
///
/// Shared behind an `Rc` so function values and the function tables can hold
/// it without copying the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The function's name.
    pub name:         String,
    /// Declared parameters, in order.
    pub params:       Vec<Parameter>,
    /// Declared return types; the length is the declared return arity.
    pub return_types: Vec<DeclaredType>,
    /// The statements of the body.
    pub body:         Vec<Statement>,
    /// Line number of the `func` keyword.
    pub line:         usize,
}

/// The header of a `for` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ForKind {
    /// `for { ... }`
    Infinite,
    /// `for cond { ... }` or `for var i < n { ... }`.
    ///
    /// A declared variable starts at `0` and is incremented after every
    /// iteration.
    Conditional {
        /// The declared loop variable, if any.
        variable:  Option<String>,
        /// Re-evaluated before every iteration; must produce a bool.
        condition: Expr,
    },
    /// `for var i from a to b { ... }` or `for var i to b { ... }`.
    ///
    /// Inclusive of `to`, stepping by one. `to` is re-evaluated before every
    /// iteration.
    Range {
        /// The declared loop variable, if any.
        variable: Option<String>,
        /// Start value; `0` when absent.
        from:     Option<Expr>,
        /// Inclusive upper bound.
        to:       Expr,
    },
}

/// A complete `for` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// Which loop form this is.
    pub kind: ForKind,
    /// The loop body, always a [`Statement::Block`].
    pub body: Box<Statement>,
    /// Line number of the `for` keyword.
    pub line: usize,
}

/// A statement node.
///
/// Statements are what programs, blocks and function bodies are made of. An
/// expression on its own line is wrapped in [`Statement::Expression`].
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its value or side effects.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `var NAME TYPE [= value]`
    VariableDeclaration {
        /// Variable name.
        name:     String,
        /// Declared type.
        declared: DeclaredType,
        /// Optional initializer; `null` when absent.
        value:    Option<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `const NAME TYPE = value`
    ConstantDeclaration {
        /// Constant name.
        name:     String,
        /// Declared type.
        declared: DeclaredType,
        /// Initializer.
        value:    Expr,
        /// Line number in the source code.
        line:     usize,
    },
    /// `target = value`
    Assignment {
        /// An identifier or index expression.
        target: Expr,
        /// The assigned value.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `target op= value`
    CompoundAssignment {
        /// An identifier or index expression.
        target: Expr,
        /// The arithmetic operator applied before assigning.
        op:     BinaryOperator,
        /// The right-hand operand.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `{ ... }`
    Block {
        /// The statements of the block.
        statements: Vec<Self>,
        /// Line number of the opening brace.
        line:       usize,
    },
    /// `if cond { ... } [else ...]`
    If {
        /// Must evaluate to a bool.
        condition:   Expr,
        /// A [`Statement::Block`].
        then_branch: Box<Self>,
        /// A block or a chained `if`.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// Any `for` form.
    For(ForLoop),
    /// `func NAME(params) RETURNS { ... }`
    Function(Rc<FunctionDeclaration>),
    /// `return [values]`
    Return {
        /// Returned expressions.
        values: Vec<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `break [N]`
    Break {
        /// How many enclosing loops to leave.
        count: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// `continue [N]`
    Continue {
        /// Which enclosing loop to advance.
        count: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// `import "path" [as alias]`
    Import {
        /// The path as written.
        path:  String,
        /// The alias; `_` merges into the importing namespace.
        alias: Option<String>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Statement {
    /// Returns the line number associated with the statement.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::VariableDeclaration { line, .. }
            | Self::ConstantDeclaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::CompoundAssignment { line, .. }
            | Self::Block { line, .. }
            | Self::If { line, .. }
            | Self::Return { line, .. }
            | Self::Break { line, .. }
            | Self::Continue { line, .. }
            | Self::Import { line, .. } => *line,
            Self::For(for_loop) => for_loop.line,
            Self::Function(declaration) => declaration.line,
        }
    }
}

/// Operators that take two operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

/// Prefix operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Negate,
    /// `+x`
    Plus,
    /// `!x`
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        f.write_str(operator)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Negate => "-",
                        Self::Plus => "+",
                        Self::Not => "!",
                    })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Renders an expression back to source-like text.
///
/// Used in error messages that quote the offending expression, such as an
/// out-of-bounds index.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => f.write_str(name),
            Self::UnaryOp { op, expr, .. } => write!(f, "{op}{expr}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Index { array, index, .. } => write!(f, "{array}[{index}]"),
            Self::ArrayLiteral { elements, .. } => {
                f.write_str("[")?;
                write_comma_separated(f, elements)?;
                f.write_str("]")
            },
            Self::FunctionCall { namespace,
                                 name,
                                 arguments,
                                 .. } => {
                if !namespace.is_empty() {
                    write!(f, "{namespace}.")?;
                }
                write!(f, "{name}(")?;
                write_comma_separated(f, arguments)?;
                f.write_str(")")
            },
            Self::Spread { expr, .. } => write!(f, "...{expr}"),
        }
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
