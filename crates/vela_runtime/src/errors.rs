//! Error values produced by the value layer.
//!
//! Every fallible operation returns a [`ValueError`]; nothing in here unwinds.
//! Interpreters turn an error into a language-level exception with
//! [`Runtime::error_value`](crate::Runtime::error_value).

use thiserror::Error;

/// Common error message fragments used throughout the runtime.
pub mod messages {
    pub const DIVISION_BY_ZERO: &str = "division by zero";
    pub const NEGATIVE_REPEAT: &str = "repeat count cannot be negative";
    pub const NEGATIVE_EXPONENT: &str = "exponent cannot be negative";
    pub const EXPONENT_TOO_LARGE: &str = "exponent is too large";
    pub const SHIFT_TOO_LARGE: &str = "shift count is too large";
    pub const REPEAT_TOO_LARGE: &str = "repeat count is too large";
    pub const ABSTRACT_CLASS: &str = "cannot instantiate an abstract class";
    pub const NOT_A_CLASS: &str = "not a class";
    pub const NOT_A_MIXIN: &str = "not a mixin";
    pub const NO_IVARS: &str = "cannot set instance variables";
    pub const PRIMITIVE_SINGLETON: &str = "cannot open a singleton class for a primitive value";
    pub const WAIT_GROUP_NEGATIVE: &str = "wait group counter cannot be negative";
}

pub type VResult<T> = Result<T, ValueError>;

/// The error taxonomy of the value layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// An operand could not be coerced into the type an operation requires.
    #[error("`{from}` cannot be coerced into `{into}`")]
    TypeCoercion { from: String, into: String },
    #[error("{0}")]
    Type(String),
    #[error("{0}")]
    OutOfRange(String),
    #[error("{}", messages::DIVISION_BY_ZERO)]
    ZeroDivision,
    #[error("index {index} out of range: {}...{len}", lower_bound(.len))]
    Index { index: String, len: usize },
    #[error("cannot override sealed method `{method}` of `{class}`")]
    SealedMethod { class: String, method: String },
    #[error("method `{method}` is not available to value of class `{class}`")]
    NoMethod { class: String, method: String },
    #[error("undefined constant `{name}`")]
    UndefinedConstant { name: String },
    #[error("cannot modify an immutable {0}")]
    Frozen(String),
}

fn lower_bound(len: &usize) -> i64 {
    -(*len as i64)
}

/// Coarse classification of a [`ValueError`], one per error class in `Std`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeError,
    OutOfRangeError,
    ZeroDivisionError,
    IndexError,
    SealedMethodError,
    NoMethodError,
    UndefinedConstantError,
    FrozenError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::TypeError,
        ErrorKind::OutOfRangeError,
        ErrorKind::ZeroDivisionError,
        ErrorKind::IndexError,
        ErrorKind::SealedMethodError,
        ErrorKind::NoMethodError,
        ErrorKind::UndefinedConstantError,
        ErrorKind::FrozenError,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            ErrorKind::TypeError => "TypeError",
            ErrorKind::OutOfRangeError => "OutOfRangeError",
            ErrorKind::ZeroDivisionError => "ZeroDivisionError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::SealedMethodError => "SealedMethodError",
            ErrorKind::NoMethodError => "NoMethodError",
            ErrorKind::UndefinedConstantError => "UndefinedConstantError",
            ErrorKind::FrozenError => "FrozenError",
        }
    }
}

impl ValueError {
    pub fn coercion(from: impl Into<String>, into: impl Into<String>) -> Self {
        ValueError::TypeCoercion { from: from.into(), into: into.into() }
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        ValueError::OutOfRange(msg.into())
    }

    pub fn type_error(msg: impl Into<String>) -> Self {
        ValueError::Type(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::TypeCoercion { .. } | ValueError::Type(_) => ErrorKind::TypeError,
            ValueError::OutOfRange(_) => ErrorKind::OutOfRangeError,
            ValueError::ZeroDivision => ErrorKind::ZeroDivisionError,
            ValueError::Index { .. } => ErrorKind::IndexError,
            ValueError::SealedMethod { .. } => ErrorKind::SealedMethodError,
            ValueError::NoMethod { .. } => ErrorKind::NoMethodError,
            ValueError::UndefinedConstant { .. } => ErrorKind::UndefinedConstantError,
            ValueError::Frozen(_) => ErrorKind::FrozenError,
        }
    }
}
