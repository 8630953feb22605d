//! Runtime values and errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Runtime value
///
/// Every value is a signed integer. In a boolean context 0 is false and
/// anything else is true; relational and logical operators produce 1 or 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Value(pub i64);

impl Value {
    pub const FALSE: Value = Value(0);
    pub const TRUE: Value = Value(1);

    pub fn from_bool(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    pub fn is_truthy(self) -> bool {
        self.0 != 0
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::from_bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Runtime error
///
/// Every runtime error is fatal: it unwinds straight to the driver loop,
/// which attaches the line of the executing statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Undefined variable
    #[error("Variable not found: {name}")]
    UndefinedVariable { name: String },
    /// Undefined function
    #[error("Cannot find function {name}")]
    UnknownFunction { name: String },
    /// Call argument count differs from the declared parameter count
    #[error("Function {name} expects {expected} arguments, got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// Division by zero
    #[error("Division by zero")]
    DivideByZero,
    /// Function body finished without executing `return`
    #[error("Function {name} ended without return")]
    MissingReturn { name: String },
    /// `return` executed by the top-level program
    #[error("Return outside of function")]
    ReturnOutsideFunction,
    /// The output sink rejected a line
    #[error("Output error: {message}")]
    Output { message: String },
}

impl RuntimeError {
    /// Unresolved variable or function name
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::UndefinedVariable { .. } | RuntimeError::UnknownFunction { .. }
        )
    }
}

/// A runtime error tagged with the line of the statement that raised it.
///
/// Displays as `<line>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}: {error}")]
pub struct FatalError {
    pub line: u32,
    #[source]
    pub error: RuntimeError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value(0).is_truthy());
        assert!(Value(5).is_truthy());
        assert!(Value(-1).is_truthy());
        assert_eq!(Value::from(true), Value(1));
        assert_eq!(Value::from(false), Value(0));
    }

    #[test]
    fn test_fatal_error_format() {
        let err = FatalError {
            line: 1,
            error: RuntimeError::UndefinedVariable {
                name: "y".to_string(),
            },
        };
        assert_eq!(err.to_string(), "1: Variable not found: y");
        assert!(err.error.is_name_error());
    }

    #[test]
    fn test_arity_message() {
        let err = RuntimeError::ArityMismatch {
            name: "f".to_string(),
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "Function f expects 2 arguments, got 1");
        assert!(!err.is_name_error());
    }
}
