//! Stepwise Runtime - single-step execution engine
//!
//! This library executes already-parsed Stepwise programs:
//! - Loading and validating the versioned JSON program form
//! - A tick-at-a-time interpreter over an explicit call stack
//! - Call results delivered through per-frame caches and statement replay

/// Stepwise runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod interpreter;
pub mod program;
pub mod value;

pub use ast::{
    BinaryOp, CallExpr, CallSiteId, Expr, FunctionDecl, Stmt, StmtKind, AST_VERSION,
};
pub use interpreter::{CallCache, CallStack, Frame, FunctionTable, Interpreter, RunStats, StepState};
pub use program::{LoadError, Program, VersionedProgram};
pub use value::{FatalError, RuntimeError, Value};
