//! Statement execution

use crate::ast::{Stmt, StmtKind};
use crate::interpreter::Interpreter;
use crate::value::RuntimeError;
use log::debug;
use std::io::Write;

/// What the driver does with the program counter after a statement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    /// Statement completed; move to the next one
    Next,
    /// Statement completed; also step over this many following statements
    Skip(usize),
    /// A call frame was pushed; the statement is replayed after it returns
    Suspend,
    /// The current frame was popped
    Return,
}

impl<'p, W: Write> Interpreter<'p, W> {
    /// Attempt one statement in the current frame
    pub(super) fn execute(&mut self, stmt: &'p Stmt) -> Result<Flow, RuntimeError> {
        match &stmt.kind {
            StmtKind::Assign { name, value } => {
                let value = ready!(self.eval_expr(value)?, Flow::Suspend);
                self.stack
                    .current_mut()
                    .bindings
                    .insert(name.as_str(), value);
                Ok(Flow::Next)
            }
            StmtKind::Function(decl) => {
                if self.functions.register(decl) {
                    debug!("registered function {}/{}", decl.name, decl.arity());
                } else {
                    debug!(
                        "line {}: function {} already declared, keeping the first",
                        stmt.line, decl.name
                    );
                }
                Ok(Flow::Next)
            }
            StmtKind::Print(expr) => {
                let value = ready!(self.eval_expr(expr)?, Flow::Suspend);
                writeln!(self.output, "{}", value).map_err(|e| RuntimeError::Output {
                    message: e.to_string(),
                })?;
                Ok(Flow::Next)
            }
            StmtKind::If { cond, skip } => {
                let cond = ready!(self.eval_expr(cond)?, Flow::Suspend);
                if cond.is_truthy() {
                    Ok(Flow::Next)
                } else {
                    Ok(Flow::Skip(*skip))
                }
            }
            StmtKind::Return(expr) => {
                let value = ready!(self.eval_expr(expr)?, Flow::Suspend);
                self.return_from_call(value)?;
                Ok(Flow::Return)
            }
        }
    }
}
