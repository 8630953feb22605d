//! Expression evaluation

use crate::ast::{BinaryOp, CallExpr, Expr};
use crate::interpreter::Interpreter;
use crate::value::{RuntimeError, Value};
use std::io::Write;

/// Result of evaluating an expression this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Eval {
    Done(Value),
    /// A call is in flight; the enclosing statement must be replayed.
    Pending,
}

impl<'p, W: Write> Interpreter<'p, W> {
    /// Evaluate an expression against the current frame
    ///
    /// Operands are evaluated left to right and evaluation stops at the first
    /// `Pending`: once a call has pushed a frame, nothing else may be
    /// evaluated against the new top of the stack.
    pub(super) fn eval_expr(&mut self, expr: &'p Expr) -> Result<Eval, RuntimeError> {
        match expr {
            Expr::Literal(n) => Ok(Eval::Done(Value(*n))),
            Expr::Variable(name) => self.stack.lookup(name).map(Eval::Done).ok_or_else(|| {
                RuntimeError::UndefinedVariable { name: name.clone() }
            }),
            Expr::Binary { op, left, right } => {
                let left = ready!(self.eval_expr(left)?, Eval::Pending);
                let right = ready!(self.eval_expr(right)?, Eval::Pending);
                binary_op(*op, left, right).map(Eval::Done)
            }
            Expr::And { left, right } => {
                let left = ready!(self.eval_expr(left)?, Eval::Pending);
                if !left.is_truthy() {
                    return Ok(Eval::Done(Value::FALSE));
                }
                let right = ready!(self.eval_expr(right)?, Eval::Pending);
                Ok(Eval::Done(Value::from_bool(right.is_truthy())))
            }
            Expr::Or { left, right } => {
                let left = ready!(self.eval_expr(left)?, Eval::Pending);
                if left.is_truthy() {
                    return Ok(Eval::Done(Value::TRUE));
                }
                let right = ready!(self.eval_expr(right)?, Eval::Pending);
                Ok(Eval::Done(Value::from_bool(right.is_truthy())))
            }
            Expr::Call(call) => self.eval_call(call),
        }
    }

    /// Evaluate a call: consume a cached result, or dispatch the call.
    fn eval_call(&mut self, call: &'p CallExpr) -> Result<Eval, RuntimeError> {
        if let Some(value) = self.stack.current_mut().cache.take(call.site) {
            return Ok(Eval::Done(value));
        }

        let function =
            self.functions
                .get(&call.name)
                .ok_or_else(|| RuntimeError::UnknownFunction {
                    name: call.name.clone(),
                })?;

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(ready!(self.eval_expr(arg)?, Eval::Pending));
        }

        if args.len() != function.arity() {
            return Err(RuntimeError::ArityMismatch {
                name: call.name.clone(),
                expected: function.arity(),
                found: args.len(),
            });
        }

        self.push_call(function, args, call.site);
        Ok(Eval::Pending)
    }
}

/// Apply an arithmetic or relational operator
fn binary_op(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    let (a, b) = (left.as_i64(), right.as_i64());
    let result = match op {
        BinaryOp::Add => Value(a.wrapping_add(b)),
        BinaryOp::Sub => Value(a.wrapping_sub(b)),
        BinaryOp::Mul => Value(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(RuntimeError::DivideByZero);
            }
            Value(a.wrapping_div(b))
        }
        BinaryOp::Gt => Value::from_bool(a > b),
        BinaryOp::Lt => Value::from_bool(a < b),
        BinaryOp::Ge => Value::from_bool(a >= b),
        BinaryOp::Le => Value::from_bool(a <= b),
        BinaryOp::Eq => Value::from_bool(a == b),
    };
    Ok(result)
}
