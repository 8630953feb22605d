//! Shared test utilities
//!
//! Builders for statement trees, so tests can describe programs without
//! going through JSON, plus helpers that run a program to completion.

#![allow(dead_code)]

use stepwise_runtime::{
    BinaryOp, CallExpr, CallSiteId, Expr, FatalError, FunctionDecl, Interpreter, Program,
    RunStats, Stmt, StmtKind,
};

pub use pretty_assertions::{assert_eq, assert_ne};

pub fn lit(n: i64) -> Expr {
    Expr::Literal(n)
}

pub fn var(name: &str) -> Expr {
    Expr::Variable(name.to_string())
}

pub fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        site: CallSiteId::default(),
        name: name.to_string(),
        args,
    })
}

pub fn assign(line: u32, name: &str, value: Expr) -> Stmt {
    Stmt::new(
        line,
        StmtKind::Assign {
            name: name.to_string(),
            value,
        },
    )
}

pub fn print(line: u32, expr: Expr) -> Stmt {
    Stmt::new(line, StmtKind::Print(expr))
}

pub fn if_skip(line: u32, cond: Expr, skip: usize) -> Stmt {
    Stmt::new(line, StmtKind::If { cond, skip })
}

pub fn ret(line: u32, expr: Expr) -> Stmt {
    Stmt::new(line, StmtKind::Return(expr))
}

pub fn func(line: u32, name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::new(
        line,
        StmtKind::Function(FunctionDecl {
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            body,
        }),
    )
}

/// Load a statement tree, panicking on validation errors
pub fn load(statements: Vec<Stmt>) -> Program {
    Program::load(statements).expect("program should load")
}

/// Printed lines and statistics of a successful run
#[derive(Debug)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub stats: RunStats,
}

/// Run to completion. On a fatal error, also returns the lines printed before it.
pub fn run(statements: Vec<Stmt>) -> Result<Outcome, (FatalError, Vec<String>)> {
    let program = load(statements);
    let mut interp = Interpreter::new(&program, Vec::new());
    let result = interp.run();
    let lines = String::from_utf8(interp.into_output())
        .expect("output should be UTF-8")
        .lines()
        .map(str::to_string)
        .collect();
    match result {
        Ok(stats) => Ok(Outcome { lines, stats }),
        Err(err) => Err((err, lines)),
    }
}

/// Run and return printed lines, panicking on a fatal error
pub fn run_lines(statements: Vec<Stmt>) -> Vec<String> {
    match run(statements) {
        Ok(outcome) => outcome.lines,
        Err((err, _)) => panic!("unexpected fatal error: {}", err),
    }
}

/// Run and return the fatal error, panicking if the program succeeds
pub fn run_err(statements: Vec<Stmt>) -> FatalError {
    match run(statements) {
        Ok(outcome) => panic!("expected fatal error, got output {:?}", outcome.lines),
        Err((err, _)) => err,
    }
}
