//! Loaded programs
//!
//! A [`Program`] is the validated, read-only form of a statement tree handed
//! over by a front end. Loading checks the flat `If` addressing against each
//! sequence's length and numbers every call site, so the interpreter can rely
//! on in-bounds jumps and stable call identities.

use crate::ast::{CallSiteId, Expr, Stmt, StmtKind, AST_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write as _;
use thiserror::Error;

/// Errors detected before execution starts
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid program JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported AST version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("{line}: if skips {skip} statements but only {remaining} follow")]
    SkipOutOfRange {
        line: u32,
        skip: usize,
        remaining: usize,
    },

    #[error("{line}: duplicate parameter '{name}' in function {function}")]
    DuplicateParameter {
        line: u32,
        function: String,
        name: String,
    },
}

/// Versioned wrapper used as the JSON interchange format
///
/// ```json
/// { "ast_version": 1, "statements": [ { "line": 1, "kind": { "Print": { "Literal": 1 } } } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProgram {
    pub ast_version: u32,
    pub statements: Vec<Stmt>,
}

/// A validated program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    statements: Vec<Stmt>,
    call_sites: u32,
}

impl Program {
    /// Validate a statement tree and assign call-site identities.
    pub fn load(mut statements: Vec<Stmt>) -> Result<Self, LoadError> {
        validate_sequence(&statements)?;

        let mut next = 0;
        number_sequence(&mut statements, &mut next);

        Ok(Self {
            statements,
            call_sites: next,
        })
    }

    /// Load a program from its versioned JSON form
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let versioned: VersionedProgram = serde_json::from_str(json)?;
        if versioned.ast_version != AST_VERSION {
            return Err(LoadError::UnsupportedVersion {
                found: versioned.ast_version,
                expected: AST_VERSION,
            });
        }
        Self::load(versioned.statements)
    }

    /// Serialize to versioned JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&VersionedProgram {
            ast_version: AST_VERSION,
            statements: self.statements.clone(),
        })
    }

    /// Top-level statements
    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }

    /// Number of call sites, function bodies included
    pub fn call_site_count(&self) -> u32 {
        self.call_sites
    }

    /// Render one statement per line, prefixed with its source line.
    /// Function bodies are indented under their declaration.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_sequence(&self.statements, 0, &mut out);
        out
    }
}

fn validate_sequence(stmts: &[Stmt]) -> Result<(), LoadError> {
    for (index, stmt) in stmts.iter().enumerate() {
        match &stmt.kind {
            StmtKind::If { skip, .. } => {
                let remaining = stmts.len() - index - 1;
                if *skip > remaining {
                    return Err(LoadError::SkipOutOfRange {
                        line: stmt.line,
                        skip: *skip,
                        remaining,
                    });
                }
            }
            StmtKind::Function(func) => {
                let mut seen = HashSet::new();
                for param in &func.params {
                    if !seen.insert(param.as_str()) {
                        return Err(LoadError::DuplicateParameter {
                            line: stmt.line,
                            function: func.name.clone(),
                            name: param.clone(),
                        });
                    }
                }
                validate_sequence(&func.body)?;
            }
            StmtKind::Assign { .. } | StmtKind::Print(_) | StmtKind::Return(_) => {}
        }
    }
    Ok(())
}

fn number_sequence(stmts: &mut [Stmt], next: &mut u32) {
    for stmt in stmts {
        match &mut stmt.kind {
            StmtKind::Assign { value, .. } => number_expr(value, next),
            StmtKind::Print(expr) | StmtKind::Return(expr) => number_expr(expr, next),
            StmtKind::If { cond, .. } => number_expr(cond, next),
            StmtKind::Function(func) => number_sequence(&mut func.body, next),
        }
    }
}

fn number_expr(expr: &mut Expr, next: &mut u32) {
    match expr {
        Expr::Literal(_) | Expr::Variable(_) => {}
        Expr::Binary { left, right, .. }
        | Expr::And { left, right }
        | Expr::Or { left, right } => {
            number_expr(left, next);
            number_expr(right, next);
        }
        Expr::Call(call) => {
            call.site = CallSiteId(*next);
            *next += 1;
            for arg in &mut call.args {
                number_expr(arg, next);
            }
        }
    }
}

fn render_sequence(stmts: &[Stmt], depth: usize, out: &mut String) {
    for stmt in stmts {
        let _ = writeln!(out, "{:>4} {}{}", stmt.line, "    ".repeat(depth), stmt);
        if let StmtKind::Function(func) = &stmt.kind {
            render_sequence(&func.body, depth + 1, out);
        }
    }
}
