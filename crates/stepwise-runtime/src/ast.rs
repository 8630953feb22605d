//! Abstract Syntax Tree (AST) definitions
//!
//! The tree arrives already parsed. Statements are stored as flat sequences:
//! an `If` guards the `skip` statements that directly follow it, and a
//! function body is a nested sequence owned by its declaration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AST schema version
///
/// Included in JSON documents to ensure compatibility.
/// Increment when making breaking changes to the AST structure.
pub const AST_VERSION: u32 = 1;

/// Stable identity of one call expression occurrence.
///
/// Assigned by the loader; never part of the serialized tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct CallSiteId(pub u32);

impl fmt::Display for CallSiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arithmetic and relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(i64),
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Short-circuit `&&`
    And { left: Box<Expr>, right: Box<Expr> },
    /// Short-circuit `||`
    Or { left: Box<Expr>, right: Box<Expr> },
    Call(CallExpr),
}

/// Function call expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    #[serde(skip)]
    pub site: CallSiteId,
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// Statement with its source line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub line: u32,
    pub kind: StmtKind,
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// `name = value`
    Assign { name: String, value: Expr },
    /// `function name(params) { body }`
    Function(FunctionDecl),
    /// `print expr`
    Print(Expr),
    /// Conditional skip: on a falsy condition the next `skip` statements
    /// are jumped over.
    If { cond: Expr, skip: usize },
    /// `return expr`
    Return(Expr),
}

/// Function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Stmt {
    pub fn new(line: u32, kind: StmtKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::And { left, right } => write!(f, "({} && {})", left, right),
            Expr::Or { left, right } => write!(f, "({} || {})", left, right),
            Expr::Call(call) => write!(f, "{}", call),
        }
    }
}

impl fmt::Display for CallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StmtKind::Assign { name, value } => write!(f, "{} = {}", name, value),
            StmtKind::Function(func) => {
                let noun = if func.body.len() == 1 {
                    "statement"
                } else {
                    "statements"
                };
                write!(
                    f,
                    "function {}({}) [{} {}]",
                    func.name,
                    func.params.join(", "),
                    func.body.len(),
                    noun
                )
            }
            StmtKind::Print(expr) => write!(f, "print {}", expr),
            StmtKind::If { cond, skip } => write!(f, "if ({}) skip {}", cond, skip),
            StmtKind::Return(expr) => write!(f, "return {}", expr),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
