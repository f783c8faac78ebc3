//! The abstract syntax tree produced by [`crate::parser::Parser`].
//!
//! Every node is wrapped in [`span::Spanned`] so diagnostics can point back
//! at the exact source range a node came from. Children are owned directly;
//! the tree cannot contain cycles.

use span::Spanned;

pub type Expr = Spanned<ExprKind>;
pub type Stmt = Spanned<StmtKind>;

/// A binary operator, tagged the way the lexer encodes it: most variants
/// keep their literal character as a lexeme, but `==`, `!=`, `<=` and `>=`
/// fold down to the single characters `E`, `N`, `L`, `G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  Eq,
  Neq,
  Lt,
  Le,
  Gt,
  Ge,
}

impl Operator {
  /// Parse the single-character lexeme the lexer hands back for an
  /// operator token. Panics on anything else, since the parser only ever
  /// calls this on tokens it already knows are operators.
  pub fn from_lexeme(lexeme: &str) -> Operator {
    match lexeme {
      "+" => Operator::Add,
      "-" => Operator::Sub,
      "*" => Operator::Mul,
      "/" => Operator::Div,
      "%" => Operator::Mod,
      "E" => Operator::Eq,
      "N" => Operator::Neq,
      "<" => Operator::Lt,
      "L" => Operator::Le,
      ">" => Operator::Gt,
      "G" => Operator::Ge,
      other => unreachable!("not an operator lexeme: {other:?}"),
    }
  }
}

#[derive(Clone, Debug)]
pub enum ExprKind {
  IntLit(i64),
  StrLit(String),
  Ident(String),
  BinOp {
    op: Operator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Call {
    name: String,
    args: Vec<Expr>,
  },
}

#[derive(Clone, Debug)]
pub enum StmtKind {
  Assign {
    name: String,
    value: Expr,
  },
  Print {
    args: Vec<Expr>,
  },
  If {
    cond: Expr,
    then_block: Block,
    else_block: Option<Block>,
  },
  FuncDef {
    name: String,
    params: Vec<String>,
    body: Block,
  },
  Return {
    value: Expr,
  },
}

/// An ordered, possibly-empty sequence of statements. `If` branches and
/// function bodies share this type; neither opens a new binding scope by
/// itself (branches share the enclosing scope; a function body's scope is
/// created by the call machinery, not by the block).
#[derive(Clone, Debug, Default)]
pub struct Block {
  pub stmts: Vec<Stmt>,
}

impl Block {
  pub fn new(stmts: Vec<Stmt>) -> Block {
    Block { stmts }
  }
}

pub fn int_lit(span: impl Into<span::Span>, value: i64) -> Expr {
  Spanned::new(span, ExprKind::IntLit(value))
}

pub fn str_lit(span: impl Into<span::Span>, value: String) -> Expr {
  Spanned::new(span, ExprKind::StrLit(value))
}

pub fn ident(span: impl Into<span::Span>, name: String) -> Expr {
  Spanned::new(span, ExprKind::Ident(name))
}

pub fn bin_op(span: impl Into<span::Span>, op: Operator, left: Expr, right: Expr) -> Expr {
  Spanned::new(
    span,
    ExprKind::BinOp {
      op,
      left: Box::new(left),
      right: Box::new(right),
    },
  )
}

pub fn call(span: impl Into<span::Span>, name: String, args: Vec<Expr>) -> Expr {
  Spanned::new(span, ExprKind::Call { name, args })
}
