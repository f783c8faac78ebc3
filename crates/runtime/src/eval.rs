use std::collections::HashMap;
use std::io::Write;

use span::Span;
use syntax::ast::{Block, Expr, ExprKind, Operator, Stmt, StmtKind};

use crate::error::RuntimeError;
use crate::scope::{ScopeId, Scopes};
use crate::value::Value;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A tree-walking evaluator over a parsed program.
///
/// Holds non-owning references into the AST for its function table —
/// populated while visiting `FuncDef` statements, last write wins — so the
/// `'ast` lifetime ties the evaluator to the tree it walks. `out` receives
/// every `print`ed line.
pub struct Evaluator<'ast, W: Write> {
  scopes: Scopes,
  functions: HashMap<String, &'ast Stmt>,
  out: W,
}

impl<'ast, W: Write> Evaluator<'ast, W> {
  pub fn new(out: W) -> Self {
    Evaluator {
      scopes: Scopes::new(),
      functions: HashMap::new(),
      out,
    }
  }

  /// Visit each top-level statement in order, starting from a fresh root
  /// scope.
  pub fn run(&mut self, program: &'ast Block) -> Result<()> {
    let root = self.scopes.root();
    self.exec_block(program, root)
  }

  fn exec_block(&mut self, block: &'ast Block, scope: ScopeId) -> Result<()> {
    for stmt in &block.stmts {
      self.exec_stmt(stmt, scope)?;
      if self.scopes.has_returned(scope) {
        break;
      }
    }
    Ok(())
  }

  fn exec_stmt(&mut self, stmt: &'ast Stmt, scope: ScopeId) -> Result<()> {
    match &**stmt {
      StmtKind::Assign { name, value } => {
        let value = self.eval_expr(value, scope)?;
        self.scopes.bind(scope, name.clone(), value);
      }
      StmtKind::Print { args } => {
        let mut rendered = Vec::with_capacity(args.len());
        for arg in args {
          rendered.push(self.eval_expr(arg, scope)?.display());
        }
        let _ = writeln!(self.out, "{}", rendered.join(" "));
      }
      StmtKind::If {
        cond,
        then_block,
        else_block,
      } => {
        if self.eval_int(cond, scope)? != 0 {
          self.exec_block(then_block, scope)?;
        } else if let Some(else_block) = else_block {
          self.exec_block(else_block, scope)?;
        }
      }
      StmtKind::FuncDef { name, .. } => {
        self.functions.insert(name.clone(), stmt);
      }
      StmtKind::Return { value } => {
        let value = self.eval_expr(value, scope)?;
        self.scopes.set_return_value(scope, value);
      }
    }
    Ok(())
  }

  fn eval_int(&mut self, expr: &'ast Expr, scope: ScopeId) -> Result<i64> {
    let value = self.eval_expr(expr, scope)?;
    value
      .as_int()
      .ok_or(RuntimeError::NotANumber { span: expr.span })
  }

  fn eval_expr(&mut self, expr: &'ast Expr, scope: ScopeId) -> Result<Value> {
    match &**expr {
      ExprKind::IntLit(n) => Ok(Value::Int(*n)),
      ExprKind::StrLit(s) => Ok(Value::Str(s.clone())),
      ExprKind::Ident(name) => {
        self
          .scopes
          .lookup(scope, name)
          .ok_or_else(|| RuntimeError::UndefinedVariable {
            name: name.clone(),
            span: expr.span,
          })
      }
      ExprKind::BinOp { op, left, right } => {
        // Left before right: evaluation order is observable through
        // side-effecting function calls in either operand.
        let lhs = self.eval_int(left, scope)?;
        let rhs = self.eval_int(right, scope)?;
        Self::apply_op(*op, lhs, rhs, expr.span)
      }
      ExprKind::Call { name, args } => self.eval_call(name, args, expr.span, scope),
    }
  }

  fn apply_op(op: Operator, lhs: i64, rhs: i64, span: Span) -> Result<Value> {
    let result = match op {
      Operator::Add => lhs.wrapping_add(rhs),
      Operator::Sub => lhs.wrapping_sub(rhs),
      Operator::Mul => lhs.wrapping_mul(rhs),
      Operator::Div => {
        if rhs == 0 {
          return Err(RuntimeError::DivisionByZero { span });
        }
        lhs.wrapping_div(rhs)
      }
      Operator::Mod => {
        if rhs == 0 {
          return Err(RuntimeError::ModulusByZero { span });
        }
        lhs.wrapping_rem(rhs)
      }
      Operator::Eq => (lhs == rhs) as i64,
      Operator::Neq => (lhs != rhs) as i64,
      Operator::Lt => (lhs < rhs) as i64,
      Operator::Le => (lhs <= rhs) as i64,
      Operator::Gt => (lhs > rhs) as i64,
      Operator::Ge => (lhs >= rhs) as i64,
    };
    Ok(Value::Int(result))
  }

  fn eval_call(
    &mut self,
    name: &str,
    args: &'ast [Expr],
    span: Span,
    caller: ScopeId,
  ) -> Result<Value> {
    let def: &'ast Stmt =
      *self
        .functions
        .get(name)
        .ok_or_else(|| RuntimeError::UndefinedFunction {
          name: name.to_string(),
          span,
        })?;
    let (params, body) = match &**def {
      StmtKind::FuncDef { params, body, .. } => (params, body),
      _ => unreachable!("function table only ever holds FuncDef statements"),
    };
    if params.len() != args.len() {
      return Err(RuntimeError::ArityMismatch {
        name: name.to_string(),
        expected: params.len(),
        found: args.len(),
        span,
      });
    }

    // Arguments are evaluated left-to-right in the caller's scope, before
    // the callee scope (with its dynamic parent link) is even created.
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
      values.push(self.eval_expr(arg, caller)?);
    }

    let mark = self.scopes.mark();
    let callee = self.scopes.push_child(caller);
    for (param, value) in params.iter().zip(values) {
      self.scopes.bind(callee, param.clone(), value);
    }
    self.exec_block(body, callee)?;
    let result = self.scopes.return_value(callee).unwrap_or(Value::Int(0));
    self.scopes.truncate(mark);
    Ok(result)
  }
}
