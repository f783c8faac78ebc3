//! Recursive-descent, precedence-climbing parser.
//!
//! `peek`/`peek_next` give the two tokens of lookahead the grammar needs —
//! in practice only for telling `IDENT '='` (assignment) apart from any
//! other use of an identifier.

use crate::ast::{self, Block, Expr, Operator, Stmt, StmtKind};
use crate::lexer::{Token, TokenKind};
use crate::{Error, Result};

pub struct Parser<'t, 'src> {
  tokens: &'t [Token<'src>],
  pos: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
  pub fn new(tokens: &'t [Token<'src>]) -> Self {
    Parser { tokens, pos: 0 }
  }

  fn peek(&self) -> &Token<'src> {
    &self.tokens[self.pos]
  }

  fn peek_next(&self) -> &Token<'src> {
    &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
  }

  fn at(&self, kind: TokenKind) -> bool {
    self.peek().is(kind)
  }

  fn bump(&mut self) -> Token<'src> {
    let tok = self.tokens[self.pos].clone();
    if self.pos + 1 < self.tokens.len() {
      self.pos += 1;
    }
    tok
  }

  fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token<'src>> {
    if self.at(kind) {
      Ok(self.bump())
    } else {
      let tok = self.peek().clone();
      Err(Error::new(
        format!("expected {what}, found {:?}", tok.kind),
        tok.span,
      ))
    }
  }

  /// Skips blank lines between top-level statements. Also eats stray
  /// `DEDENT`s, which only show up here at the very top level (where
  /// there's no enclosing block whose terminator needs to survive).
  fn skip_separators(&mut self) {
    while self.at(TokenKind::Newline) || self.at(TokenKind::Dedent) {
      self.bump();
    }
  }

  /// Skips blank lines between statements inside an indented block.
  /// Unlike `skip_separators`, this never eats `DEDENT` — that token is
  /// the block's own terminator and must survive for the caller's
  /// `at(TokenKind::Dedent)` check.
  fn skip_blank_lines(&mut self) {
    while self.at(TokenKind::Newline) {
      self.bump();
    }
  }

  /// Parse an entire program: `Program := { Stmt }`.
  pub fn parse_program(&mut self) -> Result<Block> {
    let mut stmts = Vec::new();
    self.skip_separators();
    while !self.at(TokenKind::EndOfFile) {
      stmts.push(self.parse_stmt()?);
      self.skip_separators();
    }
    Ok(Block::new(stmts))
  }

  /// `Block := Stmt { Stmt }`, consumed between an already-eaten `INDENT`
  /// and the `DEDENT` that closes it (which this also consumes).
  fn parse_indented_block(&mut self) -> Result<Block> {
    self.expect(TokenKind::Indent, "an indented block")?;
    let mut stmts = Vec::new();
    self.skip_blank_lines();
    loop {
      if self.at(TokenKind::Dedent) || self.at(TokenKind::EndOfFile) {
        break;
      }
      stmts.push(self.parse_stmt()?);
      self.skip_blank_lines();
    }
    self.expect(TokenKind::Dedent, "a dedent closing the block")?;
    Ok(Block::new(stmts))
  }

  fn parse_stmt(&mut self) -> Result<Stmt> {
    match self.peek().kind {
      TokenKind::If => self.parse_if_stmt(),
      TokenKind::Print => self.parse_print_stmt(),
      TokenKind::Def => self.parse_func_def(),
      TokenKind::Return => self.parse_return_stmt(),
      TokenKind::Identifier if self.peek_next().is(TokenKind::Assign) => self.parse_assign(),
      _ => {
        let tok = self.peek().clone();
        Err(Error::new(
          format!("unexpected token at start of statement: {:?}", tok.kind),
          tok.span,
        ))
      }
    }
  }

  fn parse_if_stmt(&mut self) -> Result<Stmt> {
    let start = self.expect(TokenKind::If, "`if`")?.span;
    let cond = self.parse_expr()?;
    self.expect(TokenKind::Colon, "`:`")?;
    self.expect(TokenKind::Newline, "a newline after `:`")?;
    let then_block = self.parse_indented_block()?;

    let (else_block, end) = if self.at(TokenKind::Else) {
      self.bump();
      self.expect(TokenKind::Colon, "`:`")?;
      self.expect(TokenKind::Newline, "a newline after `:`")?;
      let block = self.parse_indented_block()?;
      let span = block
        .stmts
        .last()
        .map(|s| s.span)
        .unwrap_or(start);
      (Some(block), span)
    } else {
      let span = then_block
        .stmts
        .last()
        .map(|s| s.span)
        .unwrap_or(start);
      (None, span)
    };

    Ok(Stmt::new(
      start.join(end),
      StmtKind::If {
        cond,
        then_block,
        else_block,
      },
    ))
  }

  fn parse_print_stmt(&mut self) -> Result<Stmt> {
    let start = self.expect(TokenKind::Print, "`print`")?.span;
    self.expect(TokenKind::LeftParen, "`(`")?;
    let mut args = Vec::new();
    if !self.at(TokenKind::RightParen) {
      args.push(self.parse_expr()?);
      while self.at(TokenKind::Comma) {
        self.bump();
        args.push(self.parse_expr()?);
      }
    }
    let end = self.expect(TokenKind::RightParen, "`)`")?.span;
    self.expect(TokenKind::Newline, "a newline after the statement")?;
    Ok(Stmt::new(start.join(end), StmtKind::Print { args }))
  }

  fn parse_assign(&mut self) -> Result<Stmt> {
    let name_tok = self.expect(TokenKind::Identifier, "an identifier")?;
    let name = name_tok.lexeme.to_string();
    self.expect(TokenKind::Assign, "`=`")?;
    let value = self.parse_expr()?;
    self.expect(TokenKind::Newline, "a newline after the statement")?;
    let span = name_tok.span.join(value.span);
    Ok(Stmt::new(span, StmtKind::Assign { name, value }))
  }

  fn parse_func_def(&mut self) -> Result<Stmt> {
    let start = self.expect(TokenKind::Def, "`def`")?.span;
    let name = self.expect(TokenKind::Identifier, "a function name")?.lexeme.to_string();
    self.expect(TokenKind::LeftParen, "`(`")?;
    let mut params = Vec::new();
    if !self.at(TokenKind::RightParen) {
      params.push(self.expect(TokenKind::Identifier, "a parameter name")?.lexeme.to_string());
      while self.at(TokenKind::Comma) {
        self.bump();
        params.push(self.expect(TokenKind::Identifier, "a parameter name")?.lexeme.to_string());
      }
    }
    self.expect(TokenKind::RightParen, "`)`")?;
    self.expect(TokenKind::Colon, "`:`")?;
    self.expect(TokenKind::Newline, "a newline after `:`")?;
    let body = self.parse_indented_block()?;
    let end = body.stmts.last().map(|s| s.span).unwrap_or(start);
    Ok(Stmt::new(
      start.join(end),
      StmtKind::FuncDef { name, params, body },
    ))
  }

  fn parse_return_stmt(&mut self) -> Result<Stmt> {
    let start = self.expect(TokenKind::Return, "`return`")?.span;
    let value = self.parse_expr()?;
    self.expect(TokenKind::Newline, "a newline after the statement")?;
    let span = start.join(value.span);
    Ok(Stmt::new(span, StmtKind::Return { value }))
  }

  fn parse_expr(&mut self) -> Result<Expr> {
    self.parse_equality()
  }

  fn parse_equality(&mut self) -> Result<Expr> {
    self.parse_binary(Self::parse_comparison, &[TokenKind::EqualEqual, TokenKind::BangEqual])
  }

  fn parse_comparison(&mut self) -> Result<Expr> {
    self.parse_binary(
      Self::parse_addition,
      &[
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
      ],
    )
  }

  fn parse_addition(&mut self) -> Result<Expr> {
    self.parse_binary(Self::parse_mult, &[TokenKind::Plus, TokenKind::Minus])
  }

  fn parse_mult(&mut self) -> Result<Expr> {
    self.parse_binary(
      Self::parse_primary,
      &[TokenKind::Multiply, TokenKind::Divide, TokenKind::Modulus],
    )
  }

  fn parse_binary(
    &mut self,
    mut next: impl FnMut(&mut Self) -> Result<Expr>,
    kinds: &[TokenKind],
  ) -> Result<Expr> {
    let mut left = next(self)?;
    while kinds.contains(&self.peek().kind) {
      let op_tok = self.bump();
      let op = Operator::from_lexeme(&op_tok.lexeme);
      let right = next(self)?;
      let span = left.span.join(right.span);
      left = ast::bin_op(span, op, left, right);
    }
    Ok(left)
  }

  fn parse_primary(&mut self) -> Result<Expr> {
    let tok = self.peek().clone();
    match tok.kind {
      TokenKind::Number => {
        self.bump();
        let value: i64 = tok.lexeme.parse().map_err(|_| {
          Error::new(format!("invalid integer literal `{}`", tok.lexeme), tok.span)
        })?;
        Ok(ast::int_lit(tok.span, value))
      }
      TokenKind::String => {
        self.bump();
        Ok(ast::str_lit(tok.span, tok.lexeme.to_string()))
      }
      TokenKind::Identifier => {
        self.bump();
        let name = tok.lexeme.to_string();
        if self.at(TokenKind::LeftParen) {
          self.bump();
          let mut args = Vec::new();
          if !self.at(TokenKind::RightParen) {
            args.push(self.parse_expr()?);
            while self.at(TokenKind::Comma) {
              self.bump();
              args.push(self.parse_expr()?);
            }
          }
          let end = self.expect(TokenKind::RightParen, "`)`")?.span;
          Ok(ast::call(tok.span.join(end), name, args))
        } else {
          Ok(ast::ident(tok.span, name))
        }
      }
      _ => Err(Error::new(
        format!("expected an expression, found {:?}", tok.kind),
        tok.span,
      )),
    }
  }
}
