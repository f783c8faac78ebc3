#![allow(non_camel_case_types)]

use std::fmt;

use beef::lean::Cow;
use logos::Logos;
use span::Span;

use crate::Error;

/// A single lexical token.
///
/// For synthetic tokens (`Indent`, `Dedent`, `Newline`, `EndOfFile`) the
/// lexeme is always empty, matching the contract in the language reference.
#[derive(Clone, Debug)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub lexeme: Cow<'src, str>,
  pub span: Span,
}

impl<'src> Token<'src> {
  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}

impl<'src> fmt::Display for Token<'src> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self.kind)
  }
}

/// The closed set of token kinds produced by the lexer.
///
/// `Indent`, `Dedent`, `Newline` and `EndOfFile` never come out of the
/// underlying [`logos`] scanner directly — they're synthesized by
/// [`Lexer::lex`] from the raw whitespace runs it sees between real tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
  Identifier,
  Number,
  String,

  Print,
  If,
  Else,
  Def,
  Return,

  Plus,
  Minus,
  Multiply,
  Divide,
  Modulus,

  Assign,
  EqualEqual,
  BangEqual,
  Less,
  LessEqual,
  Greater,
  GreaterEqual,

  LeftParen,
  RightParen,
  Comma,
  Colon,

  Indent,
  Dedent,
  Newline,
  EndOfFile,

  Error,
}

/// The raw token kinds [`logos`] is able to recognize directly from source
/// text. Indentation, comments and plain whitespace never reach the parser;
/// they're consumed while building the final [`Token`] stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Logos)]
enum Raw {
  #[token("print")]
  Print,
  #[token("if")]
  If,
  #[token("else")]
  Else,
  #[token("def")]
  Def,
  #[token("return")]
  Return,

  #[regex("[A-Za-z_][A-Za-z0-9_]*")]
  Identifier,
  #[regex("[0-9]+")]
  Number,
  #[regex(r#""([^"\\]|\\.)*""#)]
  #[regex(r#"'([^'\\]|\\.)*'"#)]
  String,

  #[token("+")]
  Plus,
  #[token("-")]
  Minus,
  #[token("*")]
  Multiply,
  #[token("/")]
  Divide,
  #[token("%")]
  Modulus,
  #[token("(")]
  LeftParen,
  #[token(")")]
  RightParen,
  #[token(",")]
  Comma,
  #[token(":")]
  Colon,

  #[token("==")]
  EqualEqual,
  #[token("=")]
  Assign,
  #[token("!=")]
  BangEqual,
  #[token("<=")]
  LessEqual,
  #[token("<")]
  Less,
  #[token(">=")]
  GreaterEqual,
  #[token(">")]
  Greater,

  /// A newline followed by the raw whitespace that opens the next line.
  /// Its trailing run of spaces/tabs is the measured indent of that line.
  #[doc(hidden)]
  #[regex(r"\n[ \t]*")]
  _Indentation,
  /// Whitespace that doesn't follow a newline; never affects indentation.
  #[doc(hidden)]
  #[regex(r"[ \t]+", logos::skip)]
  _Whitespace,
  /// Kept as a real raw token (not skipped) so a comment-only line still
  /// counts as non-blank for indentation purposes.
  #[doc(hidden)]
  #[regex(r"#[^\n]*")]
  _Comment,
  #[doc(hidden)]
  #[error]
  _Error,
}

impl Raw {
  fn into_kind(self) -> Option<TokenKind> {
    use TokenKind as T;
    Some(match self {
      Raw::Print => T::Print,
      Raw::If => T::If,
      Raw::Else => T::Else,
      Raw::Def => T::Def,
      Raw::Return => T::Return,
      Raw::Identifier => T::Identifier,
      Raw::Number => T::Number,
      Raw::String => T::String,
      Raw::Plus => T::Plus,
      Raw::Minus => T::Minus,
      Raw::Multiply => T::Multiply,
      Raw::Divide => T::Divide,
      Raw::Modulus => T::Modulus,
      Raw::LeftParen => T::LeftParen,
      Raw::RightParen => T::RightParen,
      Raw::Comma => T::Comma,
      Raw::Colon => T::Colon,
      Raw::EqualEqual => T::EqualEqual,
      Raw::Assign => T::Assign,
      Raw::BangEqual => T::BangEqual,
      Raw::LessEqual => T::LessEqual,
      Raw::Less => T::Less,
      Raw::GreaterEqual => T::GreaterEqual,
      Raw::Greater => T::Greater,
      Raw::_Indentation | Raw::_Whitespace | Raw::_Comment | Raw::_Error => return None,
    })
  }
}

/// Operator tokens carry a fixed one-character lexeme consumed by the
/// evaluator, regardless of how many characters matched on the source side:
/// `+ - * / % < >` verbatim, `==`->`E`, `!=`->`N`, `<=`->`L`, `>=`->`G`.
fn operator_lexeme(kind: TokenKind) -> Option<&'static str> {
  use TokenKind as T;
  Some(match kind {
    T::Plus => "+",
    T::Minus => "-",
    T::Multiply => "*",
    T::Divide => "/",
    T::Modulus => "%",
    T::Less => "<",
    T::Greater => ">",
    T::EqualEqual => "E",
    T::BangEqual => "N",
    T::LessEqual => "L",
    T::GreaterEqual => "G",
    _ => return None,
  })
}

/// Line number (1-based) of a byte offset into `src`.
pub fn line_of(src: &str, offset: usize) -> usize {
  src.as_bytes()[..offset.min(src.len())]
    .iter()
    .filter(|&&b| b == b'\n')
    .count()
    + 1
}

pub struct Lexer;

fn synthetic(kind: TokenKind, span: Span) -> Token<'static> {
  Token {
    kind,
    lexeme: Cow::borrowed(""),
    span,
  }
}

/// Push whatever `INDENT`/`DEDENT` tokens are implied by moving to a line
/// measured at `ws` columns of leading whitespace.
fn apply_indent<'src>(
  ws: usize,
  indent: &mut Vec<usize>,
  out: &mut Vec<Token<'src>>,
  errors: &mut Vec<Error>,
  span: Span,
) {
  let top = *indent.last().unwrap();
  if ws > top {
    indent.push(ws);
    out.push(synthetic(TokenKind::Indent, span));
  } else if ws < top {
    while *indent.last().unwrap() > ws {
      indent.pop();
      out.push(synthetic(TokenKind::Dedent, span));
    }
    if *indent.last().unwrap() != ws {
      errors.push(Error::new("inconsistent indentation", span));
    }
  }
}

impl Lexer {
  /// Lex `src` into a token stream terminated by `EndOfFile`.
  ///
  /// Synthesizes `NEWLINE`, `INDENT` and `DEDENT` tokens from an indent
  /// stack that starts at `[0]` and must stay strictly increasing. Any
  /// indent levels still open at end of file are closed with trailing
  /// `DEDENT` tokens, so the stack always returns to height 1.
  ///
  /// Each indentation run just records its width; it's only compared
  /// against the stack once the *next* non-indentation token shows up,
  /// which is what makes consecutive blank lines a no-op instead of a
  /// stray dedent-then-indent.
  pub fn lex(src: &str) -> Result<Vec<Token<'_>>, Vec<Error>> {
    let mut out = Vec::new();
    let mut errors = Vec::new();
    let mut indent = vec![0usize];
    let mut pending_ws: Option<usize> = None;

    let mut lexer = Raw::lexer(src);
    while let Some(kind) = lexer.next() {
      let span = Span::from(lexer.span());
      let lexeme = lexer.slice();

      match kind {
        Raw::_Error => {
          if lexeme == "\"" || lexeme == "'" {
            errors.push(Error::new("unterminated string", span));
          } else {
            errors.push(Error::new(format!("stray character `{lexeme}`"), span));
          }
        }
        Raw::_Indentation => {
          out.push(synthetic(TokenKind::Newline, span));
          pending_ws = Some(lexeme.trim_start_matches('\n').chars().count());
        }
        Raw::_Whitespace => {}
        Raw::_Comment => {
          if let Some(ws) = pending_ws.take() {
            apply_indent(ws, &mut indent, &mut out, &mut errors, span);
          }
        }
        _ => {
          if let Some(ws) = pending_ws.take() {
            apply_indent(ws, &mut indent, &mut out, &mut errors, span);
          }
          if let Some(kind) = kind.into_kind() {
            let lexeme = match operator_lexeme(kind) {
              Some(fixed) => Cow::borrowed(fixed),
              None if kind == TokenKind::String => Cow::owned(strip_quotes(lexeme)),
              None => Cow::borrowed(lexeme),
            };
            out.push(Token { kind, lexeme, span });
          }
        }
      }
    }

    if !errors.is_empty() {
      return Err(errors);
    }

    let eof = Span::from(src.len()..src.len());
    while indent.len() > 1 {
      indent.pop();
      out.push(synthetic(TokenKind::Dedent, eof));
    }
    out.push(synthetic(TokenKind::EndOfFile, eof));

    Ok(out)
  }
}

fn strip_quotes(lexeme: &str) -> String {
  lexeme[1..lexeme.len() - 1].to_string()
}

#[cfg(test)]
mod tests;
