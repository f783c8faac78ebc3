use span::Span;

/// The three runtime-level error kinds from the language reference: name
/// resolution, arity, arithmetic. Lexical and syntactic errors never reach
/// this crate — they're reported directly by `koan_syntax`.
#[derive(Clone, Debug, thiserror::Error)]
pub enum RuntimeError {
  #[error("undefined variable `{name}`")]
  UndefinedVariable { name: String, span: Span },
  #[error("undefined function `{name}`")]
  UndefinedFunction { name: String, span: Span },
  #[error("`{name}` expects {expected} argument(s), found {found}")]
  ArityMismatch {
    name: String,
    expected: usize,
    found: usize,
    span: Span,
  },
  #[error("division by zero")]
  DivisionByZero { span: Span },
  #[error("modulus by zero")]
  ModulusByZero { span: Span },
  #[error("strings do not support arithmetic")]
  NotANumber { span: Span },
}

impl RuntimeError {
  pub fn span(&self) -> Span {
    match self {
      RuntimeError::UndefinedVariable { span, .. }
      | RuntimeError::UndefinedFunction { span, .. }
      | RuntimeError::ArityMismatch { span, .. }
      | RuntimeError::DivisionByZero { span }
      | RuntimeError::ModulusByZero { span }
      | RuntimeError::NotANumber { span } => *span,
    }
  }

  /// Build a diagnostic [`diag::Report`] for this error against `source`.
  pub fn report<'s>(&self, source: impl Into<diag::Source<'s>>) -> diag::Report<'s> {
    diag::Report::error()
      .source(source)
      .message(self.to_string())
      .span(self.span())
      .build()
  }
}
