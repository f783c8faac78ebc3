use indoc::indoc;

use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
  Lexer::lex(src)
    .unwrap_or_else(|errors| panic!("lexing {src:?} failed: {errors:?}"))
    .into_iter()
    .map(|tok| tok.kind)
    .collect()
}

#[test]
fn lex_operators_fold_to_single_char_lexemes() {
  let tokens = Lexer::lex("== != <= >= < > + - * / %\n").unwrap();
  let lexemes: Vec<_> = tokens
    .iter()
    .filter(|t| !t.is(TokenKind::Newline) && !t.is(TokenKind::EndOfFile))
    .map(|t| t.lexeme.to_string())
    .collect();
  assert_eq!(
    lexemes,
    vec!["E", "N", "L", "G", "<", ">", "+", "-", "*", "/", "%"]
  );
}

#[test]
fn lex_string_literal_strips_quotes() {
  let tokens = Lexer::lex(r#"print("hi")"#).unwrap();
  let string_tok = tokens
    .iter()
    .find(|t| t.is(TokenKind::String))
    .expect("string token");
  assert_eq!(string_tok.lexeme.as_ref(), "hi");
}

#[test]
fn lex_single_quoted_string() {
  let tokens = Lexer::lex("'hello'\n").unwrap();
  let string_tok = tokens.iter().find(|t| t.is(TokenKind::String)).unwrap();
  assert_eq!(string_tok.lexeme.as_ref(), "hello");
}

#[test]
fn lex_keywords_vs_identifiers() {
  let ks = kinds("print if else def return foo\n");
  assert_eq!(
    ks,
    vec![
      TokenKind::Print,
      TokenKind::If,
      TokenKind::Else,
      TokenKind::Def,
      TokenKind::Return,
      TokenKind::Identifier,
      TokenKind::Newline,
      TokenKind::EndOfFile,
    ]
  );
}

#[test]
fn lex_indent_and_dedent_are_balanced() {
  let src = indoc! {"
        if 1:
            print(1)
        print(2)
    "};
  let ks = kinds(src);
  let indents = ks.iter().filter(|k| **k == TokenKind::Indent).count();
  let dedents = ks.iter().filter(|k| **k == TokenKind::Dedent).count();
  assert_eq!(indents, dedents);
  assert_eq!(indents, 1);
}

#[test]
fn lex_nested_indentation() {
  let src = indoc! {"
        if 1:
            if 2:
                print(1)
    "};
  let ks = kinds(src);
  assert_eq!(ks.iter().filter(|k| **k == TokenKind::Indent).count(), 2);
  assert_eq!(ks.iter().filter(|k| **k == TokenKind::Dedent).count(), 2);
}

#[test]
fn lex_blank_lines_do_not_affect_indentation() {
  let src = "if 1:\n    print(1)\n\n    print(2)\n";
  let ks = kinds(src);
  assert_eq!(ks.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
  assert_eq!(ks.iter().filter(|k| **k == TokenKind::Dedent).count(), 1);
}

#[test]
fn lex_comment_only_line_does_not_dedent() {
  let src = "if 1:\n    print(1)\n    # a comment\n    print(2)\n";
  let ks = kinds(src);
  assert_eq!(ks.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
  assert_eq!(ks.iter().filter(|k| **k == TokenKind::Dedent).count(), 1);
}

#[test]
fn lex_inconsistent_indentation_is_an_error() {
  let src = "if 1:\n    print(1)\n  print(2)\n";
  let err = Lexer::lex(src).unwrap_err();
  assert!(err.iter().any(|e| e.message.contains("inconsistent")));
}

#[test]
fn lex_unterminated_string_is_an_error() {
  let src = "x = \"abc\n";
  let err = Lexer::lex(src).unwrap_err();
  assert!(err.iter().any(|e| e.message.contains("unterminated")));
}

#[test]
fn lex_stray_character_is_an_error() {
  let src = "x = 1 @\n";
  let err = Lexer::lex(src).unwrap_err();
  assert!(err.iter().any(|e| e.message.contains("stray character")));
}

#[test]
fn lex_ends_with_end_of_file() {
  let tokens = Lexer::lex("x = 1\n").unwrap();
  assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfFile);
}
