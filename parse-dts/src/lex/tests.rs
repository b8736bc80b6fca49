use super::*;

fn lex_all(source: &str) -> Vec<Token> {
  let mut lexer = Lexer::new(source);
  let mut tokens = Vec::new();
  loop {
    let token = lex_next(&mut lexer, LexMode::Standard);
    let done = token.typ == TT::EOF;
    tokens.push(token);
    if done {
      break;
    }
  }
  tokens
}

fn types(source: &str) -> Vec<TT> {
  lex_all(source).into_iter().map(|t| t.typ).collect()
}

#[test]
fn lexes_declaration_keywords_and_operators() {
  assert_eq!(types("declare interface Foo {}"), vec![
    TT::KeywordDeclare,
    TT::KeywordInterface,
    TT::Identifier,
    TT::BraceOpen,
    TT::BraceClose,
    TT::EOF,
  ]);
}

#[test]
fn keyword_prefix_does_not_truncate_identifier() {
  assert_eq!(types("interfaceish typeof typeofx"), vec![
    TT::Identifier,
    TT::KeywordTypeof,
    TT::Identifier,
    TT::EOF,
  ]);
}

#[test]
fn lexes_string_and_number_literals() {
  assert_eq!(types("\"wix-chat\" 'x' 42 1.5 .25"), vec![
    TT::LiteralString,
    TT::LiteralString,
    TT::LiteralNumber,
    TT::LiteralNumber,
    TT::LiteralNumber,
    TT::EOF,
  ]);
}

#[test]
fn unterminated_string_is_invalid_not_panic() {
  let tokens = lex_all("'abc");
  assert_eq!(tokens[0].typ, TT::Invalid);
}

#[test]
fn tracks_preceding_line_terminator() {
  let tokens = lex_all("foo\nbar baz");
  assert!(!tokens[0].preceded_by_line_terminator);
  assert!(tokens[1].preceded_by_line_terminator);
  assert!(!tokens[2].preceded_by_line_terminator);
}

#[test]
fn captures_jsdoc_block_for_next_token() {
  let tokens = lex_all("/** Greets. */\ninterface Foo {}");
  assert_eq!(tokens[0].typ, TT::KeywordInterface);
  assert_eq!(tokens[0].leading_comment.as_deref(), Some("/** Greets. */"));
  assert_eq!(tokens[1].leading_comment, None);
}

#[test]
fn plain_comments_are_not_doc_comments() {
  let tokens = lex_all("/* no */ // neither\ntype A = B;");
  assert_eq!(tokens[0].typ, TT::KeywordType);
  assert_eq!(tokens[0].leading_comment, None);
}

#[test]
fn lexes_template_literal_parts() {
  assert_eq!(types("`a${"), vec![TT::LiteralTemplatePartString, TT::EOF]);
  let mut lexer = Lexer::new("x}b`");
  // Simulate the parser re-entering after the interpolated type and its
  // closing brace.
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, TT::Identifier);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, TT::BraceClose);
  let token = lex_next(&mut lexer, LexMode::TemplateStrContinue);
  assert_eq!(token.typ, TT::LiteralTemplatePartStringEnd);
}
