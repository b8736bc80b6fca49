use ast::decl::DeclarationFile;
use ast::node::Node;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod parse;
pub mod token;

/// Options for [`parse`]. Currently empty; kept so call sites stay stable as
/// dialect knobs are added.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {}

pub fn parse(source: &str, _options: ParseOptions) -> SyntaxResult<Node<DeclarationFile>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  parser.declaration_file()
}
