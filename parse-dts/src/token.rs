use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  // Special token used to represent invalid source code. Easier than having to propagate SyntaxError from the lexer level.
  Invalid,
  // These are only used by lexer.
  CommentMultilineEnd,
  LineTerminator,
  Whitespace,

  Ampersand,
  Asterisk,
  Bar,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  ChevronLeft,
  ChevronRight,
  Colon,
  Comma,
  CommentMultiline,
  CommentSingle,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  Hyphen,
  Identifier,
  KeywordAbstract,
  KeywordAny,
  KeywordAs,
  KeywordBigIntType,
  KeywordBooleanType,
  KeywordClass,
  KeywordConst,
  KeywordDeclare,
  KeywordDefault,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFrom,
  KeywordFunction,
  KeywordGlobal,
  KeywordImplements,
  KeywordImport,
  KeywordIn,
  KeywordInfer,
  KeywordInterface,
  KeywordIs,
  KeywordKeyof,
  KeywordLet,
  KeywordModule,
  KeywordNamespace,
  KeywordNever,
  KeywordNew,
  KeywordNumberType,
  KeywordObjectType,
  KeywordOut,
  KeywordReadonly,
  KeywordStatic,
  KeywordStringType,
  KeywordSymbolType,
  KeywordType,
  KeywordTypeof,
  KeywordUndefinedType,
  KeywordUnique,
  KeywordUnknown,
  KeywordVar,
  KeywordVoid,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralString,
  LiteralTemplatePartString,
  LiteralTemplatePartStringEnd,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Plus,
  Question,
  Semicolon,
}

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether one or more whitespace characters appear immediately before this token, and at least
  // one of those whitespace characters is a line terminator.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
  // The raw text of a `/** ... */` block immediately preceding this token.
  // Declaration bundling must carry documentation through to the flattened
  // output, so unlike a minifying pipeline we keep it on the token.
  pub leading_comment: Option<String>,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
