use super::Parser;
use crate::ast::decl::*;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn declaration_file(&mut self) -> SyntaxResult<Node<DeclarationFile>> {
    self.with_loc(|p| {
      let items = p.module_items(TT::EOF)?;
      p.require(TT::EOF)?;
      Ok(DeclarationFile { items })
    })
  }

  pub fn module_items(&mut self, close: TT) -> SyntaxResult<Vec<Node<ModuleItem>>> {
    let mut items = Vec::new();
    loop {
      let t = self.peek();
      if t.typ == close || t.typ == TT::EOF {
        break;
      }
      // Stray semicolons between items.
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      }
      items.push(self.module_item()?);
    }
    Ok(items)
  }

  pub fn module_item(&mut self) -> SyntaxResult<Node<ModuleItem>> {
    self.with_loc(|p| {
      let doc = p.peek().leading_comment.clone();
      match p.peek().typ {
        TT::KeywordImport => Ok(ModuleItem::Import(p.import_decl()?)),
        TT::KeywordExport => p.export_item(doc),
        _ => p.declaration(doc, false),
      }
    })
  }

  fn import_decl(&mut self) -> SyntaxResult<Node<ImportDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      let type_only = {
        let (a, b) = p.peek_2();
        a.typ == TT::KeywordType
          && matches!(b.typ, TT::BraceOpen | TT::Asterisk | TT::Identifier)
      };
      if type_only {
        p.consume();
      }
      let mut default = None;
      let mut namespace = None;
      let mut names = Vec::new();
      match p.peek().typ {
        TT::Asterisk => {
          p.consume();
          p.require(TT::KeywordAs)?;
          namespace = Some(p.require_identifier()?);
        }
        TT::BraceOpen => {
          p.consume();
          names = p.import_names()?;
        }
        _ => {
          default = Some(p.require_identifier()?);
          if p.consume_if(TT::Comma).is_match() {
            p.require(TT::BraceOpen)?;
            names = p.import_names()?;
          }
        }
      };
      p.require(TT::KeywordFrom)?;
      let specifier = p.lit_str_val()?;
      p.consume_if(TT::Semicolon).is_match();
      Ok(ImportDecl {
        type_only,
        default,
        namespace,
        names,
        specifier,
      })
    })
  }

  /// Named bindings after the opening brace, which has already been consumed.
  fn import_names(&mut self) -> SyntaxResult<Vec<ImportName>> {
    let mut names = Vec::new();
    while !self.consume_if(TT::BraceClose).is_match() {
      let imported = self.require_identifier()?;
      let local = if self.consume_if(TT::KeywordAs).is_match() {
        Some(self.require_identifier()?)
      } else {
        None
      };
      names.push(ImportName { imported, local });
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BraceClose)?;
        break;
      }
    }
    Ok(names)
  }

  fn export_item(&mut self, doc: Option<String>) -> SyntaxResult<ModuleItem> {
    self.require(TT::KeywordExport)?;
    match self.peek().typ {
      TT::Asterisk => Ok(ModuleItem::ExportStar(self.with_loc(|p| {
        p.consume();
        p.require(TT::KeywordFrom)?;
        let specifier = p.lit_str_val()?;
        p.consume_if(TT::Semicolon).is_match();
        Ok(ExportStarDecl { specifier })
      })?)),
      TT::BraceOpen => Ok(ModuleItem::ExportNamed(self.export_named(false)?)),
      TT::KeywordType if self.peek_2().1.typ == TT::BraceOpen => {
        self.consume();
        Ok(ModuleItem::ExportNamed(self.export_named(true)?))
      }
      _ => self.declaration(doc, true),
    }
  }

  fn export_named(&mut self, type_only: bool) -> SyntaxResult<Node<ExportNamedDecl>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut names = Vec::new();
      while !p.consume_if(TT::BraceClose).is_match() {
        let local = p.require_identifier()?;
        let exported = if p.consume_if(TT::KeywordAs).is_match() {
          Some(p.require_identifier()?)
        } else {
          None
        };
        names.push(ExportName { local, exported });
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        }
      }
      let specifier = if p.consume_if(TT::KeywordFrom).is_match() {
        Some(p.lit_str_val()?)
      } else {
        None
      };
      p.consume_if(TT::Semicolon).is_match();
      Ok(ExportNamedDecl {
        type_only,
        names,
        specifier,
      })
    })
  }

  fn declaration(&mut self, doc: Option<String>, export: bool) -> SyntaxResult<ModuleItem> {
    let declare = self.consume_if(TT::KeywordDeclare).is_match();
    let t = self.peek();
    match t.typ {
      TT::KeywordGlobal if declare => Ok(ModuleItem::Global(self.global_decl(doc)?)),
      TT::KeywordModule if self.peek_2().1.typ == TT::LiteralString => Ok(
        ModuleItem::AmbientModule(self.ambient_module_decl(doc)?),
      ),
      TT::KeywordInterface => Ok(ModuleItem::Interface(
        self.interface_decl(doc, export, declare)?,
      )),
      TT::KeywordType => Ok(ModuleItem::TypeAlias(
        self.type_alias_decl(doc, export, declare)?,
      )),
      TT::KeywordEnum => Ok(ModuleItem::Enum(self.enum_decl(doc, export, declare, false)?)),
      TT::KeywordConst => {
        if self.peek_2().1.typ == TT::KeywordEnum {
          self.consume();
          Ok(ModuleItem::Enum(self.enum_decl(doc, export, declare, true)?))
        } else {
          Ok(ModuleItem::Var(self.var_decl(doc, export, declare)?))
        }
      }
      TT::KeywordVar | TT::KeywordLet => Ok(ModuleItem::Var(self.var_decl(doc, export, declare)?)),
      TT::KeywordFunction => Ok(ModuleItem::Function(
        self.function_decl(doc, export, declare)?,
      )),
      TT::KeywordClass | TT::KeywordAbstract => {
        Ok(ModuleItem::Class(self.class_decl(doc, export, declare)?))
      }
      TT::KeywordNamespace | TT::KeywordModule => Ok(ModuleItem::Namespace(
        self.namespace_decl(doc, export, declare)?,
      )),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("declaration"))),
    }
  }

  fn interface_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<InterfaceDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordInterface)?;
      let name = p.require_identifier()?;
      let type_parameters = p.type_parameters()?;
      let mut extends = Vec::new();
      if p.consume_if(TT::KeywordExtends).is_match() {
        loop {
          extends.push(p.type_expr()?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
      }
      p.require(TT::BraceOpen)?;
      let members = p.type_members(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(InterfaceDecl {
        doc,
        export,
        declare,
        name,
        type_parameters,
        extends,
        members,
      })
    })
  }

  fn type_alias_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<TypeAliasDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordType)?;
      let name = p.require_identifier()?;
      let type_parameters = p.type_parameters()?;
      p.require(TT::Equals)?;
      let type_expr = p.type_expr()?;
      p.consume_if(TT::Semicolon).is_match();
      Ok(TypeAliasDecl {
        doc,
        export,
        declare,
        name,
        type_parameters,
        type_expr,
      })
    })
  }

  fn enum_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
    const_: bool,
  ) -> SyntaxResult<Node<EnumDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordEnum)?;
      let name = p.require_identifier()?;
      p.require(TT::BraceOpen)?;
      let members = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
        let doc = p.peek().leading_comment.clone();
        let name = if p.peek().typ == TT::LiteralString {
          p.lit_str_val()?
        } else {
          p.require_identifier()?
        };
        let init = if p.consume_if(TT::Equals).is_match() {
          Some(match p.peek().typ {
            TT::LiteralString => EnumInit::String(p.lit_str_val()?),
            TT::Hyphen => {
              p.consume();
              EnumInit::Number(format!("-{}", p.lit_num_raw()?))
            }
            _ => EnumInit::Number(p.lit_num_raw()?),
          })
        } else {
          None
        };
        Ok(EnumMember { doc, name, init })
      })?;
      Ok(EnumDecl {
        doc,
        export,
        declare,
        const_,
        name,
        members,
      })
    })
  }

  fn function_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<FunctionDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let name = p.require_identifier()?;
      let type_parameters = p.type_parameters()?;
      p.require(TT::ParenthesisOpen)?;
      let parameters = p.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let name = p.require_identifier()?;
        let optional = p.consume_if(TT::Question).is_match();
        let type_annotation = if p.consume_if(TT::Colon).is_match() {
          Some(p.type_expr()?)
        } else {
          None
        };
        Ok(FunctionParameter {
          name,
          optional,
          rest,
          type_annotation,
        })
      })?;
      let return_type = if p.consume_if(TT::Colon).is_match() {
        Some(p.return_type_annotation()?)
      } else {
        None
      };
      p.consume_if(TT::Semicolon).is_match();
      Ok(FunctionDecl {
        doc,
        export,
        declare,
        name,
        type_parameters,
        parameters,
        return_type,
      })
    })
  }

  fn var_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let kind = match p.consume().typ {
        TT::KeywordVar => VarDeclKind::Var,
        TT::KeywordLet => VarDeclKind::Let,
        _ => VarDeclKind::Const,
      };
      let name = p.require_identifier()?;
      let type_annotation = if p.consume_if(TT::Colon).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      p.consume_if(TT::Semicolon).is_match();
      Ok(VarDecl {
        doc,
        export,
        declare,
        kind,
        name,
        type_annotation,
      })
    })
  }

  fn class_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<ClassDecl>> {
    self.with_loc(|p| {
      let abstract_ = p.consume_if(TT::KeywordAbstract).is_match();
      p.require(TT::KeywordClass)?;
      let name = p.require_identifier()?;
      let type_parameters = p.type_parameters()?;
      let extends = if p.consume_if(TT::KeywordExtends).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      let mut implements = Vec::new();
      if p.consume_if(TT::KeywordImplements).is_match() {
        loop {
          implements.push(p.type_expr()?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
      }
      p.require(TT::BraceOpen)?;
      let members = p.type_members(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(ClassDecl {
        doc,
        export,
        declare,
        abstract_,
        name,
        type_parameters,
        extends,
        implements,
        members,
      })
    })
  }

  fn namespace_decl(
    &mut self,
    doc: Option<String>,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<NamespaceDecl>> {
    self.with_loc(|p| {
      // `namespace` and the legacy `module Foo` form are equivalent.
      p.consume();
      let mut name = p.require_identifier()?;
      while p.consume_if(TT::Dot).is_match() {
        name.push('.');
        name.push_str(&p.require_identifier()?);
      }
      p.require(TT::BraceOpen)?;
      let body = p.module_items(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(NamespaceDecl {
        doc,
        export,
        declare,
        name,
        body,
      })
    })
  }

  fn ambient_module_decl(&mut self, doc: Option<String>) -> SyntaxResult<Node<AmbientModuleDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordModule)?;
      let name = p.lit_str_val()?;
      let body = if p.consume_if(TT::BraceOpen).is_match() {
        let body = p.module_items(TT::BraceClose)?;
        p.require(TT::BraceClose)?;
        body
      } else {
        // Shorthand ambient module: declare module "x";
        p.consume_if(TT::Semicolon).is_match();
        Vec::new()
      };
      Ok(AmbientModuleDecl { doc, name, body })
    })
  }

  fn global_decl(&mut self, doc: Option<String>) -> SyntaxResult<Node<GlobalDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordGlobal)?;
      p.require(TT::BraceOpen)?;
      let body = p.module_items(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(GlobalDecl { doc, body })
    })
  }
}
