use super::Parser;
use crate::ast::node::Node;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a full type expression. Conditional types bind loosest, then
  /// unions, then intersections, then the prefix operators, then postfix
  /// `[]`/indexed access.
  pub fn type_expr(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let cp = self.checkpoint();
    let check_type = self.type_union()?;
    if !self.consume_if(TT::KeywordExtends).is_match() {
      return Ok(check_type);
    }
    let extends_type = self.type_union()?;
    self.require(TT::Question)?;
    let true_type = self.type_expr()?;
    self.require(TT::Colon)?;
    let false_type = self.type_expr()?;
    Ok(Node::new(
      self.since_checkpoint(&cp),
      TypeExpr::ConditionalType(TypeConditional {
        check_type: Box::new(check_type),
        extends_type: Box::new(extends_type),
        true_type: Box::new(true_type),
        false_type: Box::new(false_type),
      }),
    ))
  }

  fn type_union(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let cp = self.checkpoint();
    // A leading bar is allowed, as in multi-line unions.
    self.consume_if(TT::Bar).is_match();
    let first = self.type_intersection()?;
    if self.peek().typ != TT::Bar {
      return Ok(first);
    }
    let mut types = vec![first];
    while self.consume_if(TT::Bar).is_match() {
      types.push(self.type_intersection()?);
    }
    Ok(Node::new(
      self.since_checkpoint(&cp),
      TypeExpr::UnionType(TypeUnion { types }),
    ))
  }

  fn type_intersection(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let cp = self.checkpoint();
    let first = self.type_operator()?;
    if self.peek().typ != TT::Ampersand {
      return Ok(first);
    }
    let mut types = vec![first];
    while self.consume_if(TT::Ampersand).is_match() {
      types.push(self.type_operator()?);
    }
    Ok(Node::new(
      self.since_checkpoint(&cp),
      TypeExpr::IntersectionType(TypeIntersection { types }),
    ))
  }

  /// Prefix operators: `keyof`, `infer`, `readonly` (on arrays/tuples).
  fn type_operator(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let cp = self.checkpoint();
    match self.peek().typ {
      TT::KeywordKeyof => {
        self.consume();
        let operand = self.type_operator()?;
        Ok(Node::new(
          self.since_checkpoint(&cp),
          TypeExpr::KeyOfType(TypeKeyOf {
            type_expr: Box::new(operand),
          }),
        ))
      }
      TT::KeywordInfer => {
        self.consume();
        let type_parameter = self.require_identifier()?;
        Ok(Node::new(
          self.since_checkpoint(&cp),
          TypeExpr::InferType(TypeInfer { type_parameter }),
        ))
      }
      TT::KeywordReadonly => {
        self.consume();
        let mut operand = self.type_postfix()?;
        match operand.stx.as_mut() {
          TypeExpr::ArrayType(arr) => arr.readonly = true,
          TypeExpr::TupleType(tup) => tup.readonly = true,
          _ => return Err(operand.error(SyntaxErrorType::ExpectedSyntax("array or tuple type"))),
        };
        operand.loc = self.since_checkpoint(&cp);
        Ok(operand)
      }
      _ => self.type_postfix(),
    }
  }

  /// Postfix `T[]` and `T[K]`.
  fn type_postfix(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let cp = self.checkpoint();
    let mut node = self.type_primary()?;
    while self.peek().typ == TT::BracketOpen {
      self.consume();
      if self.consume_if(TT::BracketClose).is_match() {
        node = Node::new(
          self.since_checkpoint(&cp),
          TypeExpr::ArrayType(TypeArray {
            readonly: false,
            element_type: Box::new(node),
          }),
        );
      } else {
        let index_type = self.type_expr()?;
        self.require(TT::BracketClose)?;
        node = Node::new(
          self.since_checkpoint(&cp),
          TypeExpr::IndexedAccessType(TypeIndexedAccess {
            object_type: Box::new(node),
            index_type: Box::new(index_type),
          }),
        );
      }
    }
    Ok(node)
  }

  fn type_primary(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      let t = p.peek();
      Ok(match t.typ {
        TT::KeywordAny => p.keyword_type(TypeExpr::Any),
        TT::KeywordUnknown => p.keyword_type(TypeExpr::Unknown),
        TT::KeywordNever => p.keyword_type(TypeExpr::Never),
        TT::KeywordVoid => p.keyword_type(TypeExpr::Void),
        TT::KeywordStringType => p.keyword_type(TypeExpr::String),
        TT::KeywordNumberType => p.keyword_type(TypeExpr::Number),
        TT::KeywordBooleanType => p.keyword_type(TypeExpr::Boolean),
        TT::KeywordBigIntType => p.keyword_type(TypeExpr::BigInt),
        TT::KeywordSymbolType => p.keyword_type(TypeExpr::Symbol),
        TT::KeywordObjectType => p.keyword_type(TypeExpr::Object),
        TT::KeywordUndefinedType => p.keyword_type(TypeExpr::Undefined),
        TT::LiteralNull => p.keyword_type(TypeExpr::Null),
        TT::KeywordUnique => {
          p.consume();
          p.require(TT::KeywordSymbolType)?;
          TypeExpr::UniqueSymbol
        }
        TT::LiteralTrue => p.keyword_type(TypeExpr::LiteralType(TypeLiteral::Boolean(true))),
        TT::LiteralFalse => p.keyword_type(TypeExpr::LiteralType(TypeLiteral::Boolean(false))),
        TT::LiteralString => TypeExpr::LiteralType(TypeLiteral::String(p.lit_str_val()?)),
        TT::LiteralNumber => TypeExpr::LiteralType(TypeLiteral::Number(p.lit_num_raw()?)),
        TT::Hyphen => {
          p.consume();
          TypeExpr::LiteralType(TypeLiteral::Number(format!("-{}", p.lit_num_raw()?)))
        }
        TT::KeywordTypeof => {
          p.consume();
          TypeExpr::TypeQuery(TypeQuery {
            expr_name: p.type_entity_name()?,
          })
        }
        TT::KeywordImport => p.type_import()?,
        TT::KeywordNew => {
          p.consume();
          let type_parameters = p.type_parameters()?;
          let f = p.type_function_tail(type_parameters)?;
          TypeExpr::ConstructorType(TypeConstructor {
            type_parameters: f.type_parameters,
            parameters: f.parameters,
            return_type: f.return_type,
          })
        }
        TT::ChevronLeft => {
          let type_parameters = p.type_parameters()?;
          TypeExpr::FunctionType(p.type_function_tail(type_parameters)?)
        }
        TT::ParenthesisOpen => {
          let cp = p.checkpoint();
          match p.type_function_tail(None) {
            Ok(f) => TypeExpr::FunctionType(f),
            Err(_) => {
              p.restore_checkpoint(cp);
              p.require(TT::ParenthesisOpen)?;
              let inner = p.type_expr()?;
              p.require(TT::ParenthesisClose)?;
              TypeExpr::ParenthesizedType(TypeParenthesized {
                type_expr: Box::new(inner),
              })
            }
          }
        }
        TT::BraceOpen => {
          p.consume();
          let members = p.type_members(TT::BraceClose)?;
          p.require(TT::BraceClose)?;
          TypeExpr::ObjectType(TypeObjectLiteral { members })
        }
        TT::BracketOpen => p.type_tuple()?,
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => p.type_template()?,
        TT::Identifier => {
          if p.str(t.loc) == "this" {
            p.consume();
            TypeExpr::ThisType
          } else {
            let name = p.type_entity_name()?;
            let type_arguments = p.type_arguments()?;
            TypeExpr::TypeReference(TypeReference {
              name,
              type_arguments,
            })
          }
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("type expression"))),
      })
    })
  }

  fn keyword_type(&mut self, stx: TypeExpr) -> TypeExpr {
    self.consume();
    stx
  }

  pub fn type_entity_name(&mut self) -> SyntaxResult<TypeEntityName> {
    let mut name = TypeEntityName::Identifier(self.require_identifier()?);
    while self.consume_if(TT::Dot).is_match() {
      let right = self.require_identifier()?;
      name = TypeEntityName::Qualified(Box::new(TypeQualifiedName { left: name, right }));
    }
    Ok(name)
  }

  fn type_import(&mut self) -> SyntaxResult<TypeExpr> {
    self.require(TT::KeywordImport)?;
    self.require(TT::ParenthesisOpen)?;
    let module_specifier = self.lit_str_val()?;
    self.require(TT::ParenthesisClose)?;
    let qualifier = if self.consume_if(TT::Dot).is_match() {
      Some(self.type_entity_name()?)
    } else {
      None
    };
    let type_arguments = self.type_arguments()?;
    Ok(TypeExpr::ImportType(TypeImport {
      module_specifier,
      qualifier,
      type_arguments,
    }))
  }

  /// Type arguments of a reference. In declaration files a `<` after an entity
  /// name is unambiguously a type argument list.
  pub fn type_arguments(&mut self) -> SyntaxResult<Option<Vec<Node<TypeExpr>>>> {
    if !self.consume_if(TT::ChevronLeft).is_match() {
      return Ok(None);
    }
    let mut args = Vec::new();
    loop {
      args.push(self.type_expr()?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require(TT::ChevronRight)?;
    Ok(Some(args))
  }

  pub fn type_parameters(&mut self) -> SyntaxResult<Option<Vec<Node<TypeParameter>>>> {
    if !self.consume_if(TT::ChevronLeft).is_match() {
      return Ok(None);
    }
    let params = self.list_with_loc(TT::Comma, TT::ChevronRight, |p| {
      let variance = if p.consume_if(TT::KeywordIn).is_match() {
        if p.consume_if(TT::KeywordOut).is_match() {
          Some(Variance::InOut)
        } else {
          Some(Variance::In)
        }
      } else if p.consume_if(TT::KeywordOut).is_match() {
        Some(Variance::Out)
      } else {
        None
      };
      let name = p.require_identifier()?;
      let constraint = if p.consume_if(TT::KeywordExtends).is_match() {
        Some(Box::new(p.type_expr()?))
      } else {
        None
      };
      let default = if p.consume_if(TT::Equals).is_match() {
        Some(Box::new(p.type_expr()?))
      } else {
        None
      };
      Ok(TypeParameter {
        variance,
        name,
        constraint,
        default,
      })
    })?;
    Ok(Some(params))
  }

  fn type_tuple(&mut self) -> SyntaxResult<TypeExpr> {
    self.require(TT::BracketOpen)?;
    let elements = self.list_with_loc(TT::Comma, TT::BracketClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let cp = p.checkpoint();
      let mut label = None;
      let mut optional = false;
      if p.peek_is_identifier_like() {
        let name = p.require_identifier()?;
        let q = p.consume_if(TT::Question).is_match();
        if p.consume_if(TT::Colon).is_match() {
          label = Some(name);
          optional = q;
        } else {
          p.restore_checkpoint(cp);
        }
      }
      let type_expr = p.type_expr()?;
      optional |= p.consume_if(TT::Question).is_match();
      Ok(TypeTupleElement {
        label,
        optional,
        rest,
        type_expr,
      })
    })?;
    Ok(TypeExpr::TupleType(TypeTuple {
      readonly: false,
      elements,
    }))
  }

  fn type_template(&mut self) -> SyntaxResult<TypeExpr> {
    let head_tok = self.consume();
    let raw = self.string(head_tok.loc);
    match head_tok.typ {
      // No interpolations at all: the backtick-to-backtick text is the head.
      TT::LiteralTemplatePartStringEnd => Ok(TypeExpr::TemplateLiteralType(TypeTemplateLiteral {
        head: raw[1..raw.len() - 1].to_string(),
        spans: Vec::new(),
      })),
      TT::LiteralTemplatePartString => {
        let head = raw[1..raw.len() - 2].to_string();
        let mut spans = Vec::new();
        loop {
          let cp = self.checkpoint();
          let type_expr = self.type_expr()?;
          self.require(TT::BraceClose)?;
          let part = self.consume_with_mode(LexMode::TemplateStrContinue);
          let text = self.string(part.loc);
          let (literal, done) = match part.typ {
            TT::LiteralTemplatePartString => (text[..text.len() - 2].to_string(), false),
            TT::LiteralTemplatePartStringEnd => (text[..text.len() - 1].to_string(), true),
            _ => {
              return Err(part.error(SyntaxErrorType::ExpectedSyntax("template literal part")))
            }
          };
          spans.push(Node::new(
            self.since_checkpoint(&cp),
            TypeTemplateLiteralSpan { type_expr, literal },
          ));
          if done {
            break;
          }
        }
        Ok(TypeExpr::TemplateLiteralType(TypeTemplateLiteral {
          head,
          spans,
        }))
      }
      _ => Err(head_tok.error(SyntaxErrorType::ExpectedSyntax("template literal type"))),
    }
  }

  /// `(params) => ReturnType`, with type parameters supplied by the caller.
  fn type_function_tail(
    &mut self,
    type_parameters: Option<Vec<Node<TypeParameter>>>,
  ) -> SyntaxResult<TypeFunction> {
    let parameters = self.type_function_parameters()?;
    self.require(TT::EqualsChevronRight)?;
    let return_type = Box::new(self.return_type_annotation()?);
    Ok(TypeFunction {
      type_parameters,
      parameters,
      return_type,
    })
  }

  pub fn type_function_parameters(&mut self) -> SyntaxResult<Vec<Node<TypeFunctionParameter>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let (_, b) = p.peek_2();
      let named = p.peek_is_identifier_like()
        && matches!(
          b.typ,
          TT::Colon | TT::Question | TT::Comma | TT::ParenthesisClose
        );
      if named {
        let name = p.require_identifier()?;
        let optional = p.consume_if(TT::Question).is_match();
        let type_annotation = if p.consume_if(TT::Colon).is_match() {
          Some(p.type_expr()?)
        } else {
          None
        };
        Ok(TypeFunctionParameter {
          name: Some(name),
          optional,
          rest,
          type_annotation,
        })
      } else {
        let type_annotation = Some(p.type_expr()?);
        Ok(TypeFunctionParameter {
          name: None,
          optional: false,
          rest,
          type_annotation,
        })
      }
    })
  }

  /// Return type position: allows `x is T` and `asserts x is T` predicates.
  pub fn return_type_annotation(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let t = self.peek();
    if t.typ == TT::Identifier && self.str(t.loc) == "asserts" {
      return self.with_loc(|p| {
        p.consume();
        let parameter_name = p.require_identifier()?;
        let type_annotation = if p.consume_if(TT::KeywordIs).is_match() {
          Some(Box::new(p.type_expr()?))
        } else {
          None
        };
        Ok(TypeExpr::TypePredicate(TypePredicate {
          asserts: true,
          parameter_name,
          type_annotation,
        }))
      });
    }
    let (_, b) = self.peek_2();
    if self.peek_is_identifier_like() && b.typ == TT::KeywordIs {
      return self.with_loc(|p| {
        let parameter_name = p.require_identifier()?;
        p.require(TT::KeywordIs)?;
        let type_annotation = Some(Box::new(p.type_expr()?));
        Ok(TypeExpr::TypePredicate(TypePredicate {
          asserts: false,
          parameter_name,
          type_annotation,
        }))
      });
    }
    self.type_expr()
  }

  /// Members of an interface body, object type literal, or ambient class body.
  pub fn type_members(&mut self, close: TT) -> SyntaxResult<Vec<Node<TypeMember>>> {
    let mut members = Vec::new();
    while self.peek().typ != close && self.peek().typ != TT::EOF {
      members.push(self.with_loc(|p| p.type_member())?);
      while self.consume_if(TT::Semicolon).is_match() || self.consume_if(TT::Comma).is_match() {}
    }
    Ok(members)
  }

  fn type_member(&mut self) -> SyntaxResult<TypeMember> {
    let doc = self.peek().leading_comment.clone();
    // `+readonly`/`-readonly` only appear on mapped types.
    let mapped_readonly = {
      let (a, b) = self.peek_2();
      match (a.typ, b.typ) {
        (TT::Plus, TT::KeywordReadonly) => Some(MappedTypeModifier::Plus),
        (TT::Hyphen, TT::KeywordReadonly) => Some(MappedTypeModifier::Minus),
        _ => None,
      }
    };
    if mapped_readonly.is_some() {
      self.consume();
      self.consume();
    }
    // `readonly` is a modifier unless it's itself being used as a property name.
    let readonly = {
      let (a, b) = self.peek_2();
      a.typ == TT::KeywordReadonly
        && !matches!(
          b.typ,
          TT::Colon
            | TT::Question
            | TT::ParenthesisOpen
            | TT::ChevronLeft
            | TT::Comma
            | TT::Semicolon
            | TT::BraceClose
        )
    };
    if readonly {
      self.consume();
    }
    let readonly_modifier =
      mapped_readonly.or(if readonly { Some(MappedTypeModifier::None) } else { None });

    let (a, b) = self.peek_2();
    match a.typ {
      TT::KeywordNew if matches!(b.typ, TT::ParenthesisOpen | TT::ChevronLeft) => {
        self.consume();
        let type_parameters = self.type_parameters()?;
        let parameters = self.type_function_parameters()?;
        let return_type = if self.consume_if(TT::Colon).is_match() {
          Some(self.return_type_annotation()?)
        } else {
          None
        };
        Ok(TypeMember::Construct(TypeConstructSignature {
          type_parameters,
          parameters,
          return_type,
        }))
      }
      TT::ParenthesisOpen | TT::ChevronLeft => {
        let type_parameters = self.type_parameters()?;
        let parameters = self.type_function_parameters()?;
        let return_type = if self.consume_if(TT::Colon).is_match() {
          Some(self.return_type_annotation()?)
        } else {
          None
        };
        Ok(TypeMember::Call(TypeCallSignature {
          type_parameters,
          parameters,
          return_type,
        }))
      }
      TT::BracketOpen => self.type_index_or_mapped_member(readonly, readonly_modifier),
      _ => self.type_property_or_method_member(doc, readonly),
    }
  }

  fn type_index_or_mapped_member(
    &mut self,
    readonly: bool,
    readonly_modifier: Option<MappedTypeModifier>,
  ) -> SyntaxResult<TypeMember> {
    self.require(TT::BracketOpen)?;
    let parameter_name = self.require_identifier()?;
    if self.consume_if(TT::KeywordIn).is_match() {
      // Mapped type: [K in Constraint as NameType]
      let constraint = Box::new(self.type_expr()?);
      let name_type = if self.consume_if(TT::KeywordAs).is_match() {
        Some(Box::new(self.type_expr()?))
      } else {
        None
      };
      self.require(TT::BracketClose)?;
      let optional_modifier = if self.consume_if(TT::Plus).is_match() {
        self.require(TT::Question)?;
        Some(MappedTypeModifier::Plus)
      } else if self.consume_if(TT::Hyphen).is_match() {
        self.require(TT::Question)?;
        Some(MappedTypeModifier::Minus)
      } else if self.consume_if(TT::Question).is_match() {
        Some(MappedTypeModifier::None)
      } else {
        None
      };
      self.require(TT::Colon)?;
      let type_expr = Box::new(self.type_expr()?);
      Ok(TypeMember::Mapped(TypeMapped {
        readonly_modifier,
        type_parameter: parameter_name,
        constraint,
        name_type,
        optional_modifier,
        type_expr,
      }))
    } else {
      self.require(TT::Colon)?;
      let parameter_type = self.type_expr()?;
      self.require(TT::BracketClose)?;
      self.require(TT::Colon)?;
      let type_annotation = self.type_expr()?;
      Ok(TypeMember::Index(TypeIndexSignature {
        readonly,
        parameter_name,
        parameter_type,
        type_annotation,
      }))
    }
  }

  fn type_property_or_method_member(
    &mut self,
    doc: Option<String>,
    readonly: bool,
  ) -> SyntaxResult<TypeMember> {
    let key = self.type_property_key()?;
    let optional = self.consume_if(TT::Question).is_match();
    if matches!(self.peek().typ, TT::ParenthesisOpen | TT::ChevronLeft) {
      let type_parameters = self.type_parameters()?;
      let parameters = self.type_function_parameters()?;
      let return_type = if self.consume_if(TT::Colon).is_match() {
        Some(self.return_type_annotation()?)
      } else {
        None
      };
      Ok(TypeMember::Method(TypeMethodSignature {
        doc,
        optional,
        key,
        type_parameters,
        parameters,
        return_type,
      }))
    } else {
      let type_annotation = if self.consume_if(TT::Colon).is_match() {
        Some(self.type_expr()?)
      } else {
        None
      };
      Ok(TypeMember::Property(TypePropertySignature {
        doc,
        readonly,
        optional,
        key,
        type_annotation,
      }))
    }
  }

  fn type_property_key(&mut self) -> SyntaxResult<TypePropertyKey> {
    match self.peek().typ {
      TT::LiteralString => Ok(TypePropertyKey::String(self.lit_str_val()?)),
      TT::LiteralNumber => Ok(TypePropertyKey::Number(self.lit_num_raw()?)),
      _ => Ok(TypePropertyKey::Identifier(self.require_identifier()?)),
    }
  }
}
