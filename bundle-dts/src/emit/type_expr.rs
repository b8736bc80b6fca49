use parse_dts::ast::node::Node;
use parse_dts::ast::type_expr::*;
use std::fmt;

/// Precedence levels for type expressions. Higher variants bind more tightly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum TypePrec {
  ArrowOrConditional,
  Union,
  Intersection,
  Unary,
  Postfix,
  Primary,
}

fn type_prec(expr: &TypeExpr) -> TypePrec {
  match expr {
    TypeExpr::FunctionType(_)
    | TypeExpr::ConstructorType(_)
    | TypeExpr::ConditionalType(_)
    | TypeExpr::TypePredicate(_) => TypePrec::ArrowOrConditional,
    TypeExpr::UnionType(_) => TypePrec::Union,
    TypeExpr::IntersectionType(_) => TypePrec::Intersection,
    TypeExpr::KeyOfType(_) | TypeExpr::InferType(_) => TypePrec::Unary,
    TypeExpr::ArrayType(_) | TypeExpr::IndexedAccessType(_) => TypePrec::Postfix,
    _ => TypePrec::Primary,
  }
}

pub fn emit_type_expr<W: fmt::Write>(out: &mut W, expr: &Node<TypeExpr>) -> fmt::Result {
  emit_type_with_prec(out, expr, TypePrec::ArrowOrConditional)
}

pub(crate) fn emit_type_with_prec<W: fmt::Write>(
  out: &mut W,
  expr: &Node<TypeExpr>,
  min: TypePrec,
) -> fmt::Result {
  if type_prec(&expr.stx) < min {
    out.write_char('(')?;
    emit_type_inner(out, expr)?;
    out.write_char(')')
  } else {
    emit_type_inner(out, expr)
  }
}

fn emit_type_inner<W: fmt::Write>(out: &mut W, expr: &Node<TypeExpr>) -> fmt::Result {
  match expr.stx.as_ref() {
    TypeExpr::Any => out.write_str("any"),
    TypeExpr::Unknown => out.write_str("unknown"),
    TypeExpr::Never => out.write_str("never"),
    TypeExpr::Void => out.write_str("void"),
    TypeExpr::String => out.write_str("string"),
    TypeExpr::Number => out.write_str("number"),
    TypeExpr::Boolean => out.write_str("boolean"),
    TypeExpr::BigInt => out.write_str("bigint"),
    TypeExpr::Symbol => out.write_str("symbol"),
    TypeExpr::UniqueSymbol => out.write_str("unique symbol"),
    TypeExpr::Object => out.write_str("object"),
    TypeExpr::Null => out.write_str("null"),
    TypeExpr::Undefined => out.write_str("undefined"),
    TypeExpr::ThisType => out.write_str("this"),
    TypeExpr::TypeReference(r) => {
      emit_entity_name(out, &r.name)?;
      emit_type_arguments(out, r.type_arguments.as_deref())
    }
    TypeExpr::LiteralType(lit) => match lit {
      TypeLiteral::String(s) => emit_string_literal(out, s),
      TypeLiteral::Number(n) => out.write_str(n),
      TypeLiteral::Boolean(true) => out.write_str("true"),
      TypeLiteral::Boolean(false) => out.write_str("false"),
    },
    TypeExpr::ArrayType(a) => {
      if a.readonly {
        out.write_str("readonly ")?;
      }
      emit_type_with_prec(out, &a.element_type, TypePrec::Postfix)?;
      out.write_str("[]")
    }
    TypeExpr::TupleType(t) => {
      if t.readonly {
        out.write_str("readonly ")?;
      }
      out.write_char('[')?;
      for (idx, element) in t.elements.iter().enumerate() {
        if idx > 0 {
          out.write_str(", ")?;
        }
        let e = &element.stx;
        if e.rest {
          out.write_str("...")?;
        }
        if let Some(label) = &e.label {
          out.write_str(label)?;
          if e.optional {
            out.write_char('?')?;
          }
          out.write_str(": ")?;
          emit_type_expr(out, &e.type_expr)?;
        } else {
          emit_type_expr(out, &e.type_expr)?;
          if e.optional {
            out.write_char('?')?;
          }
        }
      }
      out.write_char(']')
    }
    TypeExpr::UnionType(u) => {
      for (idx, ty) in u.types.iter().enumerate() {
        if idx > 0 {
          out.write_str(" | ")?;
        }
        emit_type_with_prec(out, ty, TypePrec::Intersection)?;
      }
      Ok(())
    }
    TypeExpr::IntersectionType(i) => {
      for (idx, ty) in i.types.iter().enumerate() {
        if idx > 0 {
          out.write_str(" & ")?;
        }
        emit_type_with_prec(out, ty, TypePrec::Unary)?;
      }
      Ok(())
    }
    TypeExpr::FunctionType(f) => {
      emit_type_parameters(out, f.type_parameters.as_deref())?;
      emit_type_function_parameters(out, &f.parameters)?;
      out.write_str(" => ")?;
      emit_type_expr(out, &f.return_type)
    }
    TypeExpr::ConstructorType(c) => {
      out.write_str("new ")?;
      emit_type_parameters(out, c.type_parameters.as_deref())?;
      emit_type_function_parameters(out, &c.parameters)?;
      out.write_str(" => ")?;
      emit_type_expr(out, &c.return_type)
    }
    TypeExpr::ObjectType(o) => {
      if o.members.is_empty() {
        return out.write_str("{}");
      }
      out.write_str("{ ")?;
      for (idx, member) in o.members.iter().enumerate() {
        if idx > 0 {
          out.write_str("; ")?;
        }
        emit_type_member_body(out, &member.stx)?;
      }
      out.write_str(" }")
    }
    TypeExpr::ParenthesizedType(p) => {
      out.write_char('(')?;
      emit_type_expr(out, &p.type_expr)?;
      out.write_char(')')
    }
    TypeExpr::TypeQuery(q) => {
      out.write_str("typeof ")?;
      emit_entity_name(out, &q.expr_name)
    }
    TypeExpr::KeyOfType(k) => {
      out.write_str("keyof ")?;
      emit_type_with_prec(out, &k.type_expr, TypePrec::Unary)
    }
    TypeExpr::IndexedAccessType(i) => {
      emit_type_with_prec(out, &i.object_type, TypePrec::Postfix)?;
      out.write_char('[')?;
      emit_type_expr(out, &i.index_type)?;
      out.write_char(']')
    }
    TypeExpr::ConditionalType(c) => {
      emit_type_with_prec(out, &c.check_type, TypePrec::Union)?;
      out.write_str(" extends ")?;
      emit_type_with_prec(out, &c.extends_type, TypePrec::Union)?;
      out.write_str(" ? ")?;
      emit_type_expr(out, &c.true_type)?;
      out.write_str(" : ")?;
      emit_type_expr(out, &c.false_type)
    }
    TypeExpr::InferType(i) => {
      out.write_str("infer ")?;
      out.write_str(&i.type_parameter)
    }
    TypeExpr::TemplateLiteralType(t) => {
      out.write_char('`')?;
      out.write_str(&t.head)?;
      for span in &t.spans {
        out.write_str("${")?;
        emit_type_expr(out, &span.stx.type_expr)?;
        out.write_char('}')?;
        out.write_str(&span.stx.literal)?;
      }
      out.write_char('`')
    }
    TypeExpr::TypePredicate(p) => {
      if p.asserts {
        out.write_str("asserts ")?;
      }
      out.write_str(&p.parameter_name)?;
      if let Some(ty) = &p.type_annotation {
        out.write_str(" is ")?;
        emit_type_expr(out, ty)?;
      }
      Ok(())
    }
    TypeExpr::ImportType(i) => {
      out.write_str("import(")?;
      emit_string_literal(out, &i.module_specifier)?;
      out.write_char(')')?;
      if let Some(qualifier) = &i.qualifier {
        out.write_char('.')?;
        emit_entity_name(out, qualifier)?;
      }
      emit_type_arguments(out, i.type_arguments.as_deref())
    }
  }
}

pub(crate) fn emit_entity_name<W: fmt::Write>(out: &mut W, name: &TypeEntityName) -> fmt::Result {
  match name {
    TypeEntityName::Identifier(name) => out.write_str(name),
    TypeEntityName::Qualified(qualified) => {
      emit_entity_name(out, &qualified.left)?;
      out.write_char('.')?;
      out.write_str(&qualified.right)
    }
  }
}

fn emit_type_arguments<W: fmt::Write>(
  out: &mut W,
  args: Option<&[Node<TypeExpr>]>,
) -> fmt::Result {
  let Some(args) = args else {
    return Ok(());
  };
  out.write_char('<')?;
  for (idx, arg) in args.iter().enumerate() {
    if idx > 0 {
      out.write_str(", ")?;
    }
    emit_type_expr(out, arg)?;
  }
  out.write_char('>')
}

pub(crate) fn emit_type_parameters<W: fmt::Write>(
  out: &mut W,
  params: Option<&[Node<TypeParameter>]>,
) -> fmt::Result {
  let Some(params) = params else {
    return Ok(());
  };
  out.write_char('<')?;
  for (idx, param) in params.iter().enumerate() {
    if idx > 0 {
      out.write_str(", ")?;
    }
    let p = &param.stx;
    match p.variance {
      Some(Variance::In) => out.write_str("in ")?,
      Some(Variance::Out) => out.write_str("out ")?,
      Some(Variance::InOut) => out.write_str("in out ")?,
      None => {}
    };
    out.write_str(&p.name)?;
    if let Some(constraint) = &p.constraint {
      out.write_str(" extends ")?;
      emit_type_expr(out, constraint)?;
    }
    if let Some(default) = &p.default {
      out.write_str(" = ")?;
      emit_type_expr(out, default)?;
    }
  }
  out.write_char('>')
}

pub(crate) fn emit_type_function_parameters<W: fmt::Write>(
  out: &mut W,
  params: &[Node<TypeFunctionParameter>],
) -> fmt::Result {
  out.write_char('(')?;
  for (idx, param) in params.iter().enumerate() {
    if idx > 0 {
      out.write_str(", ")?;
    }
    let p = &param.stx;
    if p.rest {
      out.write_str("...")?;
    }
    match (&p.name, &p.type_annotation) {
      (Some(name), annotation) => {
        out.write_str(name)?;
        if p.optional {
          out.write_char('?')?;
        }
        if let Some(ty) = annotation {
          out.write_str(": ")?;
          emit_type_expr(out, ty)?;
        }
      }
      (None, Some(ty)) => emit_type_expr(out, ty)?,
      (None, None) => {}
    };
  }
  out.write_char(')')
}

/// The member text without doc comment, indentation, or terminator; shared by
/// the inline object-type form and the multi-line interface/class form.
pub(crate) fn emit_type_member_body<W: fmt::Write>(out: &mut W, member: &TypeMember) -> fmt::Result {
  match member {
    TypeMember::Property(p) => {
      if p.readonly {
        out.write_str("readonly ")?;
      }
      emit_property_key(out, &p.key)?;
      if p.optional {
        out.write_char('?')?;
      }
      if let Some(ty) = &p.type_annotation {
        out.write_str(": ")?;
        emit_type_expr(out, ty)?;
      }
      Ok(())
    }
    TypeMember::Method(m) => {
      emit_property_key(out, &m.key)?;
      if m.optional {
        out.write_char('?')?;
      }
      emit_type_parameters(out, m.type_parameters.as_deref())?;
      emit_type_function_parameters(out, &m.parameters)?;
      if let Some(ty) = &m.return_type {
        out.write_str(": ")?;
        emit_type_expr(out, ty)?;
      }
      Ok(())
    }
    TypeMember::Construct(c) => {
      out.write_str("new ")?;
      emit_type_parameters(out, c.type_parameters.as_deref())?;
      emit_type_function_parameters(out, &c.parameters)?;
      if let Some(ty) = &c.return_type {
        out.write_str(": ")?;
        emit_type_expr(out, ty)?;
      }
      Ok(())
    }
    TypeMember::Call(c) => {
      emit_type_parameters(out, c.type_parameters.as_deref())?;
      emit_type_function_parameters(out, &c.parameters)?;
      if let Some(ty) = &c.return_type {
        out.write_str(": ")?;
        emit_type_expr(out, ty)?;
      }
      Ok(())
    }
    TypeMember::Index(i) => {
      if i.readonly {
        out.write_str("readonly ")?;
      }
      out.write_char('[')?;
      out.write_str(&i.parameter_name)?;
      out.write_str(": ")?;
      emit_type_expr(out, &i.parameter_type)?;
      out.write_str("]: ")?;
      emit_type_expr(out, &i.type_annotation)
    }
    TypeMember::Mapped(m) => {
      match m.readonly_modifier {
        Some(MappedTypeModifier::Plus) => out.write_str("+readonly ")?,
        Some(MappedTypeModifier::Minus) => out.write_str("-readonly ")?,
        Some(MappedTypeModifier::None) => out.write_str("readonly ")?,
        None => {}
      };
      out.write_char('[')?;
      out.write_str(&m.type_parameter)?;
      out.write_str(" in ")?;
      emit_type_expr(out, &m.constraint)?;
      if let Some(name_type) = &m.name_type {
        out.write_str(" as ")?;
        emit_type_expr(out, name_type)?;
      }
      out.write_char(']')?;
      match m.optional_modifier {
        Some(MappedTypeModifier::Plus) => out.write_str("+?")?,
        Some(MappedTypeModifier::Minus) => out.write_str("-?")?,
        Some(MappedTypeModifier::None) => out.write_char('?')?,
        None => {}
      };
      out.write_str(": ")?;
      emit_type_expr(out, &m.type_expr)
    }
  }
}

pub(crate) fn emit_property_key<W: fmt::Write>(out: &mut W, key: &TypePropertyKey) -> fmt::Result {
  match key {
    TypePropertyKey::Identifier(name) => out.write_str(name),
    TypePropertyKey::String(s) => emit_string_literal(out, s),
    TypePropertyKey::Number(n) => out.write_str(n),
  }
}

pub(crate) fn emit_string_literal<W: fmt::Write>(out: &mut W, value: &str) -> fmt::Result {
  out.write_char('"')?;
  for c in value.chars() {
    match c {
      '"' => out.write_str("\\\"")?,
      '\\' => out.write_str("\\\\")?,
      '\n' => out.write_str("\\n")?,
      '\r' => out.write_str("\\r")?,
      '\t' => out.write_str("\\t")?,
      other => out.write_char(other)?,
    };
  }
  out.write_char('"')
}
