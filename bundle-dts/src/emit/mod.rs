use crate::flatten::FlattenedBundle;
use parse_dts::ast::decl::*;
use parse_dts::ast::node::Node;
use std::fmt;

mod type_expr;

pub use type_expr::emit_type_expr;

use type_expr::emit_string_literal;
use type_expr::emit_type_member_body;
use type_expr::emit_type_parameters;

/// Renders a flattened bundle as declaration text: hoisted externals first,
/// then every declaration, one blank line between top-level items, trailing
/// newline. An empty bundle renders as the empty string.
pub fn emit_bundle(bundle: &FlattenedBundle) -> String {
  let mut blocks: Vec<String> = Vec::new();
  if !bundle.externals.is_empty() {
    let mut block = String::new();
    for (idx, item) in bundle.externals.iter().enumerate() {
      if idx > 0 {
        block.push('\n');
      }
      emit_module_item(&mut block, item, 0).expect("write to String");
    }
    blocks.push(block);
  }
  for item in &bundle.items {
    let mut block = String::new();
    emit_module_item(&mut block, item, 0).expect("write to String");
    blocks.push(block);
  }
  if blocks.is_empty() {
    return String::new();
  }
  let mut out = blocks.join("\n\n");
  out.push('\n');
  out
}

fn write_indent<W: fmt::Write>(out: &mut W, indent: usize) -> fmt::Result {
  for _ in 0..indent {
    out.write_str("  ")?;
  }
  Ok(())
}

/// Re-emits a captured JSDoc block, realigning continuation lines under the
/// current indentation.
fn emit_doc<W: fmt::Write>(out: &mut W, doc: &Option<String>, indent: usize) -> fmt::Result {
  let Some(doc) = doc else {
    return Ok(());
  };
  for (idx, line) in doc.lines().enumerate() {
    write_indent(out, indent)?;
    if idx > 0 {
      out.write_char(' ')?;
    }
    out.write_str(line.trim_start())?;
    out.write_char('\n')?;
  }
  Ok(())
}

pub fn emit_module_item<W: fmt::Write>(
  out: &mut W,
  item: &Node<ModuleItem>,
  indent: usize,
) -> fmt::Result {
  match item.stx.as_ref() {
    ModuleItem::Import(d) => {
      write_indent(out, indent)?;
      emit_import_decl(out, &d.stx)
    }
    ModuleItem::ExportNamed(d) => {
      write_indent(out, indent)?;
      emit_export_named_decl(out, &d.stx)
    }
    ModuleItem::ExportStar(d) => {
      write_indent(out, indent)?;
      out.write_str("export * from ")?;
      emit_string_literal(out, &d.stx.specifier)?;
      out.write_char(';')
    }
    ModuleItem::Interface(d) => emit_interface_decl(out, &d.stx, indent),
    ModuleItem::TypeAlias(d) => emit_type_alias_decl(out, &d.stx, indent),
    ModuleItem::Enum(d) => emit_enum_decl(out, &d.stx, indent),
    ModuleItem::Function(d) => emit_function_decl(out, &d.stx, indent),
    ModuleItem::Var(d) => emit_var_decl(out, &d.stx, indent),
    ModuleItem::Class(d) => emit_class_decl(out, &d.stx, indent),
    ModuleItem::Namespace(d) => emit_namespace_decl(out, &d.stx, indent),
    ModuleItem::AmbientModule(d) => emit_ambient_module_decl(out, &d.stx, indent),
    ModuleItem::Global(d) => emit_global_decl(out, &d.stx, indent),
  }
}

fn emit_import_decl<W: fmt::Write>(out: &mut W, decl: &ImportDecl) -> fmt::Result {
  out.write_str("import ")?;
  if decl.type_only {
    out.write_str("type ")?;
  }
  let mut wrote_clause = false;
  if let Some(default) = &decl.default {
    out.write_str(default)?;
    wrote_clause = true;
  }
  if let Some(namespace) = &decl.namespace {
    if wrote_clause {
      out.write_str(", ")?;
    }
    out.write_str("* as ")?;
    out.write_str(namespace)?;
    wrote_clause = true;
  }
  if !decl.names.is_empty() {
    if wrote_clause {
      out.write_str(", ")?;
    }
    out.write_str("{ ")?;
    for (idx, name) in decl.names.iter().enumerate() {
      if idx > 0 {
        out.write_str(", ")?;
      }
      out.write_str(&name.imported)?;
      if let Some(local) = &name.local {
        out.write_str(" as ")?;
        out.write_str(local)?;
      }
    }
    out.write_str(" }")?;
    wrote_clause = true;
  }
  if !wrote_clause {
    // Side-effect import.
    emit_string_literal(out, &decl.specifier)?;
    return out.write_char(';');
  }
  out.write_str(" from ")?;
  emit_string_literal(out, &decl.specifier)?;
  out.write_char(';')
}

fn emit_export_named_decl<W: fmt::Write>(out: &mut W, decl: &ExportNamedDecl) -> fmt::Result {
  out.write_str("export ")?;
  if decl.type_only {
    out.write_str("type ")?;
  }
  if decl.names.is_empty() {
    out.write_str("{}")?;
  } else {
    out.write_str("{ ")?;
    for (idx, name) in decl.names.iter().enumerate() {
      if idx > 0 {
        out.write_str(", ")?;
      }
      out.write_str(&name.local)?;
      if let Some(exported) = &name.exported {
        out.write_str(" as ")?;
        out.write_str(exported)?;
      }
    }
    out.write_str(" }")?;
  }
  if let Some(specifier) = &decl.specifier {
    out.write_str(" from ")?;
    emit_string_literal(out, specifier)?;
  }
  out.write_char(';')
}

fn emit_interface_decl<W: fmt::Write>(
  out: &mut W,
  decl: &InterfaceDecl,
  indent: usize,
) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  out.write_str("interface ")?;
  out.write_str(&decl.name)?;
  emit_type_parameters(out, decl.type_parameters.as_deref())?;
  for (idx, base) in decl.extends.iter().enumerate() {
    out.write_str(if idx == 0 { " extends " } else { ", " })?;
    emit_type_expr(out, base)?;
  }
  out.write_char(' ')?;
  emit_member_block(out, &decl.members, indent)
}

fn emit_member_block<W: fmt::Write>(
  out: &mut W,
  members: &[Node<parse_dts::ast::type_expr::TypeMember>],
  indent: usize,
) -> fmt::Result {
  if members.is_empty() {
    return out.write_str("{}");
  }
  out.write_str("{\n")?;
  for member in members {
    use parse_dts::ast::type_expr::TypeMember;
    let doc = match member.stx.as_ref() {
      TypeMember::Property(p) => &p.doc,
      TypeMember::Method(m) => &m.doc,
      _ => &None,
    };
    emit_doc(out, doc, indent + 1)?;
    write_indent(out, indent + 1)?;
    emit_type_member_body(out, &member.stx)?;
    out.write_str(";\n")?;
  }
  write_indent(out, indent)?;
  out.write_char('}')
}

fn emit_type_alias_decl<W: fmt::Write>(
  out: &mut W,
  decl: &TypeAliasDecl,
  indent: usize,
) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  out.write_str("type ")?;
  out.write_str(&decl.name)?;
  emit_type_parameters(out, decl.type_parameters.as_deref())?;
  out.write_str(" = ")?;
  emit_type_expr(out, &decl.type_expr)?;
  out.write_char(';')
}

fn emit_enum_decl<W: fmt::Write>(out: &mut W, decl: &EnumDecl, indent: usize) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  if decl.const_ {
    out.write_str("const ")?;
  }
  out.write_str("enum ")?;
  out.write_str(&decl.name)?;
  if decl.members.is_empty() {
    return out.write_str(" {}");
  }
  out.write_str(" {\n")?;
  for member in &decl.members {
    let m = &member.stx;
    emit_doc(out, &m.doc, indent + 1)?;
    write_indent(out, indent + 1)?;
    if is_identifier_name(&m.name) {
      out.write_str(&m.name)?;
    } else {
      emit_string_literal(out, &m.name)?;
    }
    match &m.init {
      Some(EnumInit::String(s)) => {
        out.write_str(" = ")?;
        emit_string_literal(out, s)?;
      }
      Some(EnumInit::Number(n)) => {
        out.write_str(" = ")?;
        out.write_str(n)?;
      }
      None => {}
    };
    out.write_str(",\n")?;
  }
  write_indent(out, indent)?;
  out.write_char('}')
}

fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
    _ => return false,
  };
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn emit_function_decl<W: fmt::Write>(
  out: &mut W,
  decl: &FunctionDecl,
  indent: usize,
) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  out.write_str("function ")?;
  out.write_str(&decl.name)?;
  emit_type_parameters(out, decl.type_parameters.as_deref())?;
  emit_function_parameters(out, &decl.parameters)?;
  if let Some(ty) = &decl.return_type {
    out.write_str(": ")?;
    emit_type_expr(out, ty)?;
  }
  out.write_char(';')
}

fn emit_function_parameters<W: fmt::Write>(
  out: &mut W,
  params: &[Node<FunctionParameter>],
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
    out.write_str(&p.name)?;
    if p.optional {
      out.write_char('?')?;
    }
    if let Some(ty) = &p.type_annotation {
      out.write_str(": ")?;
      emit_type_expr(out, ty)?;
    }
  }
  out.write_char(')')
}

fn emit_var_decl<W: fmt::Write>(out: &mut W, decl: &VarDecl, indent: usize) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  out.write_str(match decl.kind {
    VarDeclKind::Var => "var ",
    VarDeclKind::Let => "let ",
    VarDeclKind::Const => "const ",
  })?;
  out.write_str(&decl.name)?;
  if let Some(ty) = &decl.type_annotation {
    out.write_str(": ")?;
    emit_type_expr(out, ty)?;
  }
  out.write_char(';')
}

fn emit_class_decl<W: fmt::Write>(out: &mut W, decl: &ClassDecl, indent: usize) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  if decl.abstract_ {
    out.write_str("abstract ")?;
  }
  out.write_str("class ")?;
  out.write_str(&decl.name)?;
  emit_type_parameters(out, decl.type_parameters.as_deref())?;
  if let Some(base) = &decl.extends {
    out.write_str(" extends ")?;
    emit_type_expr(out, base)?;
  }
  for (idx, base) in decl.implements.iter().enumerate() {
    out.write_str(if idx == 0 { " implements " } else { ", " })?;
    emit_type_expr(out, base)?;
  }
  out.write_char(' ')?;
  emit_member_block(out, &decl.members, indent)
}

fn emit_namespace_decl<W: fmt::Write>(
  out: &mut W,
  decl: &NamespaceDecl,
  indent: usize,
) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  if decl.export {
    out.write_str("export ")?;
  }
  if decl.declare {
    out.write_str("declare ")?;
  }
  out.write_str("namespace ")?;
  out.write_str(&decl.name)?;
  out.write_char(' ')?;
  emit_item_block(out, &decl.body, indent)
}

fn emit_ambient_module_decl<W: fmt::Write>(
  out: &mut W,
  decl: &AmbientModuleDecl,
  indent: usize,
) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  out.write_str("declare module ")?;
  emit_string_literal(out, &decl.name)?;
  out.write_char(' ')?;
  emit_item_block(out, &decl.body, indent)
}

fn emit_global_decl<W: fmt::Write>(out: &mut W, decl: &GlobalDecl, indent: usize) -> fmt::Result {
  emit_doc(out, &decl.doc, indent)?;
  write_indent(out, indent)?;
  out.write_str("declare global ")?;
  emit_item_block(out, &decl.body, indent)
}

fn emit_item_block<W: fmt::Write>(
  out: &mut W,
  items: &[Node<ModuleItem>],
  indent: usize,
) -> fmt::Result {
  if items.is_empty() {
    return out.write_str("{}");
  }
  out.write_str("{\n")?;
  for item in items {
    emit_module_item(out, item, indent + 1)?;
    out.write_char('\n')?;
  }
  write_indent(out, indent)?;
  out.write_char('}')
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_dts::parse;
  use parse_dts::ParseOptions;

  fn emit_first(src: &str) -> String {
    let file = parse(src, ParseOptions::default()).unwrap();
    let mut out = String::new();
    emit_module_item(&mut out, &file.stx.items[0], 0).unwrap();
    out
  }

  #[test]
  fn emits_interface_multiline_with_docs() {
    let out = emit_first(
      "/** A chat message. */\nexport interface Message {\n  /** Sender id. */\n  sender: string;\n  send(text: string, urgent?: boolean): Promise<void>;\n}",
    );
    assert_eq!(
      out,
      "/** A chat message. */\nexport interface Message {\n  /** Sender id. */\n  sender: string;\n  send(text: string, urgent?: boolean): Promise<void>;\n}"
    );
  }

  #[test]
  fn emits_union_and_array_with_precedence_parens() {
    let out = emit_first("type Handlers = ((event: string) => void)[];");
    assert_eq!(out, "type Handlers = ((event: string) => void)[];");
    let out = emit_first("type Pair = (string | number)[];");
    assert_eq!(out, "type Pair = (string | number)[];");
  }

  #[test]
  fn emits_conditional_mapped_and_template_types() {
    let out = emit_first(
      "type Keys<T> = { [K in keyof T as `get${string & K}`]?: () => T[K] };",
    );
    assert_eq!(
      out,
      "type Keys<T> = { [K in keyof T as `get${string & K}`]?: () => T[K] };"
    );
    let out = emit_first("type Unwrap<T> = T extends Promise<infer U> ? U : T;");
    assert_eq!(out, "type Unwrap<T> = T extends Promise<infer U> ? U : T;");
  }

  #[test]
  fn emits_enum_namespace_and_module_blocks() {
    let out = emit_first(
      "declare const enum Level {\n  /** Lowest. */\n  Debug = 0,\n  Error = \"error\",\n}",
    );
    assert_eq!(
      out,
      "declare const enum Level {\n  /** Lowest. */\n  Debug = 0,\n  Error = \"error\",\n}"
    );
    let out = emit_first(
      "declare namespace Outer {\n  interface Inner {\n    id: string;\n  }\n}",
    );
    assert_eq!(
      out,
      "declare namespace Outer {\n  interface Inner {\n    id: string;\n  }\n}"
    );
  }

  #[test]
  fn emits_imports_and_exports() {
    assert_eq!(
      emit_first("import type { A, B as C } from \"react\";"),
      "import type { A, B as C } from \"react\";"
    );
    assert_eq!(
      emit_first("import Default, { Extra } from \"mod\";"),
      "import Default, { Extra } from \"mod\";"
    );
    assert_eq!(
      emit_first("import * as ns from \"mod\";"),
      "import * as ns from \"mod\";"
    );
    assert_eq!(
      emit_first("export { A as B } from \"./dep\";"),
      "export { A as B } from \"./dep\";"
    );
    assert_eq!(emit_first("export * from \"pkg\";"), "export * from \"pkg\";");
  }
}
