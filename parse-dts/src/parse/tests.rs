use crate::ast::decl::*;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::parse;
use crate::ParseOptions;

fn parse_ok(src: &str) -> DeclarationFile {
  *parse(src, ParseOptions::default()).unwrap().stx
}

#[test]
fn parses_interface_with_members() {
  let file = parse_ok(
    r#"
      interface ChatMessage {
        readonly id: string;
        text?: string;
        send(channelId: string, options?: SendOptions): Promise<void>;
        [key: string]: unknown;
      }
    "#,
  );
  assert_eq!(file.items.len(), 1);
  let ModuleItem::Interface(intf) = &*file.items[0].stx else {
    panic!("expected interface");
  };
  assert_eq!(intf.stx.name, "ChatMessage");
  assert!(!intf.stx.export);
  assert_eq!(intf.stx.members.len(), 4);
  let TypeMember::Property(id) = &*intf.stx.members[0].stx else {
    panic!("expected property");
  };
  assert!(id.readonly);
  assert!(!id.optional);
  let TypeMember::Property(text) = &*intf.stx.members[1].stx else {
    panic!("expected property");
  };
  assert!(text.optional);
  assert!(matches!(&*intf.stx.members[2].stx, TypeMember::Method(_)));
  assert!(matches!(&*intf.stx.members[3].stx, TypeMember::Index(_)));
}

#[test]
fn parses_type_alias_with_union_and_generics() {
  let file = parse_ok("export type Result<T, E = Error> = { ok: T } | { err: E };");
  let ModuleItem::TypeAlias(alias) = &*file.items[0].stx else {
    panic!("expected type alias");
  };
  assert!(alias.stx.export);
  assert_eq!(alias.stx.name, "Result");
  let params = alias.stx.type_parameters.as_ref().unwrap();
  assert_eq!(params.len(), 2);
  assert!(params[1].stx.default.is_some());
  let TypeExpr::UnionType(u) = &*alias.stx.type_expr.stx else {
    panic!("expected union");
  };
  assert_eq!(u.types.len(), 2);
}

#[test]
fn parses_const_enum_with_initializers() {
  let file = parse_ok(
    r#"
      export const enum Direction {
        Up = "up",
        Down = "down",
        None = -1,
      }
    "#,
  );
  let ModuleItem::Enum(e) = &*file.items[0].stx else {
    panic!("expected enum");
  };
  assert!(e.stx.const_);
  assert!(e.stx.export);
  assert_eq!(e.stx.members.len(), 3);
  assert!(matches!(
    &e.stx.members[0].stx.init,
    Some(EnumInit::String(s)) if s == "up"
  ));
  assert!(matches!(
    &e.stx.members[2].stx.init,
    Some(EnumInit::Number(n)) if n == "-1"
  ));
}

#[test]
fn parses_imports_and_exports() {
  let file = parse_ok(
    r#"
      import Dflt, { A, B as C } from "./a";
      import * as ns from "./b";
      import type { T } from "./c";
      export { X, Y as Z } from "./d";
      export * from "./e";
      export type { U };
    "#,
  );
  assert_eq!(file.items.len(), 6);
  let ModuleItem::Import(imp) = &*file.items[0].stx else {
    panic!("expected import");
  };
  assert_eq!(imp.stx.default.as_deref(), Some("Dflt"));
  assert_eq!(imp.stx.names.len(), 2);
  assert_eq!(imp.stx.names[1].local_name(), "C");
  assert_eq!(imp.stx.specifier, "./a");
  let ModuleItem::Import(ns) = &*file.items[1].stx else {
    panic!("expected import");
  };
  assert_eq!(ns.stx.namespace.as_deref(), Some("ns"));
  let ModuleItem::Import(ty) = &*file.items[2].stx else {
    panic!("expected import");
  };
  assert!(ty.stx.type_only);
  let ModuleItem::ExportNamed(re) = &*file.items[3].stx else {
    panic!("expected named export");
  };
  assert_eq!(re.stx.specifier.as_deref(), Some("./d"));
  assert_eq!(re.stx.names[1].exported.as_deref(), Some("Z"));
  let ModuleItem::ExportStar(star) = &*file.items[4].stx else {
    panic!("expected star export");
  };
  assert_eq!(star.stx.specifier, "./e");
  let ModuleItem::ExportNamed(local) = &*file.items[5].stx else {
    panic!("expected named export");
  };
  assert!(local.stx.type_only);
  assert!(local.stx.specifier.is_none());
}

#[test]
fn parses_ambient_module_and_namespace() {
  let file = parse_ok(
    r#"
      declare module "wix-chat-backend" {
        export function sendMessage(text: string): Promise<void>;
      }
      declare namespace Telemetry.Events {
        const enabled: boolean;
      }
      declare global {
        interface Window {
          viewerVersion: string;
        }
      }
    "#,
  );
  let ModuleItem::AmbientModule(m) = &*file.items[0].stx else {
    panic!("expected ambient module");
  };
  assert_eq!(m.stx.name, "wix-chat-backend");
  assert_eq!(m.stx.body.len(), 1);
  let ModuleItem::Namespace(ns) = &*file.items[1].stx else {
    panic!("expected namespace");
  };
  assert_eq!(ns.stx.name, "Telemetry.Events");
  assert!(ns.stx.declare);
  assert!(matches!(&*file.items[2].stx, ModuleItem::Global(_)));
}

#[test]
fn attaches_jsdoc_to_declarations_and_members() {
  let file = parse_ok(
    r#"
      /** Sends a chat message. */
      export interface Sender {
        /** Target channel. */
        channelId: string;
        // Not a doc comment.
        text: string;
      }
    "#,
  );
  let ModuleItem::Interface(intf) = &*file.items[0].stx else {
    panic!("expected interface");
  };
  assert_eq!(intf.stx.doc.as_deref(), Some("/** Sends a chat message. */"));
  let TypeMember::Property(channel) = &*intf.stx.members[0].stx else {
    panic!("expected property");
  };
  assert_eq!(channel.doc.as_deref(), Some("/** Target channel. */"));
  let TypeMember::Property(text) = &*intf.stx.members[1].stx else {
    panic!("expected property");
  };
  assert!(text.doc.is_none());
}

#[test]
fn parses_function_with_predicate_return() {
  let file = parse_ok("declare function isMessage(value: unknown): value is Message;");
  let ModuleItem::Function(f) = &*file.items[0].stx else {
    panic!("expected function");
  };
  assert!(f.stx.declare);
  let TypeExpr::TypePredicate(pred) = &*f.stx.return_type.as_ref().unwrap().stx else {
    panic!("expected predicate");
  };
  assert!(!pred.asserts);
  assert_eq!(pred.parameter_name, "value");
  assert!(pred.type_annotation.is_some());
}

#[test]
fn parses_template_literal_and_mapped_types() {
  let file = parse_ok(
    r#"
      type EventName<T extends string> = `on${T}Changed`;
      type Partial2<T> = { readonly [K in keyof T]?: T[K] };
    "#,
  );
  let ModuleItem::TypeAlias(tmpl) = &*file.items[0].stx else {
    panic!("expected type alias");
  };
  let TypeExpr::TemplateLiteralType(t) = &*tmpl.stx.type_expr.stx else {
    panic!("expected template literal type");
  };
  assert_eq!(t.head, "on");
  assert_eq!(t.spans.len(), 1);
  assert_eq!(t.spans[0].stx.literal, "Changed");
  let ModuleItem::TypeAlias(mapped) = &*file.items[1].stx else {
    panic!("expected type alias");
  };
  let TypeExpr::ObjectType(obj) = &*mapped.stx.type_expr.stx else {
    panic!("expected object type");
  };
  let TypeMember::Mapped(m) = &*obj.members[0].stx else {
    panic!("expected mapped member");
  };
  assert_eq!(m.type_parameter, "K");
  assert!(matches!(m.readonly_modifier, Some(MappedTypeModifier::None)));
  assert!(matches!(m.optional_modifier, Some(MappedTypeModifier::None)));
}

#[test]
fn parses_conditional_keyof_and_indexed_access() {
  let file = parse_ok("type Keys<T> = T extends object ? keyof T : T[] ;");
  let ModuleItem::TypeAlias(alias) = &*file.items[0].stx else {
    panic!("expected type alias");
  };
  let TypeExpr::ConditionalType(cond) = &*alias.stx.type_expr.stx else {
    panic!("expected conditional");
  };
  assert!(matches!(&*cond.extends_type.stx, TypeExpr::Object));
  assert!(matches!(&*cond.true_type.stx, TypeExpr::KeyOfType(_)));
  assert!(matches!(&*cond.false_type.stx, TypeExpr::ArrayType(_)));
}

#[test]
fn parses_function_and_tuple_types() {
  let file = parse_ok(
    "type Handler = (event: string, ...args: unknown[]) => void; type Pair = readonly [first: string, second?: number];",
  );
  let ModuleItem::TypeAlias(handler) = &*file.items[0].stx else {
    panic!("expected type alias");
  };
  let TypeExpr::FunctionType(f) = &*handler.stx.type_expr.stx else {
    panic!("expected function type");
  };
  assert_eq!(f.parameters.len(), 2);
  assert!(f.parameters[1].stx.rest);
  assert!(matches!(&*f.return_type.stx, TypeExpr::Void));
  let ModuleItem::TypeAlias(pair) = &*file.items[1].stx else {
    panic!("expected type alias");
  };
  let TypeExpr::TupleType(t) = &*pair.stx.type_expr.stx else {
    panic!("expected tuple type");
  };
  assert!(t.readonly);
  assert_eq!(t.elements[0].stx.label.as_deref(), Some("first"));
  assert!(t.elements[1].stx.optional);
}

#[test]
fn parses_typeof_and_import_types() {
  let file = parse_ok(
    r#"
      declare const config: typeof defaults.settings;
      type External = import("other-pkg").Thing<string>;
    "#,
  );
  let ModuleItem::Var(v) = &*file.items[0].stx else {
    panic!("expected var");
  };
  let TypeExpr::TypeQuery(q) = &*v.stx.type_annotation.as_ref().unwrap().stx else {
    panic!("expected type query");
  };
  assert_eq!(q.expr_name.root(), "defaults");
  let ModuleItem::TypeAlias(alias) = &*file.items[1].stx else {
    panic!("expected type alias");
  };
  let TypeExpr::ImportType(imp) = &*alias.stx.type_expr.stx else {
    panic!("expected import type");
  };
  assert_eq!(imp.module_specifier, "other-pkg");
  assert!(imp.type_arguments.is_some());
}

#[test]
fn rejects_unclosed_interface() {
  let err = parse("interface Broken { a: string;", ParseOptions::default()).unwrap_err();
  assert_eq!(err.typ.code(), "PD0002");
}

#[test]
fn rejects_default_exports() {
  let err = parse("export default interface X {}", ParseOptions::default()).unwrap_err();
  assert!(matches!(err.typ, SyntaxErrorType::ExpectedSyntax("declaration")));
  assert_eq!(err.typ.code(), "PD0001");
}

#[test]
fn ast_serializes_with_tagged_variants() {
  let file = parse_ok("export type Id = string;");
  let json = serde_json::to_value(&file.items[0]).unwrap();
  assert_eq!(json["$t"], "TypeAlias");
  assert_eq!(json["export"], true);
  assert_eq!(json["name"], "Id");
  assert_eq!(json["type_expr"]["$t"], "String");
}
