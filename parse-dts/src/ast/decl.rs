use super::node::Node;
use super::type_expr::TypeExpr;
use super::type_expr::TypeMember;
use super::type_expr::TypeParameter;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// One parsed `.d.ts` source text.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DeclarationFile {
  pub items: Vec<Node<ModuleItem>>,
}

/// A top-level item of a declaration file (or of a namespace/ambient module body).
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum ModuleItem {
  Import(Node<ImportDecl>),
  ExportNamed(Node<ExportNamedDecl>),
  ExportStar(Node<ExportStarDecl>),
  Interface(Node<InterfaceDecl>),
  TypeAlias(Node<TypeAliasDecl>),
  Enum(Node<EnumDecl>),
  Function(Node<FunctionDecl>),
  Var(Node<VarDecl>),
  Class(Node<ClassDecl>),
  Namespace(Node<NamespaceDecl>),
  AmbientModule(Node<AmbientModuleDecl>),
  Global(Node<GlobalDecl>),
}

/// Import declaration: import { A, B as C } from "./x", import type { T } from "./y",
/// import * as ns from "./z", import D from "./w"
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportDecl {
  #[drive(skip)]
  pub type_only: bool,
  #[drive(skip)]
  pub default: Option<String>,
  #[drive(skip)]
  pub namespace: Option<String>,
  #[drive(skip)]
  pub names: Vec<ImportName>,
  #[drive(skip)]
  pub specifier: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportName {
  pub imported: String,
  pub local: Option<String>,
}

impl ImportName {
  /// The name the binding is visible under in the importing module.
  pub fn local_name(&self) -> &str {
    self.local.as_deref().unwrap_or(&self.imported)
  }
}

/// Named export: export { A, B as C }, export type { T }, export { X } from "./y"
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportNamedDecl {
  #[drive(skip)]
  pub type_only: bool,
  #[drive(skip)]
  pub names: Vec<ExportName>,
  #[drive(skip)]
  pub specifier: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportName {
  pub local: String,
  pub exported: Option<String>,
}

/// Star re-export: export * from "./x"
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportStarDecl {
  #[drive(skip)]
  pub specifier: String,
}

/// Interface declaration: interface Foo<T> extends Bar { }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct InterfaceDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Type alias declaration: type Foo<T> = Bar<T>
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeAliasDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub type_expr: Node<TypeExpr>,
}

/// Enum declaration: enum Color { Red, Green, Blue }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EnumDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub const_: bool,
  #[drive(skip)]
  pub name: String,
  pub members: Vec<Node<EnumMember>>,
}

/// Enum member: Red = 1, Green = "green"
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EnumMember {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub name: String,
  #[drive(skip)]
  pub init: Option<EnumInit>,
}

/// Enum member initializer; ambient enums only carry literal values.
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum EnumInit {
  String(String),
  Number(String),
}

/// Ambient function declaration: declare function foo<T>(x: T): void
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FunctionDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<FunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FunctionParameter {
  #[drive(skip)]
  pub name: String,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub rest: bool,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Ambient variable declaration: declare const foo: Type
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub kind: VarDeclKind,
  #[drive(skip)]
  pub name: String,
  pub type_annotation: Option<Node<TypeExpr>>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum VarDeclKind {
  Var,
  Let,
  Const,
}

/// Ambient class declaration: declare class Foo<T> extends Bar implements Baz { }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub abstract_: bool,
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Option<Node<TypeExpr>>,
  pub implements: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Namespace declaration: namespace Foo { }. Dotted names (`namespace A.B`)
/// are stored joined with `.`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NamespaceDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub body: Vec<Node<ModuleItem>>,
}

/// Ambient module declaration: declare module "wix-chat-backend" { }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AmbientModuleDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub name: String,
  pub body: Vec<Node<ModuleItem>>,
}

/// Global augmentation: declare global { }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct GlobalDecl {
  #[drive(skip)]
  pub doc: Option<String>,
  pub body: Vec<Node<ModuleItem>>,
}
