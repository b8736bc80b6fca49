use super::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// Main type expression enum covering the declaration-file subset of
/// TypeScript type constructs.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum TypeExpr {
  // Primitive types
  Any,
  Unknown,
  Never,
  Void,
  String,
  Number,
  Boolean,
  BigInt,
  Symbol,
  UniqueSymbol,
  Object,
  Null,
  Undefined,

  // Reference and complex types
  TypeReference(TypeReference),
  LiteralType(#[drive(skip)] TypeLiteral),
  ArrayType(TypeArray),
  TupleType(TypeTuple),
  UnionType(TypeUnion),
  IntersectionType(TypeIntersection),
  FunctionType(TypeFunction),
  ConstructorType(TypeConstructor),
  ObjectType(TypeObjectLiteral),
  ParenthesizedType(TypeParenthesized),

  // Type operators
  TypeQuery(TypeQuery),
  KeyOfType(TypeKeyOf),
  IndexedAccessType(TypeIndexedAccess),
  ConditionalType(TypeConditional),
  InferType(TypeInfer),
  TemplateLiteralType(TypeTemplateLiteral),

  // Type predicates
  TypePredicate(TypePredicate),

  // Special
  ThisType,
  ImportType(TypeImport),
}

/// Type reference: Foo, Foo<T>, A.B.C<T, U>
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeReference {
  #[drive(skip)]
  pub name: TypeEntityName,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

/// Entity name in type reference (can be qualified)
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypeEntityName {
  Identifier(String),
  Qualified(Box<TypeQualifiedName>),
}

impl TypeEntityName {
  /// The leftmost identifier, i.e. the name that is actually in scope.
  pub fn root(&self) -> &str {
    match self {
      TypeEntityName::Identifier(name) => name,
      TypeEntityName::Qualified(qualified) => qualified.left.root(),
    }
  }

  /// Replace the leftmost identifier.
  pub fn set_root(&mut self, name: String) {
    match self {
      TypeEntityName::Identifier(root) => *root = name,
      TypeEntityName::Qualified(qualified) => qualified.left.set_root(name),
    }
  }
}

/// Qualified name: A.B.C
#[derive(Debug, Serialize)]
pub struct TypeQualifiedName {
  pub left: TypeEntityName,
  pub right: String,
}

/// Literal type: "foo", 42, -1, true
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypeLiteral {
  String(String),
  Number(String),
  Boolean(bool),
}

/// Array type: T[] or readonly T[]
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeArray {
  #[drive(skip)]
  pub readonly: bool,
  pub element_type: Box<Node<TypeExpr>>,
}

/// Tuple type: [T, U], [string, ...number[]] or readonly [T, U]
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTuple {
  #[drive(skip)]
  pub readonly: bool,
  pub elements: Vec<Node<TypeTupleElement>>,
}

/// Tuple element with optional label and modifiers
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTupleElement {
  #[drive(skip)]
  pub label: Option<String>,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub rest: bool,
  pub type_expr: Node<TypeExpr>,
}

/// Union type: T | U | V
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeUnion {
  pub types: Vec<Node<TypeExpr>>,
}

/// Intersection type: T & U & V
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeIntersection {
  pub types: Vec<Node<TypeExpr>>,
}

/// Function type: (x: T, y: U) => R
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeFunction {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Box<Node<TypeExpr>>,
}

/// Constructor type: new (x: T) => R
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeConstructor {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Box<Node<TypeExpr>>,
}

/// Function type parameter. Parameters without an annotation (`(x) => void`)
/// have no type; anonymous destructured parameters are not supported.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeFunctionParameter {
  #[drive(skip)]
  pub name: Option<String>,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub rest: bool,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Variance annotation for type parameters
#[derive(Debug, Copy, Clone, Serialize)]
pub enum Variance {
  In,
  Out,
  InOut,
}

/// Type parameter: T, T extends U, T = DefaultType, in T, out T
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeParameter {
  #[drive(skip)]
  pub variance: Option<Variance>,
  #[drive(skip)]
  pub name: String,
  pub constraint: Option<Box<Node<TypeExpr>>>,
  pub default: Option<Box<Node<TypeExpr>>>,
}

/// Object type literal: { x: T; y: U; }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeObjectLiteral {
  pub members: Vec<Node<TypeMember>>,
}

/// Type member in object type, interface, or ambient class
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum TypeMember {
  Property(TypePropertySignature),
  Method(TypeMethodSignature),
  Construct(TypeConstructSignature),
  Call(TypeCallSignature),
  Index(TypeIndexSignature),
  Mapped(TypeMapped),
}

/// Property signature: x: T, readonly x?: T
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypePropertySignature {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub readonly: bool,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub key: TypePropertyKey,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Method signature: foo(x: T): U
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeMethodSignature {
  #[drive(skip)]
  pub doc: Option<String>,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub key: TypePropertyKey,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Constructor signature: new (x: T): U
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeConstructSignature {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Call signature: (x: T): U
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeCallSignature {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Index signature: [key: string]: T
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeIndexSignature {
  #[drive(skip)]
  pub readonly: bool,
  #[drive(skip)]
  pub parameter_name: String,
  pub parameter_type: Node<TypeExpr>,
  pub type_annotation: Node<TypeExpr>,
}

/// Property key in type members
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypePropertyKey {
  Identifier(String),
  String(String),
  Number(String),
}

/// Parenthesized type: (T)
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeParenthesized {
  pub type_expr: Box<Node<TypeExpr>>,
}

/// Type query: typeof x, typeof foo.bar
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeQuery {
  #[drive(skip)]
  pub expr_name: TypeEntityName,
}

/// KeyOf type: keyof T
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeKeyOf {
  pub type_expr: Box<Node<TypeExpr>>,
}

/// Indexed access type: T[K], T["prop"]
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeIndexedAccess {
  pub object_type: Box<Node<TypeExpr>>,
  pub index_type: Box<Node<TypeExpr>>,
}

/// Conditional type: T extends U ? X : Y
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeConditional {
  pub check_type: Box<Node<TypeExpr>>,
  pub extends_type: Box<Node<TypeExpr>>,
  pub true_type: Box<Node<TypeExpr>>,
  pub false_type: Box<Node<TypeExpr>>,
}

/// Infer type: infer R
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeInfer {
  #[drive(skip)]
  pub type_parameter: String,
}

/// Mapped type: { [K in keyof T]: T[K] }, { readonly [K in T]?: U }, { [K in T as NewK]: U }
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeMapped {
  #[drive(skip)]
  pub readonly_modifier: Option<MappedTypeModifier>,
  #[drive(skip)]
  pub type_parameter: String,
  pub constraint: Box<Node<TypeExpr>>,
  pub name_type: Option<Box<Node<TypeExpr>>>,
  #[drive(skip)]
  pub optional_modifier: Option<MappedTypeModifier>,
  pub type_expr: Box<Node<TypeExpr>>,
}

/// Mapped type modifier: +, -, or bare
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum MappedTypeModifier {
  Plus,
  Minus,
  None,
}

/// Template literal type: `foo${T}bar`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTemplateLiteral {
  #[drive(skip)]
  pub head: String,
  pub spans: Vec<Node<TypeTemplateLiteralSpan>>,
}

/// Template literal span
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTemplateLiteralSpan {
  pub type_expr: Node<TypeExpr>,
  #[drive(skip)]
  pub literal: String,
}

/// Type predicate: x is T, asserts x, asserts x is T
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypePredicate {
  #[drive(skip)]
  pub asserts: bool,
  #[drive(skip)]
  pub parameter_name: String,
  pub type_annotation: Option<Box<Node<TypeExpr>>>,
}

/// Import type: import("module").Type
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeImport {
  #[drive(skip)]
  pub module_specifier: String,
  #[drive(skip)]
  pub qualifier: Option<TypeEntityName>,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}
