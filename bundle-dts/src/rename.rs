use ahash::HashMap;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_dts::ast::type_expr::TypeQuery;
use parse_dts::ast::type_expr::TypeReference;

/// Rewrites the root identifier of every type reference and `typeof` query
/// according to the map. Used both for collision renames and for redirecting
/// imported names at their inlined declarations.
#[derive(VisitorMut)]
#[visitor(TypeReference(enter), TypeQuery(enter))]
pub struct RenameVisitor<'a> {
  map: &'a HashMap<String, String>,
}

impl<'a> RenameVisitor<'a> {
  fn enter_type_reference(&mut self, node: &mut TypeReference) {
    if let Some(new_name) = self.map.get(node.name.root()) {
      node.name.set_root(new_name.clone());
    }
  }

  fn enter_type_query(&mut self, node: &mut TypeQuery) {
    if let Some(new_name) = self.map.get(node.expr_name.root()) {
      node.expr_name.set_root(new_name.clone());
    }
  }
}

pub fn rename_references<T: DriveMut>(node: &mut T, map: &HashMap<String, String>) {
  if map.is_empty() {
    return;
  }
  node.drive_mut(&mut RenameVisitor { map });
}

#[cfg(test)]
mod tests {
  use super::*;
  use ahash::HashMapExt;
  use parse_dts::ast::decl::ModuleItem;
  use parse_dts::ast::type_expr::TypeExpr;
  use parse_dts::parse;
  use parse_dts::ParseOptions;

  #[test]
  fn renames_reference_roots_including_qualified_names() {
    let mut file = parse(
      "type A = Target.Inner | Other<Target>; declare const t: typeof Target;",
      ParseOptions::default(),
    )
    .unwrap();
    let mut map = HashMap::new();
    map.insert("Target".to_string(), "Target$1".to_string());
    rename_references(&mut file, &map);
    let ModuleItem::TypeAlias(alias) = &*file.stx.items[0].stx else {
      panic!("expected type alias");
    };
    let TypeExpr::UnionType(u) = &*alias.stx.type_expr.stx else {
      panic!("expected union");
    };
    let TypeExpr::TypeReference(qualified) = &*u.types[0].stx else {
      panic!("expected reference");
    };
    assert_eq!(qualified.name.root(), "Target$1");
    let TypeExpr::TypeReference(other) = &*u.types[1].stx else {
      panic!("expected reference");
    };
    // Only the root of a reference is renamed; `Other` itself is untouched.
    assert_eq!(other.name.root(), "Other");
    let TypeExpr::TypeReference(arg) = &*other.type_arguments.as_ref().unwrap()[0].stx else {
      panic!("expected reference argument");
    };
    assert_eq!(arg.name.root(), "Target$1");
    let ModuleItem::Var(var) = &*file.stx.items[1].stx else {
      panic!("expected var");
    };
    let TypeExpr::TypeQuery(q) = &*var.stx.type_annotation.as_ref().unwrap().stx else {
      panic!("expected type query");
    };
    assert_eq!(q.expr_name.root(), "Target$1");
  }
}
