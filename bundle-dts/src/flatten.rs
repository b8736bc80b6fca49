use crate::engine::Warning;
use crate::engine::WarningCode;
use crate::graph::Edge;
use crate::graph::ModuleGraph;
use crate::graph::ModuleId;
use crate::rename::rename_references;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use itertools::Itertools;
use parse_dts::ast::decl::ModuleItem;
use parse_dts::ast::node::Node;

/// The single-module view of a bundled graph: hoisted external references
/// followed by every inlined declaration, dependencies first.
pub struct FlattenedBundle {
  /// Import/re-export items whose specifier resolved as external, in first
  /// occurrence order, deduplicated by specifier.
  pub externals: Vec<Node<ModuleItem>>,
  pub items: Vec<Node<ModuleItem>>,
}

/// Flattens the graph into one declaration list. Modules are consumed in
/// post-order, so a module's internal dependencies are always inlined (and
/// their export names finalized) before the module itself is processed.
pub fn flatten(graph: ModuleGraph, on_warn: &mut dyn FnMut(Warning)) -> FlattenedBundle {
  let star_exported = star_exported_modules(&graph);
  let entry = graph.entry;

  // Top-level names already taken in the flattened output.
  let mut used: HashSet<String> = HashSet::new();
  // Per processed module: exported name -> final (possibly renamed) name.
  let mut module_exports: HashMap<ModuleId, HashMap<String, String>> = HashMap::new();
  let mut externals: Vec<Node<ModuleItem>> = Vec::new();
  let mut out_items: Vec<Node<ModuleItem>> = Vec::new();

  for module in graph.modules {
    let is_entry = module.id == entry;
    let keep_export = is_entry || star_exported.contains(&module.id);
    let path = module.path;
    let edges = module.edges;
    let items = (*module.ast.stx).items;

    // Reference rewrites for this module: import bindings pointing at the
    // final names of inlined declarations, plus collision renames.
    let mut map: HashMap<String, String> = HashMap::new();
    for item in &items {
      let ModuleItem::Import(imp) = &*item.stx else {
        continue;
      };
      let d = &imp.stx;
      let Some(Edge::Internal(dep)) = edges.get(&d.specifier).copied() else {
        // External imports are hoisted below; unresolved and circular edges
        // were already reported during graph construction.
        continue;
      };
      let dep_exports = module_exports.get(&dep).cloned().unwrap_or_default();
      if d.default.is_some() || d.namespace.is_some() {
        on_warn(Warning {
          code: WarningCode::MissingExport,
          message: format!(
            "\"{}\" has no default or namespace export to import from {}",
            d.specifier,
            path.display()
          ),
          module: Some(path.clone()),
        });
      }
      for name in &d.names {
        match dep_exports.get(&name.imported) {
          Some(final_name) => {
            map.insert(name.local_name().to_string(), final_name.clone());
          }
          None => on_warn(Warning {
            code: WarningCode::MissingExport,
            message: format!("\"{}\" does not export {}", d.specifier, name.imported),
            module: Some(path.clone()),
          }),
        };
      }
    }

    // Final names for this module's own top-level declarations. Repeated
    // declarations of one name (declaration merging) share one final name.
    let mut assigned: HashMap<String, String> = HashMap::new();
    for item in &items {
      let Some(name) = declared_name(&item.stx) else {
        continue;
      };
      if assigned.contains_key(name) {
        continue;
      }
      let final_name = unique_name(name, &used);
      used.insert(final_name.clone());
      if final_name != name {
        map.insert(name.to_string(), final_name.clone());
      }
      assigned.insert(name.to_string(), final_name);
    }

    // Export table: what an importer of this module gets, by exported name.
    let mut exports: HashMap<String, String> = HashMap::new();
    for item in &items {
      match &*item.stx {
        ModuleItem::ExportNamed(e) => {
          let d = &e.stx;
          match &d.specifier {
            None => {
              for n in &d.names {
                let exported = n.exported.clone().unwrap_or_else(|| n.local.clone());
                let final_name = map.get(&n.local).cloned().unwrap_or_else(|| n.local.clone());
                exports.insert(exported, final_name);
              }
            }
            Some(spec) => {
              if let Some(Edge::Internal(dep)) = edges.get(spec).copied() {
                let dep_exports = module_exports.get(&dep).cloned().unwrap_or_default();
                for n in &d.names {
                  match dep_exports.get(&n.local) {
                    Some(final_name) => {
                      exports.insert(
                        n.exported.clone().unwrap_or_else(|| n.local.clone()),
                        final_name.clone(),
                      );
                    }
                    None => on_warn(Warning {
                      code: WarningCode::MissingExport,
                      message: format!("\"{}\" does not export {}", spec, n.local),
                      module: Some(path.clone()),
                    }),
                  };
                }
              }
            }
          };
        }
        ModuleItem::ExportStar(e) => {
          if let Some(Edge::Internal(dep)) = edges.get(&e.stx.specifier).copied() {
            if let Some(dep_exports) = module_exports.get(&dep) {
              for (exported, final_name) in dep_exports.clone() {
                exports.entry(exported).or_insert(final_name);
              }
            }
          }
        }
        decl => {
          if decl_is_exported(decl) {
            if let Some(name) = declared_name(decl) {
              if let Some(final_name) = assigned.get(name) {
                exports.insert(name.to_string(), final_name.clone());
              }
            }
          }
        }
      };
    }

    // Transform the items into their flattened form.
    enum Action {
      Keep,
      Hoist,
      Drop,
    }
    for mut item in items {
      let action = match &mut *item.stx {
        ModuleItem::Import(imp) => {
          match edges.get(&imp.stx.specifier).copied() {
            Some(Edge::External) => Action::Hoist,
            _ => Action::Drop,
          }
        }
        ModuleItem::ExportStar(e) => match edges.get(&e.stx.specifier).copied() {
          Some(Edge::External) => Action::Hoist,
          _ => Action::Drop,
        },
        ModuleItem::ExportNamed(e) => {
          if matches!(edges.get(e.stx.specifier.as_deref().unwrap_or("")).copied(), Some(Edge::External)) {
            Action::Hoist
          } else if is_entry {
            // The re-exported declarations are now inlined in this file, so
            // the entry's named exports become bare exports of final names.
            for n in &mut e.stx.names {
              let exported = n.exported.clone().unwrap_or_else(|| n.local.clone());
              let final_name = exports
                .get(&exported)
                .cloned()
                .unwrap_or_else(|| n.local.clone());
              n.local = final_name;
              n.exported = if n.local == exported {
                None
              } else {
                Some(exported)
              };
            }
            e.stx.specifier = None;
            Action::Keep
          } else {
            Action::Drop
          }
        }
        decl => {
          if let Some(name) = declared_name(decl) {
            if let Some(final_name) = assigned.get(name) {
              set_declared_name(decl, final_name.clone());
            }
          }
          if !keep_export {
            set_export(decl, false);
          }
          rename_references(&mut item, &map);
          Action::Keep
        }
      };
      match action {
        Action::Keep => out_items.push(item),
        Action::Hoist => externals.push(item),
        Action::Drop => {}
      };
    }

    module_exports.insert(module.id, exports);
  }

  let externals = externals
    .into_iter()
    .unique_by(|item| external_specifier(&item.stx).to_string())
    .collect();
  FlattenedBundle {
    externals,
    items: out_items,
  }
}

/// Modules whose declarations stay exported in the output: the transitive
/// targets of `export *` chains starting at the entry.
fn star_exported_modules(graph: &ModuleGraph) -> HashSet<ModuleId> {
  let mut set = HashSet::new();
  let mut stack = vec![graph.entry];
  while let Some(id) = stack.pop() {
    let module = &graph.modules[id.0 as usize];
    for item in &module.ast.stx.items {
      if let ModuleItem::ExportStar(e) = &*item.stx {
        if let Some(Edge::Internal(dep)) = module.edges.get(&e.stx.specifier).copied() {
          if set.insert(dep) {
            stack.push(dep);
          }
        }
      }
    }
  }
  set
}

fn unique_name(base: &str, used: &HashSet<String>) -> String {
  if !used.contains(base) {
    return base.to_string();
  }
  let mut n = 1;
  loop {
    let candidate = format!("{}${}", base, n);
    if !used.contains(&candidate) {
      return candidate;
    }
    n += 1;
  }
}

fn declared_name(item: &ModuleItem) -> Option<&str> {
  match item {
    ModuleItem::Interface(d) => Some(&d.stx.name),
    ModuleItem::TypeAlias(d) => Some(&d.stx.name),
    ModuleItem::Enum(d) => Some(&d.stx.name),
    ModuleItem::Function(d) => Some(&d.stx.name),
    ModuleItem::Var(d) => Some(&d.stx.name),
    ModuleItem::Class(d) => Some(&d.stx.name),
    ModuleItem::Namespace(d) => Some(&d.stx.name),
    _ => None,
  }
}

fn set_declared_name(item: &mut ModuleItem, name: String) {
  match item {
    ModuleItem::Interface(d) => d.stx.name = name,
    ModuleItem::TypeAlias(d) => d.stx.name = name,
    ModuleItem::Enum(d) => d.stx.name = name,
    ModuleItem::Function(d) => d.stx.name = name,
    ModuleItem::Var(d) => d.stx.name = name,
    ModuleItem::Class(d) => d.stx.name = name,
    ModuleItem::Namespace(d) => d.stx.name = name,
    _ => {}
  };
}

fn decl_is_exported(item: &ModuleItem) -> bool {
  match item {
    ModuleItem::Interface(d) => d.stx.export,
    ModuleItem::TypeAlias(d) => d.stx.export,
    ModuleItem::Enum(d) => d.stx.export,
    ModuleItem::Function(d) => d.stx.export,
    ModuleItem::Var(d) => d.stx.export,
    ModuleItem::Class(d) => d.stx.export,
    ModuleItem::Namespace(d) => d.stx.export,
    _ => false,
  }
}

fn set_export(item: &mut ModuleItem, export: bool) {
  match item {
    ModuleItem::Interface(d) => d.stx.export = export,
    ModuleItem::TypeAlias(d) => d.stx.export = export,
    ModuleItem::Enum(d) => d.stx.export = export,
    ModuleItem::Function(d) => d.stx.export = export,
    ModuleItem::Var(d) => d.stx.export = export,
    ModuleItem::Class(d) => d.stx.export = export,
    ModuleItem::Namespace(d) => d.stx.export = export,
    _ => {}
  };
}

fn external_specifier(item: &ModuleItem) -> &str {
  match item {
    ModuleItem::Import(d) => &d.stx.specifier,
    ModuleItem::ExportStar(d) => &d.stx.specifier,
    ModuleItem::ExportNamed(d) => d.stx.specifier.as_deref().unwrap_or(""),
    _ => "",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unique_name_appends_incrementing_suffix() {
    let mut used = HashSet::new();
    assert_eq!(unique_name("Message", &used), "Message");
    used.insert("Message".to_string());
    assert_eq!(unique_name("Message", &used), "Message$1");
    used.insert("Message$1".to_string());
    assert_eq!(unique_name("Message", &used), "Message$2");
  }
}
