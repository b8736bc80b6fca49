use crate::engine::Warning;
use crate::engine::WarningCode;
use crate::err::BundleError;
use crate::err::BundleResult;
use crate::fs::normalize_path;
use crate::fs::HostFs;
use crate::plugin::Plugin;
use crate::plugin::Resolution;
use crate::resolve::DtsResolvePlugin;
use ahash::HashMap;
use ahash::HashMapExt;
use parse_dts::ast::decl::DeclarationFile;
use parse_dts::ast::decl::ModuleItem;
use parse_dts::ast::node::Node;
use parse_dts::ParseOptions;
use std::path::Path;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleId(pub u32);

/// Resolution outcome of a specifier appearing in a module.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
  Internal(ModuleId),
  External,
  /// Back-edge of an import cycle; not followed.
  Circular,
  Unresolved,
}

pub struct Module {
  pub id: ModuleId,
  pub path: PathBuf,
  pub ast: Node<DeclarationFile>,
  pub edges: HashMap<String, Edge>,
}

pub struct ModuleGraph {
  /// Post-order: every module's internal dependencies precede it, and the
  /// entry module is last.
  pub modules: Vec<Module>,
  pub entry: ModuleId,
}

impl ModuleGraph {
  pub fn build(
    fs: &dyn HostFs,
    plugins: &[Box<dyn Plugin>],
    builtin: &DtsResolvePlugin<'_>,
    entry: &Path,
    on_warn: &mut dyn FnMut(Warning),
  ) -> BundleResult<ModuleGraph> {
    let mut builder = GraphBuilder {
      fs,
      plugins,
      builtin,
      modules: Vec::new(),
      states: HashMap::new(),
      on_warn,
    };
    let entry_id = builder.load(&normalize_path(entry))?;
    Ok(ModuleGraph {
      modules: builder.modules,
      entry: entry_id,
    })
  }
}

#[derive(Copy, Clone)]
enum LoadState {
  Loading,
  Loaded(ModuleId),
}

struct GraphBuilder<'a> {
  fs: &'a dyn HostFs,
  plugins: &'a [Box<dyn Plugin>],
  builtin: &'a DtsResolvePlugin<'a>,
  modules: Vec<Module>,
  states: HashMap<PathBuf, LoadState>,
  on_warn: &'a mut dyn FnMut(Warning),
}

impl<'a> GraphBuilder<'a> {
  fn load(&mut self, path: &Path) -> BundleResult<ModuleId> {
    self.states.insert(path.to_path_buf(), LoadState::Loading);
    let source = match self.plugins.iter().find_map(|p| p.load(path)) {
      Some(source) => source,
      None => self
        .fs
        .read_to_string(path)
        .map_err(|error| BundleError::Io {
          path: path.to_path_buf(),
          error,
        })?,
    };
    let ast =
      parse_dts::parse(&source, ParseOptions::default()).map_err(|error| BundleError::Syntax {
        path: path.to_path_buf(),
        error,
      })?;
    if ast.stx.items.is_empty() {
      (self.on_warn)(Warning {
        code: WarningCode::EmptyModule,
        message: format!("module {} has no declarations", path.display()),
        module: Some(path.to_path_buf()),
      });
    }

    let mut edges = HashMap::new();
    for specifier in item_specifiers(&ast.stx.items) {
      if edges.contains_key(&specifier) {
        continue;
      }
      let resolution = self
        .plugins
        .iter()
        .find_map(|p| p.resolve_id(&specifier, path))
        .or_else(|| self.builtin.resolve_id(&specifier, path));
      let edge = match resolution {
        Some(Resolution::External) => Edge::External,
        Some(Resolution::Path(target)) => {
          let target = normalize_path(&target);
          match self.states.get(&target).copied() {
            Some(LoadState::Loading) => {
              (self.on_warn)(Warning {
                code: WarningCode::CircularImport,
                message: format!(
                  "circular import of \"{}\" from {}",
                  specifier,
                  path.display()
                ),
                module: Some(path.to_path_buf()),
              });
              Edge::Circular
            }
            Some(LoadState::Loaded(id)) => Edge::Internal(id),
            None => Edge::Internal(self.load(&target)?),
          }
        }
        None => {
          (self.on_warn)(Warning {
            code: WarningCode::UnresolvedImport,
            message: format!(
              "could not resolve \"{}\" from {}",
              specifier,
              path.display()
            ),
            module: Some(path.to_path_buf()),
          });
          Edge::Unresolved
        }
      };
      edges.insert(specifier, edge);
    }

    let id = ModuleId(self.modules.len() as u32);
    self.modules.push(Module {
      id,
      path: path.to_path_buf(),
      ast,
      edges,
    });
    self.states.insert(path.to_path_buf(), LoadState::Loaded(id));
    Ok(id)
  }
}

/// Every specifier an item of this module depends on, in item order.
pub fn item_specifiers(items: &[Node<ModuleItem>]) -> Vec<String> {
  let mut specifiers = Vec::new();
  for item in items {
    match &*item.stx {
      ModuleItem::Import(imp) => specifiers.push(imp.stx.specifier.clone()),
      ModuleItem::ExportNamed(e) => {
        if let Some(specifier) = &e.stx.specifier {
          specifiers.push(specifier.clone());
        }
      }
      ModuleItem::ExportStar(e) => specifiers.push(e.stx.specifier.clone()),
      _ => {}
    };
  }
  specifiers
}
