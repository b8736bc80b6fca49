use std::path::Path;
use std::path::PathBuf;

/// How a specifier resolved: to a file that will be inlined, or to an
/// external dependency that stays a reference in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  External,
  Path(PathBuf),
}

/// Hook points for customizing resolution and loading. Each hook returning
/// `None` passes control to the next plugin, then to the built-in resolver.
pub trait Plugin {
  fn name(&self) -> &str;

  fn resolve_id(&self, specifier: &str, importer: &Path) -> Option<Resolution> {
    let _ = (specifier, importer);
    None
  }

  fn load(&self, path: &Path) -> Option<String> {
    let _ = path;
    None
  }
}
