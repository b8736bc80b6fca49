use crate::fs::normalize_path;
use crate::fs::HostFs;
use crate::plugin::Plugin;
use crate::plugin::Resolution;
use std::path::Path;
use std::path::PathBuf;

/// The built-in resolution policy for declaration trees: relative specifiers
/// resolve against the importer's directory with `.d.ts` extension probing;
/// bare package specifiers are external (when configured to respect them).
pub struct DtsResolvePlugin<'a> {
  fs: &'a dyn HostFs,
  respect_external: bool,
}

impl<'a> DtsResolvePlugin<'a> {
  pub fn new(fs: &'a dyn HostFs, respect_external: bool) -> DtsResolvePlugin<'a> {
    DtsResolvePlugin {
      fs,
      respect_external,
    }
  }

  fn candidates(base: &Path) -> Vec<PathBuf> {
    let raw = base.to_string_lossy();
    if raw.ends_with(".d.ts") || raw.ends_with(".ts") {
      return vec![base.to_path_buf()];
    }
    vec![
      PathBuf::from(format!("{}.d.ts", raw)),
      base.join("index.d.ts"),
    ]
  }
}

impl<'a> Plugin for DtsResolvePlugin<'a> {
  fn name(&self) -> &str {
    "dts-resolve"
  }

  fn resolve_id(&self, specifier: &str, importer: &Path) -> Option<Resolution> {
    if specifier.starts_with("./") || specifier.starts_with("../") {
      let dir = importer.parent().unwrap_or_else(|| Path::new(""));
      let base = normalize_path(&dir.join(specifier));
      return Self::candidates(&base)
        .into_iter()
        .find(|candidate| self.fs.is_file(candidate))
        .map(Resolution::Path);
    }
    if self.respect_external {
      return Some(Resolution::External);
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fs::MemoryFs;

  #[test]
  fn resolves_relative_specifiers_with_extension_probing() {
    let fs = MemoryFs::new();
    fs.insert("types/support/common.d.ts", "");
    fs.insert("types/widgets/index.d.ts", "");
    let plugin = DtsResolvePlugin::new(&fs, true);
    let importer = Path::new("types/chat.d.ts");
    assert_eq!(
      plugin.resolve_id("./support/common", importer),
      Some(Resolution::Path(PathBuf::from("types/support/common.d.ts")))
    );
    assert_eq!(
      plugin.resolve_id("./support/common.d.ts", importer),
      Some(Resolution::Path(PathBuf::from("types/support/common.d.ts")))
    );
    assert_eq!(
      plugin.resolve_id("./widgets", importer),
      Some(Resolution::Path(PathBuf::from("types/widgets/index.d.ts")))
    );
  }

  #[test]
  fn bare_specifiers_are_external_when_respected() {
    let fs = MemoryFs::new();
    let respect = DtsResolvePlugin::new(&fs, true);
    let ignore = DtsResolvePlugin::new(&fs, false);
    let importer = Path::new("types/chat.d.ts");
    assert_eq!(
      respect.resolve_id("wix-data", importer),
      Some(Resolution::External)
    );
    assert_eq!(ignore.resolve_id("wix-data", importer), None);
  }

  #[test]
  fn missing_relative_target_does_not_resolve() {
    let fs = MemoryFs::new();
    let plugin = DtsResolvePlugin::new(&fs, true);
    assert_eq!(
      plugin.resolve_id("./nope", Path::new("types/chat.d.ts")),
      None
    );
  }
}
