use ahash::HashMap;
use ahash::HashMapExt;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

/// The engine's view of the file system. `OsFs` is the real thing; `MemoryFs`
/// backs tests with an in-memory tree.
pub trait HostFs {
  fn is_file(&self, path: &Path) -> bool;
  fn read_to_string(&self, path: &Path) -> io::Result<String>;
  fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Resolves `.` and `..` components lexically, without touching the file
/// system. Declaration trees don't use symlinks, so this is sufficient for
/// identifying a module across different relative import paths.
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push(Component::ParentDir);
        }
      }
      other => out.push(other),
    };
  }
  out
}

impl<F: HostFs + ?Sized> HostFs for &F {
  fn is_file(&self, path: &Path) -> bool {
    (**self).is_file(path)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    (**self).read_to_string(path)
  }

  fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
    (**self).write(path, contents)
  }
}

pub struct OsFs;

impl HostFs for OsFs {
  fn is_file(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
    std::fs::write(path, contents)
  }
}

#[derive(Default)]
pub struct MemoryFs {
  files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFs {
  pub fn new() -> MemoryFs {
    MemoryFs {
      files: Mutex::new(HashMap::new()),
    }
  }

  pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
    self
      .files
      .lock()
      .unwrap()
      .insert(normalize_path(&path.into()), contents.into());
  }

  pub fn get(&self, path: &Path) -> Option<String> {
    self.files.lock().unwrap().get(&normalize_path(path)).cloned()
  }
}

impl HostFs for MemoryFs {
  fn is_file(&self, path: &Path) -> bool {
    self.files.lock().unwrap().contains_key(&normalize_path(path))
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    self.get(path).ok_or_else(|| {
      io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file: {}", path.display()),
      )
    })
  }

  fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
    self.insert(path.to_path_buf(), contents);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_resolves_dot_segments() {
    assert_eq!(
      normalize_path(Path::new("types/./support/../chat.d.ts")),
      PathBuf::from("types/chat.d.ts")
    );
  }

  #[test]
  fn memory_fs_round_trips_through_normalized_paths() {
    let fs = MemoryFs::new();
    fs.insert("types/support/common.d.ts", "interface A {}");
    assert!(fs.is_file(Path::new("types/./support/common.d.ts")));
    assert_eq!(
      fs.read_to_string(Path::new("types/support/../support/common.d.ts")).unwrap(),
      "interface A {}"
    );
  }
}
