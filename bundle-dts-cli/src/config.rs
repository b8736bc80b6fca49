use std::path::PathBuf;

/// Base directory of the declaration package, relative to the working
/// directory.
pub const TYPES_DIR: &str = "types";

/// The bundler's fixed entry file.
pub const CONTEXT_CLIENT_FILENAME: &str = "context-client.d.ts";

pub fn context_client_path() -> PathBuf {
  PathBuf::from(TYPES_DIR).join(CONTEXT_CLIENT_FILENAME)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  #[test]
  fn entry_path_joins_the_two_constants() {
    assert_eq!(
      context_client_path(),
      Path::new("types").join("context-client.d.ts")
    );
  }
}
