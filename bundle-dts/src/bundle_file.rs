use crate::engine::BundleHandle;
use crate::engine::Engine;
use crate::engine::OutputOptions;
use crate::engine::Warning;
use crate::err::BundleFileError;
use crate::fs::HostFs;
use std::path::Path;

/// Bundles one declaration entry file and writes the result back over it.
///
/// Any warning the engine reports is fatal: the output is not generated and
/// the file on disk is left untouched. A bundle that generates no chunks is
/// also fatal. Returns the written text on success.
pub fn bundle_declaration_file<E: Engine>(
  engine: &E,
  fs: &dyn HostFs,
  entry: &Path,
) -> Result<String, BundleFileError> {
  let file = entry
    .file_name()
    .map(|f| f.to_string_lossy().into_owned())
    .unwrap_or_else(|| entry.display().to_string());
  let mut warnings: Vec<Warning> = Vec::new();
  let handle = engine.bundle(entry, &[], &mut |warning| warnings.push(warning))?;
  if let Some(warning) = warnings.into_iter().next() {
    return Err(BundleFileError::Warning { file, warning });
  }
  let output = handle.generate(&OutputOptions::default())?;
  let Some(chunk) = output.output.into_iter().next() else {
    return Err(BundleFileError::EmptyOutput { file });
  };
  fs.write(entry, &chunk.code)
    .map_err(|error| BundleFileError::Io { file, error })?;
  Ok(chunk.code)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::engine::BundleOutput;
  use crate::engine::OutputChunk;
  use crate::engine::WarningCode;
  use crate::err::BundleResult;
  use crate::fs::MemoryFs;
  use crate::plugin::Plugin;

  /// An engine returning canned results, for exercising the orchestration
  /// layer without a module graph.
  struct StubEngine {
    warning: Option<Warning>,
    chunks: Vec<OutputChunk>,
  }

  struct StubHandle {
    chunks: Vec<OutputChunk>,
  }

  impl BundleHandle for StubHandle {
    fn generate(&self, _options: &OutputOptions) -> BundleResult<BundleOutput> {
      Ok(BundleOutput {
        output: self.chunks.clone(),
      })
    }
  }

  impl Engine for StubEngine {
    type Handle = StubHandle;

    fn bundle(
      &self,
      _entry: &Path,
      _plugins: &[Box<dyn Plugin>],
      on_warn: &mut dyn FnMut(Warning),
    ) -> BundleResult<Self::Handle> {
      if let Some(warning) = &self.warning {
        on_warn(warning.clone());
      }
      Ok(StubHandle {
        chunks: self.chunks.clone(),
      })
    }
  }

  #[test]
  fn writes_bundled_text_over_the_entry_file() {
    let fs = MemoryFs::new();
    fs.insert("types/context-client.d.ts", "old");
    let engine = StubEngine {
      warning: None,
      chunks: vec![OutputChunk {
        file_name: "context-client.d.ts".to_string(),
        code: "declare const x: string;\n".to_string(),
      }],
    };
    let code =
      bundle_declaration_file(&engine, &fs, Path::new("types/context-client.d.ts")).unwrap();
    assert_eq!(code, "declare const x: string;\n");
    assert_eq!(
      fs.get(Path::new("types/context-client.d.ts")).unwrap(),
      "declare const x: string;\n"
    );
  }

  #[test]
  fn any_warning_is_fatal_and_leaves_the_file_untouched() {
    let fs = MemoryFs::new();
    fs.insert("types/context-client.d.ts", "old");
    let engine = StubEngine {
      warning: Some(Warning {
        code: WarningCode::UnresolvedImport,
        message: "could not resolve \"./missing\"".to_string(),
        module: None,
      }),
      chunks: vec![OutputChunk {
        file_name: "context-client.d.ts".to_string(),
        code: "declare const x: string;\n".to_string(),
      }],
    };
    let err =
      bundle_declaration_file(&engine, &fs, Path::new("types/context-client.d.ts")).unwrap_err();
    assert_eq!(
      err.to_string(),
      "failed to bundle declarations for context-client.d.ts: could not resolve \"./missing\""
    );
    assert_eq!(fs.get(Path::new("types/context-client.d.ts")).unwrap(), "old");
  }

  #[test]
  fn zero_chunks_is_fatal() {
    let fs = MemoryFs::new();
    fs.insert("types/context-client.d.ts", "old");
    let engine = StubEngine {
      warning: None,
      chunks: Vec::new(),
    };
    let err =
      bundle_declaration_file(&engine, &fs, Path::new("types/context-client.d.ts")).unwrap_err();
    assert_eq!(
      err.to_string(),
      "bundling context-client.d.ts produced no output"
    );
    assert_eq!(fs.get(Path::new("types/context-client.d.ts")).unwrap(), "old");
  }
}
