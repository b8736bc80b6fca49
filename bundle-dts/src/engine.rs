use crate::emit::emit_bundle;
use crate::err::BundleResult;
use crate::flatten::flatten;
use crate::flatten::FlattenedBundle;
use crate::fs::HostFs;
use crate::graph::ModuleGraph;
use crate::plugin::Plugin;
use crate::resolve::DtsResolvePlugin;
use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub struct BundleOptions {
  /// Leave bare package imports as references instead of failing to inline
  /// them.
  pub respect_external: bool,
}

impl Default for BundleOptions {
  fn default() -> Self {
    BundleOptions {
      respect_external: true,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
  UnresolvedImport,
  CircularImport,
  EmptyModule,
  MissingExport,
}

/// A non-fatal finding reported during the bundle phase. The orchestration
/// layer escalates these to errors; the engine itself keeps going.
#[derive(Debug, Clone)]
pub struct Warning {
  pub code: WarningCode,
  pub message: String,
  pub module: Option<PathBuf>,
}

impl Display for Warning {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  /// Single-module ES-style declaration text. The only supported format.
  #[default]
  Esm,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
  pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct OutputChunk {
  pub file_name: String,
  pub code: String,
}

#[derive(Debug, Clone)]
pub struct BundleOutput {
  pub output: Vec<OutputChunk>,
}

pub trait BundleHandle {
  fn generate(&self, options: &OutputOptions) -> BundleResult<BundleOutput>;
}

pub trait Engine {
  type Handle: BundleHandle;

  fn bundle(
    &self,
    entry: &Path,
    plugins: &[Box<dyn Plugin>],
    on_warn: &mut dyn FnMut(Warning),
  ) -> BundleResult<Self::Handle>;
}

/// The real declaration bundler: module graph, flatten, emit.
pub struct DtsBundler<F: HostFs> {
  fs: F,
  options: BundleOptions,
}

impl<F: HostFs> DtsBundler<F> {
  pub fn new(fs: F, options: BundleOptions) -> DtsBundler<F> {
    DtsBundler { fs, options }
  }
}

impl<F: HostFs> Engine for DtsBundler<F> {
  type Handle = DtsBundleHandle;

  fn bundle(
    &self,
    entry: &Path,
    plugins: &[Box<dyn Plugin>],
    on_warn: &mut dyn FnMut(Warning),
  ) -> BundleResult<Self::Handle> {
    let builtin = DtsResolvePlugin::new(&self.fs, self.options.respect_external);
    let graph = ModuleGraph::build(&self.fs, plugins, &builtin, entry, on_warn)?;
    let bundle = flatten(graph, on_warn);
    let entry_file_name = entry
      .file_name()
      .map(|f| f.to_string_lossy().into_owned())
      .unwrap_or_else(|| entry.display().to_string());
    Ok(DtsBundleHandle {
      entry_file_name,
      bundle,
    })
  }
}

pub struct DtsBundleHandle {
  entry_file_name: String,
  bundle: FlattenedBundle,
}

impl BundleHandle for DtsBundleHandle {
  fn generate(&self, options: &OutputOptions) -> BundleResult<BundleOutput> {
    let OutputFormat::Esm = options.format;
    let code = emit_bundle(&self.bundle);
    // A bundle that flattened down to nothing yields zero chunks rather than
    // an empty file.
    if code.trim().is_empty() {
      return Ok(BundleOutput { output: Vec::new() });
    }
    Ok(BundleOutput {
      output: vec![OutputChunk {
        file_name: self.entry_file_name.clone(),
        code,
      }],
    })
  }
}
