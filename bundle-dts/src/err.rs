use crate::engine::Warning;
use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use parse_dts::error::SyntaxError;
use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Failure inside the bundling engine: parsing a module, reading a file.
#[derive(Debug)]
pub enum BundleError {
  Syntax { path: PathBuf, error: SyntaxError },
  Io { path: PathBuf, error: io::Error },
}

impl Display for BundleError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      BundleError::Syntax { path, error } => {
        write!(f, "failed to parse {}: {}", path.display(), error)
      }
      BundleError::Io { path, error } => {
        write!(f, "failed to read {}: {}", path.display(), error)
      }
    }
  }
}

impl Error for BundleError {}

pub type BundleResult<T> = Result<T, BundleError>;

/// Outcome of the whole bundle-one-declaration-file operation. Warnings are
/// escalated before generation; an empty bundle is fatal.
#[derive(Debug)]
pub enum BundleFileError {
  Warning { file: String, warning: Warning },
  EmptyOutput { file: String },
  Engine(BundleError),
  Io { file: String, error: io::Error },
}

impl Display for BundleFileError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      BundleFileError::Warning { file, warning } => {
        write!(f, "failed to bundle declarations for {}: {}", file, warning)
      }
      BundleFileError::EmptyOutput { file } => {
        write!(f, "bundling {} produced no output", file)
      }
      BundleFileError::Engine(error) => write!(f, "{}", error),
      BundleFileError::Io { file, error } => {
        write!(f, "failed to write {}: {}", file, error)
      }
    }
  }
}

impl Error for BundleFileError {}

impl From<BundleError> for BundleFileError {
  fn from(error: BundleError) -> Self {
    BundleFileError::Engine(error)
  }
}
