use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use serde::Deserialize;
use std::error::Error;

const API_MODEL_JSON: &str = include_str!("../model/api-model.json");
const SDK_MODEL_JSON: &str = include_str!("../model/sdk-model.json");

/// Module names always reported as current, regardless of the deprecation
/// flag recorded in the API model. An explicit override table; no further
/// business rule is implied by it.
pub const NON_DEPRECATED_OVERRIDES: &[&str] = &["wix-animations-frontend"];

const VENDOR_PREFIX: &str = "wix-";

/// The full API catalog: one entry per platform package, in document order.
#[derive(Debug, Deserialize)]
pub struct ApiModel {
  pub packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
pub struct Package {
  pub name: String,
  pub deprecated: bool,
  #[serde(default)]
  pub description: Option<String>,
}

/// The SDK-oriented projection of the catalog.
#[derive(Debug, Deserialize)]
pub struct SdkModel {
  pub version: String,
  pub modules: Vec<SdkModule>,
}

#[derive(Debug, Deserialize)]
pub struct SdkModule {
  pub name: String,
  pub package: String,
  #[serde(default)]
  pub exports: Vec<String>,
}

#[derive(Debug)]
pub enum ModelError {
  Parse {
    document: &'static str,
    error: serde_json::Error,
  },
}

impl Display for ModelError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ModelError::Parse { document, error } => {
        write!(f, "failed to parse {}: {}", document, error)
      }
    }
  }
}

impl Error for ModelError {}

/// Both catalog documents, parsed once and immutable afterwards. Callers pass
/// the store explicitly; there are no module-level singletons.
pub struct ModelStore {
  api: ApiModel,
  sdk: SdkModel,
}

impl ModelStore {
  pub fn load() -> Result<ModelStore, ModelError> {
    let api = serde_json::from_str(API_MODEL_JSON).map_err(|error| ModelError::Parse {
      document: "api-model.json",
      error,
    })?;
    let sdk = serde_json::from_str(SDK_MODEL_JSON).map_err(|error| ModelError::Parse {
      document: "sdk-model.json",
      error,
    })?;
    Ok(ModelStore { api, sdk })
  }
}

pub fn api_model(store: &ModelStore) -> &ApiModel {
  &store.api
}

pub fn sdk_model(store: &ModelStore) -> &SdkModel {
  &store.sdk
}

/// The override names first, then the stripped name of every non-deprecated
/// package in document order. Recomputed per call; not deduplicated.
pub fn non_deprecated_modules(store: &ModelStore) -> Vec<String> {
  let mut modules: Vec<String> = NON_DEPRECATED_OVERRIDES
    .iter()
    .map(|name| name.to_string())
    .collect();
  modules.extend(
    store
      .api
      .packages
      .iter()
      .filter(|package| !package.deprecated)
      .map(|package| strip_namespace(&package.name).to_string()),
  );
  modules
}

/// Removes the vendor namespace prefix if present. Total over any input, and
/// strips a single prefix only: `wix-wix-foo` becomes `wix-foo`.
pub fn strip_namespace(name: &str) -> &str {
  name.strip_prefix(VENDOR_PREFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store_with(packages: Vec<Package>) -> ModelStore {
    ModelStore {
      api: ApiModel { packages },
      sdk: SdkModel {
        version: "2.0".to_string(),
        modules: Vec::new(),
      },
    }
  }

  fn package(name: &str, deprecated: bool) -> Package {
    Package {
      name: name.to_string(),
      deprecated,
      description: None,
    }
  }

  #[test]
  fn overrides_come_first_and_deprecated_packages_are_dropped() {
    let store = store_with(vec![package("wix-foo", true), package("wix-bar", false)]);
    assert_eq!(
      non_deprecated_modules(&store),
      vec!["wix-animations-frontend".to_string(), "bar".to_string()]
    );
  }

  #[test]
  fn list_preserves_document_order_and_keeps_duplicates() {
    let store = store_with(vec![
      package("wix-chat-backend", false),
      package("wix-animations-frontend", false),
      package("wix-chat-backend", false),
    ]);
    assert_eq!(
      non_deprecated_modules(&store),
      vec![
        "wix-animations-frontend".to_string(),
        "chat-backend".to_string(),
        "animations-frontend".to_string(),
        "chat-backend".to_string(),
      ]
    );
  }

  #[test]
  fn repeated_calls_return_identical_lists() {
    let store = ModelStore::load().unwrap();
    assert_eq!(non_deprecated_modules(&store), non_deprecated_modules(&store));
  }

  #[test]
  fn embedded_documents_load_and_expose_both_catalogs() {
    let store = ModelStore::load().unwrap();
    assert!(!api_model(&store).packages.is_empty());
    assert_eq!(sdk_model(&store).version, "2.0");
    let modules = non_deprecated_modules(&store);
    assert_eq!(modules[0], "wix-animations-frontend");
    // The recorded entry for the override package is deprecated, so it only
    // appears through the override table.
    assert!(modules.iter().any(|m| m == "chat-backend"));
    assert!(!modules.iter().any(|m| m == "animations-frontend"));
    assert!(!modules.iter().any(|m| m == "crm-backend"));
  }

  #[test]
  fn strip_namespace_is_total_and_strips_one_prefix() {
    assert_eq!(strip_namespace("wix-chat-backend"), "chat-backend");
    assert_eq!(strip_namespace("bar"), "bar");
    assert_eq!(strip_namespace(""), "");
    assert_eq!(strip_namespace("wix-wix-foo"), "wix-foo");
  }
}
