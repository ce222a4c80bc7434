use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::variant::VariantConfig;

use super::generator::generate;
use super::types::{PatchError, PatchItem};

/// Specification directories the downstream tool reads, in order.
pub const SPEC_PATHS: [&str; 3] = ["spec-spec", "spec-glossary", "config"];

/// Directory under an install that receives generated variant configs.
pub const CONFIG_VARIANTS_DIR: &str = "qual-tool/config-variants";

/// File stem used when the build directory is empty.
const FALLBACK_FILE_STEM: &str = "default-config";

/// The generated config-variant document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatchDocument {
  pub build_directory: String,
  pub post_process_items: Vec<PatchItem>,
  pub spec_paths: Vec<String>,
}

impl PatchDocument {
  pub fn from_config(config: &VariantConfig) -> Self {
    Self {
      build_directory: config.build_directory.clone(),
      post_process_items: generate(config),
      spec_paths: SPEC_PATHS.iter().map(|s| s.to_string()).collect(),
    }
  }

  pub fn to_yaml(&self) -> Result<String, PatchError> {
    serde_yaml::to_string(self).map_err(PatchError::Serialize)
  }

  /// File name the document is written under.
  pub fn file_name(&self) -> String {
    let stem = if self.build_directory.is_empty() {
      FALLBACK_FILE_STEM
    } else {
      self.build_directory.as_str()
    };
    format!("{}.yml", stem)
  }

  /// Path of the document inside an install directory.
  pub fn target_path(&self, install_dir: &Path) -> PathBuf {
    install_dir.join(CONFIG_VARIANTS_DIR).join(self.file_name())
  }
}

/// Write `document` into `install_dir` and return the path written.
///
/// The document is written to a temp file and renamed into place.
pub async fn write_document(document: &PatchDocument, install_dir: &Path) -> Result<PathBuf, PatchError> {
  let content = document.to_yaml()?;
  let path = document.target_path(install_dir);
  write_atomic(&path, &content).await?;
  info!(path = ?path, items = document.post_process_items.len(), "wrote patch document");
  Ok(path)
}

/// Write `content` to `path` via a sibling temp file.
pub async fn write_atomic(path: &Path, content: &str) -> Result<(), PatchError> {
  let write_err = |source| PatchError::Write {
    path: path.to_path_buf(),
    source,
  };

  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
  }
  let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
  temp_name.push(".tmp");
  let temp_path = path.with_file_name(temp_name);

  tokio::fs::write(&temp_path, content).await.map_err(write_err)?;
  if let Err(e) = tokio::fs::rename(&temp_path, path).await {
    let _ = tokio::fs::remove_file(&temp_path).await;
    return Err(write_err(e));
  }
  Ok(())
}
