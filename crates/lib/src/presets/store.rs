//! Preset storage on disk.
//!
//! # Storage Layout
//!
//! ```text
//! {data_dir}/presets/
//! ├── default.yml
//! ├── minimal.yml
//! ├── full.yml
//! └── <name>.yml
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::{PROTECTED_PRESETS, PresetError, PresetRecord, RawPreset, is_protected, validate_name};

const PRESET_EXTENSION: &str = "yml";

/// Built-in preset documents shipped with the library, keyed by name.
const BUILTIN_DOCUMENTS: [(&str, &str); 3] = [
  ("default", include_str!("../../data/presets/default.yml")),
  ("minimal", include_str!("../../data/presets/minimal.yml")),
  ("full", include_str!("../../data/presets/full.yml")),
];

/// Named presets stored as one YAML document per file.
#[derive(Debug, Clone)]
pub struct PresetStore {
  base_path: PathBuf,
}

impl PresetStore {
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  fn preset_path(&self, name: &str) -> PathBuf {
    self.base_path.join(format!("{}.{}", name, PRESET_EXTENSION))
  }

  fn storage_err(&self, op: &'static str, name: &str, path: &Path) -> impl FnOnce(io::Error) -> PresetError {
    let name = name.to_string();
    let path = path.to_path_buf();
    move |source| PresetError::Storage { op, name, path, source }
  }

  /// List preset names: built-ins first in their fixed order, then the rest
  /// sorted.
  ///
  /// If the directory cannot be read the built-in names are returned.
  pub async fn list(&self) -> Vec<String> {
    match self.read_names().await {
      Ok(mut names) => {
        names.sort_by(|a, b| compare_names(a, b));
        names
      }
      Err(e) => {
        warn!(path = ?self.base_path, error = %e, "failed to list presets, falling back to built-ins");
        PROTECTED_PRESETS.iter().map(|s| s.to_string()).collect()
      }
    }
  }

  async fn read_names(&self) -> io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(&self.base_path).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if !path.extension().is_some_and(|ext| ext == PRESET_EXTENSION) {
        continue;
      }
      if let Some(stem) = path.file_stem() {
        names.push(stem.to_string_lossy().into_owned());
      }
    }
    Ok(names)
  }

  /// Load the step list of a preset.
  pub async fn load(&self, name: &str) -> Result<Vec<String>, PresetError> {
    Ok(self.load_record(name).await?.steps)
  }

  /// Load a whole preset record.
  ///
  /// A built-in name without a file on disk resolves to the shipped document.
  pub async fn load_record(&self, name: &str) -> Result<PresetRecord, PresetError> {
    validate_name(name)?;
    let path = self.preset_path(name);

    let content = match tokio::fs::read_to_string(&path).await {
      Ok(content) => Cow::Owned(content),
      Err(e) if e.kind() == io::ErrorKind::NotFound => match builtin_document(name) {
        Some(document) => Cow::Borrowed(document),
        None => return Err(PresetError::NotFound(name.to_string())),
      },
      Err(e) => return Err(self.storage_err("read", name, &path)(e)),
    };

    let raw: RawPreset = serde_yaml::from_str(&content).map_err(|source| PresetError::Parse {
      name: name.to_string(),
      source,
    })?;
    let steps = raw.steps.ok_or_else(|| PresetError::MissingSteps(name.to_string()))?;

    debug!(preset = name, steps = steps.len(), "loaded preset");
    Ok(PresetRecord {
      name: raw.name.unwrap_or_else(|| name.to_string()),
      description: raw.description.unwrap_or_default(),
      steps,
    })
  }

  /// Write a preset, replacing any existing one with the same name.
  ///
  /// The record is stored under `name`.
  pub async fn save(&self, name: &str, record: &PresetRecord) -> Result<(), PresetError> {
    validate_name(name)?;

    let record = PresetRecord {
      name: name.to_string(),
      ..record.clone()
    };
    let content = serde_yaml::to_string(&record).map_err(|source| PresetError::Serialize {
      name: name.to_string(),
      source,
    })?;

    self.write_document(name, &content).await?;
    info!(preset = name, steps = record.steps.len(), "saved preset");
    Ok(())
  }

  /// Delete a preset.
  ///
  /// Built-in names are rejected before the filesystem is touched.
  pub async fn delete(&self, name: &str) -> Result<(), PresetError> {
    if is_protected(name) {
      return Err(PresetError::Protected(name.to_string()));
    }
    validate_name(name)?;

    let path = self.preset_path(name);
    let exists = tokio::fs::try_exists(&path)
      .await
      .map_err(self.storage_err("delete", name, &path))?;
    if !exists {
      return Err(PresetError::NotFound(name.to_string()));
    }

    match tokio::fs::remove_file(&path).await {
      Ok(()) => {}
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PresetError::NotFound(name.to_string())),
      Err(e) => return Err(self.storage_err("delete", name, &path)(e)),
    }

    info!(preset = name, "deleted preset");
    Ok(())
  }

  /// Write the shipped built-in presets that are missing on disk.
  ///
  /// Existing files are left alone. Returns the names that were written.
  pub async fn seed_builtins(&self) -> Result<Vec<String>, PresetError> {
    let mut seeded = Vec::new();
    for (name, document) in BUILTIN_DOCUMENTS {
      let path = self.preset_path(name);
      let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(self.storage_err("write", name, &path))?;
      if exists {
        continue;
      }

      self.write_document(name, document).await?;
      seeded.push(name.to_string());
    }

    if !seeded.is_empty() {
      info!(presets = ?seeded, "seeded built-in presets");
    }
    Ok(seeded)
  }

  /// Write `content` as the document for `name` through a temp file, so a
  /// failed write never leaves a partial preset behind.
  async fn write_document(&self, name: &str, content: &str) -> Result<(), PresetError> {
    let path = self.preset_path(name);
    let temp_path = self.base_path.join(format!(".{}.{}.tmp", name, PRESET_EXTENSION));

    tokio::fs::create_dir_all(&self.base_path)
      .await
      .map_err(self.storage_err("write", name, &self.base_path))?;
    tokio::fs::write(&temp_path, content)
      .await
      .map_err(self.storage_err("write", name, &temp_path))?;
    if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
      let _ = tokio::fs::remove_file(&temp_path).await;
      return Err(self.storage_err("write", name, &path)(e));
    }
    Ok(())
  }
}

fn builtin_document(name: &str) -> Option<&'static str> {
  BUILTIN_DOCUMENTS
    .iter()
    .find(|(builtin, _)| *builtin == name)
    .map(|(_, document)| *document)
}

fn compare_names(a: &str, b: &str) -> Ordering {
  let rank = |name: &str| PROTECTED_PRESETS.iter().position(|p| *p == name);
  match (rank(a), rank(b)) {
    (Some(x), Some(y)) => x.cmp(&y),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => a.cmp(b),
  }
}
