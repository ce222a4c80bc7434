use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in presets. They can be loaded and overwritten but never deleted,
/// and are always listed first, in this order.
pub const PROTECTED_PRESETS: [&str; 3] = ["default", "minimal", "full"];

pub fn is_protected(name: &str) -> bool {
  PROTECTED_PRESETS.contains(&name)
}

/// A named, reusable step selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetRecord {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub steps: Vec<String>,
}

impl PresetRecord {
  pub fn new(name: impl Into<String>, description: impl Into<String>, steps: Vec<String>) -> Self {
    Self {
      name: name.into(),
      description: description.into(),
      steps,
    }
  }
}

/// On-disk shape; `steps` may be missing in hand-edited files.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPreset {
  pub name: Option<String>,
  pub description: Option<String>,
  pub steps: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum PresetError {
  #[error("preset '{0}' is built in and cannot be deleted")]
  Protected(String),

  #[error("preset '{0}' not found")]
  NotFound(String),

  #[error("preset '{0}' has no step list")]
  MissingSteps(String),

  #[error("invalid preset name '{0}': use letters, digits, '_' or '-'")]
  InvalidName(String),

  #[error("failed to {op} preset '{name}' at {}: {source}", path.display())]
  Storage {
    op: &'static str,
    name: String,
    path: PathBuf,
    source: io::Error,
  },

  #[error("failed to parse preset '{name}': {source}")]
  Parse { name: String, source: serde_yaml::Error },

  #[error("failed to serialize preset '{name}': {source}")]
  Serialize { name: String, source: serde_yaml::Error },
}

impl PresetError {
  /// True for the not-found class of errors, including a record without steps.
  pub fn is_not_found(&self) -> bool {
    matches!(self, PresetError::NotFound(_) | PresetError::MissingSteps(_))
  }
}

/// Preset names become file names, so they are restricted to a safe set.
pub fn validate_name(name: &str) -> Result<(), PresetError> {
  let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
  if valid {
    Ok(())
  } else {
    Err(PresetError::InvalidName(name.to_string()))
  }
}
