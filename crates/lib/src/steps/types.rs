use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category assigned to steps whose descriptor does not name one.
pub const FALLBACK_CATEGORY: &str = "other";

/// One optional unit of work in the downstream build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStepDescriptor {
  pub uid: String,
  pub name: String,
  pub description: String,
  pub category: String,
  pub is_default: bool,
  pub tags: BTreeSet<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub estimated_time: Option<String>,
  /// Informational only, never enforced when selecting steps.
  pub dependencies: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub config_file: Option<String>,
  pub config_fields: Vec<String>,
}

/// A group of build steps shown together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDescriptor {
  pub id: String,
  pub name: String,
  pub description: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub config_path: Option<String>,
}

impl CategoryDescriptor {
  /// Stand-in for a category id that no descriptor defines.
  pub fn fallback(id: &str) -> Self {
    Self {
      id: id.to_string(),
      name: id.to_string(),
      description: String::new(),
      icon: None,
      config_path: None,
    }
  }
}

/// Result of checking candidate uids against the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
  pub valid: Vec<String>,
  pub invalid: Vec<String>,
}

impl Validation {
  pub fn is_valid(&self) -> bool {
    self.invalid.is_empty()
  }
}

#[derive(Debug, Error)]
pub enum StepError {
  #[error("unknown build step: {0}")]
  NotFound(String),
}

/// Descriptor document as written on disk. Every field is optional so that a
/// sparse document still loads. Step and category records stay untyped here
/// and are decoded one at a time, so a malformed record only drops itself.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDescriptor {
  #[serde(rename = "build-steps", default)]
  pub build_steps: Option<Vec<serde_yaml::Value>>,
  #[serde(default)]
  pub categories: Option<Vec<serde_yaml::Value>>,
  #[serde(default)]
  pub default_build_steps: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawStep {
  pub uid: Option<String>,
  pub name: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub is_default: Option<bool>,
  pub tags: Option<BTreeSet<String>>,
  pub estimated_time: Option<String>,
  pub dependencies: Option<Vec<String>>,
  pub config_file: Option<String>,
  pub config_fields: Option<Vec<String>>,
}

impl RawStep {
  /// Returns `None` for records without a uid.
  pub fn into_descriptor(self) -> Option<BuildStepDescriptor> {
    let uid = self.uid.filter(|uid| !uid.is_empty())?;
    Some(BuildStepDescriptor {
      name: self.name.filter(|s| !s.is_empty()).unwrap_or_else(|| uid.clone()),
      description: self.description.filter(|s| !s.is_empty()).unwrap_or_else(|| uid.clone()),
      category: self.category.unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
      is_default: self.is_default.unwrap_or(false),
      tags: self.tags.unwrap_or_default(),
      estimated_time: self.estimated_time,
      dependencies: self.dependencies.unwrap_or_default(),
      config_file: self.config_file,
      config_fields: self.config_fields.unwrap_or_default(),
      uid,
    })
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawCategory {
  pub id: Option<String>,
  pub name: Option<String>,
  pub description: Option<String>,
  pub icon: Option<String>,
  pub config_path: Option<String>,
}

impl RawCategory {
  pub fn into_descriptor(self) -> Option<CategoryDescriptor> {
    let id = self.id.filter(|id| !id.is_empty())?;
    Some(CategoryDescriptor {
      name: self.name.unwrap_or_else(|| id.clone()),
      description: self.description.unwrap_or_default(),
      icon: self.icon,
      config_path: self.config_path,
      id,
    })
  }
}
