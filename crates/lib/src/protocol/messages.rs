use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::patch::{PatchDocument, PatchError};
use crate::presets::PresetError;
use crate::steps::Registry;
use crate::variant::{UpdateOutcome, VariantConfig, VariantUpdate};

/// A request from the host driving a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Request {
  GetConfiguration,
  UpdateConfiguration {
    #[serde(default)]
    update: VariantUpdate,
  },
  GetBuildStepMetadata,
  GetPresets,
  LoadPreset {
    name: String,
  },
  /// Save the current step selection under `name`.
  SavePreset {
    name: String,
    #[serde(default)]
    description: String,
  },
  DeletePreset {
    name: String,
  },
  GeneratePatchDocument,
  /// Generate the document and write it into the matching install.
  WritePatchDocument,
}

impl Request {
  /// Wire name of the request kind.
  pub fn kind(&self) -> &'static str {
    match self {
      Request::GetConfiguration => "get-configuration",
      Request::UpdateConfiguration { .. } => "update-configuration",
      Request::GetBuildStepMetadata => "get-build-step-metadata",
      Request::GetPresets => "get-presets",
      Request::LoadPreset { .. } => "load-preset",
      Request::SavePreset { .. } => "save-preset",
      Request::DeletePreset { .. } => "delete-preset",
      Request::GeneratePatchDocument => "generate-patch-document",
      Request::WritePatchDocument => "write-patch-document",
    }
  }
}

/// The answer to a [`Request`], one variant per request kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Response {
  Configuration {
    config: VariantConfig,
  },
  ConfigurationUpdated {
    config: VariantConfig,
    outcome: UpdateOutcome,
    /// Requested step uids unknown to the registry, which were dropped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected_steps: Vec<String>,
  },
  BuildStepMetadata {
    metadata: Registry,
  },
  Presets {
    presets: Vec<String>,
    protected: Vec<String>,
  },
  PresetLoaded {
    name: String,
    config: VariantConfig,
    outcome: UpdateOutcome,
  },
  PresetSaved {
    name: String,
  },
  PresetDeleted {
    name: String,
  },
  PatchDocument {
    document: PatchDocument,
    yaml: String,
  },
  PatchDocumentWritten {
    path: PathBuf,
  },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
  #[error("{op}: {source}")]
  Preset {
    op: &'static str,
    #[source]
    source: PresetError,
  },

  #[error("{op}: {source}")]
  Patch {
    op: &'static str,
    #[source]
    source: PatchError,
  },

  #[error("invalid request: {0}")]
  InvalidRequest(String),
}

impl ProtocolError {
  pub(crate) fn preset(op: &'static str) -> impl FnOnce(PresetError) -> Self {
    move |source| ProtocolError::Preset { op, source }
  }

  pub(crate) fn patch(op: &'static str) -> impl FnOnce(PatchError) -> Self {
    move |source| ProtocolError::Patch { op, source }
  }
}
