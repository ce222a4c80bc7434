use std::path::PathBuf;

use tracing::{debug, info};

use crate::patch::{PatchDocument, PatchError, write_document};
use crate::presets::{PROTECTED_PRESETS, PresetRecord, PresetStore};
use crate::settings::Settings;
use crate::steps::{Registry, RegistryHandle};
use crate::variant::{ConfigStore, DirectoryLocator, FileSession, InstallLocator, SessionStorage, VariantUpdate};

use super::messages::{ProtocolError, Request, Response};

/// Everything one host session works with.
///
/// A session owns its configuration; it is never shared between sessions.
#[derive(Debug)]
pub struct Session<L = DirectoryLocator, S = FileSession> {
  config: ConfigStore<L, S>,
  registry: RegistryHandle,
  presets: PresetStore,
}

impl Session {
  /// Build a file-backed session and restore the persisted configuration.
  pub async fn open(settings: &Settings) -> Self {
    let config = ConfigStore::new(
      DirectoryLocator::new(&settings.install_root),
      FileSession::new(&settings.session_file),
    );
    let mut session = Session::new(
      config,
      RegistryHandle::new(settings.steps.clone()),
      PresetStore::new(&settings.presets_dir),
    );
    session.config.load_from_session().await;
    session
  }
}

impl<L: InstallLocator, S: SessionStorage> Session<L, S> {
  pub fn new(config: ConfigStore<L, S>, registry: RegistryHandle, presets: PresetStore) -> Self {
    Self {
      config,
      registry,
      presets,
    }
  }

  pub fn config(&self) -> &ConfigStore<L, S> {
    &self.config
  }

  pub fn config_mut(&mut self) -> &mut ConfigStore<L, S> {
    &mut self.config
  }

  pub fn presets(&self) -> &PresetStore {
    &self.presets
  }

  pub async fn registry(&self) -> &Registry {
    self.registry.get().await
  }

  /// Generate the patch document for the current configuration.
  pub async fn generate_document(&mut self) -> PatchDocument {
    let config = self.config.current().await;
    PatchDocument::from_config(config)
  }

  /// Generate the document and write it into the install matching the
  /// current variant.
  pub async fn write_document(&mut self) -> Result<PathBuf, PatchError> {
    let document = self.generate_document().await;
    let install_dir = self
      .config
      .install_dir()
      .await
      .map_err(PatchError::Lookup)?
      .ok_or_else(|| PatchError::InstallNotFound {
        prefix: self.config.config().install_prefix(),
      })?;
    write_document(&document, &install_dir).await
  }

  /// Apply an update, validating any new step selection against the registry.
  async fn update_configuration(&mut self, mut update: VariantUpdate) -> Response {
    let mut rejected_steps = Vec::new();
    if let Some(steps) = update.selected_steps.take() {
      let validation = self.registry.get().await.validate(&steps);
      update.selected_steps = Some(validation.valid);
      rejected_steps = validation.invalid;
    }

    let outcome = self.config.update(update).await;
    Response::ConfigurationUpdated {
      config: self.config.current().await.clone(),
      outcome,
      rejected_steps,
    }
  }

  /// Answer one request.
  pub async fn handle(&mut self, request: Request) -> Result<Response, ProtocolError> {
    debug!(kind = request.kind(), "handling request");

    match request {
      Request::GetConfiguration => Ok(Response::Configuration {
        config: self.config.current().await.clone(),
      }),

      Request::UpdateConfiguration { update } => Ok(self.update_configuration(update).await),

      Request::GetBuildStepMetadata => Ok(Response::BuildStepMetadata {
        metadata: self.registry.get().await.clone(),
      }),

      Request::GetPresets => Ok(Response::Presets {
        presets: self.presets.list().await,
        protected: PROTECTED_PRESETS.iter().map(|s| s.to_string()).collect(),
      }),

      Request::LoadPreset { name } => {
        let steps = self
          .presets
          .load(&name)
          .await
          .map_err(ProtocolError::preset("load-preset"))?;
        let outcome = self
          .config
          .update(VariantUpdate {
            selected_steps: Some(steps),
            ..Default::default()
          })
          .await;
        info!(preset = %name, "loaded preset into configuration");
        Ok(Response::PresetLoaded {
          name,
          config: self.config.current().await.clone(),
          outcome,
        })
      }

      Request::SavePreset { name, description } => {
        let record = PresetRecord::new(
          name.as_str(),
          description,
          self.config.config().selected_steps.clone(),
        );
        self
          .presets
          .save(&name, &record)
          .await
          .map_err(ProtocolError::preset("save-preset"))?;
        Ok(Response::PresetSaved { name })
      }

      Request::DeletePreset { name } => {
        self
          .presets
          .delete(&name)
          .await
          .map_err(ProtocolError::preset("delete-preset"))?;
        Ok(Response::PresetDeleted { name })
      }

      Request::GeneratePatchDocument => {
        let document = self.generate_document().await;
        let yaml = document
          .to_yaml()
          .map_err(ProtocolError::patch("generate-patch-document"))?;
        Ok(Response::PatchDocument { document, yaml })
      }

      Request::WritePatchDocument => {
        let path = self
          .write_document()
          .await
          .map_err(ProtocolError::patch("write-patch-document"))?;
        Ok(Response::PatchDocumentWritten { path })
      }
    }
  }
}
