use std::io;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::steps::{Registry, Validation};

use super::locator::{DirectoryLocator, InstallLocator};
use super::session::{FileSession, SessionStorage};
use super::types::{DEFAULT_DEPLOYMENT_DIRECTORY, UpdateOutcome, VariantConfig, VariantUpdate};

/// Holds the variant configuration of one session.
///
/// Mutation goes through [`ConfigStore::update`] only. Persistence is best
/// effort: the in-memory value is the source of truth.
#[derive(Debug)]
pub struct ConfigStore<L = DirectoryLocator, S = FileSession> {
  config: VariantConfig,
  locator: L,
  session: S,
}

impl<L: InstallLocator, S: SessionStorage> ConfigStore<L, S> {
  /// Create a store holding the default configuration.
  pub fn new(locator: L, session: S) -> Self {
    Self {
      config: VariantConfig::default(),
      locator,
      session,
    }
  }

  /// The configuration as last refreshed, without touching the filesystem.
  pub fn config(&self) -> &VariantConfig {
    &self.config
  }

  pub fn locator(&self) -> &L {
    &self.locator
  }

  pub fn session(&self) -> &S {
    &self.session
  }

  /// Return the live configuration after refreshing the deployment directory.
  pub async fn current(&mut self) -> &VariantConfig {
    self.refresh_deployment_directory().await;
    &self.config
  }

  /// Look up the install directory for the current variant.
  pub async fn install_dir(&self) -> io::Result<Option<PathBuf>> {
    self.locator.find(&self.config.install_prefix()).await
  }

  /// Re-derive the deployment directory.
  ///
  /// No matching install resets it to the built-in fallback; a failed lookup
  /// keeps the previous value.
  async fn refresh_deployment_directory(&mut self) {
    match self.install_dir().await {
      Ok(Some(dir)) => self.config.deployment_directory = dir.to_string_lossy().into_owned(),
      Ok(None) => {
        debug!(prefix = %self.config.install_prefix(), "no install found, using fallback deployment directory");
        self.config.deployment_directory = DEFAULT_DEPLOYMENT_DIRECTORY.to_string();
      }
      Err(e) => {
        warn!(error = %e, "failed to look up install directory, keeping previous deployment directory");
      }
    }
  }

  /// Merge an update and try to persist the result.
  pub async fn update(&mut self, update: VariantUpdate) -> UpdateOutcome {
    self.config.apply(update);
    self.persist().await
  }

  /// Replace the selection with the registry-known subset of `steps`.
  ///
  /// Unknown uids are dropped and reported back.
  pub async fn select_steps(&mut self, steps: &[String], registry: &Registry) -> (UpdateOutcome, Validation) {
    let validation = registry.validate(steps);
    if !validation.invalid.is_empty() {
      warn!(invalid = ?validation.invalid, "ignoring unknown build steps");
    }
    let outcome = self
      .update(VariantUpdate {
        selected_steps: Some(validation.valid.clone()),
        ..Default::default()
      })
      .await;
    (outcome, validation)
  }

  async fn persist(&self) -> UpdateOutcome {
    match self.session.save(&self.config).await {
      Ok(()) => UpdateOutcome::Persisted,
      Err(e) => {
        warn!(error = %e, "failed to persist session, keeping configuration in memory");
        UpdateOutcome::InMemoryOnly { reason: e.to_string() }
      }
    }
  }

  /// Restore the persisted configuration, merged over defaults.
  ///
  /// Any failure resets to defaults. Nothing stored keeps the current value.
  pub async fn load_from_session(&mut self) {
    match self.session.load().await {
      Ok(Some(mut config)) => {
        config.refresh_config_variant();
        info!(variant = %config.config_variant, "restored session configuration");
        self.config = config;
      }
      Ok(None) => debug!("no stored session, keeping current configuration"),
      Err(e) => {
        warn!(error = %e, "failed to load session, using default configuration");
        self.reset();
      }
    }
  }

  /// Drop back to the built-in defaults without persisting.
  pub fn reset(&mut self) {
    self.config = VariantConfig::default();
  }
}
