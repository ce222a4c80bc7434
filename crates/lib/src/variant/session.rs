use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use super::types::VariantConfig;

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("failed to read session {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write session {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error("failed to parse session: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize session: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("session storage is read-only")]
  ReadOnly,
}

/// Durable storage for the configuration between runs.
pub trait SessionStorage {
  /// Returns `Ok(None)` when nothing has been stored yet.
  fn load(&self) -> impl Future<Output = Result<Option<VariantConfig>, SessionError>> + Send;

  fn save(&self, config: &VariantConfig) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Session persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSession {
  path: PathBuf,
}

impl FileSession {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &PathBuf {
    &self.path
  }
}

impl SessionStorage for FileSession {
  async fn load(&self) -> Result<Option<VariantConfig>, SessionError> {
    let content = match tokio::fs::read_to_string(&self.path).await {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => {
        return Err(SessionError::Read {
          path: self.path.clone(),
          source,
        });
      }
    };

    if content.trim().is_empty() {
      return Ok(None);
    }
    serde_json::from_str(&content).map(Some).map_err(SessionError::Parse)
  }

  /// Writes to a temp file and renames it over the session file.
  async fn save(&self, config: &VariantConfig) -> Result<(), SessionError> {
    let content = serde_json::to_string_pretty(config).map_err(SessionError::Serialize)?;
    let write_err = |source| SessionError::Write {
      path: self.path.clone(),
      source,
    };

    if let Some(parent) = self.path.parent() {
      tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    let temp_path = self.path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, content).await.map_err(write_err)?;
    tokio::fs::rename(&temp_path, &self.path).await.map_err(write_err)?;
    Ok(())
  }
}

/// Session kept in memory, for hosts that persist settings themselves.
#[derive(Debug, Default)]
pub struct MemorySession {
  stored: Mutex<Option<VariantConfig>>,
  read_only: bool,
}

impl MemorySession {
  pub fn new() -> Self {
    Self::default()
  }

  /// Session whose writes always fail.
  pub fn read_only() -> Self {
    Self {
      stored: Mutex::new(None),
      read_only: true,
    }
  }

  pub fn with_config(config: VariantConfig) -> Self {
    Self {
      stored: Mutex::new(Some(config)),
      read_only: false,
    }
  }

  pub fn stored(&self) -> Option<VariantConfig> {
    self.stored.lock().map(|guard| guard.clone()).unwrap_or_default()
  }
}

impl SessionStorage for MemorySession {
  async fn load(&self) -> Result<Option<VariantConfig>, SessionError> {
    Ok(self.stored())
  }

  async fn save(&self, config: &VariantConfig) -> Result<(), SessionError> {
    if self.read_only {
      return Err(SessionError::ReadOnly);
    }
    if let Ok(mut guard) = self.stored.lock() {
      *guard = Some(config.clone());
    }
    Ok(())
  }
}
