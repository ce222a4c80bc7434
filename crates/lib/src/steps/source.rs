use std::path::PathBuf;

use tokio::sync::OnceCell;
use tracing::warn;

use super::registry::Registry;

/// Descriptor shipped with the library.
pub const EMBEDDED_DESCRIPTOR: &str = include_str!("../../data/package-build.yml");

/// Where the build-step descriptor comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StepSource {
  #[default]
  Embedded,
  File(PathBuf),
}

impl StepSource {
  /// Read and parse the descriptor. An unreadable file degrades to an empty
  /// registry just like a corrupt one.
  pub async fn load(&self) -> Registry {
    match self {
      StepSource::Embedded => Registry::parse(EMBEDDED_DESCRIPTOR),
      StepSource::File(path) => match tokio::fs::read_to_string(path).await {
        Ok(text) => Registry::parse(&text),
        Err(e) => {
          warn!(path = ?path, error = %e, "failed to read build-step descriptor, continuing with no steps");
          Registry::default()
        }
      },
    }
  }
}

/// Lazily loaded registry, cached for the lifetime of the handle.
#[derive(Debug, Default)]
pub struct RegistryHandle {
  source: StepSource,
  registry: OnceCell<Registry>,
}

impl RegistryHandle {
  pub fn new(source: StepSource) -> Self {
    Self {
      source,
      registry: OnceCell::new(),
    }
  }

  pub fn source(&self) -> &StepSource {
    &self.source
  }

  /// Load on first access; later calls return the cached registry.
  pub async fn get(&self) -> &Registry {
    self.registry.get_or_init(|| Registry::load(&self.source)).await
  }
}
