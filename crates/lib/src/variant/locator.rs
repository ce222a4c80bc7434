use std::future::Future;
use std::io;
use std::path::PathBuf;

use tracing::debug;

/// Finds the RTEMS install directory belonging to a variant.
pub trait InstallLocator {
  /// Return the path of an install whose directory name starts with
  /// `prefix`, or `None` when there is no such install.
  fn find(&self, prefix: &str) -> impl Future<Output = io::Result<Option<PathBuf>>> + Send;
}

/// Looks for installs among the direct children of one directory
/// (typically `/opt`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLocator {
  root: PathBuf,
}

impl DirectoryLocator {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &PathBuf {
    &self.root
  }
}

impl InstallLocator for DirectoryLocator {
  /// When several entries match, the lexicographically smallest name wins.
  async fn find(&self, prefix: &str) -> io::Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(&self.root).await?;
    let mut best: Option<String> = None;

    while let Some(entry) = entries.next_entry().await? {
      let name = entry.file_name().to_string_lossy().into_owned();
      if name.starts_with(prefix) && best.as_ref().is_none_or(|b| name < *b) {
        best = Some(name);
      }
    }

    debug!(root = ?self.root, prefix, found = ?best, "looked up install directory");
    Ok(best.map(|name| self.root.join(name)))
  }
}
