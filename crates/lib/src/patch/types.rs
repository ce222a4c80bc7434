use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// Operation applied at a patch item's field path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchAction {
  #[default]
  Set,
}

/// One path-addressed mutation against the downstream specification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchItem {
  pub uid: String,
  pub path: String,
  pub action: PatchAction,
  pub value: Value,
}

impl PatchItem {
  pub fn set(uid: impl Into<String>, path: impl Into<String>, value: impl Into<Value>) -> Self {
    Self {
      uid: uid.into(),
      path: path.into(),
      action: PatchAction::Set,
      value: value.into(),
    }
  }

  fn targets(&self, uid: &str, path: &str) -> bool {
    self.uid == uid && self.path == path
  }
}

/// Ordered patch items with at most one item per `(uid, path)`.
///
/// Pushing an item for a pair that is already present replaces the earlier
/// item in place, so the later value wins without a second entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchList {
  items: Vec<PatchItem>,
}

impl PatchList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, item: PatchItem) {
    match self.items.iter_mut().find(|existing| existing.targets(&item.uid, &item.path)) {
      Some(existing) => *existing = item,
      None => self.items.push(item),
    }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn into_vec(self) -> Vec<PatchItem> {
    self.items
  }
}

impl Extend<PatchItem> for PatchList {
  fn extend<T: IntoIterator<Item = PatchItem>>(&mut self, iter: T) {
    for item in iter {
      self.push(item);
    }
  }
}

#[derive(Debug, Error)]
pub enum PatchError {
  #[error("failed to serialize patch document: {0}")]
  Serialize(#[source] serde_yaml::Error),

  #[error("no RTEMS install matching '{prefix}' found")]
  InstallNotFound { prefix: String },

  #[error("failed to look up RTEMS install: {0}")]
  Lookup(#[source] io::Error),

  #[error("failed to write patch document {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}
