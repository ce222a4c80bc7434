//! Runtime locations.
//!
//! Each location is resolved from, in order of precedence:
//! 1. An explicit override (CLI flag)
//! 2. An environment variable (`QDP_*`)
//! 3. The platform default (XDG directories, `/opt` for installs)

use std::path::PathBuf;

use crate::consts::{DEFAULT_INSTALL_ROOT, INSTALL_ROOT_ENV, PRESETS_DIR_ENV, SESSION_FILE_ENV, STEPS_FILE_ENV};
use crate::platform::paths::{presets_dir, session_file};
use crate::steps::StepSource;

/// Resolved locations used to build a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub presets_dir: PathBuf,
  pub steps: StepSource,
  /// Directory searched for `rtems-6-*` installs.
  pub install_root: PathBuf,
  pub session_file: PathBuf,
}

/// Values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
  pub presets_dir: Option<PathBuf>,
  pub steps_file: Option<PathBuf>,
  pub install_root: Option<PathBuf>,
  pub session_file: Option<PathBuf>,
}

fn env_path(name: &str) -> Option<PathBuf> {
  std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

impl Settings {
  /// Resolve from the environment and platform defaults.
  pub fn from_env() -> Self {
    Self::resolve(SettingsOverrides::default())
  }

  pub fn resolve(overrides: SettingsOverrides) -> Self {
    let steps = overrides
      .steps_file
      .or_else(|| env_path(STEPS_FILE_ENV))
      .map(StepSource::File)
      .unwrap_or_default();

    Self {
      presets_dir: overrides
        .presets_dir
        .or_else(|| env_path(PRESETS_DIR_ENV))
        .unwrap_or_else(presets_dir),
      steps,
      install_root: overrides
        .install_root
        .or_else(|| env_path(INSTALL_ROOT_ENV))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTALL_ROOT)),
      session_file: overrides
        .session_file
        .or_else(|| env_path(SESSION_FILE_ENV))
        .unwrap_or_else(session_file),
    }
  }
}
