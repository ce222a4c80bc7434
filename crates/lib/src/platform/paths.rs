//! Default per-user locations.
//!
//! Unix follows the XDG base directory layout; an empty `XDG_*` variable
//! counts as unset. Windows uses the roaming/local AppData folders.

use std::path::PathBuf;

use crate::consts::APP_NAME;

fn env_dir(var: &str) -> Option<PathBuf> {
  std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

pub fn home_dir() -> PathBuf {
  #[cfg(windows)]
  let home = env_dir("USERPROFILE");
  #[cfg(not(windows))]
  let home = env_dir("HOME");
  home.unwrap_or_else(|| PathBuf::from("/"))
}

/// Per-user configuration directory for qdp.
pub fn config_dir() -> PathBuf {
  #[cfg(windows)]
  let base = env_dir("APPDATA").unwrap_or_else(|| home_dir().join("AppData").join("Roaming"));
  #[cfg(not(windows))]
  let base = env_dir("XDG_CONFIG_HOME").unwrap_or_else(|| home_dir().join(".config"));
  base.join(APP_NAME)
}

/// Per-user data directory for qdp.
pub fn data_dir() -> PathBuf {
  #[cfg(windows)]
  let base = env_dir("LOCALAPPDATA").unwrap_or_else(|| home_dir().join("AppData").join("Local"));
  #[cfg(not(windows))]
  let base = env_dir("XDG_DATA_HOME").unwrap_or_else(|| home_dir().join(".local").join("share"));
  base.join(APP_NAME)
}

/// Directory holding one `<name>.yml` document per preset.
pub fn presets_dir() -> PathBuf {
  data_dir().join("presets")
}

/// File the current variant configuration is persisted to between runs.
pub fn session_file() -> PathBuf {
  config_dir().join("session.json")
}
