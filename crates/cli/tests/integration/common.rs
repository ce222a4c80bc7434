//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Install directory matching the default variant.
pub const DEFAULT_INSTALL: &str = "rtems-6-sparc-gr740-smp-5";

/// Isolated test environment.
///
/// Each test gets its own temporary directory with isolated presets, install
/// root, and session file.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an environment with no installs and no presets.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create an environment with the default install present.
  pub fn with_default_install() -> Self {
    let env = Self::empty();
    env.add_install(DEFAULT_INSTALL);
    env
  }

  /// Create an install directory under the install root.
  pub fn add_install(&self, name: &str) -> PathBuf {
    let path = self.install_root().join(name);
    std::fs::create_dir_all(&path).unwrap();
    path
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  fn dir(&self, name: &str) -> PathBuf {
    let p = self.temp.path().join(name);
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn presets_dir(&self) -> PathBuf {
    self.dir("presets")
  }

  pub fn install_root(&self) -> PathBuf {
    self.dir("opt")
  }

  pub fn session_file(&self) -> PathBuf {
    self.dir("config").join("session.json")
  }

  /// Get a pre-configured Command for the qdp binary.
  ///
  /// Sets the `QDP_*` location variables, plus `XDG_*` so nothing falls back
  /// to the real home directory.
  pub fn qdp_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("qdp");
    cmd.env("QDP_PRESETS_DIR", self.presets_dir());
    cmd.env("QDP_INSTALL_ROOT", self.install_root());
    cmd.env("QDP_SESSION_FILE", self.session_file());
    cmd.env_remove("QDP_STEPS_FILE");
    cmd.env("XDG_DATA_HOME", self.dir("data"));
    cmd.env("XDG_CONFIG_HOME", self.dir("config"));
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Run qdp with `args` and return stdout, asserting success.
  pub fn run(&self, args: &[&str]) -> String {
    let output = self.qdp_cmd().args(args).output().unwrap();
    assert!(
      output.status.success(),
      "qdp {:?} failed: {}",
      args,
      String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
  }

  /// Run qdp with `args` and parse its stdout as JSON.
  pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
    let stdout = self.run(args);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON from qdp {:?}: {}\n{}", args, e, stdout))
  }
}
