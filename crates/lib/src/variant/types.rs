use serde::{Deserialize, Serialize};

/// Deployment directory used until an install is found on disk.
pub const DEFAULT_DEPLOYMENT_DIRECTORY: &str = "/opt/rtems-6-sparc-gr740-smp-5";

/// Steps selected in a fresh session.
pub const DEFAULT_SELECTED_STEPS: &[&str] = &[
  "steps/build-bsp",
  "steps/build-bsp-qual-only",
  "steps/build-bsp-qual-only-coverage",
  "steps/run-local-target-qual-only",
  "steps/run-local-target-qual-only-coverage",
  "steps/build-ddf-sdd",
  "steps/build-djf-svr",
];

/// Identity of the platform the tests run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
  pub description: String,
  pub name: String,
}

impl Default for Platform {
  fn default() -> Self {
    Self {
      description: "User Hardware Execution".to_string(),
      name: "board".to_string(),
    }
  }
}

/// One concrete build variant.
///
/// `deployment_directory` and `config_variant` are derived from the other
/// fields and cannot be set through [`VariantUpdate`].
///
/// Deserialization fills missing fields from [`VariantConfig::default`], so a
/// record written by an older version still yields a complete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
  pub target_architecture: String,
  pub target_bsp: String,
  pub is_smp: bool,
  pub build_directory: String,
  pub selected_steps: Vec<String>,
  pub deployment_directory: String,
  pub config_variant: String,
  pub platform: Platform,
}

impl Default for VariantConfig {
  fn default() -> Self {
    let mut config = Self {
      target_architecture: "sparc".to_string(),
      target_bsp: "gr740".to_string(),
      is_smp: true,
      build_directory: "build-sparc-gr740-smp-user-qual".to_string(),
      selected_steps: DEFAULT_SELECTED_STEPS.iter().map(|s| s.to_string()).collect(),
      deployment_directory: DEFAULT_DEPLOYMENT_DIRECTORY.to_string(),
      config_variant: String::new(),
      platform: Platform::default(),
    };
    config.refresh_config_variant();
    config
  }
}

impl VariantConfig {
  pub fn smp_label(&self) -> &'static str {
    if self.is_smp { "smp" } else { "uni" }
  }

  /// Name prefix of the RTEMS install matching this variant,
  /// e.g. `rtems-6-sparc-gr740-smp-5`.
  pub fn install_prefix(&self) -> String {
    format!(
      "rtems-6-{}-{}-{}-5",
      self.target_architecture,
      self.target_bsp,
      self.smp_label()
    )
  }

  /// Recompute the `<arch>-<bsp>-<smp|uni>` label.
  pub fn refresh_config_variant(&mut self) {
    self.config_variant = format!("{}-{}-{}", self.target_architecture, self.target_bsp, self.smp_label());
  }

  /// Merge the allow-listed fields of `update` into this config.
  ///
  /// `selected_steps` is replaced wholesale, with duplicates collapsed to
  /// their first occurrence.
  pub fn apply(&mut self, update: VariantUpdate) {
    if let Some(arch) = update.target_architecture {
      self.target_architecture = arch;
    }
    if let Some(bsp) = update.target_bsp {
      self.target_bsp = bsp;
    }
    if let Some(is_smp) = update.is_smp {
      self.is_smp = is_smp;
    }
    if let Some(build_directory) = update.build_directory {
      self.build_directory = build_directory;
    }
    if let Some(steps) = update.selected_steps {
      self.selected_steps = dedup_steps(steps);
    }
    if let Some(platform) = update.platform {
      self.platform = platform;
    }
    self.refresh_config_variant();
  }
}

fn dedup_steps(steps: Vec<String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(steps.len());
  for step in steps {
    if !out.contains(&step) {
      out.push(step);
    }
  }
  out
}

/// A partial update to a [`VariantConfig`].
///
/// The fields of this struct are the complete set a caller may change. Any
/// other key in a serialized update is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_architecture: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_bsp: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_smp: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub build_directory: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selected_steps: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub platform: Option<Platform>,
}

impl VariantUpdate {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

/// What happened to an accepted update.
///
/// The in-memory configuration is authoritative either way; callers decide
/// whether a persistence failure is worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum UpdateOutcome {
  Persisted,
  InMemoryOnly { reason: String },
}

impl UpdateOutcome {
  pub fn is_persisted(&self) -> bool {
    matches!(self, UpdateOutcome::Persisted)
  }
}
