use anyhow::Result;
use serde::Serialize;

use qdp_lib::presets::PresetStore;
use qdp_lib::settings::Settings;
use qdp_lib::steps::{Registry, StepSource};
use qdp_lib::variant::{DirectoryLocator, InstallLocator, VariantConfig};

use super::runtime;
use crate::output::{OutputFormat, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct InfoOutput {
  version: &'static str,
  presets_dir: String,
  steps: String,
  step_count: usize,
  preset_count: usize,
  install_root: String,
  session_file: String,
  default_install: Option<String>,
}

pub fn cmd_info(output: OutputFormat, settings: &Settings) -> Result<()> {
  let rt = runtime()?;
  let (step_count, preset_count, default_install) = rt.block_on(async {
    let registry = Registry::load(&settings.steps).await;
    let presets = PresetStore::new(&settings.presets_dir).list().await;
    let prefix = VariantConfig::default().install_prefix();
    let install = DirectoryLocator::new(&settings.install_root)
      .find(&prefix)
      .await
      .ok()
      .flatten();
    (registry.len(), presets.len(), install)
  });

  let info = InfoOutput {
    version: env!("CARGO_PKG_VERSION"),
    presets_dir: settings.presets_dir.display().to_string(),
    steps: match &settings.steps {
      StepSource::Embedded => "built-in".to_string(),
      StepSource::File(path) => path.display().to_string(),
    },
    step_count,
    preset_count,
    install_root: settings.install_root.display().to_string(),
    session_file: settings.session_file.display().to_string(),
    default_install: default_install.map(|p| p.display().to_string()),
  };

  if output.is_json() {
    return print_json(&info);
  }

  print_success(&format!("qdp v{}", info.version));
  print_stat("Presets", &format!("{} ({} found)", info.presets_dir, info.preset_count));
  print_stat("Build steps", &format!("{} ({} loaded)", info.steps, info.step_count));
  print_stat("Install root", &info.install_root);
  print_stat("Session file", &info.session_file);
  print_stat(
    "Default install",
    info.default_install.as_deref().unwrap_or("not found"),
  );
  Ok(())
}
