//! `qdp preset`: named step selections.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use serde::Serialize;

use qdp_lib::presets::{PresetStore, is_protected};
use qdp_lib::protocol::{Request, Response, Session};
use qdp_lib::settings::Settings;

use super::config::report_outcome;
use super::runtime;
use crate::output::{OutputFormat, format_list, print_info, print_json, print_stat, print_success};
use crate::prompts::confirm;

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
  /// List available presets
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the steps stored in a preset
  Show {
    /// Preset name
    name: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Replace the selected steps with a preset's steps
  Load {
    /// Preset name
    name: String,
  },

  /// Save the selected steps as a preset
  Save {
    /// Preset name (letters, digits, '_' or '-')
    name: String,

    /// Free-form description stored with the preset
    #[arg(short, long, default_value = "")]
    description: String,
  },

  /// Delete a user preset
  Delete {
    /// Preset name
    name: String,

    /// Skip confirmation prompt
    #[arg(long)]
    force: bool,
  },

  /// Write the built-in presets that are missing from the presets directory
  Init,
}

pub fn cmd_preset(command: PresetCommand, settings: &Settings) -> Result<()> {
  match command {
    PresetCommand::List { output } => cmd_list(output, settings),
    PresetCommand::Show { name, output } => cmd_show(&name, output, settings),
    PresetCommand::Load { name } => cmd_load(name, settings),
    PresetCommand::Save { name, description } => cmd_save(name, description, settings),
    PresetCommand::Delete { name, force } => cmd_delete(name, force, settings),
    PresetCommand::Init => cmd_init(settings),
  }
}

fn cmd_list(output: OutputFormat, settings: &Settings) -> Result<()> {
  #[derive(Serialize)]
  struct PresetListItem {
    name: String,
    protected: bool,
  }

  let store = PresetStore::new(&settings.presets_dir);
  let names = runtime()?.block_on(store.list());

  if output.is_json() {
    let items: Vec<PresetListItem> = names
      .into_iter()
      .map(|name| PresetListItem {
        protected: is_protected(&name),
        name,
      })
      .collect();
    return print_json(&items);
  }

  if names.is_empty() {
    print_info("No presets found. Run 'qdp preset init' to install the built-in presets.");
    return Ok(());
  }
  for name in &names {
    if is_protected(name) {
      println!("{} (built-in)", name);
    } else {
      println!("{}", name);
    }
  }
  print_info(&format!("{} preset(s) total", names.len()));
  Ok(())
}

fn cmd_show(name: &str, output: OutputFormat, settings: &Settings) -> Result<()> {
  let store = PresetStore::new(&settings.presets_dir);
  let record = runtime()?.block_on(store.load_record(name))?;

  if output.is_json() {
    return print_json(&record);
  }
  print_success(&record.name);
  if !record.description.is_empty() {
    print_stat("Description", &record.description);
  }
  print_stat("Steps", &format_list(&record.steps));
  Ok(())
}

fn cmd_load(name: String, settings: &Settings) -> Result<()> {
  let response = runtime()?.block_on(async {
    let mut session = Session::open(settings).await;
    session.handle(Request::LoadPreset { name }).await
  })?;

  if let Response::PresetLoaded { name, config, outcome } = &response {
    print_success(&format!("Loaded preset '{}'", name));
    print_stat("Steps", &format_list(&config.selected_steps));
    report_outcome(outcome);
  }
  Ok(())
}

fn cmd_save(name: String, description: String, settings: &Settings) -> Result<()> {
  runtime()?.block_on(async {
    let mut session = Session::open(settings).await;
    session.handle(Request::SavePreset { name: name.clone(), description }).await
  })?;

  print_success(&format!("Saved preset '{}'", name));
  Ok(())
}

fn cmd_delete(name: String, force: bool, settings: &Settings) -> Result<()> {
  if is_protected(&name) {
    bail!("preset '{}' is built in and cannot be deleted", name);
  }
  if !confirm(&format!("Delete preset '{}'?", name), force)? {
    print_info("Aborted");
    return Ok(());
  }

  runtime()?.block_on(async {
    let mut session = Session::open(settings).await;
    session.handle(Request::DeletePreset { name: name.clone() }).await
  })?;

  print_success(&format!("Deleted preset '{}'", name));
  Ok(())
}

fn cmd_init(settings: &Settings) -> Result<()> {
  let store = PresetStore::new(&settings.presets_dir);
  let seeded = runtime()?
    .block_on(store.seed_builtins())
    .with_context(|| format!("Failed to seed presets in {}", settings.presets_dir.display()))?;

  if seeded.is_empty() {
    print_info("Built-in presets already present");
  } else {
    print_success(&format!("Installed preset(s): {}", seeded.join(", ")));
  }
  print_stat("Directory", &settings.presets_dir.display().to_string());
  Ok(())
}
