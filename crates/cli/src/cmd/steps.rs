use anyhow::{Result, bail};
use clap::Subcommand;
use serde::Serialize;

use qdp_lib::settings::Settings;
use qdp_lib::steps::{BuildStepDescriptor, Registry, Validation};

use super::runtime;
use crate::output::{
  OutputFormat, format_list, print_info, print_json, print_stat, print_success, print_warning, symbols,
};

#[derive(Subcommand, Debug)]
pub enum StepsCommand {
  /// List build steps grouped by category
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show one build step
  Show {
    /// Step uid, e.g. steps/build-bsp
    uid: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Check step uids against the registry
  Validate {
    /// Step uids to check
    #[arg(required = true)]
    uids: Vec<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Print the steps selected by default
  Defaults {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

pub fn cmd_steps(command: StepsCommand, settings: &Settings) -> Result<()> {
  let rt = runtime()?;
  let registry = rt.block_on(Registry::load(&settings.steps));

  match command {
    StepsCommand::List { output } => cmd_list(&registry, output),
    StepsCommand::Show { uid, output } => cmd_show(&registry, &uid, output),
    StepsCommand::Validate { uids, output } => cmd_validate(&registry, &uids, output),
    StepsCommand::Defaults { output } => {
      let defaults = registry.default_steps();
      if output.is_json() {
        print_json(&defaults)
      } else {
        for uid in &defaults {
          println!("{}", uid);
        }
        Ok(())
      }
    }
  }
}

fn cmd_list(registry: &Registry, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(registry);
  }

  if registry.is_empty() {
    print_warning("No build steps available");
    return Ok(());
  }

  for (category_id, steps) in registry.steps_by_category() {
    let category = registry.category(category_id);
    println!("{} ({})", category.name, category.id);
    for step in steps {
      let marker = if step.is_default { symbols::SUCCESS } else { " " };
      println!("  {} {} {} {}", marker, step.uid, symbols::ARROW, step.name);
    }
  }
  print_info(&format!("{} step(s) total", registry.len()));
  Ok(())
}

fn cmd_show(registry: &Registry, uid: &str, output: OutputFormat) -> Result<()> {
  let step = registry.require(uid)?;

  if output.is_json() {
    return print_json(step);
  }
  print_step(registry, step);
  Ok(())
}

fn print_step(registry: &Registry, step: &BuildStepDescriptor) {
  print_success(&step.name);
  print_stat("Uid", &step.uid);
  print_stat("Category", &registry.category(&step.category).name);
  if !step.description.is_empty() {
    print_stat("Description", &step.description);
  }
  print_stat("Default", &step.is_default.to_string());
  if let Some(time) = &step.estimated_time {
    print_stat("Estimated time", time);
  }
  let tags: Vec<String> = step.tags.iter().cloned().collect();
  print_stat("Tags", &format_list(&tags));
  print_stat("Depends on", &format_list(&step.dependencies));
  if let Some(file) = &step.config_file {
    print_stat("Config file", file);
  }
}

fn cmd_validate(registry: &Registry, uids: &[String], output: OutputFormat) -> Result<()> {
  #[derive(Serialize)]
  struct ValidateOutput<'a> {
    #[serde(flatten)]
    validation: &'a Validation,
    registry_empty: bool,
  }

  let validation = registry.validate(uids);

  if output.is_json() {
    print_json(&ValidateOutput {
      validation: &validation,
      registry_empty: registry.is_empty(),
    })?;
  } else {
    for uid in &validation.valid {
      println!("  {} {}", symbols::PLUS, uid);
    }
    for uid in &validation.invalid {
      println!("  {} {}", symbols::MINUS, uid);
    }
  }

  if !validation.is_valid() {
    bail!("{} unknown build step(s): {}", validation.invalid.len(), validation.invalid.join(", "));
  }
  Ok(())
}
