//! `qdp config`: show and change the variant configuration.

use anyhow::Result;
use clap::Subcommand;

use qdp_lib::protocol::{Request, Response, Session};
use qdp_lib::settings::Settings;
use qdp_lib::variant::{Platform, UpdateOutcome, VariantConfig, VariantUpdate};

use super::runtime;
use crate::output::{OutputFormat, format_list, print_info, print_json, print_stat, print_success, print_warning};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
  /// Show the current configuration
  Show {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Change one or more fields
  Set {
    /// Target architecture, e.g. sparc
    #[arg(long)]
    arch: Option<String>,

    /// Board support package, e.g. gr740
    #[arg(long)]
    bsp: Option<String>,

    /// Build for SMP (true) or uniprocessor (false)
    #[arg(long, value_name = "BOOL")]
    smp: Option<bool>,

    /// Name of the build directory
    #[arg(long)]
    build_dir: Option<String>,

    /// Selected build steps, replacing the current selection
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    steps: Option<Vec<String>>,

    /// Platform name; requires --platform-description
    #[arg(long, requires = "platform_description")]
    platform_name: Option<String>,

    /// Platform description; requires --platform-name
    #[arg(long, requires = "platform_name")]
    platform_description: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Restore the built-in defaults
  Reset,
}

pub fn cmd_config(command: ConfigCommand, settings: &Settings) -> Result<()> {
  match command {
    ConfigCommand::Show { output } => cmd_show(output, settings),
    ConfigCommand::Set {
      arch,
      bsp,
      smp,
      build_dir,
      steps,
      platform_name,
      platform_description,
      output,
    } => {
      let platform = match (platform_name, platform_description) {
        (Some(name), Some(description)) => Some(Platform { description, name }),
        _ => None,
      };
      let update = VariantUpdate {
        target_architecture: arch,
        target_bsp: bsp,
        is_smp: smp,
        build_directory: build_dir,
        selected_steps: steps,
        platform,
      };
      cmd_set(update, output, settings)
    }
    ConfigCommand::Reset => cmd_reset(settings),
  }
}

fn cmd_show(output: OutputFormat, settings: &Settings) -> Result<()> {
  let rt = runtime()?;
  let config = rt.block_on(async {
    let mut session = Session::open(settings).await;
    session.config_mut().current().await.clone()
  });

  if output.is_json() {
    print_json(&config)?;
  } else {
    print_config(&config);
  }
  Ok(())
}

fn cmd_set(update: VariantUpdate, output: OutputFormat, settings: &Settings) -> Result<()> {
  if update.is_empty() {
    print_info("Nothing to change");
    return Ok(());
  }

  let rt = runtime()?;
  let response = rt.block_on(async {
    let mut session = Session::open(settings).await;
    session.handle(Request::UpdateConfiguration { update }).await
  })?;

  let Response::ConfigurationUpdated {
    config,
    outcome,
    rejected_steps,
  } = &response
  else {
    anyhow::bail!("unexpected response to update-configuration");
  };

  if output.is_json() {
    return print_json(&response);
  }

  for uid in rejected_steps {
    print_warning(&format!("Unknown build step ignored: {}", uid));
  }
  report_outcome(outcome);
  print_config(config);
  Ok(())
}

fn cmd_reset(settings: &Settings) -> Result<()> {
  let rt = runtime()?;
  let outcome = rt.block_on(async {
    let mut session = Session::open(settings).await;
    session.config_mut().reset();
    // An empty update persists the restored defaults.
    session.config_mut().update(VariantUpdate::default()).await
  });

  report_outcome(&outcome);
  Ok(())
}

pub(crate) fn report_outcome(outcome: &UpdateOutcome) {
  match outcome {
    UpdateOutcome::Persisted => print_success("Configuration saved"),
    UpdateOutcome::InMemoryOnly { reason } => {
      print_warning(&format!("Configuration not saved: {}", reason));
    }
  }
}

pub(crate) fn print_config(config: &VariantConfig) {
  print_stat("Architecture", &config.target_architecture);
  print_stat("BSP", &config.target_bsp);
  print_stat("SMP", &config.is_smp.to_string());
  print_stat("Variant", &config.config_variant);
  print_stat("Build directory", &config.build_directory);
  print_stat("Deployment directory", &config.deployment_directory);
  print_stat(
    "Platform",
    &format!("{} ({})", config.platform.name, config.platform.description),
  );
  print_stat("Steps", &format_list(&config.selected_steps));
}
