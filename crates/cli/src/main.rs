mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qdp_lib::settings::{Settings, SettingsOverrides};

use crate::cmd::{
  ConfigCommand, PresetCommand, StepsCommand, cmd_config, cmd_generate, cmd_info, cmd_preset, cmd_serve, cmd_steps,
};
use crate::output::{OutputFormat, format_error, print_error};

/// qdp - Variant configuration and patch synthesis for RTEMS QDP builds
#[derive(Parser)]
#[command(name = "qdp")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  paths: PathArgs,

  #[command(subcommand)]
  command: Commands,
}

/// Location overrides, taking precedence over `QDP_*` environment variables.
#[derive(Args, Debug, Default)]
struct PathArgs {
  /// Directory holding preset files
  #[arg(long, global = true, value_name = "DIR")]
  presets_dir: Option<PathBuf>,

  /// Build-step descriptor to use instead of the built-in one
  #[arg(long, global = true, value_name = "FILE")]
  steps_file: Option<PathBuf>,

  /// Directory searched for RTEMS installs
  #[arg(long, global = true, value_name = "DIR")]
  install_root: Option<PathBuf>,

  /// File the configuration is persisted to
  #[arg(long, global = true, value_name = "FILE")]
  session_file: Option<PathBuf>,
}

impl From<PathArgs> for SettingsOverrides {
  fn from(args: PathArgs) -> Self {
    Self {
      presets_dir: args.presets_dir,
      steps_file: args.steps_file,
      install_root: args.install_root,
      session_file: args.session_file,
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Show or change the variant configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },

  /// Inspect the build-step registry
  Steps {
    #[command(subcommand)]
    command: StepsCommand,
  },

  /// Manage named step selections
  Preset {
    #[command(subcommand)]
    command: PresetCommand,
  },

  /// Generate the patch document for the current configuration
  Generate {
    /// Write the document into the matching RTEMS install
    #[arg(long, conflicts_with = "file")]
    write: bool,

    /// Write the document to this path instead of stdout, in the `-o` format
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Answer JSON requests on stdin, one per line
  Serve,

  /// Display resolved locations and registry status
  Info {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let settings = Settings::resolve(cli.paths.into());

  let result = match cli.command {
    Commands::Config { command } => cmd_config(command, &settings),
    Commands::Steps { command } => cmd_steps(command, &settings),
    Commands::Preset { command } => cmd_preset(command, &settings),
    Commands::Generate { write, file, output } => cmd_generate(write, file.as_deref(), output, &settings),
    Commands::Serve => cmd_serve(&settings),
    Commands::Info { output } => cmd_info(output, &settings),
  };

  if let Err(e) = result {
    print_error(&format_error(&e));
    std::process::exit(1);
  }

  Ok(())
}
