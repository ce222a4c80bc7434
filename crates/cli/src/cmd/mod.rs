mod config;
mod generate;
mod info;
mod preset;
mod serve;
mod steps;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

pub use config::{ConfigCommand, cmd_config};
pub use generate::cmd_generate;
pub use info::cmd_info;
pub use preset::{PresetCommand, cmd_preset};
pub use serve::cmd_serve;
pub use steps::{StepsCommand, cmd_steps};

fn runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to create async runtime")
}
