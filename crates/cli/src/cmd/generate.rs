use std::path::Path;

use anyhow::{Context, Result};

use qdp_lib::patch::write_atomic;
use qdp_lib::protocol::Session;
use qdp_lib::settings::Settings;

use super::runtime;
use crate::output::{OutputFormat, print_json, print_success};

pub fn cmd_generate(write: bool, file: Option<&Path>, output: OutputFormat, settings: &Settings) -> Result<()> {
  runtime()?.block_on(generate(write, file, output, settings))
}

async fn generate(write: bool, file: Option<&Path>, output: OutputFormat, settings: &Settings) -> Result<()> {
  let mut session = Session::open(settings).await;

  if write {
    let path = session
      .write_document()
      .await
      .context("Failed to write patch document")?;
    print_success(&format!("Wrote {}", path.display()));
    return Ok(());
  }

  let document = session.generate_document().await;
  match file {
    Some(path) => {
      let text = if output.is_json() {
        serde_json::to_string_pretty(&document)? + "\n"
      } else {
        document.to_yaml()?
      };
      write_atomic(path, &text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
      print_success(&format!("Wrote {}", path.display()));
    }
    None if output.is_json() => print_json(&document)?,
    None => print!("{}", document.to_yaml()?),
  }
  Ok(())
}
