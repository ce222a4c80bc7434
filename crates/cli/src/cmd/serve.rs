//! `qdp serve`: JSON-lines transport for the request protocol.
//!
//! Each non-empty stdin line is one request; each gets exactly one response
//! line on stdout. Malformed lines are answered with an error and the loop
//! continues. The loop ends at end of input.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use qdp_lib::protocol::{Session, decode_request, encode_reply};
use qdp_lib::settings::Settings;

use super::runtime;

pub fn cmd_serve(settings: &Settings) -> Result<()> {
  runtime()?.block_on(serve(settings))
}

async fn serve(settings: &Settings) -> Result<()> {
  let mut session = Session::open(settings).await;
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut stdout = tokio::io::stdout();

  info!("serving requests on stdin");
  while let Some(line) = lines.next_line().await.context("Failed to read request")? {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let result = match decode_request(line) {
      Ok(request) => session.handle(request).await,
      Err(e) => Err(e),
    };
    if let Err(e) = &result {
      debug!(error = %e, "request failed");
    }

    let mut reply = serde_json::to_string(&encode_reply(&result)).context("Failed to encode reply")?;
    reply.push('\n');
    stdout.write_all(reply.as_bytes()).await.context("Failed to write reply")?;
    stdout.flush().await.context("Failed to write reply")?;
  }

  debug!("end of input, stopping");
  Ok(())
}
