//! Request/response protocol used by hosts to drive a session.
//!
//! The protocol is transport-agnostic: a request is a kind plus payload, and
//! every request gets either a [`Response`] or a [`ProtocolError`]. The JSON
//! helpers here encode one message per value, e.g.
//!
//! ```json
//! {"kind": "load-preset", "name": "minimal"}
//! {"kind": "error", "message": "delete-preset: preset 'full' is built in and cannot be deleted"}
//! ```

mod messages;
mod session;

use serde_json::json;

pub use messages::{ProtocolError, Request, Response};
pub use session::Session;

/// Parse one JSON-encoded request.
pub fn decode_request(text: &str) -> Result<Request, ProtocolError> {
  serde_json::from_str(text).map_err(|e| ProtocolError::InvalidRequest(e.to_string()))
}

/// Encode the outcome of a request as a single JSON value.
pub fn encode_reply(result: &Result<Response, ProtocolError>) -> serde_json::Value {
  match result {
    Ok(response) => serde_json::to_value(response)
      .unwrap_or_else(|e| json!({ "kind": "error", "message": format!("failed to encode response: {}", e) })),
    Err(e) => json!({ "kind": "error", "message": e.to_string() }),
  }
}
