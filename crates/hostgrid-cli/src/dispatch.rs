//! stdin/stdout JSON framing for the plugin protocol.
//!
//! The orchestrator invokes the binary once per operation: one JSON
//! object on stdin, one JSON document on stdout, nonzero exit on
//! failure. Diagnostics go to stderr so stdout stays machine-readable.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use hostgrid_core::RawParams;

/// Decode the raw parameter object from stdin.
pub fn read_params() -> anyhow::Result<RawParams> {
    serde_json::from_reader(std::io::stdin().lock()).context("failed to decode input json")
}

/// Serialize a response to stdout.
pub fn write_response<T: Serialize>(response: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, response).context("failed to encode response json")?;
    stdout.flush()?;
    Ok(())
}
