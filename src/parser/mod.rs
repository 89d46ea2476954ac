//! Script loader
//!
//! Scene scripts are stored as a JSON array of steps:
//!
//! ```json
//! [
//!   { "kind": "say", "speaker": "Ivan", "text": "Pick a game." },
//!   { "kind": "startGame", "game": "Blackjack" },
//!   { "kind": "awaitGameResult", "toVar": "lastResult" },
//!   { "kind": "branchOnResult", "var": "lastResult", "nextByResult": { "win": 4 } },
//!   { "kind": "end" }
//! ]
//! ```

use crate::types::script::Script;
use anyhow::Context;
use std::path::Path;
use thiserror::Error;


/// A script that could not be read
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid script at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("script is empty")]
    Empty,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Parse a JSON script
///
/// Blank input is rejected; an explicit `[]` is a valid (immediately ended)
/// script.
pub fn parse(json: &str) -> Result<Script, ParseError> {
    if json.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let script: Script = serde_json::from_str(json)?;
    log::debug!("parsed script with {} steps", script.len());
    Ok(script)
}

/// Read and parse a script file
pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Script> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read script '{}'", path.display()))?;
    parse(&json).with_context(|| format!("failed to parse script '{}'", path.display()))
}

/// Blocking variant of [`load`]
pub fn load_blocking(path: impl AsRef<Path>) -> anyhow::Result<Script> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script '{}'", path.display()))?;
    parse(&json).with_context(|| format!("failed to parse script '{}'", path.display()))
}
