// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parsimon chat` command implementation.
//!
//! Reads a chat request as JSON, routes it, and relays the selected
//! model's reply to stdout. Streamed fragments are flushed as they
//! arrive.

use std::io::{Read, Write};
use std::path::Path;

use futures::StreamExt;
use parsimon_config::ParsimonConfig;
use parsimon_core::{ChatRequest, ParsimonError};
use parsimon_pipe::{Pipe, PipeOutput};
use tracing::debug;

/// Reads and parses the request body from a file or stdin.
pub(crate) fn read_request(input: Option<&Path>) -> Result<ChatRequest, ParsimonError> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| ParsimonError::Input(format!("cannot read {}: {e}", path.display())))?,
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .map_err(|e| ParsimonError::Input(format!("cannot read stdin: {e}")))?;
            body
        }
    };

    serde_json::from_str(&body)
        .map_err(|e| ParsimonError::Input(format!("invalid request JSON: {e}")))
}

/// Runs the `parsimon chat` command.
pub async fn run_chat(config: ParsimonConfig, input: Option<&Path>) -> Result<(), ParsimonError> {
    let request = read_request(input)?;
    debug!(messages = request.messages.len(), stream = request.stream, "chat request read");

    let pipe = Pipe::new(config)?;
    match pipe.run(request).await {
        PipeOutput::Text(text) => {
            println!("{text}");
        }
        PipeOutput::Stream(mut fragments) => {
            let mut stdout = std::io::stdout();
            while let Some(fragment) = fragments.next().await {
                write!(stdout, "{fragment}")
                    .and_then(|()| stdout.flush())
                    .map_err(|e| ParsimonError::Internal(format!("stdout write failed: {e}")))?;
            }
            writeln!(stdout)
                .map_err(|e| ParsimonError::Internal(format!("stdout write failed: {e}")))?;
        }
    }

    Ok(())
}
