// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parsimon route` command implementation.
//!
//! Routes a conversation and prints the decision without calling the
//! selected model. Useful for inspecting routing behavior; note that a
//! fresh conversation still costs one classification call.

use std::path::Path;

use parsimon_config::ParsimonConfig;
use parsimon_core::ParsimonError;
use parsimon_pipe::Pipe;

use crate::chat::read_request;

/// Runs the `parsimon route` command.
pub async fn run_route(config: ParsimonConfig, input: Option<&Path>) -> Result<(), ParsimonError> {
    let request = read_request(input)?;

    let pipe = Pipe::new(config)?;
    let outcome = pipe.route_only(&request.messages).await?;

    println!("model: {}", outcome.decision.selected_model);
    println!("source: {}", outcome.decision.source);
    println!("confidence: {:.1}", outcome.decision.confidence);
    if let Some(attempt) = &outcome.attempt
        && let Some(raw) = &attempt.raw_reply
    {
        println!("raw reply: {raw}");
    }

    Ok(())
}
