// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of the routing debug block prepended to replies when
//! `routing.debug_routing` is enabled.

use parsimon_router::{DecisionSource, RouteOutcome};

/// Renders the routing diagnostic record as a human-readable block.
pub fn render_debug_block(outcome: &RouteOutcome, routing_model: &str) -> String {
    let mut out = String::from("=== ROUTING DEBUG ===\n");

    if outcome.decision.source == DecisionSource::Continuity {
        out.push_str("**[CONTINUITY] Continuing with previous model (found in last response)**\n");
    } else {
        out.push_str("**[ROUTING] New analysis performed (no previous model detected)**\n");
    }

    out.push_str(&format!("Routing Model: {routing_model}\n"));
    out.push_str(&format!(
        "Selected: {} (confidence {:.1}, source {})\n",
        outcome.decision.selected_model, outcome.decision.confidence, outcome.decision.source
    ));

    if let Some(attempt) = &outcome.attempt {
        out.push_str(&format!(
            "Raw Response: '{}'\n\n",
            attempt.raw_reply.as_deref().unwrap_or("N/A")
        ));
        if let Some(detail) = &attempt.error_detail {
            out.push_str(&format!("Error Details:\n{detail}\n\n"));
        }
        out.push_str(&format!("Prompt sent:\n{}\n\n", attempt.prompt));
    }

    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");
    out
}
