// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing policy: composes continuity detection and complexity
//! classification into a single per-request decision.

use parsimon_core::{ChatMessage, ChatProvider, ModelRegistry, ParsimonError};
use strum::Display;
use tracing::{debug, info};

use crate::classifier::{self, ClassificationAttempt};
use crate::continuity;

/// How a routing decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DecisionSource {
    /// Reused the model detected in the previous assistant reply.
    Continuity,
    /// The routing model produced a parseable label.
    Classification,
    /// Classification degraded to the fail-safe default.
    Fallback,
}

/// One routing decision, created fresh per request and never shared.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Identifier of the model that should answer.
    pub selected_model: String,
    /// Advisory confidence in `[0, 1]`; diagnostics only, never branched on.
    pub confidence: f32,
    /// How the decision was reached.
    pub source: DecisionSource,
}

/// A routing decision plus the diagnostic record that produced it.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub decision: RoutingDecision,
    /// Classification attempt, or the minimal reuse record on continuity.
    pub attempt: Option<ClassificationAttempt>,
}

/// Routes a conversation to a model.
///
/// Continuity is consulted first (when enabled) and short-circuits
/// classification entirely, so mid-conversation turns cost no extra call.
/// At most one outbound classification call is made.
///
/// # Errors
/// `ParsimonError::Input` when the conversation has no `user` turn.
pub async fn route(
    provider: &dyn ChatProvider,
    registry: &ModelRegistry,
    messages: &[ChatMessage],
    continuity_enabled: bool,
    classify_max_tokens: u32,
) -> Result<RouteOutcome, ParsimonError> {
    let user_query = messages
        .iter()
        .rev()
        .find(|message| message.role == "user")
        .map(|message| message.content.as_str())
        .ok_or_else(|| ParsimonError::Input("no user query found".to_string()))?;

    if continuity_enabled
        && let Some(entry) = continuity::detect(messages, registry)
    {
        info!(model = %entry.identifier, "continuing with previous model");
        return Ok(RouteOutcome {
            decision: RoutingDecision {
                selected_model: entry.identifier.clone(),
                confidence: 1.0,
                source: DecisionSource::Continuity,
            },
            attempt: Some(reuse_record(&entry.identifier)),
        });
    }

    debug!("no previous model detected, classifying request");
    let classification = classifier::classify(provider, registry, user_query, classify_max_tokens).await;

    let source = if classification.attempt.parsed_label.is_some() {
        DecisionSource::Classification
    } else {
        DecisionSource::Fallback
    };
    info!(
        model = %classification.model,
        confidence = classification.confidence,
        source = %source,
        "request routed"
    );

    Ok(RouteOutcome {
        decision: RoutingDecision {
            selected_model: classification.model,
            confidence: classification.confidence,
            source,
        },
        attempt: Some(classification.attempt),
    })
}

/// Minimal diagnostic record for the continuity path, for debug display.
fn reuse_record(identifier: &str) -> ClassificationAttempt {
    ClassificationAttempt {
        prompt: "model reused from previous conversation".to_string(),
        raw_reply: Some(format!("REUSED: {identifier}")),
        parsed_label: None,
        error_detail: None,
    }
}
