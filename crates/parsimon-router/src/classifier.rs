// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-based complexity classification.
//!
//! Asks the configured routing model to label the latest user request as
//! `light` or `heavy`. Classification never fails: transport errors, empty
//! replies, and unparseable labels all degrade to the light model at
//! reduced confidence, with the failure captured in the diagnostic record.

use parsimon_core::{ChatMessage, ChatProvider, ModelRegistry, ProviderRequest, SamplingParams};
use strum::Display;
use tracing::{debug, warn};

/// Confidence attached to a parsed label.
const LABEL_CONFIDENCE: f32 = 0.9;
/// Confidence attached to the fail-safe default.
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// The binary complexity label the routing model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ComplexityLabel {
    Light,
    Heavy,
}

/// Diagnostic record of one classification attempt.
///
/// Captured on every path, including fail-safe degrades, and surfaced by
/// the relay when debug output is enabled. Request-scoped.
#[derive(Debug, Clone)]
pub struct ClassificationAttempt {
    /// The exact prompt sent to the routing model.
    pub prompt: String,
    /// Raw reply text, when a reply was received.
    pub raw_reply: Option<String>,
    /// The label parsed from the reply, if any.
    pub parsed_label: Option<ComplexityLabel>,
    /// Failure detail for degraded classifications.
    pub error_detail: Option<String>,
}

/// Outcome of classifying one user query.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Identifier of the model the query should be routed to.
    pub model: String,
    /// Advisory confidence in `[0, 1]`, for diagnostics only.
    pub confidence: f32,
    /// Diagnostic record of the attempt.
    pub attempt: ClassificationAttempt,
}

/// Builds the fixed instruction prompt embedding the user's query verbatim.
fn build_prompt(user_query: &str) -> String {
    format!(
        r#"Analyze this user request and decide which model should handle it:

    "light" for: translations, summaries, simple questions, formatting, basic tasks
    "heavy" for: complex reasoning, coding, analysis, research, multi-step problems

User request: "{user_query}"

Answer with ONLY: light OR heavy"#
    )
}

/// Classifies a user query by asking the routing model for a binary label.
///
/// Exactly one non-streaming completion call; never returns an error. The
/// reply is matched by case-insensitive substring, `heavy` checked first so
/// a reply mentioning both words escalates rather than downgrades.
pub async fn classify(
    provider: &dyn ChatProvider,
    registry: &ModelRegistry,
    user_query: &str,
    max_tokens: u32,
) -> Classification {
    let prompt = build_prompt(user_query);
    let routing = registry.routing();

    let request = ProviderRequest {
        model: routing.identifier.clone(),
        messages: vec![ChatMessage::user(prompt.clone())],
        stream: false,
        sampling: SamplingParams::default(),
        token_limit: Some(routing.token_limit(max_tokens)),
    };

    let reply = match provider.complete(request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "classification call failed, degrading to light model");
            return fallback(prompt, None, format!("classification call failed: {e}"), registry);
        }
    };

    let content = reply.content.trim().to_lowercase();
    if content.is_empty() {
        let detail = format!(
            "empty content; finish reason: {}",
            reply.finish_reason.as_deref().unwrap_or("N/A")
        );
        return fallback(prompt, Some(content), detail, registry);
    }

    // `heavy` first: a reply containing both words must escalate.
    let label = if content.contains("heavy") {
        ComplexityLabel::Heavy
    } else if content.contains("light") {
        ComplexityLabel::Light
    } else {
        let detail = format!("unexpected reply format: '{content}'");
        return fallback(prompt, Some(content), detail, registry);
    };

    let model = match label {
        ComplexityLabel::Heavy => registry.heavy(),
        ComplexityLabel::Light => registry.light(),
    };
    debug!(label = %label, model = %model.identifier, "query classified");

    Classification {
        model: model.identifier.clone(),
        confidence: LABEL_CONFIDENCE,
        attempt: ClassificationAttempt {
            prompt,
            raw_reply: Some(content),
            parsed_label: Some(label),
            error_detail: None,
        },
    }
}

/// The fail-safe path: degrade to the cheaper model rather than escalate
/// cost on uncertainty.
fn fallback(
    prompt: String,
    raw_reply: Option<String>,
    error_detail: String,
    registry: &ModelRegistry,
) -> Classification {
    Classification {
        model: registry.light().identifier.clone(),
        confidence: FALLBACK_CONFIDENCE,
        attempt: ClassificationAttempt {
            prompt,
            raw_reply,
            parsed_label: None,
            error_detail: Some(error_detail),
        },
    }
}
