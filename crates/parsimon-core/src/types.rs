// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the router, the transport, and the pipe.

use serde::{Deserialize, Serialize};

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Turn role: `user`, `assistant`, or anything else the caller sends.
    pub role: String,
    /// Text content of the turn.
    pub content: String,
}

impl ChatMessage {
    /// Creates a `user` turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates an `assistant` turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// The inbound request body: a conversation plus generation options.
///
/// Mirrors the chat-completion request envelope. The conversation is owned
/// by the caller, created fresh per request, and never mutated here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// Ordered conversation turns. Routing requires at least one `user` turn.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    /// Whether the reply should be streamed. Defaults to true.
    #[serde(default = "default_stream")]
    pub stream: bool,

    /// Optional sampling parameters, forwarded verbatim to the selected model.
    #[serde(flatten)]
    pub sampling: SamplingParams,

    /// Token-limit override for models taking `max_tokens`.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Token-limit override for models taking `max_completion_tokens`.
    #[serde(default)]
    pub max_completion_tokens: Option<u32>,
}

fn default_stream() -> bool {
    true
}

/// Sampling parameters passed through to the generation call when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

/// Output-length bound, carrying the wire field name the target model accepts.
///
/// Which variant applies is decided once per model at registry construction
/// (see [`crate::registry::ModelEntry`]), not re-derived per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLimit {
    /// Serialized as `max_tokens`.
    MaxTokens(u32),
    /// Serialized as `max_completion_tokens`.
    MaxCompletionTokens(u32),
}

/// A request handed to a [`crate::ChatProvider`].
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Concrete model identifier to dispatch to.
    pub model: String,
    /// Full conversation to send.
    pub messages: Vec<ChatMessage>,
    /// Whether to stream the reply.
    pub stream: bool,
    /// Sampling parameters to forward.
    pub sampling: SamplingParams,
    /// Output-length bound, if any.
    pub token_limit: Option<TokenLimit>,
}

/// A complete (non-streamed) reply from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Concatenated text content. May be empty when the model produced none.
    pub content: String,
    /// Model identifier the API reports having used.
    pub model: String,
    /// Finish reason, when reported.
    pub finish_reason: Option<String>,
}
