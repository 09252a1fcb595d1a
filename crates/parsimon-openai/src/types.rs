// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the chat-completions endpoint.

use parsimon_core::{ChatMessage, ProviderRequest, TokenLimit};
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,

    /// Output bound for models that take `max_tokens`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Output bound for models that take `max_completion_tokens`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

impl From<&ProviderRequest> for ChatCompletionRequest {
    fn from(request: &ProviderRequest) -> Self {
        let (max_tokens, max_completion_tokens) = match request.token_limit {
            Some(TokenLimit::MaxTokens(value)) => (Some(value), None),
            Some(TokenLimit::MaxCompletionTokens(value)) => (None, Some(value)),
            None => (None, None),
        };

        Self {
            model: request.model.clone(),
            messages: request.messages.clone(),
            stream: request.stream,
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
            frequency_penalty: request.sampling.frequency_penalty,
            presence_penalty: request.sampling.presence_penalty,
            max_tokens,
            max_completion_tokens,
        }
    }
}

/// Full (non-streamed) response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice in a full response.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// One `data:` payload of a streamed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// One choice inside a streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental delta inside a streamed choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope returned with non-200 statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detail payload of an API error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsimon_core::SamplingParams;

    fn provider_request(token_limit: Option<TokenLimit>) -> ProviderRequest {
        ProviderRequest {
            model: "gpt-5".into(),
            messages: vec![ChatMessage::user("hi")],
            stream: false,
            sampling: SamplingParams {
                temperature: Some(0.3),
                ..Default::default()
            },
            token_limit,
        }
    }

    #[test]
    fn token_limit_selects_wire_field() {
        let request =
            ChatCompletionRequest::from(&provider_request(Some(TokenLimit::MaxTokens(100))));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 100);
        assert!(json.get("max_completion_tokens").is_none());

        let request = ChatCompletionRequest::from(&provider_request(Some(
            TokenLimit::MaxCompletionTokens(200),
        )));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_completion_tokens"], 200);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn absent_sampling_params_are_skipped() {
        let request = ChatCompletionRequest::from(&provider_request(None));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], 0.3);
        assert!(json.get("top_p").is_none());
        assert!(json.get("presence_penalty").is_none());
    }

    #[test]
    fn chunk_parses_delta_content() {
        let chunk: ChatCompletionChunk = serde_json::from_str(
            r#"{"choices":[{"delta":{"content":"Hel"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hel"));
    }

    #[test]
    fn error_envelope_parses_type_field() {
        let err: ApiErrorResponse = serde_json::from_str(
            r#"{"error":{"message":"Rate limited","type":"rate_limit_error"}}"#,
        )
        .unwrap();
        assert_eq!(err.error.type_, "rate_limit_error");
    }
}
