// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the chat-completions endpoint.
//!
//! Provides [`OpenAiClient`] which handles request construction, bearer
//! authentication, and streaming SSE responses. There are no retries:
//! every failure is reported once and handled at the calling boundary.

use std::time::Duration;

use parsimon_core::{ParsimonError, TextStream};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::sse;
use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for chat-completion API communication.
///
/// Two time bounds apply: a short one for non-streaming (classification)
/// calls and a much larger one for streaming (generation) calls.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    completion_timeout: Duration,
    stream_timeout: Duration,
}

impl OpenAiClient {
    /// Creates a new chat-completion API client.
    ///
    /// # Arguments
    /// * `api_key` - bearer token for authentication
    /// * `base_url` - API base URL; `/chat/completions` is appended per request
    /// * `completion_timeout` - bound for non-streaming calls
    /// * `stream_timeout` - bound for streaming calls
    pub fn new(
        api_key: &str,
        base_url: &str,
        completion_timeout: Duration,
        stream_timeout: Duration,
    ) -> Result<Self, ParsimonError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| ParsimonError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ParsimonError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            completion_timeout,
            stream_timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ParsimonError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.completion_timeout)
            .json(&req)
            .send()
            .await
            .map_err(|e| request_error(e, self.completion_timeout))?;

        let status = response.status();
        debug!(status = %status, model = %req.model, "completion response received");

        if !status.is_success() {
            return Err(status_error(status, response).await);
        }

        let body = response.text().await.map_err(|e| ParsimonError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| ParsimonError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Sends a streaming request and returns a stream of text fragments.
    pub async fn stream(&self, request: &ChatCompletionRequest) -> Result<TextStream, ParsimonError> {
        let mut req = request.clone();
        req.stream = true;

        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.stream_timeout)
            .json(&req)
            .send()
            .await
            .map_err(|e| request_error(e, self.stream_timeout))?;

        let status = response.status();
        debug!(status = %status, model = %req.model, "streaming response received");

        if !status.is_success() {
            return Err(status_error(status, response).await);
        }

        Ok(sse::parse_sse_stream(response))
    }
}

/// Maps a reqwest send error, distinguishing elapsed time bounds.
fn request_error(e: reqwest::Error, bound: Duration) -> ParsimonError {
    if e.is_timeout() {
        ParsimonError::Timeout { duration: bound }
    } else {
        ParsimonError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

/// Renders a non-200 status into a provider error, using the API error
/// envelope when the body parses as one.
async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> ParsimonError {
    let body = response.text().await.unwrap_or_default();
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
        format!(
            "API error ({}): {}",
            api_err.error.type_, api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    };
    ParsimonError::Provider {
        message,
        source: None,
    }
}
