// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-completions provider for the Parsimon router.
//!
//! This crate implements [`ChatProvider`] for OpenAI-style
//! `/chat/completions` endpoints, providing both single-shot completion
//! and streaming SSE responses.

pub mod client;
pub mod sse;
pub mod types;

use async_trait::async_trait;
use parsimon_config::ParsimonConfig;
use parsimon_core::{
    ChatProvider, ParsimonError, ProviderRequest, ProviderResponse, TextStream,
};
use std::time::Duration;
use tracing::info;

use crate::client::OpenAiClient;
use crate::types::ChatCompletionRequest;

/// [`ChatProvider`] implementation backed by [`OpenAiClient`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from the given configuration.
    pub fn new(config: &ParsimonConfig) -> Result<Self, ParsimonError> {
        let api_key = resolve_api_key(&config.api.api_key)?;
        let client = OpenAiClient::new(
            &api_key,
            &config.api.base_url,
            Duration::from_secs(config.routing.classify_timeout_secs),
            Duration::from_secs(config.routing.generate_timeout_secs),
        )?;

        info!(base_url = %config.api.base_url, "chat-completions provider initialized");

        Ok(Self { client })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ParsimonError> {
        let api_request = ChatCompletionRequest::from(&request);
        let response = self.client.complete(&api_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ParsimonError::Provider {
                message: "no choices in response".to_string(),
                source: None,
            })?;

        Ok(ProviderResponse {
            content: choice.message.content.unwrap_or_default(),
            model: response.model.unwrap_or(request.model),
            finish_reason: choice.finish_reason,
        })
    }

    async fn stream(&self, request: ProviderRequest) -> Result<TextStream, ParsimonError> {
        let api_request = ChatCompletionRequest::from(&request);
        self.client.stream(&api_request).await
    }
}

/// Resolves the API key from config or the `OPENAI_API_KEY` environment variable.
fn resolve_api_key(configured: &Option<String>) -> Result<String, ParsimonError> {
    if let Some(key) = configured
        && !key.trim().is_empty()
    {
        return Ok(key.clone());
    }
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ParsimonError::Config(
            "API key not configured (set api.api_key or OPENAI_API_KEY)".to_string(),
        )),
    }
}
