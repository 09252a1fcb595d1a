// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution pipeline: route an inbound conversation, dispatch it to the
//! selected model, and frame the reply.
//!
//! The pipe never surfaces an `Err` to its caller. Every failure is folded
//! into the reply text itself, so the caller always has something to show.

pub mod debug;

use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt, stream};
use parsimon_config::ParsimonConfig;
use parsimon_core::{
    ChatProvider, ChatRequest, ModelRegistry, ParsimonError, ProviderRequest, TokenLimit,
    format_usage_marker,
};
use parsimon_openai::OpenAiProvider;
use parsimon_router::{self as router, RouteOutcome};
use tracing::{info, warn};

/// A reply: either fully materialized text or a stream of text fragments.
///
/// Stream items are plain `String`s. A mid-stream transport failure is
/// folded into a final fragment rather than an error item, so any text
/// produced before the failure is preserved.
pub enum PipeOutput {
    Text(String),
    Stream(Pin<Box<dyn Stream<Item = String> + Send>>),
}

impl PipeOutput {
    /// Collects the output into a single string. Mostly useful in tests
    /// and for non-interactive callers.
    pub async fn collect(self) -> String {
        match self {
            PipeOutput::Text(text) => text,
            PipeOutput::Stream(stream) => stream.collect::<Vec<_>>().await.concat(),
        }
    }
}

/// The request pipeline: routing, dispatch, and reply framing.
pub struct Pipe {
    config: ParsimonConfig,
    registry: ModelRegistry,
    provider: Arc<dyn ChatProvider>,
}

impl Pipe {
    /// Builds a pipe backed by the chat-completions transport.
    ///
    /// # Errors
    /// `ParsimonError::Config` when no API key is available.
    pub fn new(config: ParsimonConfig) -> Result<Self, ParsimonError> {
        let provider = Arc::new(OpenAiProvider::new(&config)?);
        Ok(Self::with_provider(config, provider))
    }

    /// Builds a pipe over an arbitrary provider. Test seam.
    pub fn with_provider(config: ParsimonConfig, provider: Arc<dyn ChatProvider>) -> Self {
        let registry = config.registry();
        Self {
            config,
            registry,
            provider,
        }
    }

    /// Routes the conversation without generating a reply.
    ///
    /// # Errors
    /// `ParsimonError::Input` when the conversation has no `user` turn.
    pub async fn route_only(&self, messages: &[parsimon_core::ChatMessage]) -> Result<RouteOutcome, ParsimonError> {
        router::route(
            self.provider.as_ref(),
            &self.registry,
            messages,
            self.config.routing.keep_model_in_conversation,
            self.config.routing.classify_max_tokens,
        )
        .await
    }

    /// Handles one inbound request end to end.
    ///
    /// Always returns output; errors become reply text.
    pub async fn run(&self, request: ChatRequest) -> PipeOutput {
        if request.messages.is_empty() {
            return PipeOutput::Text("Error: no messages provided".to_string());
        }

        let outcome = match self.route_only(&request.messages).await {
            Ok(outcome) => outcome,
            Err(err) => return PipeOutput::Text(format!("Error: {err}")),
        };

        let selected = outcome.decision.selected_model.clone();
        info!(
            model = %selected,
            source = %outcome.decision.source,
            confidence = outcome.decision.confidence,
            "dispatching generation"
        );

        let provider_request = match self.build_provider_request(&request, &selected) {
            Ok(provider_request) => provider_request,
            Err(err) => return PipeOutput::Text(format!("Error: {err}")),
        };

        let prelude = self.prelude(&outcome, &selected);

        if request.stream {
            self.run_streaming(provider_request, prelude).await
        } else {
            self.run_complete(provider_request, prelude).await
        }
    }

    /// Assembles the generation request for the selected model, applying
    /// the token-limit field that model accepts.
    fn build_provider_request(
        &self,
        request: &ChatRequest,
        selected: &str,
    ) -> Result<ProviderRequest, ParsimonError> {
        let entry = self
            .registry
            .resolve_identifier(selected)
            .ok_or_else(|| {
                ParsimonError::Internal(format!("selected model '{selected}' is not registered"))
            })?;

        // Only the field the selected model accepts is honored; a bound
        // given in the other field is ignored, not translated.
        let bound = if entry.uses_completion_token_param {
            request.max_completion_tokens
        } else {
            request.max_tokens
        };
        let token_limit: Option<TokenLimit> = bound.map(|value| entry.token_limit(value));

        Ok(ProviderRequest {
            model: selected.to_string(),
            messages: request.messages.clone(),
            stream: request.stream,
            sampling: request.sampling.clone(),
            token_limit,
        })
    }

    /// Text emitted before the model's reply: the bold usage marker the
    /// continuity detector reads back on the next turn, then the optional
    /// debug block.
    fn prelude(&self, outcome: &RouteOutcome, selected: &str) -> String {
        let mut prelude = String::new();
        if self.config.routing.show_model_used {
            prelude.push_str(&format!("**{}**\n\n", format_usage_marker(selected)));
        }
        if self.config.routing.debug_routing {
            prelude.push_str(&debug::render_debug_block(
                outcome,
                &self.registry.routing().identifier,
            ));
        }
        prelude
    }

    async fn run_complete(&self, request: ProviderRequest, prelude: String) -> PipeOutput {
        match self.provider.complete(request).await {
            Ok(response) => PipeOutput::Text(format!("{prelude}{}", response.content)),
            Err(err) => {
                warn!(error = %err, "generation failed");
                PipeOutput::Text(format!("Error: {err}"))
            }
        }
    }

    async fn run_streaming(&self, request: ProviderRequest, prelude: String) -> PipeOutput {
        let upstream = match self.provider.stream(request).await {
            Ok(upstream) => upstream,
            Err(err) => {
                warn!(error = %err, "streaming request failed");
                return PipeOutput::Text(format!("Error: {err}"));
            }
        };

        // Fold transport errors into a trailing text fragment and stop;
        // everything received before the failure is kept.
        let body = upstream
            .scan(false, |failed, item| {
                if *failed {
                    return futures::future::ready(None);
                }
                let fragment = match item {
                    Ok(text) => text,
                    Err(err) => {
                        *failed = true;
                        format!("\n\nError during streaming: {err}")
                    }
                };
                futures::future::ready(Some(fragment))
            });

        let head = stream::iter(if prelude.is_empty() {
            None
        } else {
            Some(prelude)
        });

        PipeOutput::Stream(Box::pin(head.chain(body)))
    }
}
