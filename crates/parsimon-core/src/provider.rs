// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for chat-completion transports.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ParsimonError;
use crate::types::{ProviderRequest, ProviderResponse};

/// A lazy, finite, non-restartable sequence of reply text fragments.
///
/// Terminated by the upstream end-of-stream marker or connection close.
/// Dropping the stream releases the underlying transport.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, ParsimonError>> + Send>>;

/// Transport seam between the routing core and the chat-completion API.
///
/// The router performs at most one `complete` call (classification) and the
/// pipe exactly one `complete` or `stream` call (generation) per request.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable name of the provider (for logs and debug output).
    fn name(&self) -> &str;

    /// Sends a non-streaming request and returns the full reply.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ParsimonError>;

    /// Sends a streaming request and returns the reply as text fragments.
    async fn stream(&self, request: ProviderRequest) -> Result<TextStream, ParsimonError>;
}
