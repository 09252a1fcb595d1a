// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Parsimon router.
//!
//! Provides the shared error type, conversation and provider types, the
//! immutable model registry, the usage-marker grammar, and the
//! [`ChatProvider`] trait implemented by transport crates.

pub mod error;
pub mod marker;
pub mod provider;
pub mod registry;
pub mod types;

pub use error::ParsimonError;
pub use marker::{format_usage_marker, parse_usage_marker};
pub use provider::{ChatProvider, TextStream};
pub use registry::{ModelEntry, ModelRegistry, ModelRole};
pub use types::{
    ChatMessage, ChatRequest, ProviderRequest, ProviderResponse, SamplingParams, TokenLimit,
};
