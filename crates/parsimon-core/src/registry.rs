// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static model registry mapping logical roles to concrete identifiers.
//!
//! Built once from configuration at startup and immutable afterwards. The
//! per-model capability flag (which token-limit field the model accepts) is
//! computed here, at construction time, so no call site ever re-derives it
//! from the identifier string.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::TokenLimit;

/// Logical role a configured model plays in routing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum ModelRole {
    /// Cheaper/faster model for low-complexity requests.
    Light,
    /// Higher-capability model for complex requests.
    Heavy,
    /// Small model used only to produce the light/heavy label.
    Routing,
}

/// A registered model: role, identifier, and capability flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub role: ModelRole,
    pub identifier: String,
    /// True when the model takes `max_completion_tokens` instead of `max_tokens`.
    pub uses_completion_token_param: bool,
}

impl ModelEntry {
    fn new(role: ModelRole, identifier: &str) -> Self {
        Self {
            role,
            identifier: identifier.to_string(),
            uses_completion_token_param: requires_completion_token_param(identifier),
        }
    }

    /// Wraps a token bound in the wire variant this model accepts.
    pub fn token_limit(&self, value: u32) -> TokenLimit {
        if self.uses_completion_token_param {
            TokenLimit::MaxCompletionTokens(value)
        } else {
            TokenLimit::MaxTokens(value)
        }
    }
}

/// The gpt-5 family rejects `max_tokens` in favor of `max_completion_tokens`.
fn requires_completion_token_param(identifier: &str) -> bool {
    identifier.starts_with("gpt-5")
}

/// Immutable mapping from [`ModelRole`] to configured [`ModelEntry`] values.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    light: ModelEntry,
    heavy: ModelEntry,
    routing: ModelEntry,
}

impl ModelRegistry {
    /// Builds a registry from the three configured model identifiers.
    pub fn new(light: &str, heavy: &str, routing: &str) -> Self {
        Self {
            light: ModelEntry::new(ModelRole::Light, light),
            heavy: ModelEntry::new(ModelRole::Heavy, heavy),
            routing: ModelEntry::new(ModelRole::Routing, routing),
        }
    }

    pub fn light(&self) -> &ModelEntry {
        &self.light
    }

    pub fn heavy(&self) -> &ModelEntry {
        &self.heavy
    }

    pub fn routing(&self) -> &ModelEntry {
        &self.routing
    }

    pub fn entry(&self, role: ModelRole) -> &ModelEntry {
        match role {
            ModelRole::Light => &self.light,
            ModelRole::Heavy => &self.heavy,
            ModelRole::Routing => &self.routing,
        }
    }

    /// Looks up an entry by exact identifier match.
    pub fn resolve_identifier(&self, identifier: &str) -> Option<&ModelEntry> {
        [&self.heavy, &self.light, &self.routing]
            .into_iter()
            .find(|entry| entry.identifier == identifier)
    }
}
