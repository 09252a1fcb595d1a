// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Parsimon router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use parsimon_core::ModelRegistry;
use serde::{Deserialize, Serialize};

/// Top-level Parsimon configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only `api.api_key` has no usable default.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParsimonConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chat-completion API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Model identifiers for the three routing roles.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Routing behavior settings.
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl Default for ParsimonConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            models: ModelsConfig::default(),
            routing: RoutingConfig::default(),
        }
    }
}

impl ParsimonConfig {
    /// Builds the immutable model registry from the configured identifiers.
    pub fn registry(&self) -> ModelRegistry {
        ModelRegistry::new(
            &self.models.light,
            &self.models.heavy,
            &self.models.routing,
        )
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Chat-completion API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL; `/chat/completions` is appended per request.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Model identifiers for the light, heavy, and routing roles.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Model for simple tasks (translation, summarization, formatting).
    #[serde(default = "default_light_model")]
    pub light: String,

    /// Model for complex tasks (reasoning, coding, analysis).
    #[serde(default = "default_heavy_model")]
    pub heavy: String,

    /// Small model used only to label request complexity.
    #[serde(default = "default_routing_model")]
    pub routing: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            light: default_light_model(),
            heavy: default_heavy_model(),
            routing: default_routing_model(),
        }
    }
}

fn default_light_model() -> String {
    "gpt-5-mini".to_string()
}

fn default_heavy_model() -> String {
    "gpt-5".to_string()
}

fn default_routing_model() -> String {
    "gpt-5-nano".to_string()
}

/// Routing behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Reuse the model detected in the previous assistant reply instead of
    /// reclassifying mid-conversation.
    #[serde(default = "default_keep_model_in_conversation")]
    pub keep_model_in_conversation: bool,

    /// Prefix replies with the routing debug block (prompt, raw reply,
    /// error detail). Off by default; it exposes the routing prompt.
    #[serde(default)]
    pub debug_routing: bool,

    /// Prefix replies with the `[Usage of <model>]` marker. Required for
    /// continuity to work across turns.
    #[serde(default = "default_show_model_used")]
    pub show_model_used: bool,

    /// Output-length bound for the classification call.
    #[serde(default = "default_classify_max_tokens")]
    pub classify_max_tokens: u32,

    /// Timeout for the classification call, in seconds.
    #[serde(default = "default_classify_timeout_secs")]
    pub classify_timeout_secs: u64,

    /// Timeout for the generation call, in seconds. Much larger than the
    /// classification bound to accommodate long streamed answers.
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            keep_model_in_conversation: default_keep_model_in_conversation(),
            debug_routing: false,
            show_model_used: default_show_model_used(),
            classify_max_tokens: default_classify_max_tokens(),
            classify_timeout_secs: default_classify_timeout_secs(),
            generate_timeout_secs: default_generate_timeout_secs(),
        }
    }
}

fn default_keep_model_in_conversation() -> bool {
    true
}

fn default_show_model_used() -> bool {
    true
}

fn default_classify_max_tokens() -> u32 {
    1000
}

fn default_classify_timeout_secs() -> u64 {
    30
}

fn default_generate_timeout_secs() -> u64 {
    600
}
