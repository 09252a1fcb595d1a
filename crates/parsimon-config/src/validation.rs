// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty model identifiers and positive timeouts.

use crate::diagnostic::ConfigError;
use crate::model::ParsimonConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ParsimonConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    for (key, identifier) in [
        ("models.light", &config.models.light),
        ("models.heavy", &config.models.heavy),
        ("models.routing", &config.models.routing),
    ] {
        if identifier.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if config.routing.classify_max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.classify_max_tokens must be positive".to_string(),
        });
    }

    if config.routing.classify_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.classify_timeout_secs must be positive".to_string(),
        });
    }

    if config.routing.generate_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.generate_timeout_secs must be positive".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
