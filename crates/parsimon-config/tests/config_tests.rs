// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Parsimon configuration system.

use parsimon_config::diagnostic::{ConfigError, suggest_key};
use parsimon_config::model::ParsimonConfig;
use parsimon_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_parsimon_config() {
    let toml = r#"
log_level = "debug"

[api]
api_key = "sk-test-123"
base_url = "https://api.example.com/v1"

[models]
light = "gpt-5-mini"
heavy = "gpt-5"
routing = "gpt-5-nano"

[routing]
keep_model_in_conversation = false
debug_routing = true
show_model_used = false
classify_max_tokens = 500
classify_timeout_secs = 10
generate_timeout_secs = 120
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.api.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.api.base_url, "https://api.example.com/v1");
    assert_eq!(config.models.light, "gpt-5-mini");
    assert_eq!(config.models.heavy, "gpt-5");
    assert_eq!(config.models.routing, "gpt-5-nano");
    assert!(!config.routing.keep_model_in_conversation);
    assert!(config.routing.debug_routing);
    assert!(!config.routing.show_model_used);
    assert_eq!(config.routing.classify_max_tokens, 500);
    assert_eq!(config.routing.classify_timeout_secs, 10);
    assert_eq!(config.routing.generate_timeout_secs, 120);
}

/// Missing sections fall back to defaults without error.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.api.base_url, "https://api.openai.com/v1");
    assert!(config.api.api_key.is_none());
    assert_eq!(config.models.light, "gpt-5-mini");
    assert_eq!(config.models.heavy, "gpt-5");
    assert_eq!(config.models.routing, "gpt-5-nano");
    assert!(config.routing.keep_model_in_conversation);
    assert!(!config.routing.debug_routing);
    assert!(config.routing.show_model_used);
    assert_eq!(config.routing.classify_max_tokens, 1000);
    assert_eq!(config.routing.classify_timeout_secs, 30);
    assert_eq!(config.routing.generate_timeout_secs, 600);
}

/// Unknown field in [models] produces an UnknownField error.
#[test]
fn unknown_field_in_models_produces_error() {
    let toml = r#"
[models]
ligt = "gpt-5-mini"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("ligt"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// load_and_validate_str converts figment errors into diagnostics
/// carrying a typo suggestion.
#[test]
fn unknown_key_diagnostic_carries_suggestion() {
    let toml = r#"
[routing]
debug_rouing = true
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("an UnknownKey diagnostic should be produced");
    assert_eq!(unknown.0, "debug_rouing");
    assert_eq!(unknown.1.as_deref(), Some("debug_routing"));
}

/// Wrong value types surface as InvalidType diagnostics.
#[test]
fn wrong_type_produces_invalid_type_diagnostic() {
    let toml = r#"
[routing]
classify_max_tokens = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "expected an InvalidType diagnostic, got: {errors:?}"
    );
}

/// Semantic validation rejects empty model identifiers.
#[test]
fn validation_rejects_empty_model_identifier() {
    let toml = r#"
[models]
routing = ""
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject empty identifier");
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("models.routing")),
        "expected a models.routing validation error, got: {errors:?}"
    );
}

/// The registry built from config carries the capability flags.
#[test]
fn registry_reflects_configured_identifiers() {
    let toml = r#"
[models]
light = "gpt-4o-mini"
heavy = "gpt-5"
routing = "gpt-4o-mini"
"#;

    let config = load_config_from_str(toml).unwrap();
    let registry = config.registry();
    assert_eq!(registry.light().identifier, "gpt-4o-mini");
    assert!(!registry.light().uses_completion_token_param);
    assert!(registry.heavy().uses_completion_token_param);
}

/// suggest_key is exposed for reuse and respects its threshold.
#[test]
fn suggest_key_threshold() {
    let valid = &["keep_model_in_conversation", "show_model_used"];
    assert_eq!(
        suggest_key("show_model_usd", valid),
        Some("show_model_used".to_string())
    );
    assert_eq!(suggest_key("qqqq", valid), None);
}

/// Environment variables override file values via the PARSIMON_ prefix,
/// with underscore-containing key names mapped correctly.
#[test]
#[serial_test::serial]
fn env_vars_override_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parsimon.toml");
    std::fs::write(&path, "[models]\nheavy = \"gpt-5\"\n").unwrap();

    // SAFETY: serialized with other env-mutating tests via serial_test.
    unsafe {
        std::env::set_var("PARSIMON_MODELS_HEAVY", "gpt-5-pro");
        std::env::set_var("PARSIMON_ROUTING_CLASSIFY_MAX_TOKENS", "250");
    }
    let config = parsimon_config::load_config_from_path(&path).unwrap();
    unsafe {
        std::env::remove_var("PARSIMON_MODELS_HEAVY");
        std::env::remove_var("PARSIMON_ROUTING_CLASSIFY_MAX_TOKENS");
    }

    assert_eq!(config.models.heavy, "gpt-5-pro");
    assert_eq!(config.routing.classify_max_tokens, 250);
}

/// Defaults round-trip through the Default impl and figment serialization.
#[test]
fn default_struct_matches_loaded_defaults() {
    let loaded = load_config_from_str("").unwrap();
    let default = ParsimonConfig::default();
    assert_eq!(loaded.models.light, default.models.light);
    assert_eq!(loaded.routing.classify_max_tokens, default.routing.classify_max_tokens);
}
