// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parsimon config` command implementation.

use parsimon_config::ParsimonConfig;
use parsimon_core::ParsimonError;

/// Prints the fully resolved configuration as TOML, with the API key
/// masked.
pub fn run_config(config: &ParsimonConfig) -> Result<(), ParsimonError> {
    let mut redacted = config.clone();
    if redacted.api.api_key.is_some() {
        redacted.api.api_key = Some("********".to_string());
    }

    let rendered = toml::to_string_pretty(&redacted)
        .map_err(|e| ParsimonError::Internal(format!("cannot render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_config_masks_the_api_key() {
        let mut config = ParsimonConfig::default();
        config.api.api_key = Some("sk-secret".to_string());

        let mut redacted = config.clone();
        redacted.api.api_key = Some("********".to_string());
        let rendered = toml::to_string_pretty(&redacted).unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("********"));
    }

    #[test]
    fn default_config_renders_as_toml() {
        let rendered = toml::to_string_pretty(&ParsimonConfig::default()).unwrap();
        assert!(rendered.contains("[models]"));
        assert!(rendered.contains("heavy = \"gpt-5\""));
    }
}
