// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The usage-marker grammar shared by the relay formatter and the
//! continuity parser.
//!
//! An assistant reply is prefixed with `[Usage of <model>]`, and the next
//! turn's continuity detection parses that marker back out. The two sides
//! are a closed loop, so the exact literal lives only here.

use std::sync::LazyLock;

use regex::Regex;

static USAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    // Matches `[Usage of <name>]` case-insensitively; <name> is any non-`]` text.
    Regex::new(r"(?i)\[usage of ([^\]]+)\]").expect("usage marker regex is valid")
});

/// Formats the usage marker for a model identifier.
pub fn format_usage_marker(model: &str) -> String {
    format!("[Usage of {model}]")
}

/// Extracts the model name from the first usage marker in `text`, if any.
///
/// Surrounding rendering (bold `**…**`, leading debug text) is irrelevant;
/// the returned name is trimmed.
pub fn parse_usage_marker(text: &str) -> Option<String> {
    USAGE_MARKER
        .captures(text)
        .map(|captures| captures[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_then_parse_round_trips() {
        let marker = format_usage_marker("gpt-5");
        assert_eq!(marker, "[Usage of gpt-5]");
        assert_eq!(parse_usage_marker(&marker), Some("gpt-5".to_string()));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            parse_usage_marker("[usage of gpt-5-mini]"),
            Some("gpt-5-mini".to_string())
        );
        assert_eq!(
            parse_usage_marker("[USAGE OF gpt-5]"),
            Some("gpt-5".to_string())
        );
    }

    #[test]
    fn parse_ignores_bold_wrapping_and_surrounding_text() {
        let text = "**[Usage of gpt-5]**\n\nHere is the answer.";
        assert_eq!(parse_usage_marker(text), Some("gpt-5".to_string()));
    }

    #[test]
    fn parse_trims_captured_name() {
        assert_eq!(
            parse_usage_marker("[Usage of  gpt-5 ]"),
            Some("gpt-5".to_string())
        );
    }

    #[test]
    fn parse_returns_none_without_marker() {
        assert_eq!(parse_usage_marker("just an ordinary answer"), None);
        assert_eq!(parse_usage_marker("[Usage of ]"), None);
    }
}
