// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation-continuity detection.
//!
//! Looks for the usage marker left in the most recent assistant reply and
//! resolves it back to a registered model, so a conversation keeps talking
//! to the model that answered last instead of being reclassified every turn.

use parsimon_core::marker::parse_usage_marker;
use parsimon_core::{ChatMessage, ModelEntry, ModelRegistry};
use tracing::debug;

/// Detects which registered model answered the previous turn, if any.
///
/// Returns `None` for conversations with fewer than two turns, without an
/// assistant turn, without a usage marker, or whose marker name resolves to
/// no registered model. Pure function of its inputs.
pub fn detect<'a>(
    messages: &[ChatMessage],
    registry: &'a ModelRegistry,
) -> Option<&'a ModelEntry> {
    if messages.len() < 2 {
        return None;
    }

    let last_assistant = messages
        .iter()
        .rev()
        .find(|message| message.role == "assistant")?;

    let name = parse_usage_marker(&last_assistant.content)?;
    debug!(marker = %name, "usage marker found in previous assistant turn");

    resolve(&name, registry)
}

/// Resolves a marker name to a registered model using an ordered tie-break.
///
/// The marker text of a live reply may carry provider-added suffixes (dated
/// snapshot tags), so containment and prefix checks recover the logical
/// model when the literal string is not an exact match. When the marker is
/// shorter than a registered identifier, heavy is checked before light so
/// that one identifier being a substring of the other never causes a
/// downgrade. When the marker is the longer string (a snapshot tag), the
/// longest contained identifier wins: `gpt-5-mini-2025-08-07` contains both
/// `gpt-5` and `gpt-5-mini` and must stay on the light tier.
fn resolve<'a>(name: &str, registry: &'a ModelRegistry) -> Option<&'a ModelEntry> {
    let heavy = registry.heavy();
    let light = registry.light();

    // Priority 1: exact match.
    if name == heavy.identifier {
        debug!("exact match with heavy model");
        return Some(heavy);
    }
    if name == light.identifier {
        debug!("exact match with light model");
        return Some(light);
    }

    // Priority 2a: the marker name is contained in a registered identifier
    // (short marker against a snapshot-configured identifier).
    if heavy.identifier.contains(name) {
        debug!(marker = %name, heavy = %heavy.identifier, "partial match with heavy model");
        return Some(heavy);
    }
    if light.identifier.contains(name) {
        debug!(marker = %name, light = %light.identifier, "partial match with light model");
        return Some(light);
    }

    // Priority 2b: the marker name contains a registered identifier (dated
    // snapshot marker). Most specific identifier wins; heavy on a tie.
    if let Some(entry) = [light, heavy]
        .into_iter()
        .filter(|entry| name.contains(&entry.identifier))
        .max_by_key(|entry| entry.identifier.len())
    {
        debug!(marker = %name, matched = %entry.identifier, "snapshot marker contains identifier");
        return Some(entry);
    }

    // Priority 3: identifier starts with the marker name. Subsumed by the
    // containment checks above; kept to pin the documented resolution order.
    if heavy.identifier.starts_with(name) {
        debug!(marker = %name, "heavy model starts with marker name");
        return Some(heavy);
    }
    if light.identifier.starts_with(name) {
        debug!(marker = %name, "light model starts with marker name");
        return Some(light);
    }

    debug!(marker = %name, "no registered model matches marker name");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsimon_core::{ModelRole, marker::format_usage_marker};

    fn registry() -> ModelRegistry {
        ModelRegistry::new("gpt-5-mini", "gpt-5", "gpt-5-nano")
    }

    fn conversation(assistant_text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("first question"),
            ChatMessage::assistant(assistant_text),
            ChatMessage::user("follow up"),
        ]
    }

    #[test]
    fn fewer_than_two_turns_yields_nothing() {
        let registry = registry();
        assert!(detect(&[], &registry).is_none());
        assert!(detect(&[ChatMessage::user("hi")], &registry).is_none());
    }

    #[test]
    fn conversation_without_assistant_turn_yields_nothing() {
        let registry = registry();
        let messages = vec![ChatMessage::user("one"), ChatMessage::user("two")];
        assert!(detect(&messages, &registry).is_none());
    }

    #[test]
    fn assistant_text_without_marker_yields_nothing() {
        let registry = registry();
        let messages = conversation("a plain answer with no marker");
        assert!(detect(&messages, &registry).is_none());
    }

    #[test]
    fn exact_light_match_beats_heavy_substring() {
        // "gpt-5" is a substring of "gpt-5-mini"; the exact-match rule and
        // ordering must keep the marker resolving to the light model.
        let registry = registry();
        let messages = conversation("**[Usage of gpt-5-mini]** answer");
        let entry = detect(&messages, &registry).unwrap();
        assert_eq!(entry.role, ModelRole::Light);
    }

    #[test]
    fn exact_heavy_match_resolves_to_heavy() {
        let registry = registry();
        let messages = conversation("**[Usage of gpt-5]** answer text");
        let entry = detect(&messages, &registry).unwrap();
        assert_eq!(entry.role, ModelRole::Heavy);
    }

    #[test]
    fn dated_snapshot_marker_resolves_to_heavy() {
        // A live API reply may echo a dated snapshot identifier. The marker
        // is neither an exact match nor contained in the light identifier,
        // but it contains the heavy identifier.
        let registry = registry();
        let messages = conversation("[Usage of gpt-5-2025-08-07]");
        let entry = detect(&messages, &registry).unwrap();
        assert_eq!(entry.role, ModelRole::Heavy);
    }

    #[test]
    fn light_snapshot_marker_stays_on_light_tier() {
        // `gpt-5-mini-2025-08-07` contains both `gpt-5` and `gpt-5-mini`;
        // the longest identifier wins, so the conversation is not escalated.
        let registry = registry();
        let messages = conversation("[Usage of gpt-5-mini-2025-08-07]");
        let entry = detect(&messages, &registry).unwrap();
        assert_eq!(entry.role, ModelRole::Light);
    }

    #[test]
    fn short_marker_resolves_against_snapshot_configured_identifier() {
        let snapshot_registry =
            ModelRegistry::new("gpt-5-mini-2025-08-07", "gpt-5-pro-2025-08-07", "gpt-5-nano");
        let messages = conversation("[Usage of gpt-5-pro]");
        let entry = detect(&messages, &snapshot_registry).unwrap();
        assert_eq!(entry.role, ModelRole::Heavy);
    }

    #[test]
    fn unknown_marker_name_falls_through() {
        let registry = registry();
        let messages = conversation("[Usage of some-other-model]");
        assert!(detect(&messages, &registry).is_none());
    }

    #[test]
    fn marker_is_matched_case_insensitively() {
        let registry = registry();
        let messages = conversation("[usage of gpt-5]");
        let entry = detect(&messages, &registry).unwrap();
        assert_eq!(entry.role, ModelRole::Heavy);
    }

    #[test]
    fn most_recent_assistant_turn_wins() {
        let registry = registry();
        let messages = vec![
            ChatMessage::user("q1"),
            ChatMessage::assistant("[Usage of gpt-5-mini] a1"),
            ChatMessage::user("q2"),
            ChatMessage::assistant("[Usage of gpt-5] a2"),
            ChatMessage::user("q3"),
        ];
        let entry = detect(&messages, &registry).unwrap();
        assert_eq!(entry.role, ModelRole::Heavy);
    }

    #[test]
    fn detection_is_idempotent() {
        let registry = registry();
        let messages = conversation(&format!("**{}** text", format_usage_marker("gpt-5")));
        let first = detect(&messages, &registry).map(|e| e.identifier.clone());
        let second = detect(&messages, &registry).map(|e| e.identifier.clone());
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("gpt-5"));
    }
}
