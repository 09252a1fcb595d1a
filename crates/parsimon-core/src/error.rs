// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Parsimon router.

use thiserror::Error;

/// The primary error type used across the Parsimon workspace.
#[derive(Debug, Error)]
pub enum ParsimonError {
    /// Configuration errors (missing API key, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid inbound request (empty message list, no user turn).
    #[error("input error: {0}")]
    Input(String),

    /// Chat API errors (transport failure, non-200 status, malformed reply).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation exceeded its time bound.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
