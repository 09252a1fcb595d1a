// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing decision engine for the Parsimon router.
//!
//! This crate provides:
//! - [`continuity`]: marker-based detection of the model that answered last
//! - [`classifier`]: LLM-labelled complexity classification with a fail-safe
//!   degrade path
//! - [`policy`]: the composition of both into one `(model, confidence)`
//!   decision per request
//!
//! All state is request-scoped: the policy returns values, nothing here
//! holds mutable fields across requests.

pub mod classifier;
pub mod continuity;
pub mod policy;

pub use classifier::{Classification, ClassificationAttempt, ComplexityLabel, classify};
pub use continuity::detect;
pub use policy::{DecisionSource, RouteOutcome, RoutingDecision, route};
