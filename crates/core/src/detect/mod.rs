//! Error detection: rule checkers, duplicate matching, orchestration.
//!
//! Checkers are registered as an ordered collection behind the [`Check`]
//! trait, so new error types can be added without touching the engine.

pub mod checks;
pub mod duplicate;
pub mod engine;
pub mod finding;

#[cfg(test)]
mod engine_props;

pub use checks::{default_checks, Check, CheckContext};
pub use duplicate::DuplicateMatcher;
pub use engine::DetectionEngine;
pub use finding::{ErrorType, Finding, Severity};
