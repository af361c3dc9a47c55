//! Shared types, errors, and configuration for ledgerlint.
//!
//! This crate provides common types used across the workspace:
//! - Typed IDs for type-safe entity references
//! - Detection configuration with defaults and environment loading
//! - Application-wide error types

pub mod config;
pub mod error;
pub mod types;

pub use config::DetectionConfig;
pub use error::{AppError, AppResult};
