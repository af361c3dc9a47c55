//! Core business logic for ledgerlint.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Entries and accounts are supplied by the caller as
//! in-memory snapshots; the engines read them and produce findings and
//! correction suggestions as new values, never mutating their inputs.
//!
//! # Modules
//!
//! - `journal` - Journal entry domain types and the account directory
//! - `baseline` - Statistical amount baseline for outlier detection
//! - `detect` - Rule checkers, duplicate matching, and the detection engine
//! - `suggest` - Account similarity scoring and correction suggestions

pub mod baseline;
pub mod detect;
pub mod journal;
pub mod suggest;
