//! Correction suggestions: account similarity and remediation proposals.

pub mod engine;
pub mod similarity;
pub mod types;

pub use engine::CorrectionEngine;
pub use similarity::AccountSimilarityScorer;
pub use types::{CorrectionAction, CorrectionSuggestion};
