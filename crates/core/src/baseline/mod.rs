//! Statistical amount baseline for outlier detection.

pub mod estimator;

pub use estimator::{Baseline, BaselineStats};
