//! Common utilities shared by the inference algorithms and their evaluation.

pub mod linalg;
pub mod metrics;
