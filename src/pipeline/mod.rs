//! Batch analysis pipeline
//!
//! Orders frames, splits them into participant × trial × segment groups,
//! runs fixation detection per group, extracts per-trial transitions, and
//! aggregates them into the dense cohort matrix. One `run` call is one
//! complete, stateless batch.

pub mod runner;

pub use runner::{AnalysisOutput, AnalysisPipeline, PipelineStats};
