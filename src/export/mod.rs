//! Output tables and run summaries
//!
//! Serializes the pipeline's tables to JSON for external statistics tooling
//! and renders a human-readable markdown summary per run.

pub mod summary;
pub mod tables;

pub use summary::SummaryBuilder;
pub use tables::TableWriter;
