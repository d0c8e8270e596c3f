//! Cohort aggregation
//!
//! Assigns transition observations to age-banded cohorts, averages a
//! caller-supplied count metric per participant×trial observation, and
//! fills the full cohort × AOI-pair cross-product with zeros so downstream
//! statistics always see a dense matrix.

pub mod cohorts;
pub mod matrix;

pub use cohorts::CohortAssigner;
pub use matrix::CohortAggregator;
